//! Object command implementation

use anyhow::{bail, Result};
use sl_sql::{object, ObjectType, Scope};

use crate::cli::{ConnectionOpt, GlobalArgs, ObjectArgs, ObjectCommands};
use crate::commands::common::{print_statements, resolve_connection};

/// Execute the object command
pub fn execute(args: &ObjectArgs, global: &GlobalArgs) -> Result<()> {
    let (statement, connection) = match &args.command {
        ObjectCommands::List(list) => {
            let object_type: ObjectType = list.object_type.parse()?;
            if let Some(name) = &list.name {
                let name = object::object_name(object_type, name)?;
                let sql = object::show_by_name(object_type, &name)?;
                return print_for(global, &list.connection, sql);
            }
            let scope = match list.scope.as_deref() {
                Some([kind, name]) => Some(Scope::parse(kind, name)?),
                Some(other) => bail!("--in expects a scope and a name, got {:?}", other),
                None => None,
            };
            let sql = object::show(object_type, list.like.as_deref(), scope.as_ref())?;
            (sql, &list.connection)
        }
        ObjectCommands::Describe(describe) => {
            let object_type: ObjectType = describe.object_type.parse()?;
            let sql = object::describe(object_type, &describe.object_name)?;
            (sql, &describe.connection)
        }
        ObjectCommands::Drop(drop) => {
            let object_type: ObjectType = drop.object_type.parse()?;
            let sql = object::drop(object_type, &drop.object_name)?;
            (sql, &drop.connection)
        }
    };

    print_for(global, connection, statement)
}

fn print_for(global: &GlobalArgs, connection: &ConnectionOpt, statement: String) -> Result<()> {
    let connection = resolve_connection(global, connection)?;
    print_statements(global, &connection, &[statement])
}
