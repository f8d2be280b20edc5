//! Service command implementation

use anyhow::{Context, Result};
use sl_sql::compute_pool::pool_name;
use sl_sql::service::{self, service_name};
use sl_sql::{CreateService, SetService, Tag, UnsetService};
use std::path::Path;

use crate::cli::{GlobalArgs, ServiceArgs, ServiceCommands};
use crate::commands::common::{print_statements, resolve_connection};

/// Read a YAML specification file as embeddable JSON.
fn read_specification(path: &Path) -> Result<String> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read specification {}", path.display()))?;
    let json = service::specification_from_yaml(&yaml)
        .with_context(|| format!("Failed to parse specification {}", path.display()))?;
    log::debug!("Loaded service specification from {}", path.display());
    Ok(json)
}

/// Execute the service command
pub fn execute(args: &ServiceArgs, global: &GlobalArgs) -> Result<()> {
    let (statement, connection) = match &args.command {
        ServiceCommands::Create(create) => {
            let name = service_name(&create.name)?;
            let compute_pool = pool_name(&create.compute_pool)?;
            let tags = create
                .tags
                .iter()
                .map(|tag| tag.parse::<Tag>())
                .collect::<Result<Vec<_>, _>>()?;
            let specification = read_specification(&create.spec_path)?;

            let mut def = CreateService::new(name, compute_pool, specification);
            def.min_instances = create.min_instances;
            def.max_instances = create.max_instances;
            def.auto_resume = create.auto_resume || !create.no_auto_resume;
            def.external_access_integrations = create.eai_names.clone();
            def.query_warehouse = create.query_warehouse.clone();
            def.tags = tags;
            def.comment = create.comment.clone();
            (service::create(&def)?, &create.connection)
        }
        ServiceCommands::Status(target) => {
            (service::status(&service_name(&target.name)?), &target.connection)
        }
        ServiceCommands::Logs(logs) => {
            let sql = service::logs(
                &service_name(&logs.name)?,
                &logs.instance_id,
                &logs.container_name,
                logs.num_lines,
            );
            (sql, &logs.connection)
        }
        ServiceCommands::Upgrade(upgrade) => {
            let name = service_name(&upgrade.name)?;
            let specification = read_specification(&upgrade.spec_path)?;
            (service::upgrade(&name, &specification)?, &upgrade.connection)
        }
        ServiceCommands::ListEndpoints(target) => {
            (service::list_endpoints(&service_name(&target.name)?), &target.connection)
        }
        ServiceCommands::Suspend(target) => {
            (service::suspend(&service_name(&target.name)?), &target.connection)
        }
        ServiceCommands::Resume(target) => {
            (service::resume(&service_name(&target.name)?), &target.connection)
        }
        ServiceCommands::Set(set) => {
            let props = SetService {
                min_instances: set.min_instances,
                max_instances: set.max_instances,
                query_warehouse: set.query_warehouse.clone(),
                auto_resume: set.auto_resume(),
                comment: set.comment.clone(),
            };
            (service::set(&service_name(&set.name)?, &props)?, &set.connection)
        }
        ServiceCommands::Unset(unset) => {
            let props = UnsetService {
                min_instances: unset.min_instances,
                max_instances: unset.max_instances,
                query_warehouse: unset.query_warehouse,
                auto_resume: unset.auto_resume,
                comment: unset.comment,
            };
            (service::unset(&service_name(&unset.name)?, &props)?, &unset.connection)
        }
    };

    let connection = resolve_connection(global, connection)?;
    print_statements(global, &connection, &[statement])
}
