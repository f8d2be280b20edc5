//! Generic `SHOW`, `DESCRIBE` and `DROP` statements for schema objects.

use crate::error::{SqlError, SqlResult};
use sl_core::{is_valid_object_name, to_string_literal, ObjectName};
use std::fmt;
use std::str::FromStr;

/// Pattern used by `SHOW` when no `LIKE` filter is given.
pub const MATCH_ALL_PATTERN: &str = "%%";

/// Object kinds addressable by the generic object statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    ComputePool,
    Database,
    Function,
    ImageRepository,
    Integration,
    NetworkRule,
    Procedure,
    Role,
    Schema,
    Secret,
    Service,
    Stage,
    Stream,
    Streamlit,
    Table,
    Task,
    User,
    View,
    Warehouse,
}

impl ObjectType {
    pub const ALL: [ObjectType; 19] = [
        ObjectType::ComputePool,
        ObjectType::Database,
        ObjectType::Function,
        ObjectType::ImageRepository,
        ObjectType::Integration,
        ObjectType::NetworkRule,
        ObjectType::Procedure,
        ObjectType::Role,
        ObjectType::Schema,
        ObjectType::Secret,
        ObjectType::Service,
        ObjectType::Stage,
        ObjectType::Stream,
        ObjectType::Streamlit,
        ObjectType::Table,
        ObjectType::Task,
        ObjectType::User,
        ObjectType::View,
        ObjectType::Warehouse,
    ];

    /// Command-line spelling, e.g. `compute-pool`.
    pub fn cli_name(&self) -> &'static str {
        match self {
            ObjectType::ComputePool => "compute-pool",
            ObjectType::Database => "database",
            ObjectType::Function => "function",
            ObjectType::ImageRepository => "image-repository",
            ObjectType::Integration => "integration",
            ObjectType::NetworkRule => "network-rule",
            ObjectType::Procedure => "procedure",
            ObjectType::Role => "role",
            ObjectType::Schema => "schema",
            ObjectType::Secret => "secret",
            ObjectType::Service => "service",
            ObjectType::Stage => "stage",
            ObjectType::Stream => "stream",
            ObjectType::Streamlit => "streamlit",
            ObjectType::Table => "table",
            ObjectType::Task => "task",
            ObjectType::User => "user",
            ObjectType::View => "view",
            ObjectType::Warehouse => "warehouse",
        }
    }

    /// Singular SQL keyword, e.g. `COMPUTE POOL`.
    pub fn sql_name(&self) -> &'static str {
        match self {
            ObjectType::ComputePool => "COMPUTE POOL",
            ObjectType::Database => "DATABASE",
            ObjectType::Function => "FUNCTION",
            ObjectType::ImageRepository => "IMAGE REPOSITORY",
            ObjectType::Integration => "INTEGRATION",
            ObjectType::NetworkRule => "NETWORK RULE",
            ObjectType::Procedure => "PROCEDURE",
            ObjectType::Role => "ROLE",
            ObjectType::Schema => "SCHEMA",
            ObjectType::Secret => "SECRET",
            ObjectType::Service => "SERVICE",
            ObjectType::Stage => "STAGE",
            ObjectType::Stream => "STREAM",
            ObjectType::Streamlit => "STREAMLIT",
            ObjectType::Table => "TABLE",
            ObjectType::Task => "TASK",
            ObjectType::User => "USER",
            ObjectType::View => "VIEW",
            ObjectType::Warehouse => "WAREHOUSE",
        }
    }

    /// Plural keyword used by `SHOW`, e.g. `IMAGE REPOSITORIES`.
    pub fn sql_plural_name(&self) -> &'static str {
        match self {
            ObjectType::ComputePool => "COMPUTE POOLS",
            ObjectType::Database => "DATABASES",
            ObjectType::Function => "FUNCTIONS",
            ObjectType::ImageRepository => "IMAGE REPOSITORIES",
            ObjectType::Integration => "INTEGRATIONS",
            ObjectType::NetworkRule => "NETWORK RULES",
            ObjectType::Procedure => "PROCEDURES",
            ObjectType::Role => "ROLES",
            ObjectType::Schema => "SCHEMAS",
            ObjectType::Secret => "SECRETS",
            ObjectType::Service => "SERVICES",
            ObjectType::Stage => "STAGES",
            ObjectType::Stream => "STREAMS",
            ObjectType::Streamlit => "STREAMLITS",
            ObjectType::Table => "TABLES",
            ObjectType::Task => "TASKS",
            ObjectType::User => "USERS",
            ObjectType::View => "VIEWS",
            ObjectType::Warehouse => "WAREHOUSES",
        }
    }

    /// Number of qualifying segments a name of this type may carry.
    pub fn max_depth(&self) -> i32 {
        match self {
            ObjectType::ComputePool
            | ObjectType::Database
            | ObjectType::Integration
            | ObjectType::Role
            | ObjectType::User
            | ObjectType::Warehouse => 0,
            ObjectType::Schema => 1,
            _ => 2,
        }
    }

    /// Functions and procedures are addressed with their argument types.
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function | ObjectType::Procedure)
    }

    pub fn supports_describe(&self) -> bool {
        !matches!(self, ObjectType::ImageRepository)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for ObjectType {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|t| t.cli_name() == s)
            .ok_or_else(|| SqlError::UnknownObjectType(s.to_string()))
    }
}

/// Container restricting a `SHOW` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Database(ObjectName),
    Schema(ObjectName),
    /// Only valid when listing services
    ComputePool(ObjectName),
}

impl Scope {
    pub const KINDS: [&'static str; 3] = ["database", "schema", "compute-pool"];

    /// Build a scope from its command-line kind and name.
    ///
    /// # Errors
    /// [`SqlError::InvalidScope`] for an unknown kind or a name that is not
    /// a valid identifier.
    pub fn parse(kind: &str, name: &str) -> SqlResult<Self> {
        let depth = match kind {
            "database" | "compute-pool" => 0,
            "schema" => 1,
            _ => {
                return Err(SqlError::InvalidScope(format!(
                    "scope must be one of the following: {}",
                    Self::KINDS.join(", ")
                )))
            }
        };
        let name = ObjectName::parse(name, depth).map_err(|_| {
            SqlError::InvalidScope(format!(
                "scope name must be a valid identifier, got '{}'",
                name
            ))
        })?;
        Ok(match kind {
            "database" => Scope::Database(name),
            "schema" => Scope::Schema(name),
            _ => Scope::ComputePool(name),
        })
    }

    fn clause(&self) -> String {
        match self {
            Scope::Database(name) => format!("IN DATABASE {}", name),
            Scope::Schema(name) => format!("IN SCHEMA {}", name),
            Scope::ComputePool(name) => format!("IN COMPUTE POOL {}", name),
        }
    }
}

/// Render `SHOW <plural> LIKE <pattern> [IN <scope>]`.
///
/// `like` is a raw `LIKE` pattern; it is rendered as a string literal and
/// defaults to [`MATCH_ALL_PATTERN`].
///
/// # Errors
/// [`SqlError::InvalidScope`] for a compute pool scope on anything but
/// services.
pub fn show(
    object_type: ObjectType,
    like: Option<&str>,
    scope: Option<&Scope>,
) -> SqlResult<String> {
    let mut sql = format!(
        "SHOW {} LIKE {}",
        object_type.sql_plural_name(),
        to_string_literal(like.unwrap_or(MATCH_ALL_PATTERN))
    );
    if let Some(scope) = scope {
        if matches!(scope, Scope::ComputePool(_)) && object_type != ObjectType::Service {
            return Err(SqlError::InvalidScope(
                "compute-pool scope is only supported for listing service".to_string(),
            ));
        }
        sql.push(' ');
        sql.push_str(&scope.clause());
    }
    Ok(sql)
}

/// Parse `name` as a non-callable name of `object_type`.
///
/// # Errors
/// [`SqlError::InvalidName`] when `name` is not an object name within the
/// type's depth.
pub fn object_name(object_type: ObjectType, name: &str) -> SqlResult<ObjectName> {
    ObjectName::parse(name, object_type.max_depth()).map_err(|_| SqlError::InvalidName {
        kind: object_type.sql_name().to_lowercase(),
        name: name.to_string(),
    })
}

/// Render a `SHOW` that matches exactly one object by name.
///
/// The qualifying segments become an `IN` clause, so the `LIKE` pattern only
/// has to match the last segment. Schema-level objects are looked up
/// `IN SCHEMA [db.]schema`, schemas `IN DATABASE db`.
///
/// # Errors
/// [`SqlError::InvalidName`] when `name` has more segments than the type
/// allows.
pub fn show_by_name(object_type: ObjectType, name: &ObjectName) -> SqlResult<String> {
    let parts = name.parts();
    if parts.len() as i32 > object_type.max_depth() + 1 {
        return Err(SqlError::InvalidName {
            kind: object_type.sql_name().to_lowercase(),
            name: name.to_string(),
        });
    }

    let mut sql = format!(
        "SHOW {} LIKE {}",
        object_type.sql_plural_name(),
        name.show_like_pattern()
    );
    if let Some((_, qualifier)) = parts.split_last() {
        if !qualifier.is_empty() {
            let container = if object_type.max_depth() > 1 {
                "SCHEMA"
            } else {
                "DATABASE"
            };
            sql.push_str(&format!(" IN {} {}", container, qualifier.join(".")));
        }
    }
    Ok(sql)
}

/// Validate `name` for `object_type`.
///
/// Callables may carry a trailing argument type list, such as
/// `db.s.f(VARCHAR, NUMBER(38,0))`; only the part before it is checked.
pub fn validate_name(object_type: ObjectType, name: &str) -> SqlResult<()> {
    let depth = object_type.max_depth();
    let mut valid = false;
    if object_type.is_callable() && name.ends_with(')') {
        for (idx, _) in name.match_indices('(') {
            if is_valid_object_name(&name[..idx], depth)? {
                valid = true;
                break;
            }
        }
    } else {
        valid = is_valid_object_name(name, depth)?;
    }
    if valid {
        Ok(())
    } else {
        Err(SqlError::InvalidName {
            kind: object_type.sql_name().to_lowercase(),
            name: name.to_string(),
        })
    }
}

/// Render `DESCRIBE <type> <name>`.
///
/// # Errors
/// [`SqlError::UnsupportedOperation`] for types that cannot be described,
/// [`SqlError::InvalidName`] for a name that does not fit the type.
pub fn describe(object_type: ObjectType, name: &str) -> SqlResult<String> {
    if !object_type.supports_describe() {
        return Err(SqlError::UnsupportedOperation {
            operation: "describe".to_string(),
            object_type: object_type.to_string(),
        });
    }
    validate_name(object_type, name)?;
    Ok(format!("DESCRIBE {} {}", object_type.sql_name(), name))
}

/// Render `DROP <type> <name>`.
pub fn drop(object_type: ObjectType, name: &str) -> SqlResult<String> {
    validate_name(object_type, name)?;
    log::debug!("Rendered DROP for {} {}", object_type, name);
    Ok(format!("DROP {} {}", object_type.sql_name(), name))
}

#[cfg(test)]
#[path = "object_test.rs"]
mod tests;
