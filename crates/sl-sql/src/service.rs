//! Service statements.
//!
//! Services are schema-level objects, so a service name may be qualified up
//! to `db.schema.service`. The container specification is embedded as JSON
//! between `$$` delimiters.

use crate::common::{check_positive, selected_properties, sql_bool};
use crate::error::{SqlError, SqlResult};
use sl_core::{is_valid_identifier, to_string_literal, ObjectName, DEFAULT_MAX_DEPTH};
use std::str::FromStr;

/// Default instance count for a new service.
pub const DEFAULT_MIN_INSTANCES: u32 = 1;

/// Default number of trailing log lines fetched by [`logs`].
pub const DEFAULT_LOG_LINES: u32 = 500;

const SPECIFICATION_DELIMITER: &str = "$$";

/// Validate a service name.
///
/// # Errors
/// [`SqlError::InvalidName`] unless `name` is an object name of at most
/// three segments.
pub fn service_name(name: &str) -> SqlResult<ObjectName> {
    ObjectName::parse(name, DEFAULT_MAX_DEPTH).map_err(|_| SqlError::InvalidName {
        kind: "service".to_string(),
        name: name.to_string(),
    })
}

/// Convert a YAML service specification to the compact JSON form embedded
/// in `CREATE SERVICE` and `ALTER SERVICE`.
///
/// # Errors
/// [`SqlError::InvalidSpecification`] for malformed YAML or a document that
/// is not a mapping.
pub fn specification_from_yaml(yaml: &str) -> SqlResult<String> {
    let value: serde_json::Value = serde_yaml::from_str(yaml)
        .map_err(|e| SqlError::InvalidSpecification(e.to_string()))?;
    if !value.is_object() {
        return Err(SqlError::InvalidSpecification(
            "the document must be a mapping".to_string(),
        ));
    }
    serde_json::to_string(&value).map_err(|e| SqlError::InvalidSpecification(e.to_string()))
}

fn specification_block(specification: &str) -> SqlResult<String> {
    if specification.contains(SPECIFICATION_DELIMITER) {
        return Err(SqlError::InvalidSpecification(format!(
            "the specification cannot contain '{}'",
            SPECIFICATION_DELIMITER
        )));
    }
    Ok(format!(
        "FROM SPECIFICATION {delim}\n{specification}\n{delim}",
        delim = SPECIFICATION_DELIMITER
    ))
}

fn check_identifier(what: &str, value: &str) -> SqlResult<()> {
    if !is_valid_identifier(value) {
        return Err(SqlError::InvalidValue(format!(
            "'{value}' is not a valid {what}"
        )));
    }
    Ok(())
}

fn check_instance_range(min: u32, max: u32) -> SqlResult<()> {
    if max < min {
        return Err(SqlError::InvalidInstanceRange { min, max });
    }
    Ok(())
}

/// An object tag, written `name=value` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    /// `name='value'`, as used in `WITH TAG (...)`.
    pub fn to_sql(&self) -> String {
        format!("{}={}", self.name, to_string_literal(&self.value))
    }
}

impl FromStr for Tag {
    type Err = SqlError;

    /// Split on the first `=` outside a quoted tag name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut in_quotes = false;
        let split = s.char_indices().find(|&(_, c)| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            c == '=' && !in_quotes
        });
        let Some((idx, _)) = split else {
            return Err(SqlError::InvalidValue(format!(
                "tag must be in the form name=value, got '{s}'"
            )));
        };
        let (name, value) = (&s[..idx], &s[idx + 1..]);
        check_identifier("tag name", name)?;
        Ok(Tag {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parameters of `CREATE SERVICE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateService {
    pub name: ObjectName,
    pub compute_pool: ObjectName,
    /// JSON specification, see [`specification_from_yaml`]
    pub specification: String,
    pub min_instances: u32,
    /// Defaults to `min_instances` when absent
    pub max_instances: Option<u32>,
    pub auto_resume: bool,
    pub external_access_integrations: Vec<String>,
    pub query_warehouse: Option<String>,
    pub tags: Vec<Tag>,
    pub comment: Option<String>,
}

impl CreateService {
    /// A single-instance service that resumes automatically.
    pub fn new(name: ObjectName, compute_pool: ObjectName, specification: impl Into<String>) -> Self {
        Self {
            name,
            compute_pool,
            specification: specification.into(),
            min_instances: DEFAULT_MIN_INSTANCES,
            max_instances: None,
            auto_resume: true,
            external_access_integrations: Vec::new(),
            query_warehouse: None,
            tags: Vec::new(),
            comment: None,
        }
    }

    pub fn resolved_max_instances(&self) -> SqlResult<u32> {
        check_positive("min_instances", self.min_instances)?;
        let max = self.max_instances.unwrap_or(self.min_instances);
        check_instance_range(self.min_instances, max)?;
        Ok(max)
    }
}

/// Render `CREATE SERVICE`, one clause per line.
pub fn create(service: &CreateService) -> SqlResult<String> {
    let max_instances = service.resolved_max_instances()?;
    for integration in &service.external_access_integrations {
        check_identifier("external access integration name", integration)?;
    }
    if let Some(warehouse) = &service.query_warehouse {
        check_identifier("warehouse name", warehouse)?;
    }

    let mut lines = vec![
        format!("CREATE SERVICE {}", service.name),
        format!("IN COMPUTE POOL {}", service.compute_pool),
        specification_block(&service.specification)?,
        format!("MIN_INSTANCES = {}", service.min_instances),
        format!("MAX_INSTANCES = {}", max_instances),
        format!("AUTO_RESUME = {}", sql_bool(service.auto_resume)),
    ];
    if !service.external_access_integrations.is_empty() {
        lines.push(format!(
            "EXTERNAL_ACCESS_INTEGRATIONS = ({})",
            service.external_access_integrations.join(",")
        ));
    }
    if let Some(warehouse) = &service.query_warehouse {
        lines.push(format!("QUERY_WAREHOUSE = {}", warehouse));
    }
    if let Some(comment) = &service.comment {
        lines.push(format!("COMMENT = {}", to_string_literal(comment)));
    }
    if !service.tags.is_empty() {
        let tags: Vec<String> = service.tags.iter().map(Tag::to_sql).collect();
        lines.push(format!("WITH TAG ({})", tags.join(",")));
    }

    log::debug!("Rendered CREATE SERVICE for {}", service.name);
    Ok(lines.join("\n"))
}

pub fn status(name: &ObjectName) -> String {
    format!(
        "CALL SYSTEM$GET_SERVICE_STATUS({})",
        to_string_literal(name.as_str())
    )
}

/// The last `num_lines` log lines of one container of one instance.
pub fn logs(
    name: &ObjectName,
    instance_id: &str,
    container_name: &str,
    num_lines: u32,
) -> String {
    format!(
        "CALL SYSTEM$GET_SERVICE_LOGS({}, {}, {}, {})",
        to_string_literal(name.as_str()),
        to_string_literal(instance_id),
        to_string_literal(container_name),
        num_lines
    )
}

/// Replace the specification of a running service.
pub fn upgrade(name: &ObjectName, specification: &str) -> SqlResult<String> {
    Ok(format!(
        "ALTER SERVICE {} {}",
        name,
        specification_block(specification)?
    ))
}

pub fn list_endpoints(name: &ObjectName) -> String {
    format!("SHOW ENDPOINTS IN SERVICE {}", name)
}

pub fn suspend(name: &ObjectName) -> String {
    format!("ALTER SERVICE {} SUSPEND", name)
}

pub fn resume(name: &ObjectName) -> String {
    format!("ALTER SERVICE {} RESUME", name)
}

/// Properties for `ALTER SERVICE ... SET`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetService {
    pub min_instances: Option<u32>,
    pub max_instances: Option<u32>,
    pub query_warehouse: Option<String>,
    pub auto_resume: Option<bool>,
    pub comment: Option<String>,
}

impl SetService {
    pub fn is_empty(&self) -> bool {
        self.min_instances.is_none()
            && self.max_instances.is_none()
            && self.query_warehouse.is_none()
            && self.auto_resume.is_none()
            && self.comment.is_none()
    }
}

/// Render `ALTER SERVICE ... SET` with one line per provided property.
///
/// # Errors
/// [`SqlError::NoPropertiesProvided`] when nothing is set.
pub fn set(name: &ObjectName, props: &SetService) -> SqlResult<String> {
    if props.is_empty() {
        return Err(SqlError::NoPropertiesProvided(format!(
            "No properties specified for service '{}'. Please provide at least one property to set.",
            name
        )));
    }
    if let Some(min) = props.min_instances {
        check_positive("min_instances", min)?;
    }
    if let Some(max) = props.max_instances {
        check_positive("max_instances", max)?;
    }
    if let (Some(min), Some(max)) = (props.min_instances, props.max_instances) {
        check_instance_range(min, max)?;
    }
    if let Some(warehouse) = &props.query_warehouse {
        check_identifier("warehouse name", warehouse)?;
    }

    let mut lines = vec![format!("ALTER SERVICE {} SET", name)];
    if let Some(min) = props.min_instances {
        lines.push(format!("MIN_INSTANCES = {}", min));
    }
    if let Some(max) = props.max_instances {
        lines.push(format!("MAX_INSTANCES = {}", max));
    }
    if let Some(warehouse) = &props.query_warehouse {
        lines.push(format!("QUERY_WAREHOUSE = {}", warehouse));
    }
    if let Some(auto_resume) = props.auto_resume {
        lines.push(format!("AUTO_RESUME = {}", sql_bool(auto_resume)));
    }
    if let Some(comment) = &props.comment {
        lines.push(format!("COMMENT = {}", to_string_literal(comment)));
    }
    Ok(lines.join("\n"))
}

/// Properties to reset with `ALTER SERVICE ... UNSET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsetService {
    pub min_instances: bool,
    pub max_instances: bool,
    pub query_warehouse: bool,
    pub auto_resume: bool,
    pub comment: bool,
}

impl UnsetService {
    /// Selected property names, in statement order.
    pub fn properties(&self) -> Vec<&'static str> {
        selected_properties([
            ("MIN_INSTANCES", self.min_instances),
            ("MAX_INSTANCES", self.max_instances),
            ("QUERY_WAREHOUSE", self.query_warehouse),
            ("AUTO_RESUME", self.auto_resume),
            ("COMMENT", self.comment),
        ])
    }
}

/// Render `ALTER SERVICE ... UNSET a,b`.
///
/// # Errors
/// [`SqlError::NoPropertiesProvided`] when nothing is selected.
pub fn unset(name: &ObjectName, props: &UnsetService) -> SqlResult<String> {
    let properties = props.properties();
    if properties.is_empty() {
        return Err(SqlError::NoPropertiesProvided(format!(
            "No properties specified for service '{}'. Please provide at least one property to reset to its default value.",
            name
        )));
    }
    Ok(format!(
        "ALTER SERVICE {} UNSET {}",
        name,
        properties.join(",")
    ))
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
