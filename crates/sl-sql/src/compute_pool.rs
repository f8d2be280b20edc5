//! Compute pool statements.
//!
//! A compute pool is an account-level object, so its name is always a
//! single identifier.

use crate::common::{check_positive, selected_properties, sql_bool};
use crate::error::{SqlError, SqlResult};
use sl_core::{is_valid_identifier, to_string_literal, ObjectName};

/// Default minimum node count for a new pool.
pub const DEFAULT_MIN_NODES: u32 = 1;

/// Default idle time before a pool suspends itself.
pub const DEFAULT_AUTO_SUSPEND_SECS: u32 = 3600;

/// Validate a compute pool name.
///
/// # Errors
/// [`SqlError::InvalidName`] unless `name` is a single valid identifier.
pub fn pool_name(name: &str) -> SqlResult<ObjectName> {
    ObjectName::parse(name, 0).map_err(|_| SqlError::InvalidName {
        kind: "compute pool".to_string(),
        name: name.to_string(),
    })
}

/// Parameters of `CREATE COMPUTE POOL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComputePool {
    pub name: ObjectName,
    pub min_nodes: u32,
    /// Defaults to `min_nodes` when absent
    pub max_nodes: Option<u32>,
    pub instance_family: String,
    pub auto_resume: bool,
    pub initially_suspended: bool,
    pub auto_suspend_secs: u32,
    pub comment: Option<String>,
}

impl CreateComputePool {
    /// A pool definition with the service defaults: one node, auto resume
    /// on, started immediately, suspended after an hour of inactivity.
    pub fn new(name: ObjectName, instance_family: impl Into<String>) -> Self {
        Self {
            name,
            min_nodes: DEFAULT_MIN_NODES,
            max_nodes: None,
            instance_family: instance_family.into(),
            auto_resume: true,
            initially_suspended: false,
            auto_suspend_secs: DEFAULT_AUTO_SUSPEND_SECS,
            comment: None,
        }
    }

    /// The effective maximum node count.
    ///
    /// # Errors
    /// [`SqlError::InvalidValue`] for a zero node count,
    /// [`SqlError::InvalidNodeRange`] when the maximum is below the minimum.
    pub fn resolved_max_nodes(&self) -> SqlResult<u32> {
        check_positive("min_nodes", self.min_nodes)?;
        let max = self.max_nodes.unwrap_or(self.min_nodes);
        if max < self.min_nodes {
            return Err(SqlError::InvalidNodeRange {
                min: self.min_nodes,
                max,
            });
        }
        Ok(max)
    }
}

/// Render `CREATE COMPUTE POOL`, one property per line.
pub fn create(pool: &CreateComputePool) -> SqlResult<String> {
    let max_nodes = pool.resolved_max_nodes()?;
    check_positive("auto_suspend_secs", pool.auto_suspend_secs)?;
    if !is_valid_identifier(&pool.instance_family) {
        return Err(SqlError::InvalidValue(format!(
            "'{}' is not a valid instance family",
            pool.instance_family
        )));
    }

    let mut lines = vec![
        format!("CREATE COMPUTE POOL {}", pool.name),
        format!("MIN_NODES = {}", pool.min_nodes),
        format!("MAX_NODES = {}", max_nodes),
        format!("INSTANCE_FAMILY = {}", pool.instance_family),
        format!("AUTO_RESUME = {}", sql_bool(pool.auto_resume)),
        format!("INITIALLY_SUSPENDED = {}", sql_bool(pool.initially_suspended)),
        format!("AUTO_SUSPEND_SECS = {}", pool.auto_suspend_secs),
    ];
    if let Some(comment) = &pool.comment {
        lines.push(format!("COMMENT = {}", to_string_literal(comment)));
    }

    log::debug!("Rendered CREATE COMPUTE POOL for {}", pool.name);
    Ok(lines.join("\n"))
}

/// Drop every service running on the pool.
pub fn stop_all(name: &ObjectName) -> String {
    format!("ALTER COMPUTE POOL {} STOP ALL", name)
}

pub fn suspend(name: &ObjectName) -> String {
    format!("ALTER COMPUTE POOL {} SUSPEND", name)
}

pub fn resume(name: &ObjectName) -> String {
    format!("ALTER COMPUTE POOL {} RESUME", name)
}

/// Properties for `ALTER COMPUTE POOL ... SET`. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetComputePool {
    pub min_nodes: Option<u32>,
    pub max_nodes: Option<u32>,
    pub auto_resume: Option<bool>,
    pub auto_suspend_secs: Option<u32>,
    pub comment: Option<String>,
}

impl SetComputePool {
    pub fn is_empty(&self) -> bool {
        self.min_nodes.is_none()
            && self.max_nodes.is_none()
            && self.auto_resume.is_none()
            && self.auto_suspend_secs.is_none()
            && self.comment.is_none()
    }
}

/// Render `ALTER COMPUTE POOL ... SET` with one `PROPERTY = value` line per
/// provided property.
///
/// # Errors
/// [`SqlError::NoPropertiesProvided`] when nothing is set.
pub fn set(name: &ObjectName, props: &SetComputePool) -> SqlResult<String> {
    if props.is_empty() {
        return Err(SqlError::NoPropertiesProvided(format!(
            "No properties specified for compute pool '{}'. Please provide at least one property to set.",
            name
        )));
    }
    if let Some(min) = props.min_nodes {
        check_positive("min_nodes", min)?;
    }
    if let Some(max) = props.max_nodes {
        check_positive("max_nodes", max)?;
    }
    if let (Some(min), Some(max)) = (props.min_nodes, props.max_nodes) {
        if max < min {
            return Err(SqlError::InvalidNodeRange { min, max });
        }
    }
    if let Some(secs) = props.auto_suspend_secs {
        check_positive("auto_suspend_secs", secs)?;
    }

    let mut lines = vec![format!("ALTER COMPUTE POOL {} SET", name)];
    if let Some(min) = props.min_nodes {
        lines.push(format!("MIN_NODES = {}", min));
    }
    if let Some(max) = props.max_nodes {
        lines.push(format!("MAX_NODES = {}", max));
    }
    if let Some(auto_resume) = props.auto_resume {
        lines.push(format!("AUTO_RESUME = {}", sql_bool(auto_resume)));
    }
    if let Some(secs) = props.auto_suspend_secs {
        lines.push(format!("AUTO_SUSPEND_SECS = {}", secs));
    }
    if let Some(comment) = &props.comment {
        lines.push(format!("COMMENT = {}", to_string_literal(comment)));
    }
    Ok(lines.join("\n"))
}

/// Properties to reset to their defaults with `ALTER COMPUTE POOL ... UNSET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsetComputePool {
    pub auto_resume: bool,
    pub auto_suspend_secs: bool,
    pub comment: bool,
}

impl UnsetComputePool {
    /// Selected property names, in statement order.
    pub fn properties(&self) -> Vec<&'static str> {
        selected_properties([
            ("AUTO_RESUME", self.auto_resume),
            ("AUTO_SUSPEND_SECS", self.auto_suspend_secs),
            ("COMMENT", self.comment),
        ])
    }
}

/// Render `ALTER COMPUTE POOL ... UNSET a,b`.
///
/// # Errors
/// [`SqlError::NoPropertiesProvided`] when nothing is selected.
pub fn unset(name: &ObjectName, props: &UnsetComputePool) -> SqlResult<String> {
    let properties = props.properties();
    if properties.is_empty() {
        return Err(SqlError::NoPropertiesProvided(format!(
            "No properties specified for compute pool '{}'. Please provide at least one property to reset to its default value.",
            name
        )));
    }
    Ok(format!(
        "ALTER COMPUTE POOL {} UNSET {}",
        name,
        properties.join(",")
    ))
}

/// Status and message of the pool, as reported by the service.
pub fn status(name: &ObjectName) -> String {
    format!(
        "CALL SYSTEM$GET_COMPUTE_POOL_STATUS({})",
        to_string_literal(name.as_str())
    )
}

#[cfg(test)]
#[path = "compute_pool_test.rs"]
mod tests;
