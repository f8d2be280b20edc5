//! Helpers shared by the statement builders.

use crate::error::{SqlError, SqlResult};

/// Reject a zero count or duration.
pub(crate) fn check_positive(property: &str, value: u32) -> SqlResult<()> {
    if value < 1 {
        return Err(SqlError::InvalidValue(format!(
            "{property} must be positive"
        )));
    }
    Ok(())
}

pub(crate) fn sql_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// `UNSET` property list for the selected `(property, selected)` pairs.
pub(crate) fn selected_properties<const N: usize>(
    candidates: [(&'static str, bool); N],
) -> Vec<&'static str> {
    candidates
        .into_iter()
        .filter_map(|(property, selected)| selected.then_some(property))
        .collect()
}
