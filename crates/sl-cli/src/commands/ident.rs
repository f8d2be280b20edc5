//! Ident command implementation

use anyhow::{bail, Result};
use serde::Serialize;
use sl_core::{
    identifier_to_show_like_pattern, split_object_name, to_identifier, to_string_literal,
    unquote_identifier, Identifier,
};

use crate::cli::{GlobalArgs, IdentArgs, IdentCommands, OutputFormat};

#[derive(Debug, Serialize)]
struct IdentOutput<'a> {
    input: &'a str,
    output: String,
}

/// Describe what kind of name `value` is, within `max_depth` qualifiers.
pub(crate) fn classify(value: &str, max_depth: i32) -> Option<String> {
    if let Some(identifier) = Identifier::parse(value) {
        let kind = if identifier.is_quoted() {
            "quoted identifier"
        } else {
            "unquoted identifier"
        };
        return Some(kind.to_string());
    }
    let parts = split_object_name(value)?;
    (parts.len() <= max_depth as usize + 1)
        .then(|| format!("object name with {} parts", parts.len()))
}

/// Execute the ident command
pub fn execute(args: &IdentArgs, global: &GlobalArgs) -> Result<()> {
    let (input, output) = match &args.command {
        IdentCommands::Check { value, max_depth } => match classify(value, *max_depth) {
            Some(kind) => (value, kind),
            None => bail!("'{}' is not a valid identifier or object name", value),
        },
        IdentCommands::Quote { value } => (value, to_identifier(value)),
        IdentCommands::Unquote { value } => (value, unquote_identifier(value)),
        IdentCommands::Literal { value } => (value, to_string_literal(value)),
        IdentCommands::LikePattern { value } => (value, identifier_to_show_like_pattern(value)),
    };

    match global.format {
        OutputFormat::Text => println!("{}", output),
        OutputFormat::Json => {
            let doc = IdentOutput { input, output };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
