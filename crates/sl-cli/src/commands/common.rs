//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::Serialize;
use sl_core::{Config, ConnectionParams, LogsConfig};
use std::fs::OpenOptions;
use std::io::Write;

use crate::cli::{ConnectionOpt, GlobalArgs, OutputFormat};

/// Load the configuration from `--config-file` or the default location.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config_file {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Config::load_default().context("Failed to load configuration"),
    }
}

/// A connection chosen for a command.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConnection {
    pub name: String,
    pub params: ConnectionParams,
    pub logs: LogsConfig,
}

/// Resolve `--connection`, falling back to the configured default.
pub(crate) fn resolve_connection(
    global: &GlobalArgs,
    opt: &ConnectionOpt,
) -> Result<ResolvedConnection> {
    let config = load_config(global)?;
    let name = opt
        .connection
        .clone()
        .unwrap_or_else(|| config.default_connection_name());
    let params = config
        .get_connection(&name)
        .with_context(|| format!("Cannot use connection '{}'", name))?;
    log::debug!(
        "Using connection '{}' (account: {})",
        name,
        params.account.as_deref().unwrap_or("<unset>")
    );
    let logs = config.logs_config()?;
    Ok(ResolvedConnection { name, params, logs })
}

#[derive(Serialize)]
struct RenderedStatements<'a> {
    connection: &'a str,
    account: Option<&'a str>,
    statements: &'a [String],
}

/// File that receives rendered statements when `save_logs` is on.
pub(crate) const STATEMENT_LOG_FILE: &str = "snowline.log";

/// Append `statements` to the statement log of the connection's config.
pub(crate) fn save_statement_log(
    connection: &ResolvedConnection,
    statements: &[String],
) -> Result<()> {
    let Some(dir) = connection.logs.path.as_ref().filter(|_| connection.logs.save_logs) else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(STATEMENT_LOG_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for statement in statements {
        writeln!(file, "[{}] {};", connection.name, statement.replace('\n', " "))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Print statements to stdout, terminated by `;` in text mode, and record
/// them in the statement log.
pub(crate) fn print_statements(
    global: &GlobalArgs,
    connection: &ResolvedConnection,
    statements: &[String],
) -> Result<()> {
    if let Err(e) = save_statement_log(connection, statements) {
        log::warn!("Statement log not written: {e:#}");
    }
    match global.format {
        OutputFormat::Text => {
            for statement in statements {
                println!("{};", statement);
            }
        }
        OutputFormat::Json => {
            let doc = RenderedStatements {
                connection: &connection.name,
                account: connection.params.account.as_deref(),
                statements,
            };
            let json = serde_json::to_string_pretty(&doc).context("Failed to serialize output")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Calculate column widths for a table from headers and rows.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);
    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(headers.to_vec()));
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", separator.join("  "));
    for row in rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
