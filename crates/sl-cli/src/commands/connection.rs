//! Connection command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sl_core::ConnectionParams;

use crate::cli::{
    AddConnectionArgs, ConnectionArgs, ConnectionCommands, GlobalArgs, OutputFormat,
    SetDefaultConnectionArgs,
};
use crate::commands::common::{load_config, print_table};

/// Execute the connection command
pub fn execute(args: &ConnectionArgs, global: &GlobalArgs) -> Result<()> {
    match &args.command {
        ConnectionCommands::List => list(global),
        ConnectionCommands::Add(add_args) => add(add_args, global),
        ConnectionCommands::SetDefault(set_args) => set_default(set_args, global),
    }
}

#[derive(Debug, Serialize)]
struct ConnectionEntry {
    connection_name: String,
    is_default: bool,
    parameters: ConnectionParams,
}

fn list(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let default_name = config.default_connection_name();
    let entries: Vec<ConnectionEntry> = config
        .connections()
        .context("Failed to read connections")?
        .into_iter()
        .map(|(name, params)| ConnectionEntry {
            is_default: name == default_name,
            connection_name: name,
            parameters: params.masked(),
        })
        .collect();

    match global.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&entries).context("Failed to serialize connections")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No connections configured");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.connection_name.clone(),
                        if entry.is_default { "*" } else { "" }.to_string(),
                        entry.parameters.account.clone().unwrap_or_default(),
                        entry.parameters.user.clone().unwrap_or_default(),
                        entry.parameters.password.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["NAME", "DEFAULT", "ACCOUNT", "USER", "PASSWORD"], &rows);
        }
    }
    Ok(())
}

fn add(args: &AddConnectionArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    let params = ConnectionParams {
        account: Some(args.account.clone()),
        user: Some(args.user.clone()),
        password: args.password.clone(),
        role: args.role.clone(),
        warehouse: args.warehouse.clone(),
        database: args.database.clone(),
        schema: args.schema.clone(),
        host: args.host.clone(),
        port: args.port,
        region: args.region.clone(),
        authenticator: args.authenticator.clone(),
        private_key_path: args.private_key_path.clone(),
        ..Default::default()
    };

    if config.connection_exists(&args.connection_name) {
        log::warn!("Replacing existing connection '{}'", args.connection_name);
    }
    config
        .add_connection(&args.connection_name, &params)
        .with_context(|| format!("Failed to add connection '{}'", args.connection_name))?;

    println!(
        "Wrote new connection {} to {}",
        args.connection_name,
        config.path().display()
    );
    Ok(())
}

fn set_default(args: &SetDefaultConnectionArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    config
        .set_default_connection(&args.name)
        .with_context(|| format!("Failed to set default connection to '{}'", args.name))?;
    println!("Default connection set to: {}", args.name);
    Ok(())
}
