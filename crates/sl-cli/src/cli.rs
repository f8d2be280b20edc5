//! CLI argument definitions using clap derive API

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sl_sql::ObjectType;
use std::path::PathBuf;

/// Snowline - identifier-safe SQL for compute pools, services and schema objects
#[derive(Parser, Debug)]
#[command(name = "snowline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the configuration file path
    #[arg(long, global = true, env = "SNOWLINE_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, one statement per line
    Text,
    /// JSON document
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configured connections
    Connection(ConnectionArgs),

    /// Manage compute pools
    ComputePool(ComputePoolArgs),

    /// Manage services running on compute pools
    Service(ServiceArgs),

    /// List, describe and drop schema objects
    Object(ObjectArgs),

    /// Validate and convert identifiers and string literals
    Ident(IdentArgs),
}

/// Connection selection shared by commands that target an account
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionOpt {
    /// Name of the configured connection (defaults to the default connection)
    #[arg(short = 'c', long)]
    pub connection: Option<String>,
}

/// Arguments for the connection command
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    #[command(subcommand)]
    pub command: ConnectionCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConnectionCommands {
    /// List configured connections (passwords masked)
    List,

    /// Add or replace a connection
    Add(AddConnectionArgs),

    /// Change the default connection
    SetDefault(SetDefaultConnectionArgs),
}

/// Arguments for `connection add`
#[derive(Args, Debug)]
pub struct AddConnectionArgs {
    /// Name of the new connection
    #[arg(short = 'n', long)]
    pub connection_name: String,

    /// Account identifier
    #[arg(short, long)]
    pub account: String,

    /// Login name
    #[arg(short, long)]
    pub user: String,

    #[arg(short, long)]
    pub password: Option<String>,

    #[arg(short, long)]
    pub role: Option<String>,

    #[arg(short, long)]
    pub warehouse: Option<String>,

    #[arg(short, long)]
    pub database: Option<String>,

    #[arg(short, long)]
    pub schema: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub region: Option<String>,

    /// Authenticator, e.g. SNOWFLAKE_JWT
    #[arg(long)]
    pub authenticator: Option<String>,

    /// Path to the private key file for key-pair authentication
    #[arg(short = 'k', long = "private-key")]
    pub private_key_path: Option<String>,
}

/// Arguments for `connection set-default`
#[derive(Args, Debug)]
pub struct SetDefaultConnectionArgs {
    /// Connection to use when `--connection` is not given
    pub name: String,
}

/// Arguments for the compute-pool command
#[derive(Args, Debug)]
pub struct ComputePoolArgs {
    #[command(subcommand)]
    pub command: ComputePoolCommands,
}

#[derive(Subcommand, Debug)]
pub enum ComputePoolCommands {
    /// Create a compute pool with a specified number of nodes
    Create(CreatePoolArgs),

    /// Delete all services running on the compute pool
    StopAll(PoolNameArgs),

    /// Suspend the compute pool and release its nodes
    Suspend(PoolNameArgs),

    /// Resume the compute pool from SUSPENDED state
    Resume(PoolNameArgs),

    /// Set one or more properties of the compute pool
    Set(SetPoolArgs),

    /// Reset one or more properties of the compute pool to their defaults
    Unset(UnsetPoolArgs),

    /// Retrieve the status of the compute pool
    Status(PoolNameArgs),
}

/// Compute pool commands that only take a name
#[derive(Args, Debug)]
pub struct PoolNameArgs {
    /// Name of the compute pool
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `compute-pool create`
#[derive(Args, Debug)]
pub struct CreatePoolArgs {
    /// Name of the compute pool
    pub name: String,

    /// Minimum number of nodes for the compute pool
    #[arg(long, default_value_t = sl_sql::compute_pool::DEFAULT_MIN_NODES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub min_nodes: u32,

    /// Maximum number of nodes for the compute pool (defaults to --min-nodes)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_nodes: Option<u32>,

    /// Name of the instance family, e.g. CPU_X64_XS
    #[arg(long)]
    pub family: String,

    /// Resume automatically when a service or job is submitted (default)
    #[arg(long, overrides_with = "no_auto_resume")]
    pub auto_resume: bool,

    /// Do not resume automatically
    #[arg(long, overrides_with = "auto_resume")]
    pub no_auto_resume: bool,

    /// Start the compute pool in a suspended state
    #[arg(long)]
    pub init_suspend: bool,

    /// Seconds of inactivity after which the compute pool suspends
    #[arg(long, default_value_t = sl_sql::compute_pool::DEFAULT_AUTO_SUSPEND_SECS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub auto_suspend_secs: u32,

    /// Comment for the compute pool
    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `compute-pool set`
#[derive(Args, Debug)]
pub struct SetPoolArgs {
    /// Name of the compute pool
    pub name: String,

    /// Minimum number of nodes for the compute pool
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub min_nodes: Option<u32>,

    /// Maximum number of nodes for the compute pool
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_nodes: Option<u32>,

    /// Resume automatically when a service or job is submitted
    #[arg(long, overrides_with = "no_auto_resume")]
    pub auto_resume: bool,

    /// Do not resume automatically
    #[arg(long, overrides_with = "auto_resume")]
    pub no_auto_resume: bool,

    /// Seconds of inactivity after which the compute pool suspends
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub auto_suspend_secs: Option<u32>,

    /// Comment for the compute pool
    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

impl SetPoolArgs {
    /// Tri-state `--auto-resume/--no-auto-resume`.
    pub fn auto_resume(&self) -> Option<bool> {
        tri_state(self.auto_resume, self.no_auto_resume)
    }
}

fn tri_state(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Arguments for `compute-pool unset`
#[derive(Args, Debug)]
pub struct UnsetPoolArgs {
    /// Name of the compute pool
    pub name: String,

    /// Reset the AUTO_RESUME property
    #[arg(long)]
    pub auto_resume: bool,

    /// Reset the AUTO_SUSPEND_SECS property
    #[arg(long)]
    pub auto_suspend_secs: bool,

    /// Reset the COMMENT property
    #[arg(long)]
    pub comment: bool,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for the service command
#[derive(Args, Debug)]
pub struct ServiceArgs {
    #[command(subcommand)]
    pub command: ServiceCommands,
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// Create a service from a YAML specification file
    Create(CreateServiceArgs),

    /// Retrieve the status of the service
    Status(ServiceNameArgs),

    /// Retrieve local logs from a service container
    Logs(ServiceLogsArgs),

    /// Replace the specification of the service
    Upgrade(UpgradeServiceArgs),

    /// List the endpoints of the service
    ListEndpoints(ServiceNameArgs),

    /// Suspend the service, shutting down and deleting its containers
    Suspend(ServiceNameArgs),

    /// Resume a suspended service
    Resume(ServiceNameArgs),

    /// Set one or more properties of the service
    Set(SetServiceArgs),

    /// Reset one or more properties of the service to their defaults
    Unset(UnsetServiceArgs),
}

/// Service commands that only take a name
#[derive(Args, Debug)]
pub struct ServiceNameArgs {
    /// Name of the service
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `service create`
#[derive(Args, Debug)]
pub struct CreateServiceArgs {
    /// Name of the service
    pub name: String,

    /// Compute pool to run the service on
    #[arg(long)]
    pub compute_pool: String,

    /// Path to the service specification file
    #[arg(long)]
    pub spec_path: PathBuf,

    /// Minimum number of service instances to run
    #[arg(long, default_value_t = sl_sql::service::DEFAULT_MIN_INSTANCES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub min_instances: u32,

    /// Maximum number of service instances to run (defaults to --min-instances)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_instances: Option<u32>,

    /// Resume automatically when a service function or ingress is called (default)
    #[arg(long, overrides_with = "no_auto_resume")]
    pub auto_resume: bool,

    /// Do not resume automatically
    #[arg(long, overrides_with = "auto_resume")]
    pub no_auto_resume: bool,

    /// External access integration the service may use; repeatable
    #[arg(long = "eai-name")]
    pub eai_names: Vec<String>,

    /// Warehouse used for queries issued by the service
    #[arg(long)]
    pub query_warehouse: Option<String>,

    /// Tag for the service as `name=value`; repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Comment for the service
    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `service logs`
#[derive(Args, Debug)]
pub struct ServiceLogsArgs {
    /// Name of the service
    pub name: String,

    /// Name of the container
    #[arg(long)]
    pub container_name: String,

    /// ID of the service instance, starting with 0
    #[arg(long)]
    pub instance_id: String,

    /// Number of trailing log lines to retrieve
    #[arg(long, default_value_t = sl_sql::service::DEFAULT_LOG_LINES)]
    pub num_lines: u32,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `service upgrade`
#[derive(Args, Debug)]
pub struct UpgradeServiceArgs {
    /// Name of the service
    pub name: String,

    /// Path to the new service specification file
    #[arg(long)]
    pub spec_path: PathBuf,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `service set`
#[derive(Args, Debug)]
pub struct SetServiceArgs {
    /// Name of the service
    pub name: String,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub min_instances: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_instances: Option<u32>,

    #[arg(long)]
    pub query_warehouse: Option<String>,

    #[arg(long, overrides_with = "no_auto_resume")]
    pub auto_resume: bool,

    #[arg(long, overrides_with = "auto_resume")]
    pub no_auto_resume: bool,

    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

impl SetServiceArgs {
    /// Tri-state `--auto-resume/--no-auto-resume`.
    pub fn auto_resume(&self) -> Option<bool> {
        tri_state(self.auto_resume, self.no_auto_resume)
    }
}

/// Arguments for `service unset`
#[derive(Args, Debug)]
pub struct UnsetServiceArgs {
    /// Name of the service
    pub name: String,

    /// Reset the MIN_INSTANCES property
    #[arg(long)]
    pub min_instances: bool,

    /// Reset the MAX_INSTANCES property
    #[arg(long)]
    pub max_instances: bool,

    /// Reset the QUERY_WAREHOUSE property
    #[arg(long)]
    pub query_warehouse: bool,

    /// Reset the AUTO_RESUME property
    #[arg(long)]
    pub auto_resume: bool,

    /// Reset the COMMENT property
    #[arg(long)]
    pub comment: bool,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for the object command
#[derive(Args, Debug)]
pub struct ObjectArgs {
    #[command(subcommand)]
    pub command: ObjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ObjectCommands {
    /// List objects of the given type
    List(ListObjectsArgs),

    /// Describe an object
    Describe(DescribeObjectArgs),

    /// Drop an object
    Drop(DropObjectArgs),
}

fn object_type_names() -> Vec<&'static str> {
    ObjectType::ALL.iter().map(ObjectType::cli_name).collect()
}

fn describable_object_type_names() -> Vec<&'static str> {
    ObjectType::ALL
        .iter()
        .filter(|t| t.supports_describe())
        .map(ObjectType::cli_name)
        .collect()
}

/// Arguments for `object list`
#[derive(Args, Debug)]
pub struct ListObjectsArgs {
    /// Type of object
    #[arg(value_parser = PossibleValuesParser::new(object_type_names()))]
    pub object_type: String,

    /// SQL LIKE pattern for filtering objects by name
    #[arg(short, long)]
    pub like: Option<String>,

    /// Restrict the listing to a container, e.g. `--in database my_db`
    #[arg(long = "in", num_args = 2, value_names = ["SCOPE", "NAME"])]
    pub scope: Option<Vec<String>>,

    /// List only the object with this (optionally qualified) name
    #[arg(long, conflicts_with_all = ["like", "scope"])]
    pub name: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `object describe`
#[derive(Args, Debug)]
pub struct DescribeObjectArgs {
    /// Type of object
    #[arg(value_parser = PossibleValuesParser::new(describable_object_type_names()))]
    pub object_type: String,

    /// Name of the object
    pub object_name: String,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for `object drop`
#[derive(Args, Debug)]
pub struct DropObjectArgs {
    /// Type of object
    #[arg(value_parser = PossibleValuesParser::new(object_type_names()))]
    pub object_type: String,

    /// Name of the object
    pub object_name: String,

    #[command(flatten)]
    pub connection: ConnectionOpt,
}

/// Arguments for the ident command
#[derive(Args, Debug)]
pub struct IdentArgs {
    #[command(subcommand)]
    pub command: IdentCommands,
}

#[derive(Subcommand, Debug)]
pub enum IdentCommands {
    /// Classify a value as an identifier or qualified object name
    Check {
        value: String,

        /// Maximum number of qualifying segments
        #[arg(long, default_value_t = sl_core::DEFAULT_MAX_DEPTH,
              value_parser = clap::value_parser!(i32).range(0..))]
        max_depth: i32,
    },

    /// Convert a value to a valid identifier, quoting when needed
    Quote { value: String },

    /// Show the name as stored by the platform
    Unquote { value: String },

    /// Render a value as a single-quoted string literal
    Literal { value: String },

    /// Build the SHOW ... LIKE pattern matching exactly this identifier
    LikePattern { value: String },
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
