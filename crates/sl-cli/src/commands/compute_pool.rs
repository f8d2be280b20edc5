//! Compute pool command implementation

use anyhow::Result;
use sl_sql::compute_pool::{self, pool_name};
use sl_sql::{CreateComputePool, SetComputePool, UnsetComputePool};

use crate::cli::{ComputePoolArgs, ComputePoolCommands, GlobalArgs};
use crate::commands::common::{print_statements, resolve_connection};

/// Execute the compute-pool command
pub fn execute(args: &ComputePoolArgs, global: &GlobalArgs) -> Result<()> {
    // Names are validated before the connection is resolved
    let (statement, connection) = match &args.command {
        ComputePoolCommands::Create(create) => {
            let mut pool = CreateComputePool::new(pool_name(&create.name)?, &create.family);
            pool.min_nodes = create.min_nodes;
            pool.max_nodes = create.max_nodes;
            pool.auto_resume = create.auto_resume || !create.no_auto_resume;
            pool.initially_suspended = create.init_suspend;
            pool.auto_suspend_secs = create.auto_suspend_secs;
            pool.comment = create.comment.clone();
            (compute_pool::create(&pool)?, &create.connection)
        }
        ComputePoolCommands::StopAll(target) => {
            (compute_pool::stop_all(&pool_name(&target.name)?), &target.connection)
        }
        ComputePoolCommands::Suspend(target) => {
            (compute_pool::suspend(&pool_name(&target.name)?), &target.connection)
        }
        ComputePoolCommands::Resume(target) => {
            (compute_pool::resume(&pool_name(&target.name)?), &target.connection)
        }
        ComputePoolCommands::Set(set) => {
            let props = SetComputePool {
                min_nodes: set.min_nodes,
                max_nodes: set.max_nodes,
                auto_resume: set.auto_resume(),
                auto_suspend_secs: set.auto_suspend_secs,
                comment: set.comment.clone(),
            };
            (compute_pool::set(&pool_name(&set.name)?, &props)?, &set.connection)
        }
        ComputePoolCommands::Unset(unset) => {
            let props = UnsetComputePool {
                auto_resume: unset.auto_resume,
                auto_suspend_secs: unset.auto_suspend_secs,
                comment: unset.comment,
            };
            (compute_pool::unset(&pool_name(&unset.name)?, &props)?, &unset.connection)
        }
        ComputePoolCommands::Status(target) => {
            (compute_pool::status(&pool_name(&target.name)?), &target.connection)
        }
    };

    let connection = resolve_connection(global, connection)?;
    print_statements(global, &connection, &[statement])
}
