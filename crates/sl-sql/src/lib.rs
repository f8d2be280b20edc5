//! sl-sql - SQL statement builders for Snowline
//!
//! Every builder returns the SQL text of a single statement without the
//! trailing `;`. Names are validated through `sl-core` before they are
//! interpolated, and free text is always rendered as a string literal.

mod common;
pub mod compute_pool;
pub mod error;
pub mod object;
pub mod service;

pub use compute_pool::{CreateComputePool, SetComputePool, UnsetComputePool};
pub use error::{SqlError, SqlResult};
pub use object::{ObjectType, Scope};
pub use service::{CreateService, SetService, Tag, UnsetService};
