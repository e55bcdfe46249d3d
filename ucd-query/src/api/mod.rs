//! HTTP API handlers for ucd-query

pub mod buildinfo;
pub mod code_points;
pub mod error;
pub mod health;
pub mod stats;

pub use buildinfo::get_build_info;
pub use code_points::{get_block_code_points, get_code_point, list_blocks};
pub use error::{ApiError, ApiResult};
pub use health::health_routes;
pub use stats::{get_breakdown, get_metadata, get_stats};
