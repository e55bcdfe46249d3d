//! Document models persisted by the importer
//!
//! Property groups follow the UAX #42 grouping; see
//! <https://www.unicode.org/reports/tr42/> for the attribute catalogue.

mod block;
mod category;
mod code_point;
mod metadata;

pub use block::Block;
pub use category::Category;
pub use code_point::*;
pub use metadata::UcdMetadata;
