//! Document store access
//!
//! The store is a SQLite database holding one table per collection. Each row
//! is a JSON document; field queries and indexes go through `json_extract`.

pub mod collection;
pub mod indexes;
pub mod init;
pub mod stats;
pub mod store;

pub use collection::{Collection, DropIndexes, Filter};
pub use indexes::{IndexSpec, BLOCK_INDEXES, CODE_POINT_INDEXES};
pub use init::{connect, connect_readonly};
pub use stats::{CategoryCount, CharacterBreakdown, DatabaseStats, ScriptStat};
pub use store::{
    Store, StoreTimeouts, BLOCKS_COLLECTION, CODE_POINTS_COLLECTION, CODE_POINT_BATCH_SIZE,
    METADATA_COLLECTION,
};
