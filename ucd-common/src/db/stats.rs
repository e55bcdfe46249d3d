//! Aggregate statistics over the persisted collections

use serde::{Deserialize, Serialize};

/// Counts across the three collections plus the script histogram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub code_point_count: i64,
    pub block_count: i64,
    pub metadata_count: i64,
    /// Up to ten scripts, largest first
    pub top_scripts: Vec<ScriptStat>,
}

/// Character count for one script value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStat {
    /// Script code; empty when records carry no script
    pub script: String,
    pub count: i64,
}

/// Character-type analysis of the code point collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterBreakdown {
    pub total: i64,
    /// Records with a non-empty `name`
    pub with_names: i64,
    /// Records whose `deprecated` property is true
    pub deprecated: i64,
    /// Records whose `noncharacter` property is true
    pub noncharacter: i64,
    /// Records identified by a single `cp` rather than a range
    pub with_cp: i64,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
