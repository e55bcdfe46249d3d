//! Block documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named contiguous range of code points (`<block>` element)
///
/// Disjointness between blocks is a property of the source data and is not
/// checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_cp: String,
    pub last_cp: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Block {
    pub fn new(
        first_cp: impl Into<String>,
        last_cp: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            first_cp: first_cp.into(),
            last_cp: last_cp.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}
