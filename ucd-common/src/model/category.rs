//! Repertoire category of a code point record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which repertoire subsequence produced a record.
///
/// Assigned once when the record is read and never changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `<char>` entries: assigned characters
    #[default]
    Normal,
    /// `<reserved>` entries: unassigned code points
    Reserved,
    /// `<noncharacter>` entries
    Noncharacter,
    /// `<surrogate>` entries
    Surrogate,
}

impl Category {
    /// All categories in flattening order
    pub const ALL: [Category; 4] = [
        Category::Normal,
        Category::Reserved,
        Category::Noncharacter,
        Category::Surrogate,
    ];

    /// Stored document value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Reserved => "reserved",
            Category::Noncharacter => "noncharacter",
            Category::Surrogate => "surrogate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Noncharacter).unwrap();
        assert_eq!(json, "\"noncharacter\"");
    }

    #[test]
    fn test_as_str_matches_serde_value() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json.as_str(), Some(category.as_str()));
        }
    }
}
