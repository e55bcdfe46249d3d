//! Decoded source document
//!
//! Lives only for the duration of a run. Nothing here is persisted directly;
//! the store receives the flattened records, the blocks and a metadata
//! document derived from the root.

use ucd_common::{Block, Category, CodePoint};

/// Root of a decoded UCD XML file
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    /// Namespace declared on the root element
    pub xmlns: String,
    pub description: String,
    pub repertoire: Repertoire,
    pub blocks: Vec<Block>,
}

/// The four repertoire subsequences, each in document order
#[derive(Debug, Clone, Default)]
pub struct Repertoire {
    pub chars: Vec<CodePoint>,
    pub reserved: Vec<CodePoint>,
    pub noncharacters: Vec<CodePoint>,
    pub surrogates: Vec<CodePoint>,
}

impl Repertoire {
    /// Subsequence holding records of the given category
    pub fn subsequence_mut(&mut self, category: Category) -> &mut Vec<CodePoint> {
        match category {
            Category::Normal => &mut self.chars,
            Category::Reserved => &mut self.reserved,
            Category::Noncharacter => &mut self.noncharacters,
            Category::Surrogate => &mut self.surrogates,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len() + self.reserved.len() + self.noncharacters.len() + self.surrogates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Category for a repertoire element name, `None` for anything else
pub fn element_category(name: &[u8]) -> Option<Category> {
    match name {
        b"char" => Some(Category::Normal),
        b"reserved" => Some(Category::Reserved),
        b"noncharacter" => Some(Category::Noncharacter),
        b"surrogate" => Some(Category::Surrogate),
        _ => None,
    }
}
