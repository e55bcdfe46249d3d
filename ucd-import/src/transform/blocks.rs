//! Block extraction

use tracing::debug;
use ucd_common::Block;

/// The decoded blocks, unchanged and in source order
pub fn extract_blocks(blocks: Option<Vec<Block>>) -> Vec<Block> {
    let blocks = blocks.unwrap_or_default();
    debug!("Extracted {} blocks", blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let source = vec![
            Block::new("0000", "007F", "Basic Latin"),
            Block::new("0080", "00FF", "Latin-1 Supplement"),
        ];
        assert_eq!(extract_blocks(Some(source.clone())), source);
    }

    #[test]
    fn test_absent_or_empty() {
        assert!(extract_blocks(None).is_empty());
        assert!(extract_blocks(Some(Vec::new())).is_empty());
    }
}
