//! Merge the repertoire subsequences into one record sequence

use crate::source::Repertoire;
use tracing::{debug, info};
use ucd_common::{Category, CodePoint};

/// Concatenate normal, reserved, noncharacter and surrogate records, in that
/// order, preserving each subsequence's internal order.
///
/// Reserved and noncharacter records are re-tagged with their subsequence's
/// category whatever they carried before. Normal and surrogate records pass
/// through unchanged.
pub fn flatten(repertoire: Repertoire) -> Vec<CodePoint> {
    let Repertoire {
        chars,
        mut reserved,
        mut noncharacters,
        surrogates,
    } = repertoire;

    debug!(
        normal = chars.len(),
        reserved = reserved.len(),
        noncharacter = noncharacters.len(),
        surrogate = surrogates.len(),
        "Flattening repertoire"
    );

    for record in &mut reserved {
        record.category = Category::Reserved;
    }
    for record in &mut noncharacters {
        record.category = Category::Noncharacter;
    }

    let mut records =
        Vec::with_capacity(chars.len() + reserved.len() + noncharacters.len() + surrogates.len());
    records.extend(chars);
    records.extend(reserved);
    records.extend(noncharacters);
    records.extend(surrogates);

    info!("Flattened {} code point records", records.len());
    records
}
