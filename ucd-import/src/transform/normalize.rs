//! Record validation and field normalization

use thiserror::Error;
use tracing::{info, warn};
use ucd_common::CodePoint;

/// Mapping-field value meaning "no mapping"
const ABSENT_MAPPING: &str = "#";

/// Why a record was left out of the import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("code point must have either cp or first_cp")]
    MissingIdentity,
    #[error("incomplete range: first_cp without last_cp")]
    IncompleteRange,
}

/// Result of validating and normalizing a whole record sequence
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    /// Accepted records, normalized, in input order
    pub accepted: Vec<CodePoint>,
    /// Input position of every rejected record
    pub rejected: Vec<(usize, Rejection)>,
}

/// Check record identity: a single code value or a complete range
pub fn validate(record: &CodePoint) -> Result<(), Rejection> {
    if !record.has_single_cp() && !record.has_range_start() {
        return Err(Rejection::MissingIdentity);
    }
    if record.has_range_start() && !record.has_range_end() {
        return Err(Rejection::IncompleteRange);
    }
    Ok(())
}

/// Trim name-like fields and drop `#` placeholders from mapping fields.
///
/// Applying this twice gives the same record as applying it once.
pub fn normalize(record: &mut CodePoint) {
    let props = &mut record.properties;

    for field in [
        &mut props.names.name,
        &mut props.names.name1,
        &mut props.block,
        &mut props.script.script,
    ] {
        trim(field);
    }

    for field in [
        &mut props.bidi.bidi_mirroring_glyph,
        &mut props.decomposition.decomposition_mapping,
        &mut props.case.simple_uppercase,
        &mut props.case.simple_lowercase,
        &mut props.case.simple_titlecase,
        &mut props.case.uppercase_mapping,
        &mut props.case.lowercase_mapping,
        &mut props.case.titlecase_mapping,
        &mut props.case.simple_case_folding,
        &mut props.case.case_folding,
    ] {
        if field.as_deref() == Some(ABSENT_MAPPING) {
            *field = None;
        }
    }
}

/// Validate, then normalize an accepted record
pub fn validate_and_normalize(mut record: CodePoint) -> Result<CodePoint, Rejection> {
    validate(&record)?;
    normalize(&mut record);
    Ok(record)
}

/// Validate and normalize every record, skipping rejected ones
pub fn normalize_all(records: Vec<CodePoint>) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome {
        accepted: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };

    for (position, record) in records.into_iter().enumerate() {
        let identity = record
            .cp
            .clone()
            .or_else(|| record.first_cp.clone())
            .unwrap_or_default();
        match validate_and_normalize(record) {
            Ok(record) => outcome.accepted.push(record),
            Err(rejection) => {
                warn!(position, cp = %identity, "Skipping invalid code point: {}", rejection);
                outcome.rejected.push((position, rejection));
            }
        }
    }

    info!(
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        "Validated code points"
    );
    outcome
}

fn trim(field: &mut Option<String>) {
    if let Some(value) = field {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucd_common::Category;

    #[test]
    fn test_single_cp_accepted_iff_non_empty() {
        assert!(validate(&CodePoint::single("0041", Category::Normal)).is_ok());
        assert_eq!(
            validate(&CodePoint::single("", Category::Normal)),
            Err(Rejection::MissingIdentity)
        );
        assert_eq!(
            validate(&CodePoint::new(Category::Normal)),
            Err(Rejection::MissingIdentity)
        );
    }

    #[test]
    fn test_incomplete_range_rejected() {
        let mut record = CodePoint::new(Category::Reserved);
        record.first_cp = Some("0378".to_string());
        assert_eq!(validate(&record), Err(Rejection::IncompleteRange));

        record.last_cp = Some(String::new());
        assert_eq!(validate(&record), Err(Rejection::IncompleteRange));

        record.last_cp = Some("0379".to_string());
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::MissingIdentity.to_string(),
            "code point must have either cp or first_cp"
        );
        assert!(Rejection::IncompleteRange.to_string().contains("incomplete range"));
    }

    #[test]
    fn test_trims_name_fields() {
        let mut record = CodePoint::single("0041", Category::Normal);
        record.properties.names.name = Some("  LATIN CAPITAL LETTER A ".to_string());
        record.properties.names.name1 = Some("\tOLD NAME".to_string());
        record.properties.block = Some("ASCII ".to_string());
        record.properties.script.script = Some(" Latn".to_string());
        record.properties.general_category = Some(" Lu ".to_string());

        normalize(&mut record);

        assert_eq!(record.name(), Some("LATIN CAPITAL LETTER A"));
        assert_eq!(record.properties.names.name1.as_deref(), Some("OLD NAME"));
        assert_eq!(record.block(), Some("ASCII"));
        assert_eq!(record.script(), Some("Latn"));
        // Fields outside the trimmed set are left alone
        assert_eq!(record.properties.general_category.as_deref(), Some(" Lu "));
    }

    #[test]
    fn test_hash_placeholder_cleared() {
        let mut record = CodePoint::single("0041", Category::Normal);
        let hash = || Some("#".to_string());
        record.properties.bidi.bidi_mirroring_glyph = hash();
        record.properties.decomposition.decomposition_mapping = hash();
        let case = &mut record.properties.case;
        case.simple_uppercase = hash();
        case.simple_lowercase = hash();
        case.simple_titlecase = hash();
        case.uppercase_mapping = hash();
        case.lowercase_mapping = hash();
        case.titlecase_mapping = hash();
        case.simple_case_folding = hash();
        case.case_folding = hash();
        // Not a mapping field: '#' survives
        record.properties.names.name1 = hash();

        normalize(&mut record);

        assert!(record.properties.bidi.bidi_mirroring_glyph.is_none());
        assert!(record.properties.decomposition.decomposition_mapping.is_none());
        let case = &record.properties.case;
        assert!(case.simple_uppercase.is_none());
        assert!(case.simple_lowercase.is_none());
        assert!(case.simple_titlecase.is_none());
        assert!(case.uppercase_mapping.is_none());
        assert!(case.lowercase_mapping.is_none());
        assert!(case.titlecase_mapping.is_none());
        assert!(case.simple_case_folding.is_none());
        assert!(case.case_folding.is_none());
        assert_eq!(record.properties.names.name1.as_deref(), Some("#"));
    }

    #[test]
    fn test_mapping_values_other_than_hash_kept() {
        let mut record = CodePoint::single("0041", Category::Normal);
        record.properties.case.simple_lowercase = Some("0061".to_string());
        record.properties.case.case_folding = Some("#0061".to_string());

        normalize(&mut record);

        assert_eq!(record.properties.case.simple_lowercase.as_deref(), Some("0061"));
        assert_eq!(record.properties.case.case_folding.as_deref(), Some("#0061"));
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut record = CodePoint::single("00C5", Category::Normal);
        record.properties.names.name = Some(" LATIN CAPITAL LETTER A WITH RING ABOVE ".to_string());
        record.properties.decomposition.decomposition_mapping = Some("0041 030A".to_string());
        record.properties.case.titlecase_mapping = Some("#".to_string());

        normalize(&mut record);
        let once = record.clone();
        normalize(&mut record);

        assert_eq!(record, once);
    }

    #[test]
    fn test_normalize_all_skips_and_reports() {
        let mut incomplete = CodePoint::new(Category::Normal);
        incomplete.first_cp = Some("E000".to_string());

        let outcome = normalize_all(vec![
            CodePoint::single("0041", Category::Normal),
            incomplete,
            CodePoint::new(Category::Normal),
            CodePoint::range("0378", "0379", Category::Reserved),
        ]);

        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.accepted[1].first_cp.as_deref(), Some("0378"));
        assert_eq!(
            outcome.rejected,
            vec![(1, Rejection::IncompleteRange), (2, Rejection::MissingIdentity)]
        );
    }
}
