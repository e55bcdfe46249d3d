//! Attribute decoding for repertoire records
//!
//! UAX #42 abbreviates every property to a short attribute name. Each known
//! attribute is routed to its field on [`CodePoint`]; attributes outside the
//! modelled property set are ignored.

use crate::error::SourceError;
use ucd_common::CodePoint;

/// Decode a UCD boolean literal.
///
/// Only `Y` and `N` are valid; anything else is a decode failure.
pub fn decode_ucd_bool(element: &str, attribute: &str, value: &str) -> Result<bool, SourceError> {
    match value {
        "Y" => Ok(true),
        "N" => Ok(false),
        _ => Err(SourceError::invalid_attribute(element, attribute, value)),
    }
}

/// Apply one attribute of a `<char>`/`<reserved>`/`<noncharacter>`/`<surrogate>`
/// element to the record being built
pub fn apply_attribute(
    record: &mut CodePoint,
    element: &str,
    key: &str,
    value: &str,
) -> Result<(), SourceError> {
    let text = || Some(value.to_string());

    match key {
        "cp" => record.cp = text(),
        "first-cp" => record.first_cp = text(),
        "last-cp" => record.last_cp = text(),
        _ => apply_property(record, element, key, value)?,
    }
    Ok(())
}

fn apply_property(
    record: &mut CodePoint,
    element: &str,
    key: &str,
    value: &str,
) -> Result<(), SourceError> {
    let flag = || decode_ucd_bool(element, key, value);
    let text = || Some(value.to_string());
    let props = &mut record.properties;

    match key {
        "blk" => props.block = text(),
        "gc" => props.general_category = text(),
        "ccc" => {
            let class = value
                .parse::<u8>()
                .map_err(|_| SourceError::invalid_attribute(element, key, value))?;
            props.combining_class = Some(class);
        }
        "isc" => props.iso_comment = text(),
        "age" => props.age.age = text(),
        "na" => props.names.name = text(),
        "na1" => props.names.name1 = text(),
        "bc" => props.bidi.bidi_class = text(),
        "Bidi_M" => props.bidi.bidi_mirrored = Some(flag()?),
        "bmg" => props.bidi.bidi_mirroring_glyph = text(),
        "Bidi_C" => props.bidi.bidi_control = Some(flag()?),
        "bpt" => props.bidi.bidi_paired_bracket_type = text(),
        "bpb" => props.bidi.bidi_paired_bracket = text(),
        "dt" => props.decomposition.decomposition_type = text(),
        "dm" => props.decomposition.decomposition_mapping = text(),
        "CE" => props.decomposition.composition_exclusion = Some(flag()?),
        "Comp_Ex" => props.decomposition.full_composition_exclusion = Some(flag()?),
        "NFC_QC" => props.decomposition.nfc_qc = text(),
        "NFD_QC" => props.decomposition.nfd_qc = text(),
        "NFKC_QC" => props.decomposition.nfkc_qc = text(),
        "NFKD_QC" => props.decomposition.nfkd_qc = text(),
        "XO_NFC" => props.decomposition.xo_nfc = Some(flag()?),
        "XO_NFD" => props.decomposition.xo_nfd = Some(flag()?),
        "XO_NFKC" => props.decomposition.xo_nfkc = Some(flag()?),
        "XO_NFKD" => props.decomposition.xo_nfkd = Some(flag()?),
        "FC_NFKC" => props.decomposition.fc_nfkc = text(),
        "nt" => props.numeric.numeric_type = text(),
        "nv" => props.numeric.numeric_value = text(),
        "jt" => props.joining.joining_type = text(),
        "jg" => props.joining.joining_group = text(),
        "Join_C" => props.joining.join_control = Some(flag()?),
        "Upper" => props.case.uppercase = Some(flag()?),
        "Lower" => props.case.lowercase = Some(flag()?),
        "OUpper" => props.case.other_uppercase = Some(flag()?),
        "OLower" => props.case.other_lowercase = Some(flag()?),
        "suc" => props.case.simple_uppercase = text(),
        "slc" => props.case.simple_lowercase = text(),
        "stc" => props.case.simple_titlecase = text(),
        "uc" => props.case.uppercase_mapping = text(),
        "lc" => props.case.lowercase_mapping = text(),
        "tc" => props.case.titlecase_mapping = text(),
        "scf" => props.case.simple_case_folding = text(),
        "cf" => props.case.case_folding = text(),
        "CI" => props.case.case_ignorable = Some(flag()?),
        "Cased" => props.case.cased = Some(flag()?),
        "CWCF" => props.case.changes_when_casefolded = Some(flag()?),
        "CWCM" => props.case.changes_when_casemapped = Some(flag()?),
        "CWL" => props.case.changes_when_lowercased = Some(flag()?),
        "CWKCF" => props.case.changes_when_nfkc_casefolded = Some(flag()?),
        "CWT" => props.case.changes_when_titlecased = Some(flag()?),
        "CWU" => props.case.changes_when_uppercased = Some(flag()?),
        "NFKC_CF" => props.case.nfkc_cf = text(),
        "NFKC_SCF" => props.case.nfkc_scf = text(),
        "sc" => props.script.script = text(),
        "scx" => props.script.script_extensions = text(),
        "hst" => props.hangul.hangul_syllable_type = text(),
        "JSN" => props.hangul.jamo_short_name = text(),
        "InSC" => props.indic.indic_syllabic_category = text(),
        "InMC" => props.indic.indic_matra_category = text(),
        "InPC" => props.indic.indic_positional_category = text(),
        "InCB" => props.indic.indic_conjunct_break = text(),
        "IDS" => props.identifier.id_start = Some(flag()?),
        "OIDS" => props.identifier.other_id_start = Some(flag()?),
        "XIDS" => props.identifier.xid_start = Some(flag()?),
        "IDC" => props.identifier.id_continue = Some(flag()?),
        "OIDC" => props.identifier.other_id_continue = Some(flag()?),
        "XIDC" => props.identifier.xid_continue = Some(flag()?),
        "ID_Compat_Math_Start" => props.identifier.id_compat_math_start = Some(flag()?),
        "ID_Compat_Math_Continue" => props.identifier.id_compat_math_continue = Some(flag()?),
        "Pat_Syn" => props.identifier.pattern_syntax = Some(flag()?),
        "Pat_WS" => props.identifier.pattern_white_space = Some(flag()?),
        "Dash" => props.punctuation.dash = Some(flag()?),
        "Hyphen" => props.punctuation.hyphen = Some(flag()?),
        "QMark" => props.punctuation.quotation_mark = Some(flag()?),
        "Term" => props.punctuation.terminal_punctuation = Some(flag()?),
        "STerm" => props.punctuation.sentence_terminal = Some(flag()?),
        "Dia" => props.punctuation.diacritic = Some(flag()?),
        "Ext" => props.punctuation.extender = Some(flag()?),
        "PCM" => props.punctuation.prepended_concatenation_mark = Some(flag()?),
        "Alpha" => props.character.alphabetic = Some(flag()?),
        "OAlpha" => props.character.other_alphabetic = Some(flag()?),
        "Math" => props.character.math = Some(flag()?),
        "OMath" => props.character.other_math = Some(flag()?),
        "Hex" => props.character.hex_digit = Some(flag()?),
        "AHex" => props.character.ascii_hex_digit = Some(flag()?),
        "DI" => props.character.default_ignorable = Some(flag()?),
        "ODI" => props.character.other_default_ignorable = Some(flag()?),
        "LOE" => props.character.logical_order_exception = Some(flag()?),
        "WSpace" => props.character.white_space = Some(flag()?),
        "vo" => props.character.vertical_orientation = text(),
        "RI" => props.character.regional_indicator = Some(flag()?),
        "Dep" => props.character.deprecated = Some(flag()?),
        "VS" => props.character.variation_selector = Some(flag()?),
        "NChar" => props.character.noncharacter = Some(flag()?),
        "lb" => props.segmentation.line_break = text(),
        "ea" => props.segmentation.east_asian_width = text(),
        "Gr_Base" => props.segmentation.grapheme_base = Some(flag()?),
        "Gr_Ext" => props.segmentation.grapheme_extend = Some(flag()?),
        "OGr_Ext" => props.segmentation.other_grapheme_extend = Some(flag()?),
        "Gr_Link" => props.segmentation.grapheme_link = Some(flag()?),
        "GCB" => props.segmentation.grapheme_cluster_break = text(),
        "WB" => props.segmentation.word_break = text(),
        "SB" => props.segmentation.sentence_break = text(),
        "Ideo" => props.ideographic.ideographic = Some(flag()?),
        "UIdeo" => props.ideographic.unified_ideograph = Some(flag()?),
        "EqUIdeo" => props.ideographic.equivalent_unified_ideograph = text(),
        "IDSB" => props.ideographic.ids_binary_operator = Some(flag()?),
        "IDST" => props.ideographic.ids_trinary_operator = Some(flag()?),
        "IDSU" => props.ideographic.ids_unary_operator = Some(flag()?),
        "Radical" => props.ideographic.radical = Some(flag()?),
        "Emoji" => props.emoji.emoji = Some(flag()?),
        "EPres" => props.emoji.emoji_presentation = Some(flag()?),
        "EMod" => props.emoji.emoji_modifier = Some(flag()?),
        "EBase" => props.emoji.emoji_modifier_base = Some(flag()?),
        "EComp" => props.emoji.emoji_component = Some(flag()?),
        "ExtPict" => props.emoji.extended_pictographic = Some(flag()?),
        "kDefinition" => props.unihan.k_definition = text(),
        "kMandarin" => props.unihan.k_mandarin = text(),
        "kCantonese" => props.unihan.k_cantonese = text(),
        "kJapaneseKun" => props.unihan.k_japanese_kun = text(),
        "kJapaneseOn" => props.unihan.k_japanese_on = text(),
        "kKorean" => props.unihan.k_korean = text(),
        "kVietnamese" => props.unihan.k_vietnamese = text(),
        "kTotalStrokes" => props.unihan.k_total_strokes = text(),
        "kSimplifiedVariant" => props.unihan.k_simplified_variant = text(),
        "kTraditionalVariant" => props.unihan.k_traditional_variant = text(),
        // Attributes with no stored field
        _ => {}
    }
    Ok(())
}
