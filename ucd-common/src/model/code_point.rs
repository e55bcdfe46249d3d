//! Code point documents
//!
//! A [`CodePoint`] is either a single scalar value (`cp`) or an inclusive
//! range (`first_cp`..=`last_cp`) whose members share every property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Code point record as decoded from the repertoire and stored in `code_points`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodePoint {
    /// Document identity, assigned at persistence time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Single code value (hex, no prefix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<String>,
    /// Range start (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_cp: Option<String>,
    /// Range end (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cp: Option<String>,

    /// Repertoire category, fixed when the record is read
    #[serde(default)]
    pub category: Category,

    #[serde(flatten)]
    pub properties: CodePointProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CodePoint {
    /// Empty record of the given category
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Default::default()
        }
    }

    /// Single-value record
    pub fn single(cp: impl Into<String>, category: Category) -> Self {
        Self {
            cp: Some(cp.into()),
            ..Self::new(category)
        }
    }

    /// Range record
    pub fn range(first: impl Into<String>, last: impl Into<String>, category: Category) -> Self {
        Self {
            first_cp: Some(first.into()),
            last_cp: Some(last.into()),
            ..Self::new(category)
        }
    }

    /// True when a non-empty single code value is present
    pub fn has_single_cp(&self) -> bool {
        is_present(&self.cp)
    }

    /// True when a non-empty range start is present
    pub fn has_range_start(&self) -> bool {
        is_present(&self.first_cp)
    }

    /// True when a non-empty range end is present
    pub fn has_range_end(&self) -> bool {
        is_present(&self.last_cp)
    }

    /// Character name (`na`)
    pub fn name(&self) -> Option<&str> {
        self.properties.names.name.as_deref()
    }

    /// Block name (`blk`)
    pub fn block(&self) -> Option<&str> {
        self.properties.block.as_deref()
    }

    /// Script (`sc`)
    pub fn script(&self) -> Option<&str> {
        self.properties.script.script.as_deref()
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// All descriptive properties of a code point, grouped as in UAX #42
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodePointProperties {
    #[serde(flatten)]
    pub age: AgeProperties,
    #[serde(flatten)]
    pub names: NameProperties,

    /// `blk`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// `gc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_category: Option<String>,
    /// `ccc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combining_class: Option<u8>,
    /// `isc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_comment: Option<String>,

    #[serde(flatten)]
    pub bidi: BidiProperties,
    #[serde(flatten)]
    pub decomposition: DecompositionProperties,
    #[serde(flatten)]
    pub numeric: NumericProperties,
    #[serde(flatten)]
    pub joining: JoiningProperties,
    #[serde(flatten)]
    pub case: CaseProperties,
    #[serde(flatten)]
    pub script: ScriptProperties,
    #[serde(flatten)]
    pub hangul: HangulProperties,
    #[serde(flatten)]
    pub indic: IndicProperties,
    #[serde(flatten)]
    pub identifier: IdentifierProperties,
    #[serde(flatten)]
    pub punctuation: PunctuationProperties,
    #[serde(flatten)]
    pub character: CharacterProperties,
    #[serde(flatten)]
    pub segmentation: SegmentationProperties,
    #[serde(flatten)]
    pub ideographic: IdeographicProperties,
    #[serde(flatten)]
    pub emoji: EmojiProperties,
    #[serde(flatten)]
    pub unihan: UnihanProperties,
}

/// `<name-alias>` child element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAlias {
    pub alias: String,
    #[serde(rename = "type")]
    pub alias_type: String,
}

/// Age property (UAX #42 §4.4.2)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeProperties {
    /// `age`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

/// Name properties (UAX #42 §4.4.3)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameProperties {
    /// `na`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `na1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    /// `<name-alias>` child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_aliases: Vec<NameAlias>,
}

/// Bidirectional properties (UAX #42 §4.4.7)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidiProperties {
    /// `bc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_class: Option<String>,
    /// `Bidi_M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_mirrored: Option<bool>,
    /// `bmg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_mirroring_glyph: Option<String>,
    /// `Bidi_C`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_control: Option<bool>,
    /// `bpt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_paired_bracket_type: Option<String>,
    /// `bpb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidi_paired_bracket: Option<String>,
}

/// Decomposition and normalization properties (UAX #42 §4.4.8)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompositionProperties {
    /// `dt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposition_type: Option<String>,
    /// `dm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposition_mapping: Option<String>,
    /// `CE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_exclusion: Option<bool>,
    /// `Comp_Ex`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_composition_exclusion: Option<bool>,
    /// `NFC_QC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfc_qc: Option<String>,
    /// `NFD_QC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfd_qc: Option<String>,
    /// `NFKC_QC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfkc_qc: Option<String>,
    /// `NFKD_QC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfkd_qc: Option<String>,
    /// `XO_NFC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xo_nfc: Option<bool>,
    /// `XO_NFD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xo_nfd: Option<bool>,
    /// `XO_NFKC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xo_nfkc: Option<bool>,
    /// `XO_NFKD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xo_nfkd: Option<bool>,
    /// `FC_NFKC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fc_nfkc: Option<String>,
}

/// Numeric properties (UAX #42 §4.4.9)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericProperties {
    /// `nt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_type: Option<String>,
    /// `nv`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<String>,
}

/// Joining properties (UAX #42 §4.4.10)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoiningProperties {
    /// `jt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_type: Option<String>,
    /// `jg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_group: Option<String>,
    /// `Join_C`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_control: Option<bool>,
}

/// Case properties (UAX #42 §4.4.13)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseProperties {
    /// `Upper`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    /// `Lower`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    /// `OUpper`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_uppercase: Option<bool>,
    /// `OLower`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_lowercase: Option<bool>,
    /// `suc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_uppercase: Option<String>,
    /// `slc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_lowercase: Option<String>,
    /// `stc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_titlecase: Option<String>,
    /// `uc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase_mapping: Option<String>,
    /// `lc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase_mapping: Option<String>,
    /// `tc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titlecase_mapping: Option<String>,
    /// `scf`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_case_folding: Option<String>,
    /// `cf`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_folding: Option<String>,
    /// `CI`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_ignorable: Option<bool>,
    /// `Cased`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cased: Option<bool>,
    /// `CWCF`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_casefolded: Option<bool>,
    /// `CWCM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_casemapped: Option<bool>,
    /// `CWL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_lowercased: Option<bool>,
    /// `CWKCF`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_nfkc_casefolded: Option<bool>,
    /// `CWT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_titlecased: Option<bool>,
    /// `CWU`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_when_uppercased: Option<bool>,
    /// `NFKC_CF`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfkc_cf: Option<String>,
    /// `NFKC_SCF`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfkc_scf: Option<String>,
}

/// Script properties (UAX #42 §4.4.14)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptProperties {
    /// `sc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// `scx`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_extensions: Option<String>,
}

/// Hangul properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HangulProperties {
    /// `hst`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hangul_syllable_type: Option<String>,
    /// `JSN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jamo_short_name: Option<String>,
}

/// Indic properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicProperties {
    /// `InSC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indic_syllabic_category: Option<String>,
    /// `InMC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indic_matra_category: Option<String>,
    /// `InPC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indic_positional_category: Option<String>,
    /// `InCB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indic_conjunct_break: Option<String>,
}

/// Identifier and pattern properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifierProperties {
    /// `IDS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_start: Option<bool>,
    /// `OIDS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_id_start: Option<bool>,
    /// `XIDS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xid_start: Option<bool>,
    /// `IDC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_continue: Option<bool>,
    /// `OIDC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_id_continue: Option<bool>,
    /// `XIDC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xid_continue: Option<bool>,
    /// `ID_Compat_Math_Start`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_compat_math_start: Option<bool>,
    /// `ID_Compat_Math_Continue`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_compat_math_continue: Option<bool>,
    /// `Pat_Syn`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_syntax: Option<bool>,
    /// `Pat_WS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_white_space: Option<bool>,
}

/// Punctuation and diacritic properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PunctuationProperties {
    /// `Dash`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<bool>,
    /// `Hyphen`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyphen: Option<bool>,
    /// `QMark`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_mark: Option<bool>,
    /// `Term`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_punctuation: Option<bool>,
    /// `STerm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_terminal: Option<bool>,
    /// `Dia`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diacritic: Option<bool>,
    /// `Ext`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extender: Option<bool>,
    /// `PCM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepended_concatenation_mark: Option<bool>,
}

/// Miscellaneous binary character properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterProperties {
    /// `Alpha`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabetic: Option<bool>,
    /// `OAlpha`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_alphabetic: Option<bool>,
    /// `Math`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub math: Option<bool>,
    /// `OMath`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_math: Option<bool>,
    /// `Hex`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_digit: Option<bool>,
    /// `AHex`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii_hex_digit: Option<bool>,
    /// `DI`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ignorable: Option<bool>,
    /// `ODI`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_default_ignorable: Option<bool>,
    /// `LOE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_order_exception: Option<bool>,
    /// `WSpace`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_space: Option<bool>,
    /// `vo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_orientation: Option<String>,
    /// `RI`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_indicator: Option<bool>,
    /// `Dep`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// `VS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_selector: Option<bool>,
    /// `NChar`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noncharacter: Option<bool>,
}

/// Grapheme, line and word segmentation properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentationProperties {
    /// `lb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_break: Option<String>,
    /// `ea`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east_asian_width: Option<String>,
    /// `Gr_Base`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grapheme_base: Option<bool>,
    /// `Gr_Ext`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grapheme_extend: Option<bool>,
    /// `OGr_Ext`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_grapheme_extend: Option<bool>,
    /// `Gr_Link`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grapheme_link: Option<bool>,
    /// `GCB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grapheme_cluster_break: Option<String>,
    /// `WB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_break: Option<String>,
    /// `SB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_break: Option<String>,
}

/// Ideographic properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeographicProperties {
    /// `Ideo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideographic: Option<bool>,
    /// `UIdeo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unified_ideograph: Option<bool>,
    /// `EqUIdeo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalent_unified_ideograph: Option<String>,
    /// `IDSB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids_binary_operator: Option<bool>,
    /// `IDST`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids_trinary_operator: Option<bool>,
    /// `IDSU`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids_unary_operator: Option<bool>,
    /// `Radical`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radical: Option<bool>,
}

/// Emoji properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmojiProperties {
    /// `Emoji`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    /// `EPres`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_presentation: Option<bool>,
    /// `EMod`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_modifier: Option<bool>,
    /// `EBase`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_modifier_base: Option<bool>,
    /// `EComp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_component: Option<bool>,
    /// `ExtPict`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_pictographic: Option<bool>,
}

/// Selected Unihan properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnihanProperties {
    /// `kDefinition`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_definition: Option<String>,
    /// `kMandarin`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_mandarin: Option<String>,
    /// `kCantonese`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_cantonese: Option<String>,
    /// `kJapaneseKun`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_japanese_kun: Option<String>,
    /// `kJapaneseOn`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_japanese_on: Option<String>,
    /// `kKorean`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_korean: Option<String>,
    /// `kVietnamese`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_vietnamese: Option<String>,
    /// `kTotalStrokes`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_total_strokes: Option<String>,
    /// `kSimplifiedVariant`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_simplified_variant: Option<String>,
    /// `kTraditionalVariant`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_traditional_variant: Option<String>,
}
