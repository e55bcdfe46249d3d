//! UCD XML decoder (UAX #42 flat format)
//!
//! Streams the document with quick-xml and builds a [`SourceDocument`]. Only
//! the root description, `<repertoire>` and `<blocks>` are read; every other
//! top-level section is skipped. `<group>` wrappers are transparent: their
//! attributes are not inherited by the records inside them.

use crate::error::SourceError;
use crate::source::attrs::apply_attribute;
use crate::source::document::{element_category, SourceDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use ucd_common::model::NameAlias;
use ucd_common::{Block, Category, CodePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Description,
    Repertoire,
    Blocks,
}

struct Decoder {
    doc: SourceDocument,
    seen_root: bool,
    section: Section,
    /// Repertoire record whose end tag has not been reached yet
    pending: Option<(Category, CodePoint)>,
    position: usize,
}

/// Decode UCD XML bytes into a source document
pub fn decode(xml: &[u8]) -> Result<SourceDocument, SourceError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut decoder = Decoder {
        doc: SourceDocument::default(),
        seen_root: false,
        section: Section::Outside,
        pending: None,
        position: 0,
    };
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(source) => {
                return Err(SourceError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };
        decoder.position = reader.buffer_position();

        match event {
            Event::Start(e) => decoder.open(&e, false)?,
            Event::Empty(e) => decoder.open(&e, true)?,
            Event::End(e) => decoder.close(e.local_name().as_ref()),
            Event::Text(t) if decoder.section == Section::Description => {
                let text = t.unescape().map_err(|e| decoder.xml_error(e))?;
                decoder.doc.description.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !decoder.seen_root {
        return Err(SourceError::NotUcd("missing <ucd> root element".to_string()));
    }

    let doc = decoder.doc;
    debug!(
        chars = doc.repertoire.chars.len(),
        reserved = doc.repertoire.reserved.len(),
        noncharacters = doc.repertoire.noncharacters.len(),
        surrogates = doc.repertoire.surrogates.len(),
        blocks = doc.blocks.len(),
        "Decoded UCD document"
    );
    Ok(doc)
}

impl Decoder {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), SourceError> {
        let local = e.local_name();
        let name = local.as_ref();

        if !self.seen_root {
            if name != b"ucd" {
                return Err(SourceError::NotUcd(format!(
                    "root element is <{}>",
                    String::from_utf8_lossy(name)
                )));
            }
            self.seen_root = true;
            for (key, value) in self.attributes(e)? {
                match key.as_str() {
                    "xmlns" => self.doc.xmlns = value,
                    "description" => self.doc.description = value,
                    _ => {}
                }
            }
            return Ok(());
        }

        match (self.section, name) {
            (Section::Outside, b"description") if !empty => {
                self.doc.description.clear();
                self.section = Section::Description;
            }
            (Section::Outside, b"repertoire") if !empty => self.section = Section::Repertoire,
            (Section::Outside, b"blocks") if !empty => self.section = Section::Blocks,
            (Section::Repertoire, b"name-alias") => self.name_alias(e)?,
            (Section::Repertoire, _) => {
                if let Some(category) = element_category(name) {
                    let record = self.record(e, category)?;
                    if empty {
                        self.doc.repertoire.subsequence_mut(category).push(record);
                    } else {
                        self.pending = Some((category, record));
                    }
                }
            }
            (Section::Blocks, b"block") => self.block(e)?,
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match (self.section, name) {
            (Section::Description, b"description")
            | (Section::Repertoire, b"repertoire")
            | (Section::Blocks, b"blocks") => self.section = Section::Outside,
            (Section::Repertoire, _) if element_category(name).is_some() => {
                if let Some((category, record)) = self.pending.take() {
                    self.doc.repertoire.subsequence_mut(category).push(record);
                }
            }
            _ => {}
        }
    }

    fn record(&self, e: &BytesStart<'_>, category: Category) -> Result<CodePoint, SourceError> {
        let element = category_element(category);
        let mut record = CodePoint::new(category);
        for (key, value) in self.attributes(e)? {
            apply_attribute(&mut record, element, &key, &value)?;
        }
        Ok(record)
    }

    fn name_alias(&mut self, e: &BytesStart<'_>) -> Result<(), SourceError> {
        let mut alias = NameAlias::default();
        for (key, value) in self.attributes(e)? {
            match key.as_str() {
                "alias" => alias.alias = value,
                "type" => alias.alias_type = value,
                _ => {}
            }
        }
        if let Some((_, record)) = self.pending.as_mut() {
            record.properties.names.name_aliases.push(alias);
        }
        Ok(())
    }

    fn block(&mut self, e: &BytesStart<'_>) -> Result<(), SourceError> {
        let mut block = Block::default();
        for (key, value) in self.attributes(e)? {
            match key.as_str() {
                "first-cp" => block.first_cp = value,
                "last-cp" => block.last_cp = value,
                "name" => block.name = value,
                _ => {}
            }
        }
        self.doc.blocks.push(block);
        Ok(())
    }

    fn attributes(&self, e: &BytesStart<'_>) -> Result<Vec<(String, String)>, SourceError> {
        let mut pairs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err.into()))?;
            let value = attr.unescape_value().map_err(|err| self.xml_error(err))?;
            pairs.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value.into_owned(),
            ));
        }
        Ok(pairs)
    }

    fn xml_error(&self, source: quick_xml::Error) -> SourceError {
        SourceError::Xml {
            position: self.position,
            source,
        }
    }
}

fn category_element(category: Category) -> &'static str {
    match category {
        Category::Normal => "char",
        Category::Reserved => "reserved",
        Category::Noncharacter => "noncharacter",
        Category::Surrogate => "surrogate",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
  <description>Unicode 16.0.0</description>
  <repertoire>
    <char cp="0041" age="1.1" na="LATIN CAPITAL LETTER A" blk="ASCII" gc="Lu" ccc="0" sc="Latn" Upper="Y" slc="0061"/>
    <char cp="0000" na="" blk="ASCII" gc="Cc">
      <name-alias alias="NULL" type="control"/>
      <name-alias alias="NUL" type="abbreviation"/>
    </char>
    <reserved first-cp="0378" last-cp="0379" age="unassigned" blk="Greek"/>
    <group gc="Co">
      <char first-cp="E000" last-cp="F8FF" blk="PUA"/>
    </group>
    <noncharacter first-cp="FDD0" last-cp="FDEF" NChar="Y"/>
    <surrogate first-cp="D800" last-cp="DB7F" blk="High_Surrogates"/>
  </repertoire>
  <blocks>
    <block first-cp="0000" last-cp="007F" name="Basic Latin"/>
    <block first-cp="0370" last-cp="03FF" name="Greek and Coptic"/>
  </blocks>
  <named-sequences>
    <named-sequence name="KEYCAP NUMBER SIGN" cps="0023 FE0F 20E3"/>
  </named-sequences>
  <standardized-variants>
    <standardized-variant cps="0030 FE00" desc="short diagonal stroke form"/>
  </standardized-variants>
</ucd>
"#;

    #[test]
    fn test_decode_sample_document() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();

        assert_eq!(doc.xmlns, "http://www.unicode.org/ns/2003/ucd/1.0");
        assert_eq!(doc.description, "Unicode 16.0.0");
        assert_eq!(doc.repertoire.chars.len(), 3);
        assert_eq!(doc.repertoire.reserved.len(), 1);
        assert_eq!(doc.repertoire.noncharacters.len(), 1);
        assert_eq!(doc.repertoire.surrogates.len(), 1);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[1].name, "Greek and Coptic");
    }

    #[test]
    fn test_records_tagged_at_read_time() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();

        assert!(doc.repertoire.chars.iter().all(|r| r.category == Category::Normal));
        assert_eq!(doc.repertoire.reserved[0].category, Category::Reserved);
        assert_eq!(doc.repertoire.noncharacters[0].category, Category::Noncharacter);
        assert_eq!(doc.repertoire.surrogates[0].category, Category::Surrogate);
    }

    #[test]
    fn test_name_aliases_attach_to_enclosing_record() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();

        let null = &doc.repertoire.chars[1];
        assert_eq!(null.cp.as_deref(), Some("0000"));
        assert_eq!(null.properties.names.name_aliases.len(), 2);
        assert_eq!(null.properties.names.name_aliases[1].alias, "NUL");
        assert_eq!(null.properties.names.name_aliases[1].alias_type, "abbreviation");
        assert!(doc.repertoire.chars[0].properties.names.name_aliases.is_empty());
    }

    #[test]
    fn test_group_attributes_not_inherited() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();

        let pua = &doc.repertoire.chars[2];
        assert_eq!(pua.first_cp.as_deref(), Some("E000"));
        assert!(pua.properties.general_category.is_none());
    }

    #[test]
    fn test_description_attribute_accepted() {
        let xml = r#"<ucd description="Unicode 15.1.0"><repertoire/></ucd>"#;
        let doc = decode(xml.as_bytes()).unwrap();
        assert_eq!(doc.description, "Unicode 15.1.0");
        assert!(doc.repertoire.is_empty());
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_invalid_boolean_fails_decode() {
        let xml = r#"<ucd><repertoire><char cp="0041" Upper="yes"/></repertoire></ucd>"#;
        let err = decode(xml.as_bytes()).unwrap_err();
        match err {
            SourceError::InvalidAttribute { element, attribute, value } => {
                assert_eq!(element, "char");
                assert_eq!(attribute, "Upper");
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_root_rejected() {
        let err = decode(b"<html><body/></html>").unwrap_err();
        assert!(matches!(err, SourceError::NotUcd(_)));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = decode(b"").unwrap_err();
        assert!(matches!(err, SourceError::NotUcd(_)));
    }

    #[test]
    fn test_malformed_xml_rejected() {
        let err = decode(b"<ucd><repertoire><char cp=\"0041\"></repertoire></ucd>").unwrap_err();
        assert!(matches!(err, SourceError::Xml { .. }));
    }
}
