//! End-to-end import tests: XML → decode → transform → store
//!
//! Each test uses a throw-away SQLite store in a temp directory.

use std::io::{Cursor, Write};
use tempfile::TempDir;
use ucd_common::db::{StoreTimeouts, CODE_POINT_BATCH_SIZE};
use ucd_common::{Category, Error, Store};
use ucd_import::source::{self, SourceLocation, XML_ENTRY};
use ucd_import::transform::Rejection;
use ucd_import::{pipeline, SourceError};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SCENARIO: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
  <description>Unicode 16.0.0</description>
  <repertoire>
    <char cp="0041" na="LATIN CAPITAL LETTER A" blk="ASCII" gc="Lu" sc="Latn" slc="0061" suc="#"/>
    <reserved first-cp="0378" last-cp="0379" blk="Greek"/>
  </repertoire>
  <blocks>
    <block first-cp="0000" last-cp="007F" name="ASCII"/>
  </blocks>
</ucd>
"##;

async fn setup_store(dir: &TempDir) -> Store {
    Store::open(&dir.path().join("unicode_db.db"), StoreTimeouts::default())
        .await
        .expect("Should open store")
}

async fn import(store: &Store, xml: &str) -> ucd_common::Result<pipeline::PipelineReport> {
    let doc = source::decode(xml.as_bytes()).expect("Sample should decode");
    pipeline::run(store, doc, "16.0.0").await
}

#[tokio::test]
async fn test_ascii_scenario() {
    // Given: one normal char, one reserved range and one block
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;

    // When: the document is imported
    let report = import(&store, SCENARIO).await.unwrap();

    // Then: both records and the block are stored
    assert_eq!(report.code_points_saved, 2);
    assert_eq!(report.blocks_saved, 1);
    assert!(report.rejected.is_empty());
    assert_eq!(report.stats.code_point_count, 2);
    assert_eq!(report.stats.block_count, 1);
    assert_eq!(report.stats.metadata_count, 1);

    let a = store.code_point_by_cp("0041").await.unwrap().unwrap();
    assert_eq!(a.name(), Some("LATIN CAPITAL LETTER A"));
    assert_eq!(a.category, Category::Normal);
    assert!(a.properties.case.simple_uppercase.is_none(), "'#' must not be stored");
    assert_eq!(a.properties.case.simple_lowercase.as_deref(), Some("0061"));

    let ascii = store.code_points_by_block("ASCII").await.unwrap();
    assert_eq!(ascii.len(), 1);
    assert_eq!(ascii[0].cp.as_deref(), Some("0041"));

    let breakdown = &report.breakdown;
    let reserved = breakdown
        .by_category
        .iter()
        .find(|c| c.category == "reserved")
        .unwrap();
    assert_eq!(reserved.count, 1);
}

#[tokio::test]
async fn test_metadata_records_version_and_description() {
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;

    let report = import(&store, SCENARIO).await.unwrap();

    let metadata = store.current_metadata().await.unwrap().unwrap();
    assert_eq!(metadata.description, "Unicode 16.0.0");
    assert_eq!(metadata.version, "16.0.0");
    assert_eq!(metadata.id, report.metadata_id);
}

#[tokio::test]
async fn test_incomplete_range_excluded() {
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;
    let xml = r#"<ucd>
      <repertoire>
        <char cp="0041" na="LATIN CAPITAL LETTER A"/>
        <char first-cp="E000" last-cp="" blk="PUA"/>
      </repertoire>
      <blocks/>
    </ucd>"#;

    let report = import(&store, xml).await.unwrap();

    assert_eq!(report.flattened, 2);
    assert_eq!(report.rejected, vec![(1, Rejection::IncompleteRange)]);
    assert_eq!(report.stats.code_point_count, 1);
    assert_eq!(report.breakdown.total, 1);
    assert!(store.code_points_by_block("PUA").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_two_runs_same_final_state() {
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;

    let first = import(&store, SCENARIO).await.unwrap();
    let second = import(&store, SCENARIO).await.unwrap();

    assert_eq!(first.stats, second.stats);
    assert_eq!(first.breakdown, second.breakdown);
    assert_eq!(
        store.code_points_collection().index_names().await.unwrap().len(),
        7
    );

    // Identities are regenerated on every run
    assert_ne!(first.metadata_id, second.metadata_id);
    assert_eq!(store.blocks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reimport_replaces_previous_generation() {
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;
    import(&store, SCENARIO).await.unwrap();

    let smaller = r#"<ucd description="Unicode 16.0.0">
      <repertoire><char cp="0042" na="LATIN CAPITAL LETTER B" blk="ASCII"/></repertoire>
      <blocks><block first-cp="0000" last-cp="007F" name="Basic Latin"/></blocks>
    </ucd>"#;
    let report = import(&store, smaller).await.unwrap();

    assert_eq!(report.stats.code_point_count, 1);
    assert!(store.code_point_by_cp("0041").await.unwrap().is_none());
    assert_eq!(store.blocks().await.unwrap()[0].name, "Basic Latin");
}

#[tokio::test]
async fn test_batch_failure_aborts_later_stages() {
    // Given: enough records for two batches and a trigger rejecting one in the second
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;
    import(&store, SCENARIO).await.unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_poison BEFORE INSERT ON code_points \
         WHEN json_extract(NEW.doc, '$.cp') = '1F4A9' \
         BEGIN SELECT RAISE(ABORT, 'poisoned record'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let mut xml = String::from("<ucd><repertoire>");
    for i in 0..CODE_POINT_BATCH_SIZE {
        xml.push_str(&format!(r#"<char cp="{:04X}" blk="CJK"/>"#, 0x4E00 + i));
    }
    xml.push_str(r#"<char cp="1F4A9" blk="Misc"/>"#);
    xml.push_str(r#"</repertoire><blocks><block first-cp="4E00" last-cp="9FFF" name="CJK"/></blocks></ucd>"#);

    // When: the import runs
    let err = import(&store, &xml).await.unwrap_err();

    // Then: the failing batch is reported and blocks were not replaced
    match err {
        Error::BatchInsert { start, end, .. } => {
            assert_eq!(start, CODE_POINT_BATCH_SIZE);
            assert_eq!(end, CODE_POINT_BATCH_SIZE + 1);
        }
        other => panic!("expected batch failure, got {other:?}"),
    }
    let stats = store.compute_stats().await.unwrap();
    assert_eq!(stats.code_point_count, CODE_POINT_BATCH_SIZE as i64);
    assert_eq!(store.blocks().await.unwrap()[0].name, "ASCII");
}

#[tokio::test]
async fn test_source_error_before_store_mutation() {
    // Given: a populated store and a document with an invalid boolean
    let dir = TempDir::new().unwrap();
    let store = setup_store(&dir).await;
    import(&store, SCENARIO).await.unwrap();

    let bad = r#"<ucd><repertoire><char cp="0041" Dep="maybe"/></repertoire></ucd>"#;
    let err = source::decode(bad.as_bytes()).unwrap_err();
    assert!(matches!(err, SourceError::InvalidAttribute { .. }));

    // Then: nothing was touched
    assert_eq!(store.compute_stats().await.unwrap().code_point_count, 2);
}

#[tokio::test]
async fn test_import_from_local_archive() {
    let dir = TempDir::new().unwrap();
    let zip_path = dir.path().join("ucd.all.flat.zip");
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(XML_ENTRY, SimpleFileOptions::default()).unwrap();
    zip.write_all(SCENARIO.as_bytes()).unwrap();
    std::fs::write(&zip_path, zip.finish().unwrap().into_inner()).unwrap();

    let doc = source::load_document(&SourceLocation::File(zip_path))
        .await
        .unwrap();
    let store = setup_store(&dir).await;
    let report = pipeline::run(&store, doc, "16.0.0").await.unwrap();

    assert_eq!(report.code_points_saved, 2);
}
