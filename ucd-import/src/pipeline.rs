//! Import pipeline: decoded document → transforms → store
//!
//! [`prepare`] is pure and runs before any connection is made, so a source
//! that cannot be transformed never touches the store. [`persist`] then
//! replaces each collection in turn; a failing stage aborts the stages after
//! it and leaves earlier stages' writes in place.

use crate::source::SourceDocument;
use crate::transform::{extract_blocks, flatten, normalize_all, Rejection};
use tracing::info;
use ucd_common::db::CharacterBreakdown;
use ucd_common::{Block, CodePoint, DatabaseStats, Store, UcdMetadata};
use uuid::Uuid;

/// Transformed data ready to be written
#[derive(Debug)]
pub struct PreparedImport {
    pub metadata: UcdMetadata,
    pub code_points: Vec<CodePoint>,
    pub blocks: Vec<Block>,
    /// Records produced by flattening, before validation
    pub flattened: usize,
    pub rejected: Vec<(usize, Rejection)>,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub version: String,
    pub metadata_id: Option<Uuid>,
    pub flattened: usize,
    pub rejected: Vec<(usize, Rejection)>,
    pub code_points_saved: usize,
    pub blocks_saved: usize,
    pub stats: DatabaseStats,
    pub breakdown: CharacterBreakdown,
}

/// Flatten, validate and normalize the repertoire and extract the blocks
pub fn prepare(doc: SourceDocument, version: &str) -> PreparedImport {
    let SourceDocument {
        description,
        repertoire,
        blocks,
        ..
    } = doc;

    let records = flatten(repertoire);
    let flattened = records.len();
    let outcome = normalize_all(records);

    PreparedImport {
        metadata: UcdMetadata::new(description, version),
        code_points: outcome.accepted,
        blocks: extract_blocks(Some(blocks)),
        flattened,
        rejected: outcome.rejected,
    }
}

/// Write the prepared data and gather statistics
pub async fn persist(store: &Store, prepared: PreparedImport) -> ucd_common::Result<PipelineReport> {
    let PreparedImport {
        metadata,
        mut code_points,
        mut blocks,
        flattened,
        rejected,
    } = prepared;

    store.rebuild_indexes().await?;
    let metadata = store.save_metadata(&metadata).await?;
    let code_points_saved = store.save_code_points(&mut code_points).await?;
    let blocks_saved = store.save_blocks(&mut blocks).await?;

    let stats = store.compute_stats().await?;
    let breakdown = store.character_breakdown().await?;

    Ok(PipelineReport {
        version: metadata.version,
        metadata_id: metadata.id,
        flattened,
        rejected,
        code_points_saved,
        blocks_saved,
        stats,
        breakdown,
    })
}

/// Transform a decoded document and replace the store contents with it
pub async fn run(
    store: &Store,
    doc: SourceDocument,
    version: &str,
) -> ucd_common::Result<PipelineReport> {
    let prepared = prepare(doc, version);
    info!(
        code_points = prepared.code_points.len(),
        rejected = prepared.rejected.len(),
        blocks = prepared.blocks.len(),
        "Source transformed"
    );
    persist(store, prepared).await
}

impl PipelineReport {
    /// Log the run summary
    pub fn log_summary(&self) {
        info!("=== UCD import summary (version {}) ===", self.version);
        info!(
            "Code points: {} saved ({} flattened, {} rejected)",
            self.code_points_saved,
            self.flattened,
            self.rejected.len()
        );
        info!("Blocks: {} saved", self.blocks_saved);
        info!(
            "Collections: {} code points, {} blocks, {} metadata",
            self.stats.code_point_count, self.stats.block_count, self.stats.metadata_count
        );
        for script in &self.stats.top_scripts {
            info!("  script {:<6} {}", script.script, script.count);
        }
        info!(
            "Characters: {} total, {} named, {} deprecated, {} noncharacter, {} single cp",
            self.breakdown.total,
            self.breakdown.with_names,
            self.breakdown.deprecated,
            self.breakdown.noncharacter,
            self.breakdown.with_cp
        );
        for category in &self.breakdown.by_category {
            info!("  category {:<12} {}", category.category, category.count);
        }
    }
}
