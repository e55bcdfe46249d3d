//! Persistence coordinator
//!
//! Replace-then-insert saves for the `metadata`, `code_points` and `blocks`
//! collections, index rebuild, lookups and aggregate statistics.
//!
//! Nothing here is transactional across collections: a reader running
//! concurrently with an import can observe a collection that has just been
//! emptied. Every operation runs under its own timeout and none is retried;
//! re-running the import is the recovery path.

use crate::db::collection::{Collection, DropIndexes, Filter};
use crate::db::indexes::{BLOCK_INDEXES, CODE_POINT_INDEXES};
use crate::db::init;
use crate::db::stats::{CategoryCount, CharacterBreakdown, DatabaseStats, ScriptStat};
use crate::model::{Block, Category, CodePoint, UcdMetadata};
use crate::{Error, Result};
use sqlx::SqlitePool;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const METADATA_COLLECTION: &str = "metadata";
pub const CODE_POINTS_COLLECTION: &str = "code_points";
pub const BLOCKS_COLLECTION: &str = "blocks";

/// Documents per code point insert batch
pub const CODE_POINT_BATCH_SIZE: usize = 1000;

const TOP_SCRIPTS_LIMIT: i64 = 10;

/// Per-operation timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub connect: Duration,
    pub indexes: Duration,
    pub metadata: Duration,
    pub code_points: Duration,
    pub blocks: Duration,
    pub stats: Duration,
    pub lookup: Duration,
    pub block_lookup: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            indexes: Duration::from_secs(30),
            metadata: Duration::from_secs(30),
            code_points: Duration::from_secs(60),
            blocks: Duration::from_secs(30),
            stats: Duration::from_secs(10),
            lookup: Duration::from_secs(5),
            block_lookup: Duration::from_secs(10),
        }
    }
}

/// Store context passed explicitly through the pipeline
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    metadata: Collection,
    code_points: Collection,
    blocks: Collection,
    timeouts: StoreTimeouts,
}

impl Store {
    /// Connect for writing (creates the database file if missing)
    pub async fn open(db_path: &Path, timeouts: StoreTimeouts) -> Result<Self> {
        let pool = init::connect(db_path, timeouts.connect).await?;
        Ok(Self::from_pool(pool, timeouts))
    }

    /// Connect read-only to an existing database
    pub async fn open_readonly(db_path: &Path, timeouts: StoreTimeouts) -> Result<Self> {
        let pool = init::connect_readonly(db_path, timeouts.connect).await?;
        Ok(Self::from_pool(pool, timeouts))
    }

    pub fn from_pool(pool: SqlitePool, timeouts: StoreTimeouts) -> Self {
        Self {
            metadata: Collection::new(pool.clone(), METADATA_COLLECTION),
            code_points: Collection::new(pool.clone(), CODE_POINTS_COLLECTION),
            blocks: Collection::new(pool.clone(), BLOCKS_COLLECTION),
            pool,
            timeouts,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn timeouts(&self) -> &StoreTimeouts {
        &self.timeouts
    }

    pub fn metadata_collection(&self) -> &Collection {
        &self.metadata
    }

    pub fn code_points_collection(&self) -> &Collection {
        &self.code_points
    }

    pub fn blocks_collection(&self) -> &Collection {
        &self.blocks
    }

    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Drop all indexes on `code_points` and `blocks`, then create the fixed set.
    ///
    /// A collection that does not exist yet counts as having no indexes.
    pub async fn rebuild_indexes(&self) -> Result<()> {
        bounded("rebuild indexes", self.timeouts.indexes, async {
            info!("Dropping existing indexes...");
            for collection in [&self.code_points, &self.blocks] {
                match collection.drop_indexes().await {
                    Ok(DropIndexes::Dropped(count)) => {
                        debug!(collection = collection.name(), count, "Indexes dropped");
                    }
                    Ok(DropIndexes::NamespaceNotFound) => {
                        info!(
                            "Collection {} doesn't exist yet, skipping index drop",
                            collection.name()
                        );
                    }
                    Err(e) => return Err(e.in_operation("drop indexes")),
                }
            }

            self.code_points
                .create_indexes(CODE_POINT_INDEXES)
                .await
                .map_err(|e| e.in_operation("create code point indexes"))?;
            self.blocks
                .create_indexes(BLOCK_INDEXES)
                .await
                .map_err(|e| e.in_operation("create block indexes"))?;

            info!("Indexes created successfully");
            Ok(())
        })
        .await
    }

    /// Replace the metadata singleton.
    ///
    /// If clearing fails nothing is inserted and the previous document stays.
    /// If the insert fails after a successful clear, the collection is left
    /// empty.
    pub async fn save_metadata(&self, metadata: &UcdMetadata) -> Result<UcdMetadata> {
        let now = crate::time::now();
        let document = UcdMetadata {
            id: Some(Uuid::new_v4()),
            description: metadata.description.clone(),
            version: metadata.version.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        bounded("save metadata", self.timeouts.metadata, async {
            info!("Clearing existing UCD metadata...");
            self.metadata
                .drop()
                .await
                .map_err(|e| e.in_operation("clear metadata"))?;

            info!("Saving UCD metadata...");
            self.metadata
                .insert_one(&document)
                .await
                .map_err(|e| e.in_operation("insert metadata"))?;
            Ok(())
        })
        .await?;

        if let Some(id) = document.id {
            info!("UCD metadata saved with ID: {}", id);
        }
        Ok(document)
    }

    /// Replace every code point document.
    ///
    /// Records are stamped in place with fresh identities and timestamps, then
    /// inserted in batches of [`CODE_POINT_BATCH_SIZE`]. A failing batch stops
    /// the save and is reported by its positional range; batches already
    /// inserted stay. Empty input leaves the collection untouched.
    pub async fn save_code_points(&self, records: &mut [CodePoint]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        bounded("save code points", self.timeouts.code_points, async {
            info!("Clearing existing code points...");
            self.code_points
                .delete_many()
                .await
                .map_err(|e| e.in_operation("clear code points"))?;

            let now = crate::time::now();
            for record in records.iter_mut() {
                record.id = Some(Uuid::new_v4());
                record.created_at = Some(now);
                record.updated_at = Some(now);
            }

            info!("Inserting {} code points...", records.len());
            for (index, batch) in records.chunks(CODE_POINT_BATCH_SIZE).enumerate() {
                let start = index * CODE_POINT_BATCH_SIZE;
                let end = start + batch.len();
                match self.code_points.insert_many(batch).await {
                    Ok(_) => debug!("Inserted batch {}-{}", start, end),
                    Err(Error::Database(source)) => {
                        return Err(Error::BatchInsert { start, end, source });
                    }
                    Err(other) => return Err(other),
                }
            }
            Ok(())
        })
        .await?;

        info!("Successfully saved {} code points", records.len());
        Ok(records.len())
    }

    /// Replace every block document in one unbatched insert
    pub async fn save_blocks(&self, blocks: &mut [Block]) -> Result<usize> {
        if blocks.is_empty() {
            return Ok(0);
        }

        bounded("save blocks", self.timeouts.blocks, async {
            info!("Clearing existing blocks...");
            self.blocks
                .delete_many()
                .await
                .map_err(|e| e.in_operation("clear blocks"))?;

            let now = crate::time::now();
            for block in blocks.iter_mut() {
                block.id = Some(Uuid::new_v4());
                block.created_at = Some(now);
                block.updated_at = Some(now);
            }

            info!("Inserting {} blocks...", blocks.len());
            self.blocks
                .insert_many(&*blocks)
                .await
                .map_err(|e| e.in_operation("insert blocks"))?;
            Ok(())
        })
        .await?;

        info!("Successfully saved {} blocks", blocks.len());
        Ok(blocks.len())
    }

    /// Collection counts and the ten most common scripts
    pub async fn compute_stats(&self) -> Result<DatabaseStats> {
        bounded("compute stats", self.timeouts.stats, async {
            let code_point_count = self
                .code_points
                .count(Filter::All)
                .await
                .map_err(|e| e.in_operation("count code points"))?;
            let block_count = self
                .blocks
                .count(Filter::All)
                .await
                .map_err(|e| e.in_operation("count blocks"))?;
            let metadata_count = self
                .metadata
                .count(Filter::All)
                .await
                .map_err(|e| e.in_operation("count metadata"))?;

            let top_scripts = self
                .code_points
                .group_count("script", TOP_SCRIPTS_LIMIT)
                .await
                .map_err(|e| e.in_operation("aggregate by script"))?
                .into_iter()
                .map(|(script, count)| ScriptStat {
                    script: script.unwrap_or_default(),
                    count,
                })
                .collect();

            Ok(DatabaseStats {
                code_point_count,
                block_count,
                metadata_count,
                top_scripts,
            })
        })
        .await
    }

    /// Named/deprecated/noncharacter/single-cp counts and per-category totals
    pub async fn character_breakdown(&self) -> Result<CharacterBreakdown> {
        bounded("character breakdown", self.timeouts.stats, async {
            let cps = &self.code_points;
            let mut by_category = Vec::with_capacity(Category::ALL.len());
            for category in Category::ALL {
                by_category.push(CategoryCount {
                    category: category.as_str().to_string(),
                    count: cps.count(Filter::Eq("category", category.as_str())).await?,
                });
            }

            Ok(CharacterBreakdown {
                total: cps.count(Filter::All).await?,
                with_names: cps.count(Filter::NonEmpty("name")).await?,
                deprecated: cps.count(Filter::IsTrue("deprecated")).await?,
                noncharacter: cps.count(Filter::IsTrue("noncharacter")).await?,
                with_cp: cps.count(Filter::NonEmpty("cp")).await?,
                by_category,
            })
        })
        .await
    }

    /// Code point record with exactly this single code value
    pub async fn code_point_by_cp(&self, cp: &str) -> Result<Option<CodePoint>> {
        bounded(
            "find code point",
            self.timeouts.lookup,
            self.code_points.find_one("cp", cp),
        )
        .await
    }

    /// Every code point record whose block equals `block_name`
    pub async fn code_points_by_block(&self, block_name: &str) -> Result<Vec<CodePoint>> {
        bounded(
            "find code points by block",
            self.timeouts.block_lookup,
            self.code_points.find_many("block", block_name),
        )
        .await
    }

    /// All block documents in source order
    pub async fn blocks(&self) -> Result<Vec<Block>> {
        bounded("list blocks", self.timeouts.block_lookup, self.blocks.find_all()).await
    }

    /// The current metadata document, if an import has completed
    pub async fn current_metadata(&self) -> Result<Option<UcdMetadata>> {
        bounded("read metadata", self.timeouts.lookup, async {
            let mut docs: Vec<UcdMetadata> = self.metadata.find_all().await?;
            Ok(docs.pop())
        })
        .await
    }
}

/// Run a store operation under its timeout, attributing raw database errors
/// to the operation name.
async fn bounded<T, F>(operation: &str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(|e| e.in_operation(operation)),
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Store operation timed out");
            Err(Error::Timeout {
                operation: operation.to_string(),
                timeout: limit,
            })
        }
    }
}
