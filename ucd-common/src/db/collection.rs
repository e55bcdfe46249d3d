//! JSON document collections on top of SQLite tables
//!
//! Every collection is a table `(id TEXT PRIMARY KEY, doc TEXT NOT NULL)`.
//! A collection that has never been written to does not exist; reads against
//! it behave as if it were empty, writes create it.

use crate::db::indexes::IndexSpec;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

/// Handle to one named collection
#[derive(Debug, Clone)]
pub struct Collection {
    pool: SqlitePool,
    name: &'static str,
}

/// Outcome of dropping a collection's indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndexes {
    /// Collection exists; this many indexes were dropped
    Dropped(usize),
    /// Collection does not exist yet
    NamespaceNotFound,
}

/// Document predicate for counts and lookups
#[derive(Debug, Clone, Copy)]
pub enum Filter<'a> {
    /// Every document
    All,
    /// Field equals the given string
    Eq(&'a str, &'a str),
    /// Field is boolean true
    IsTrue(&'a str),
    /// Field is present and not the empty string
    NonEmpty(&'a str),
}

impl Collection {
    pub fn new(pool: SqlitePool, name: &'static str) -> Self {
        Self { pool, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the backing table exists
    pub async fn exists(&self) -> Result<bool> {
        let found: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(self.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    /// Create the backing table if missing
    pub async fn ensure_exists(&self) -> Result<()> {
        sqlx::query(&self.create_table_sql())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop the collection with its documents and indexes
    pub async fn drop(&self) -> Result<()> {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", self.name))
            .execute(&self.pool)
            .await?;
        debug!(collection = self.name, "Collection dropped");
        Ok(())
    }

    /// Delete every document, keeping the collection and its indexes
    pub async fn delete_many(&self) -> Result<u64> {
        if !self.exists().await? {
            return Ok(0);
        }
        let result = sqlx::query(&format!("DELETE FROM {}", self.name))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert documents in one transaction.
    ///
    /// Each document must serialize to a JSON object carrying a string `id`.
    /// Either every document is inserted or none is.
    pub async fn insert_many<T: Serialize>(&self, docs: &[T]) -> Result<u64> {
        let rows = docs
            .iter()
            .map(to_row)
            .collect::<Result<Vec<(String, String)>>>()?;

        let insert_sql = format!("INSERT INTO {} (id, doc) VALUES (?, ?)", self.name);

        let mut tx = self.pool.begin().await?;
        sqlx::query(&self.create_table_sql())
            .execute(&mut *tx)
            .await?;
        for (id, doc) in &rows {
            sqlx::query(&insert_sql)
                .bind(id)
                .bind(doc)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(rows.len() as u64)
    }

    /// Insert a single document
    pub async fn insert_one<T: Serialize>(&self, doc: &T) -> Result<()> {
        self.insert_many(std::slice::from_ref(doc)).await?;
        Ok(())
    }

    /// Count documents matching the filter
    pub async fn count(&self, filter: Filter<'_>) -> Result<i64> {
        if !self.exists().await? {
            return Ok(0);
        }
        let (clause, bind) = filter.to_sql()?;
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", self.name, clause);
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// First document (insertion order) whose field equals `value`
    pub async fn find_one<T: DeserializeOwned>(&self, field: &str, value: &str) -> Result<Option<T>> {
        if !self.exists().await? {
            return Ok(None);
        }
        let sql = format!(
            "SELECT doc FROM {} WHERE {} = ? ORDER BY rowid LIMIT 1",
            self.name,
            json_field(field)?
        );
        let doc: Option<String> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        doc.map(|d| serde_json::from_str(&d).map_err(Error::from))
            .transpose()
    }

    /// All documents (insertion order) whose field equals `value`
    pub async fn find_many<T: DeserializeOwned>(&self, field: &str, value: &str) -> Result<Vec<T>> {
        if !self.exists().await? {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT doc FROM {} WHERE {} = ? ORDER BY rowid",
            self.name,
            json_field(field)?
        );
        let docs: Vec<String> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        docs.iter()
            .map(|d| serde_json::from_str(d).map_err(Error::from))
            .collect()
    }

    /// Every document (insertion order)
    pub async fn find_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.exists().await? {
            return Ok(Vec::new());
        }
        let docs: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {} ORDER BY rowid",
            self.name
        ))
        .fetch_all(&self.pool)
        .await?;
        docs.iter()
            .map(|d| serde_json::from_str(d).map_err(Error::from))
            .collect()
    }

    /// Group documents by a field value and count each group, largest first.
    ///
    /// Documents without the field form a `None` group. Ties come back in
    /// whatever order SQLite's grouping produces.
    pub async fn group_count(&self, field: &str, limit: i64) -> Result<Vec<(Option<String>, i64)>> {
        if !self.exists().await? {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} AS value, COUNT(*) AS count FROM {} GROUP BY value ORDER BY count DESC LIMIT ?",
            json_field(field)?,
            self.name
        );
        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Names of the user-created indexes on this collection
    pub async fn index_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ? AND sql IS NOT NULL ORDER BY name",
        )
        .bind(self.name)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    /// Drop every user-created index
    pub async fn drop_indexes(&self) -> Result<DropIndexes> {
        if !self.exists().await? {
            return Ok(DropIndexes::NamespaceNotFound);
        }
        let names = self.index_names().await?;
        for name in &names {
            sqlx::query(&format!("DROP INDEX IF EXISTS \"{}\"", name))
                .execute(&self.pool)
                .await?;
        }
        Ok(DropIndexes::Dropped(names.len()))
    }

    /// Create the given indexes, creating the collection first if needed
    pub async fn create_indexes(&self, indexes: &[IndexSpec]) -> Result<()> {
        self.ensure_exists().await?;
        for index in indexes {
            let sql = index.create_sql(self.name)?;
            debug!(collection = self.name, sql = %sql, "Creating index");
            sqlx::query(&sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
            self.name
        )
    }
}

impl Filter<'_> {
    fn to_sql(&self) -> Result<(String, Option<&str>)> {
        Ok(match *self {
            Filter::All => ("1 = 1".to_string(), None),
            Filter::Eq(field, value) => (format!("{} = ?", json_field(field)?), Some(value)),
            Filter::IsTrue(field) => (format!("{} = 1", json_field(field)?), None),
            Filter::NonEmpty(field) => {
                let expr = json_field(field)?;
                (format!("{expr} IS NOT NULL AND {expr} != ''"), None)
            }
        })
    }
}

/// `json_extract` expression for a top-level document field.
///
/// Index expressions and queries must render identically for SQLite to use
/// the index, so everything goes through here.
pub(crate) fn json_field(field: &str) -> Result<String> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(Error::InvalidInput(format!("Invalid field name: {field}")));
    }
    Ok(format!("json_extract(doc, '$.{field}')"))
}

fn to_row<T: Serialize>(doc: &T) -> Result<(String, String)> {
    let value = serde_json::to_value(doc)?;
    let id = value
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::InvalidInput("Document has no string id".to_string()))?
        .to_string();
    Ok((id, value.to_string()))
}
