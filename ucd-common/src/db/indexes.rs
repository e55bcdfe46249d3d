//! Fixed index set for the code point and block collections

use crate::db::collection::json_field;
use crate::Result;

/// Index over one or more top-level document fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub keys: &'static [&'static str],
    pub unique: bool,
    /// Only index documents where the first key is present
    pub sparse: bool,
}

impl IndexSpec {
    pub const fn on(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            unique: false,
            sparse: false,
        }
    }

    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    pub const fn sparse(self) -> Self {
        Self {
            sparse: true,
            ..self
        }
    }

    /// Index name, e.g. `idx_code_points_first_cp_last_cp`
    pub fn name(&self, collection: &str) -> String {
        format!("idx_{}_{}", collection, self.keys.join("_"))
    }

    pub(crate) fn create_sql(&self, collection: &str) -> Result<String> {
        let columns = self
            .keys
            .iter()
            .map(|key| json_field(key))
            .collect::<Result<Vec<_>>>()?;

        let mut sql = format!(
            "CREATE {}INDEX IF NOT EXISTS \"{}\" ON {} ({})",
            if self.unique { "UNIQUE " } else { "" },
            self.name(collection),
            collection,
            columns.join(", ")
        );
        if self.sparse {
            sql.push_str(&format!(" WHERE {} IS NOT NULL", columns[0]));
        }
        Ok(sql)
    }
}

/// Indexes on `code_points`
pub const CODE_POINT_INDEXES: &[IndexSpec] = &[
    IndexSpec::on(&["cp"]).sparse(),
    IndexSpec::on(&["name"]),
    IndexSpec::on(&["block"]),
    IndexSpec::on(&["general_category"]),
    IndexSpec::on(&["script"]),
    IndexSpec::on(&["age"]),
    IndexSpec::on(&["first_cp", "last_cp"]),
];

/// Indexes on `blocks`
pub const BLOCK_INDEXES: &[IndexSpec] = &[
    IndexSpec::on(&["name"]).unique(),
    IndexSpec::on(&["first_cp", "last_cp"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_index_is_partial() {
        let sql = CODE_POINT_INDEXES[0].create_sql("code_points").unwrap();
        assert_eq!(
            sql,
            "CREATE INDEX IF NOT EXISTS \"idx_code_points_cp\" ON code_points \
             (json_extract(doc, '$.cp')) WHERE json_extract(doc, '$.cp') IS NOT NULL"
        );
    }

    #[test]
    fn test_unique_compound_rendering() {
        let unique = BLOCK_INDEXES[0].create_sql("blocks").unwrap();
        assert!(unique.starts_with("CREATE UNIQUE INDEX"));

        let compound = BLOCK_INDEXES[1].create_sql("blocks").unwrap();
        assert!(compound.contains(
            "(json_extract(doc, '$.first_cp'), json_extract(doc, '$.last_cp'))"
        ));
        assert_eq!(BLOCK_INDEXES[1].name("blocks"), "idx_blocks_first_cp_last_cp");
    }
}
