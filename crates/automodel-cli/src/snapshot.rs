use anyhow::{bail, Result};
use automodel_core::schema::db::Schema;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};

const SNAPSHOT_FILE_VERSION: u32 = 1;

/// A reflected schema saved as TOML, so models can be generated without a
/// live database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Snapshot file format version
    version: u32,

    /// The reflected schema
    pub schema: Schema,
}

impl SnapshotFile {
    /// Create a new snapshot file with the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            version: SNAPSHOT_FILE_VERSION,
            schema,
        }
    }

    /// Load a snapshot file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Save the snapshot file to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

impl FromStr for SnapshotFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut file: SnapshotFile = toml::from_str(s)?;

        if file.version != SNAPSHOT_FILE_VERSION {
            bail!(
                "unsupported snapshot file version: {}. Expected version {}",
                file.version,
                SNAPSHOT_FILE_VERSION
            );
        }

        // Identifiers are positional and not stored.
        file.schema.assign_ids();

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automodel_core::schema::db::{Column, Table, Type};
    use pretty_assertions::assert_eq;

    fn library() -> Schema {
        Schema::new([
            Table::new("author")
                .in_schema("library")
                .column(Column::new("id", Type::Integer(4)).primary_key())
                .column(Column::new("name", Type::VarChar(100)).not_null()),
            Table::new("book")
                .in_schema("library")
                .column(Column::new("id", Type::Integer(4)).primary_key())
                .column(Column::new(
                    "price",
                    Type::Numeric {
                        precision: None,
                        scale: None,
                    },
                ))
                .column(Column::new("author_id", Type::Integer(4)).references("library.author", "id")),
        ])
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let snapshot = SnapshotFile::new(library());
        let toml = snapshot.to_toml().unwrap();
        let loaded: SnapshotFile = toml.parse().unwrap();

        assert_eq!(loaded.schema, library());
        assert_eq!(loaded.schema.tables[1].columns[2].id, library().tables[1].columns[2].id);
    }

    #[test]
    fn reads_hand_written_snapshot() {
        let snapshot: SnapshotFile = r#"
            version = 1

            [[schema.tables]]
            name = "tag"

            [[schema.tables.columns]]
            name = "id"
            ty = { Integer = 8 }
            primary_key = true

            [[schema.tables.columns]]
            name = "label"
            ty = "Text"
            nullable = true
        "#
        .parse()
        .unwrap();

        let tag = &snapshot.schema.tables[0];
        assert_eq!(tag.name, "tag");
        assert_eq!(tag.columns[0].ty, Type::Integer(8));
        assert!(tag.columns[0].primary_key);
        assert!(!tag.columns[0].nullable);
        assert!(tag.columns[1].nullable);
        assert!(tag.columns[1].foreign_keys.is_empty());
    }

    #[test]
    fn rejects_unknown_version() {
        let err = "version = 2\n[schema]\n".parse::<SnapshotFile>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported snapshot file version: 2. Expected version 1"
        );
    }
}
