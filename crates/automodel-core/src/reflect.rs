use crate::{schema::db::Schema, Result};

use std::fmt::Debug;

/// Reads live schema metadata into a [`Schema`].
///
/// Implemented by reflection drivers. Errors from the underlying database
/// (connection failure, permission denial) are reported as driver errors
/// and are not interpreted any further.
pub trait Reflect: Debug {
    /// Reflect every table, or only the tables in `namespace` when one is
    /// given. Foreign key targets are reported by qualified table name.
    fn reflect(&self, namespace: Option<&str>) -> Result<Schema>;
}

/// An already reflected schema, e.g. one loaded from a snapshot file.
impl Reflect for Schema {
    fn reflect(&self, namespace: Option<&str>) -> Result<Schema> {
        let tables = self
            .tables
            .iter()
            .filter(|table| namespace.is_none() || table.schema.as_deref() == namespace)
            .cloned();

        Ok(Schema::new(tables))
    }
}
