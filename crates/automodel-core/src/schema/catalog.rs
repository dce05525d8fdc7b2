use super::db::{Column, ForeignKey, Schema, Table, TableId};
use crate::{Error, Reflect, Result};

use indexmap::IndexMap;
use std::cell::OnceCell;

/// Owns the reflected schema for one generation run and answers structural
/// questions about it.
///
/// Every table is either a *join table* (exactly two columns, both carrying
/// a foreign key) or an *entity table*. Join tables describe many-to-many
/// associations and never become models of their own.
///
/// All enumerations follow reflection order.
#[derive(Debug)]
pub struct Catalog {
    schema: Schema,

    /// Namespace applied to unqualified names passed to [`Catalog::lookup`]
    namespace: Option<String>,

    /// Qualified table name -> table
    by_name: IndexMap<String, TableId>,

    /// Join table classification, computed on first use. Cleared by
    /// [`Catalog::refresh`].
    join_tables: OnceCell<Vec<TableId>>,
}

impl Catalog {
    /// Builds a catalog over `schema`. With a namespace, tables outside of it
    /// are dropped.
    pub fn new(schema: Schema, namespace: Option<String>) -> Catalog {
        let schema = scope(schema, namespace.as_deref());
        let by_name = index_by_name(&schema);

        Catalog {
            schema,
            namespace,
            by_name,
            join_tables: OnceCell::new(),
        }
    }

    /// Reflects the schema through `driver` and builds a catalog over it.
    /// Driver errors are returned unchanged.
    pub fn reflect(driver: &dyn Reflect, namespace: Option<&str>) -> Result<Catalog> {
        let schema = driver.reflect(namespace)?;

        tracing::debug!(
            tables = schema.tables.len(),
            namespace = namespace.unwrap_or(""),
            "reflected schema"
        );

        Ok(Catalog::new(schema, namespace.map(str::to_string)))
    }

    /// Replaces the reflected schema, dropping everything derived from the
    /// previous one.
    pub fn refresh(&mut self, schema: Schema) {
        let schema = scope(schema, self.namespace.as_deref());
        self.by_name = index_by_name(&schema);
        self.schema = schema;
        self.join_tables = OnceCell::new();
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.schema.table(id)
    }

    /// Every reflected table.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.schema.tables.iter()
    }

    /// Columns of `table` carrying at least one foreign key.
    pub fn foreign_key_columns<'a>(&self, table: &'a Table) -> impl Iterator<Item = &'a Column> {
        table.columns.iter().filter(|column| column.has_foreign_key())
    }

    pub fn is_join_table(&self, table: &Table) -> bool {
        table.columns.len() == 2 && self.foreign_key_columns(table).count() == 2
    }

    pub fn join_tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.join_table_ids().iter().map(|id| self.table(*id))
    }

    /// Tables that are not join tables; one model is generated per entity
    /// table.
    pub fn entity_tables(&self) -> impl Iterator<Item = &Table> + '_ {
        let join_tables = self.join_table_ids();
        self.tables()
            .filter(move |table| !join_tables.contains(&table.id))
    }

    /// Join tables with a column whose foreign key targets `table`.
    ///
    /// Only the first foreign key of each column is considered. A key whose
    /// target does not resolve never matches.
    pub fn join_tables_referencing<'a>(
        &'a self,
        table: &'a Table,
    ) -> impl Iterator<Item = &'a Table> + 'a {
        self.join_tables().filter(move |join_table| {
            join_table
                .columns
                .iter()
                .filter_map(Column::foreign_key)
                .any(|fk| self.references(fk, table))
        })
    }

    /// Resolves a table by name.
    ///
    /// When the catalog has a namespace and `name` is not already qualified
    /// with it, the namespace is prepended.
    pub fn lookup(&self, name: &str) -> Result<&Table> {
        let qualified = self.qualify(name);

        self.by_name
            .get(qualified.as_str())
            .map(|id| self.table(*id))
            .ok_or_else(|| Error::table_not_found(qualified))
    }

    /// The table a foreign key points at.
    ///
    /// Fails with a schema integrity error when the referenced table, or the
    /// referenced column on it, was not reflected.
    pub fn target_of(&self, fk: &ForeignKey) -> Result<&Table> {
        let Ok(target) = self.lookup(&fk.table) else {
            return Err(Error::schema_integrity(format!(
                "foreign key references table `{}` which was not reflected",
                fk.table
            )));
        };

        if target.column_by_name(&fk.column).is_none() {
            return Err(Error::schema_integrity(format!(
                "foreign key references column `{fk}` which does not exist"
            )));
        }

        Ok(target)
    }

    fn references(&self, fk: &ForeignKey, table: &Table) -> bool {
        self.lookup(&fk.table)
            .is_ok_and(|target| target.id == table.id)
    }

    fn qualify(&self, name: &str) -> String {
        match &self.namespace {
            Some(namespace)
                if !name
                    .strip_prefix(namespace.as_str())
                    .is_some_and(|rest| rest.starts_with('.')) =>
            {
                format!("{namespace}.{name}")
            }
            _ => name.to_string(),
        }
    }

    fn join_table_ids(&self) -> &[TableId] {
        self.join_tables.get_or_init(|| {
            let ids: Vec<_> = self
                .tables()
                .filter(|table| self.is_join_table(table))
                .map(|table| table.id)
                .collect();

            tracing::debug!(
                join_tables = ids.len(),
                entity_tables = self.schema.tables.len() - ids.len(),
                "classified tables"
            );

            ids
        })
    }
}

/// Keeps the tables of `namespace` and renumbers them.
fn scope(mut schema: Schema, namespace: Option<&str>) -> Schema {
    if let Some(namespace) = namespace {
        schema
            .tables
            .retain(|table| table.schema.as_deref() == Some(namespace));
    }

    schema.assign_ids();
    schema
}

fn index_by_name(schema: &Schema) -> IndexMap<String, TableId> {
    schema
        .tables
        .iter()
        .map(|table| (table.qualified_name(), table.id))
        .collect()
}
