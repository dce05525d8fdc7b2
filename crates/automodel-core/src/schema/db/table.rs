use super::{Column, ColumnId};

use std::fmt;

/// A reflected database table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Uniquely identifies a table
    #[cfg_attr(feature = "serde", serde(skip, default = "TableId::placeholder"))]
    pub id: TableId,

    /// Schema namespace the table lives in, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub schema: Option<String>,

    /// Name of the table, without the namespace
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TableId::placeholder(),
            schema: None,
            name: name.into(),
            columns: vec![],
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        let index = self.columns.len();
        self.columns.push(Column {
            id: ColumnId {
                table: self.id,
                index,
            },
            ..column
        });
        self
    }

    /// `schema.name` when the table is namespaced, otherwise `name`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    pub(super) fn set_id(&mut self, id: TableId) {
        self.id = id;
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.id = ColumnId { table: id, index };
        }
    }
}

impl TableId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
