use super::{ForeignKey, TableId, Type};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    #[cfg_attr(feature = "serde", serde(skip, default = "ColumnId::placeholder"))]
    pub id: ColumnId,

    /// The name of the column in the database.
    pub name: String,

    /// The database storage type of the column.
    pub ty: Type,

    /// Whether or not the column is nullable
    #[cfg_attr(feature = "serde", serde(default))]
    pub nullable: bool,

    /// True if the column is part of the table's primary key
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_key: bool,

    /// Outgoing foreign key references, in the order the database reports
    /// them. Only the first one takes part in relationship inference.
    #[cfg_attr(feature = "serde", serde(default))]
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            id: ColumnId::placeholder(),
            name: name.into(),
            ty,
            nullable: true,
            primary_key: false,
            foreign_keys: vec![],
        }
    }

    /// Marks the column as (part of) the primary key. Primary key columns are
    /// never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Adds a foreign key reference to `table.column`.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_keys.push(ForeignKey::new(table, column));
        self
    }

    pub fn has_foreign_key(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    /// The foreign key used for relationship inference.
    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_keys.first()
    }
}

impl ColumnId {
    pub(crate) fn placeholder() -> Self {
        Self {
            table: TableId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}
