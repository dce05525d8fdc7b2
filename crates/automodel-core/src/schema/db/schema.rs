use super::{Column, ColumnId, Table, TableId};

/// The reflected database schema: every table the reflection collaborator
/// reported, in the order it reported them.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Builds a schema from tables, assigning table and column identifiers
    /// from their positions.
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Self {
        let mut schema = Schema {
            tables: tables.into_iter().collect(),
        };
        schema.assign_ids();
        schema
    }

    /// Re-numbers table and column identifiers from their positions. Needed
    /// after deserializing or editing `tables` directly.
    pub fn assign_ids(&mut self) {
        for (index, table) in self.tables.iter_mut().enumerate() {
            table.set_id(TableId(index));
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table)
            .columns
            .get(id.index)
            .expect("invalid column ID")
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }
}
