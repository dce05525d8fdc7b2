use super::{literal, Formatter, Str, ToPython};

use automodel_core::{schema::db::Table, Catalog, ModelSet};

use std::collections::HashSet;

/// Join tables used as `secondary` by at least one model, in catalog order.
pub(super) fn secondaries<'a>(catalog: &'a Catalog, models: &ModelSet) -> Vec<&'a Table> {
    let used: HashSet<_> = models
        .iter()
        .flat_map(|model| &model.relations)
        .filter_map(|relation| relation.secondary())
        .collect();

    catalog
        .join_tables()
        .filter(|table| used.contains(&table.id))
        .collect()
}

/// Name of the module-level variable holding a join table.
pub(super) fn variable(table: &Table) -> String {
    literal::identifier(table.schema.as_deref(), &table.name)
}

/// `name = Table('name', metadata, ...)`
pub(super) struct JoinTable<'a>(pub(super) &'a Table);

impl ToPython for JoinTable<'_> {
    fn to_python(self, f: &mut Formatter<'_>) {
        let table = self.0;
        let renderer = f.renderer;

        fmt!(f, variable(table), " = Table(", Str(&table.name), ", metadata,\n");

        for column in &table.columns {
            fmt!(f, "    ", renderer.column(table, column), ",\n");
        }

        if let Some(schema) = &table.schema {
            fmt!(f, "    schema=", Str(schema), ",\n");
        }

        fmt!(f, ")\n");
    }
}
