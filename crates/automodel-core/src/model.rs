use crate::{
    bail, relation,
    schema::{
        db::{Table, TableId},
        Catalog, ModelName,
    },
    AmbiguousRelationship, Relation, Result,
};

use indexmap::IndexMap;

/// Model names for every entity table, computed before any relation is
/// inferred so relations can refer to models that are generated later.
#[derive(Debug, Default, Clone)]
pub struct ModelNames {
    names: IndexMap<TableId, ModelName>,
}

impl ModelNames {
    pub fn new(catalog: &Catalog) -> ModelNames {
        let names = catalog
            .entity_tables()
            .map(|table| (table.id, ModelName::from_table(table)))
            .collect();

        ModelNames { names }
    }

    /// The model name for `table`. Tables without a model (join tables)
    /// still get the name their model would have.
    pub fn get(&self, table: &Table) -> ModelName {
        self.names
            .get(&table.id)
            .cloned()
            .unwrap_or_else(|| ModelName::from_table(table))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything needed to declare the model of one entity table.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub name: ModelName,

    /// The entity table the model maps
    pub table: TableId,

    /// Relations in declaration order
    pub relations: Vec<Relation>,

    pub warnings: Vec<AmbiguousRelationship>,
}

/// The models generated for one run, in catalog order.
#[derive(Debug, Default, Clone)]
pub struct ModelSet {
    models: Vec<ModelDefinition>,
}

impl ModelSet {
    /// Builds a model for every entity table. Any schema integrity error
    /// aborts the whole build.
    pub fn build(catalog: &Catalog) -> Result<ModelSet> {
        let names = ModelNames::new(catalog);
        Self::build_for(catalog, &names, catalog.entity_tables())
    }

    /// Builds models for the named tables only, in the order given.
    pub fn only<I>(catalog: &Catalog, tables: I) -> Result<ModelSet>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut selected = vec![];

        for name in tables {
            let table = catalog.lookup(name.as_ref())?;

            if catalog.is_join_table(table) {
                bail!(
                    "table `{}` is a join table and has no model of its own",
                    table.qualified_name()
                );
            }

            selected.push(table);
        }

        let names = ModelNames::new(catalog);
        Self::build_for(catalog, &names, selected)
    }

    fn build_for<'a>(
        catalog: &'a Catalog,
        names: &ModelNames,
        tables: impl IntoIterator<Item = &'a Table>,
    ) -> Result<ModelSet> {
        let mut models = vec![];

        for table in tables {
            let inference = relation::infer(catalog, names, table)?;

            models.push(ModelDefinition {
                name: names.get(table),
                table: table.id,
                relations: inference.relations,
                warnings: inference.warnings,
            });
        }

        tracing::debug!(models = models.len(), "built model set");

        Ok(ModelSet { models })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ModelDefinition> + '_ {
        self.models.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|model| model.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Every warning raised while building the set.
    pub fn warnings(&self) -> impl Iterator<Item = &AmbiguousRelationship> + '_ {
        self.models.iter().flat_map(|model| &model.warnings)
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a ModelDefinition;
    type IntoIter = std::slice::Iter<'a, ModelDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
