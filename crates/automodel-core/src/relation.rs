mod warning;
pub use warning::AmbiguousRelationship;

use crate::{
    model::ModelNames,
    schema::{
        db::{Column, ColumnId, Table, TableId},
        humanize, pluralize, Catalog, ModelName,
    },
    Result,
};

use std::collections::HashSet;

/// A relationship attribute to declare on a generated model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,

    /// Table whose model declares the attribute
    pub source: TableId,

    /// Table on the other side of the relationship
    pub target: TableId,

    /// Attribute name on the source model
    pub attribute: String,

    /// Model generated for `target`
    pub target_model: ModelName,

    /// Name of the reciprocal attribute placed on the target model
    pub back_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    /// `source` holds a foreign key to a single `target` row. The target
    /// gets a collection of `source` rows through the back-reference.
    OneToMany {
        /// Foreign key column on `source`
        column: ColumnId,
    },

    /// `source` and `target` are linked through the `secondary` join table.
    ManyToMany {
        secondary: TableId,

        /// Set when both join table columns reference `source`
        self_join: Option<SelfJoin>,
    },
}

/// Columns of a join table whose keys both reference the same table. The
/// first column is the local side, the second the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfJoin {
    pub local: ColumnId,
    pub remote: ColumnId,
}

/// Relations inferred for one entity table, together with the advisories
/// raised along the way.
#[derive(Debug, Default, Clone)]
pub struct Inference {
    pub relations: Vec<Relation>,
    pub warnings: Vec<AmbiguousRelationship>,
}

impl Relation {
    pub fn is_many_to_many(&self) -> bool {
        matches!(self.kind, RelationKind::ManyToMany { .. })
    }

    /// The join table of a many-to-many relation.
    pub fn secondary(&self) -> Option<TableId> {
        match self.kind {
            RelationKind::ManyToMany { secondary, .. } => Some(secondary),
            RelationKind::OneToMany { .. } => None,
        }
    }

    pub fn self_join(&self) -> Option<SelfJoin> {
        match self.kind {
            RelationKind::ManyToMany { self_join, .. } => self_join,
            RelationKind::OneToMany { .. } => None,
        }
    }
}

/// Infers the relations to declare on the model for `table`.
///
/// Foreign key columns of `table` come first, in column order, then the
/// many-to-many relations through every join table referencing `table`, in
/// catalog order. A foreign key that does not resolve aborts inference with
/// a schema integrity error.
pub fn infer(catalog: &Catalog, names: &ModelNames, table: &Table) -> Result<Inference> {
    let mut cx = Infer {
        catalog,
        names,
        table,
        inference: Inference::default(),
    };

    cx.direct()?;
    cx.indirect()?;
    cx.check_attributes();

    tracing::debug!(
        table = %table.name,
        relations = cx.inference.relations.len(),
        "inferred relations"
    );

    Ok(cx.inference)
}

struct Infer<'a> {
    catalog: &'a Catalog,
    names: &'a ModelNames,
    table: &'a Table,
    inference: Inference,
}

impl<'a> Infer<'a> {
    fn direct(&mut self) -> Result<()> {
        let (catalog, table) = (self.catalog, self.table);

        for column in catalog.foreign_key_columns(table) {
            if column.foreign_keys.len() > 1 {
                self.warn(AmbiguousRelationship::MultipleForeignKeys {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    count: column.foreign_keys.len(),
                });
            }

            let target = self.target_of(column)?;

            self.inference.relations.push(Relation {
                kind: RelationKind::OneToMany { column: column.id },
                source: table.id,
                target: target.id,
                attribute: humanize(&target.name),
                target_model: self.names.get(target),
                back_reference: Some(pluralize(&table.name)),
            });
        }

        Ok(())
    }

    fn indirect(&mut self) -> Result<()> {
        let (catalog, table) = (self.catalog, self.table);

        for join_table in catalog.join_tables_referencing(table) {
            let targets = join_table
                .columns
                .iter()
                .map(|column| Ok((column, self.target_of(column)?)))
                .collect::<Result<Vec<_>>>()?;

            self.check_join_targets(join_table);

            let other = targets
                .iter()
                .find(|(_, target)| target.id != table.id);

            let (target, self_join) = match other {
                Some((_, target)) => (*target, None),
                None => {
                    let [(local, _), (remote, _)] = targets[..] else {
                        unreachable!("join tables have exactly two columns")
                    };

                    let self_join = SelfJoin {
                        local: local.id,
                        remote: remote.id,
                    };

                    (table, Some(self_join))
                }
            };

            self.inference.relations.push(Relation {
                kind: RelationKind::ManyToMany {
                    secondary: join_table.id,
                    self_join,
                },
                source: table.id,
                target: target.id,
                attribute: pluralize(&target.name),
                target_model: self.names.get(target),
                back_reference: Some(pluralize(&table.name)),
            });
        }

        Ok(())
    }

    /// Join tables are only understood when every column carries a single
    /// key and the keys reach at most two distinct tables.
    fn check_join_targets(&mut self, join_table: &Table) {
        let catalog = self.catalog;
        let mut distinct = HashSet::new();

        for column in &join_table.columns {
            if column.foreign_keys.len() > 1 {
                self.warn(AmbiguousRelationship::MultipleForeignKeys {
                    table: join_table.name.clone(),
                    column: column.name.clone(),
                    count: column.foreign_keys.len(),
                });
            }

            for fk in &column.foreign_keys {
                match catalog.target_of(fk) {
                    Ok(target) => {
                        distinct.insert(target.id);
                    }
                    Err(err) => tracing::warn!(
                        join_table = %join_table.name,
                        column = %column.name,
                        "ignoring foreign key: {err}"
                    ),
                }
            }
        }

        if distinct.len() > 2 {
            self.warn(AmbiguousRelationship::JoinTableTargets {
                join_table: join_table.name.clone(),
                targets: distinct.len(),
            });
        }
    }

    /// Attribute names must not collide with a column or with an earlier
    /// relation; later declarations shadow earlier ones in the generated
    /// class.
    fn check_attributes(&mut self) {
        let mut seen: HashSet<&str> = self
            .table
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();

        let mut duplicates = vec![];

        for relation in &self.inference.relations {
            if !seen.insert(relation.attribute.as_str()) {
                duplicates.push(relation.attribute.clone());
            }
        }

        for attribute in duplicates {
            self.warn(AmbiguousRelationship::DuplicateAttribute {
                table: self.table.name.clone(),
                attribute,
            });
        }
    }

    fn target_of(&self, column: &Column) -> Result<&'a Table> {
        let catalog = self.catalog;
        let fk = &column.foreign_keys[0];

        catalog.target_of(fk).map_err(|err| {
            err.context(format!(
                "resolving foreign key `{}.{}`",
                self.table.name, column.name
            ))
        })
    }

    fn warn(&mut self, warning: AmbiguousRelationship) {
        tracing::warn!(table = %self.table.name, "{warning}");
        self.inference.warnings.push(warning);
    }
}
