use super::{table, Comma, Formatter, Str, ToPython};

use automodel_core::{
    relation::{RelationKind, SelfJoin},
    schema::{
        db::{ColumnId, Table},
        ModelName,
    },
    Catalog, Relation,
};

/// `attribute = relation(...)`
pub(super) struct RelationLine<'a>(pub(super) &'a Relation);

impl ToPython for RelationLine<'_> {
    fn to_python(self, f: &mut Formatter<'_>) {
        let relation = self.0;
        let catalog = f.renderer.catalog;

        let mut args = vec![Str(relation.target_model.as_str()).to_string()];

        match &relation.kind {
            RelationKind::OneToMany { .. } => {
                if let Some(back_reference) = &relation.back_reference {
                    args.push(format!("backref={}", Str(back_reference)));
                }
            }
            // The target model declares the other side itself, so no
            // backref here.
            RelationKind::ManyToMany {
                secondary,
                self_join,
            } => {
                let join_table = catalog.table(*secondary);
                args.push(format!("secondary={}", table::variable(join_table)));

                if let Some(self_join) = self_join {
                    args.extend(join_conditions(
                        catalog,
                        &relation.target_model,
                        join_table,
                        self_join,
                    ));
                }
            }
        }

        fmt!(f, &relation.attribute, " = relation(", Comma(args), ")");
    }
}

/// `primaryjoin` and `secondaryjoin` for a join table whose columns both
/// reference the model's own table.
///
/// The conditions are lambdas over the module-level join table variable.
/// String conditions would be resolved through the metadata, where a
/// namespaced table is only known by its qualified name.
fn join_conditions(
    catalog: &Catalog,
    model: &ModelName,
    join_table: &Table,
    self_join: &SelfJoin,
) -> Vec<String> {
    let schema = catalog.schema();
    let variable = table::variable(join_table);

    let condition = |column: ColumnId| {
        let column = schema.column(column);
        column.foreign_key().map(|fk| {
            format!(
                "lambda: {model}.{} == {variable}.c.{}",
                fk.column, column.name
            )
        })
    };

    match (condition(self_join.local), condition(self_join.remote)) {
        (Some(primary), Some(secondary)) => vec![
            format!("primaryjoin={primary}"),
            format!("secondaryjoin={secondary}"),
        ],
        _ => vec![],
    }
}
