use std::fmt;

/// Advisory raised when the schema holds more information than the inferred
/// relations can express. Inference still succeeds; the affected relation is
/// built from the first candidate only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbiguousRelationship {
    /// A column carries more than one foreign key
    MultipleForeignKeys {
        table: String,
        column: String,
        count: usize,
    },

    /// A join table's keys reach more than two distinct tables
    JoinTableTargets { join_table: String, targets: usize },

    /// Two declarations on the same model share a name
    DuplicateAttribute { table: String, attribute: String },
}

impl fmt::Display for AmbiguousRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguousRelationship::MultipleForeignKeys {
                table,
                column,
                count,
            } => write!(
                f,
                "column `{table}.{column}` has {count} foreign keys; only the first is used"
            ),
            AmbiguousRelationship::JoinTableTargets {
                join_table,
                targets,
            } => write!(
                f,
                "join table `{join_table}` references {targets} tables; only the first other table is used"
            ),
            AmbiguousRelationship::DuplicateAttribute { table, attribute } => write!(
                f,
                "attribute `{attribute}` is declared more than once on `{table}`"
            ),
        }
    }
}
