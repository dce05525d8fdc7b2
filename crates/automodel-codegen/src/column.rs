use crate::{literal::Str, ty};

use automodel_core::schema::db::{Column, Table};

/// Produces the single-line declaration of one column, such as
/// `Column('id', INTEGER(), primary_key=True, nullable=False)`.
///
/// The renderer emits the declaration verbatim, so implementations decide
/// how types, keys and nullability are spelled. Closures taking
/// `(&Table, &Column)` implement this trait.
pub trait ColumnRenderer {
    fn render(&self, table: &Table, column: &Column) -> String;
}

impl<F> ColumnRenderer for F
where
    F: Fn(&Table, &Column) -> String,
{
    fn render(&self, table: &Table, column: &Column) -> String {
        self(table, column)
    }
}

/// Declares columns the way SQLAlchemy's `Column` repr prints them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlAlchemy;

impl ColumnRenderer for SqlAlchemy {
    fn render(&self, _table: &Table, column: &Column) -> String {
        let mut args = vec![Str(&column.name).to_string(), ty::sqlalchemy_type(&column.ty)];

        for fk in &column.foreign_keys {
            args.push(format!("ForeignKey({})", Str(fk.to_string())));
        }

        if column.primary_key {
            args.push("primary_key=True".to_string());
        }

        if !column.nullable {
            args.push("nullable=False".to_string());
        }

        format!("Column({})", args.join(", "))
    }
}
