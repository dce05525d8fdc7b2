#[macro_use]
mod fmt;
use fmt::ToPython;

mod column;
pub use column::{ColumnRenderer, SqlAlchemy};

mod delim;
use delim::Comma;

mod literal;
use literal::Str;

// Fragments
mod model;
mod relation;
mod table;
mod ty;

use automodel_core::{
    schema::db::{Column, Table},
    Catalog, ModelDefinition, ModelSet,
};

/// Renders model definitions as Python source declaring SQLAlchemy models.
pub struct Renderer<'a> {
    /// Catalog the models were built from
    catalog: &'a Catalog,

    /// Produces the declaration of a single column
    columns: &'a dyn ColumnRenderer,
}

struct Formatter<'a> {
    /// Handle to the renderer
    renderer: &'a Renderer<'a>,

    /// Where to write the rendered source
    dst: &'a mut String,
}

const PREAMBLE: &str = "\
from sqlalchemy import *
from sqlalchemy.orm import relation
from sqlalchemy.ext.declarative import declarative_base

DeclarativeBase = declarative_base()
metadata = DeclarativeBase.metadata
";

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog, columns: &'a dyn ColumnRenderer) -> Renderer<'a> {
        Renderer { catalog, columns }
    }

    /// A renderer declaring columns with [`SqlAlchemy`].
    pub fn sqlalchemy(catalog: &'a Catalog) -> Renderer<'a> {
        Renderer::new(catalog, &SqlAlchemy)
    }

    /// Renders the class declaring `model`: a header naming the model, one
    /// line per column in table order, then one line per relation in
    /// inference order.
    pub fn render_model(&self, model: &ModelDefinition) -> String {
        self.render_with(|f| fmt!(f, model::Model(model)))
    }

    /// Renders a complete module: imports, the declarative base, every join
    /// table used as `secondary` by the models, then the models.
    pub fn render_file(&self, models: &ModelSet) -> String {
        self.render_with(|f| {
            fmt!(f, PREAMBLE);

            for join_table in table::secondaries(self.catalog, models) {
                fmt!(f, "\n", table::JoinTable(join_table));
            }

            for model in models {
                fmt!(f, "\n\n", model::Model(model));
            }
        })
    }

    fn render_with(&self, render: impl FnOnce(&mut Formatter<'_>)) -> String {
        let mut ret = String::new();

        let mut f = Formatter {
            renderer: self,
            dst: &mut ret,
        };

        render(&mut f);
        ret
    }

    fn column(&self, table: &Table, column: &Column) -> String {
        self.columns.render(table, column)
    }
}

/// Renders the class declaring `model`.
pub fn render(catalog: &Catalog, model: &ModelDefinition, columns: &dyn ColumnRenderer) -> String {
    Renderer::new(catalog, columns).render_model(model)
}

/// Renders a complete module declaring every model in `models`.
pub fn render_file(catalog: &Catalog, models: &ModelSet, columns: &dyn ColumnRenderer) -> String {
    Renderer::new(catalog, columns).render_file(models)
}
