use super::{relation::RelationLine, Formatter, Str, ToPython};

use automodel_core::ModelDefinition;

/// The class declaring one model
pub(super) struct Model<'a>(pub(super) &'a ModelDefinition);

impl ToPython for Model<'_> {
    fn to_python(self, f: &mut Formatter<'_>) {
        let model = self.0;
        let renderer = f.renderer;
        let table = renderer.catalog.table(model.table);

        fmt!(f, "class ", &model.name, "(DeclarativeBase):\n");
        fmt!(f, "    __tablename__ = ", Str(&table.name), "\n");

        if let Some(schema) = &table.schema {
            fmt!(f, "    __table_args__ = {'schema': ", Str(schema), "}\n");
        }

        fmt!(f, "\n    #column definitions\n");

        for column in &table.columns {
            fmt!(f, "    ", &column.name, " = ", renderer.column(table, column), "\n");
        }

        fmt!(f, "\n    #relation definitions\n");

        for relation in &model.relations {
            fmt!(f, "    ", RelationLine(relation), "\n");
        }
    }
}
