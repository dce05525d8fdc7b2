use automodel_core::schema::db::Type;

/// The SQLAlchemy type expression declaring a column of storage type `ty`.
pub(crate) fn sqlalchemy_type(ty: &Type) -> String {
    match ty {
        Type::Boolean => "BOOLEAN()".to_string(),
        Type::Integer(1 | 2) => "SMALLINT()".to_string(),
        Type::Integer(8) => "BIGINT()".to_string(),
        Type::Integer(_) => "INTEGER()".to_string(),
        Type::Float(4) => "REAL()".to_string(),
        Type::Float(_) => "FLOAT()".to_string(),
        Type::Numeric { precision, scale } => {
            let args: Vec<_> = [("precision", precision), ("scale", scale)]
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| format!("{name}={value}")))
                .collect();

            format!("NUMERIC({})", args.join(", "))
        }
        Type::Text => "TEXT()".to_string(),
        Type::VarChar(length) => format!("VARCHAR(length={length})"),
        Type::Char(length) => format!("CHAR(length={length})"),
        Type::Blob => "BLOB()".to_string(),
        Type::Date => "DATE()".to_string(),
        Type::Time => "TIME()".to_string(),
        Type::Timestamp => "DATETIME()".to_string(),
        Type::Uuid => "Uuid()".to_string(),
        // Reflection could not map the type; SQLAlchemy does the same.
        Type::Custom(_) => "NullType()".to_string(),
    }
}
