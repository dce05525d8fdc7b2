use automodel_core::schema::db::Type;

/// Maps a declared SQLite column type onto a storage type.
///
/// SQLite accepts any type name, so well-known names are matched first and
/// everything else falls back to SQLite's own affinity rules. A declaration
/// that matches neither is kept as [`Type::Custom`].
pub(crate) fn from_declared(declared: &str) -> Type {
    let declared = declared.trim();
    let upper = declared.to_ascii_uppercase();

    let (name, args) = match upper.split_once('(') {
        Some((name, rest)) => (name.trim(), parse_args(rest)),
        None => (upper.as_str(), vec![]),
    };

    match (name, &args[..]) {
        ("BOOLEAN" | "BOOL", _) => Type::Boolean,
        ("TINYINT" | "INT1", _) => Type::Integer(1),
        ("SMALLINT" | "INT2", _) => Type::Integer(2),
        ("INT" | "INTEGER" | "MEDIUMINT" | "INT4", _) => Type::Integer(4),
        ("BIGINT" | "INT8", _) => Type::Integer(8),
        ("REAL" | "FLOAT4", _) => Type::Float(4),
        ("DOUBLE" | "DOUBLE PRECISION" | "FLOAT" | "FLOAT8", _) => Type::Float(8),
        ("NUMERIC" | "DECIMAL", args) => Type::Numeric {
            precision: args.first().map(|&precision| precision as u32),
            scale: args.get(1).map(|&scale| scale as u32),
        },
        ("TEXT" | "CLOB", _) => Type::Text,
        ("VARCHAR" | "NVARCHAR" | "CHARACTER VARYING", [length]) => Type::VarChar(*length),
        ("VARCHAR" | "NVARCHAR" | "CHARACTER VARYING", _) => Type::Text,
        ("CHAR" | "NCHAR" | "CHARACTER", [length]) => Type::Char(*length),
        ("CHAR" | "NCHAR" | "CHARACTER", _) => Type::Char(1),
        ("BLOB", _) => Type::Blob,
        ("DATE", _) => Type::Date,
        ("TIME", _) => Type::Time,
        ("DATETIME" | "TIMESTAMP", _) => Type::Timestamp,
        ("UUID", _) => Type::Uuid,
        _ => affinity(name).unwrap_or_else(|| Type::Custom(declared.to_string())),
    }
}

/// SQLite's type affinity rules, in the order SQLite applies them.
fn affinity(name: &str) -> Option<Type> {
    if name.contains("INT") {
        Some(Type::Integer(8))
    } else if ["CHAR", "CLOB", "TEXT"].iter().any(|s| name.contains(s)) {
        Some(Type::Text)
    } else if name.contains("BLOB") {
        Some(Type::Blob)
    } else if ["REAL", "FLOA", "DOUB"].iter().any(|s| name.contains(s)) {
        Some(Type::Float(8))
    } else {
        None
    }
}

/// `10, 2)` -> `[10, 2]`. Arguments that are not numbers are dropped.
fn parse_args(rest: &str) -> Vec<u64> {
    rest.trim_end()
        .trim_end_matches(')')
        .split(',')
        .filter_map(|arg| arg.trim().parse().ok())
        .collect()
}
