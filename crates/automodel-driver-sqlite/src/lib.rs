mod ty;

use automodel_core::{
    schema::db::{Column, ForeignKey, Schema, Table},
    Error, Reflect, Result,
};
use rusqlite::{params, Connection as RusqliteConnection, OptionalExtension};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

/// Database reported when no namespace is requested
const MAIN: &str = "main";

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database. Every connection opens a fresh,
    /// empty database.
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

impl Reflect for Sqlite {
    fn reflect(&self, namespace: Option<&str>) -> Result<Schema> {
        self.connect()?.reflect(namespace)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

struct ForeignKeyRow {
    from: String,
    table: String,

    /// `None` when the key references the target's primary key implicitly
    to: Option<String>,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    /// Run one or more SQL statements, e.g. to create or attach databases
    /// before reflecting.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    /// Tables of `database`, in creation order, without SQLite's internal
    /// tables.
    fn table_names(&self, database: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT name FROM {}.sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY rowid",
            quote_ident(database)
        );

        let mut stmt = self.connection.prepare(&sql).map_err(Error::driver)?;
        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(Error::driver)?;

        Ok(names)
    }

    fn columns(&self, database: &str, table: &str) -> Result<Vec<Column>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1, ?2) ORDER BY cid",
            )
            .map_err(Error::driver)?;

        let columns = stmt
            .query_map(params![table, database], |row| {
                let name: String = row.get(0)?;
                let declared: String = row.get(1)?;
                let not_null: bool = row.get(2)?;
                let pk: i64 = row.get(3)?;

                let column = Column::new(name, ty::from_declared(&declared));

                Ok(if pk > 0 {
                    column.primary_key()
                } else if not_null {
                    column.not_null()
                } else {
                    column
                })
            })
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        Ok(columns)
    }

    fn foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKeyRow>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT \"from\", \"table\", \"to\" FROM pragma_foreign_key_list(?1, ?2) \
                 ORDER BY id, seq",
            )
            .map_err(Error::driver)?;

        let rows = stmt
            .query_map(params![table, database], |row| {
                Ok(ForeignKeyRow {
                    from: row.get(0)?,
                    table: row.get(1)?,
                    to: row.get(2)?,
                })
            })
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        Ok(rows)
    }

    /// First primary key column of `table`, if it declares one.
    fn primary_key(&self, database: &str, table: &str) -> Result<Option<String>> {
        self.connection
            .query_row(
                "SELECT name FROM pragma_table_info(?1, ?2) WHERE pk > 0 ORDER BY pk LIMIT 1",
                params![table, database],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::driver)
    }

    fn reflect_table(&self, namespace: Option<&str>, name: String) -> Result<Table> {
        let database = namespace.unwrap_or(MAIN);
        let mut columns = self.columns(database, &name)?;

        for fk in self.foreign_keys(database, &name)? {
            let Some(column) = columns.iter_mut().find(|column| column.name == fk.from) else {
                tracing::warn!(table = %name, column = %fk.from, "foreign key on unknown column");
                continue;
            };

            // SQLite only allows references within the same database.
            let target_column = match fk.to {
                Some(to) => to,
                None => self
                    .primary_key(database, &fk.table)?
                    .unwrap_or_else(|| "rowid".to_string()),
            };

            let target_table = match namespace {
                Some(namespace) => format!("{namespace}.{}", fk.table),
                None => fk.table,
            };

            column
                .foreign_keys
                .push(ForeignKey::new(target_table, target_column));
        }

        tracing::debug!(table = %name, columns = columns.len(), "reflected table");

        let mut table = Table::new(name);

        if let Some(namespace) = namespace {
            table = table.in_schema(namespace);
        }

        Ok(columns.into_iter().fold(table, Table::column))
    }
}

impl Reflect for Connection {
    fn reflect(&self, namespace: Option<&str>) -> Result<Schema> {
        let database = namespace.unwrap_or(MAIN);

        let tables = self
            .table_names(database)?
            .into_iter()
            .map(|name| self.reflect_table(namespace, name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema::new(tables))
    }
}

impl From<RusqliteConnection> for Connection {
    fn from(connection: RusqliteConnection) -> Self {
        Self { connection }
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
