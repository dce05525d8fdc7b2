use automodel_core::{
    schema::db::{ForeignKey, Type},
    Catalog, ModelSet, Reflect,
};
use automodel_driver_sqlite::{Connection, Sqlite};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const BOOKSTORE: &str = "
    CREATE TABLE author (
        id INTEGER PRIMARY KEY,
        name VARCHAR(100) NOT NULL
    );
    CREATE TABLE book (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        price NUMERIC(10, 2),
        author_id INTEGER REFERENCES author (id)
    );
    CREATE TABLE tag (
        id INTEGER PRIMARY KEY,
        label TEXT
    );
    CREATE TABLE book_tag (
        book_id INTEGER REFERENCES book (id),
        tag_id INTEGER REFERENCES tag
    );
";

fn bookstore_file() -> (tempfile::TempDir, Sqlite) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookstore.db");

    let connection = assert_ok!(Connection::open(&path));
    assert_ok!(connection.execute_batch(BOOKSTORE));

    (dir, Sqlite::open(&path))
}

#[test]
fn reflects_tables_in_creation_order() {
    let (_dir, driver) = bookstore_file();
    let schema = assert_ok!(driver.reflect(None));

    let names: Vec<_> = schema.tables.iter().map(|table| table.name.as_str()).collect();
    assert_eq!(names, ["author", "book", "tag", "book_tag"]);
    assert!(schema.tables.iter().all(|table| table.schema.is_none()));
}

#[test]
fn reflects_columns() {
    let (_dir, driver) = bookstore_file();
    let schema = driver.reflect(None).unwrap();
    let book = &schema.tables[1];

    let columns: Vec<_> = book
        .columns
        .iter()
        .map(|column| (column.name.as_str(), column.ty.clone(), column.nullable))
        .collect();

    assert_eq!(
        columns,
        [
            ("id", Type::Integer(4), false),
            ("title", Type::Text, false),
            (
                "price",
                Type::Numeric {
                    precision: Some(10),
                    scale: Some(2)
                },
                true
            ),
            ("author_id", Type::Integer(4), true),
        ]
    );

    assert!(book.columns[0].primary_key);
    assert_eq!(book.columns[3].foreign_keys, [ForeignKey::new("author", "id")]);
}

#[test]
fn implicit_foreign_key_target_is_the_primary_key() {
    let (_dir, driver) = bookstore_file();
    let schema = driver.reflect(None).unwrap();
    let book_tag = &schema.tables[3];

    assert_eq!(book_tag.columns[1].foreign_keys, [ForeignKey::new("tag", "id")]);
}

#[test]
fn reflected_schema_builds_models() {
    let (_dir, driver) = bookstore_file();
    let catalog = assert_ok!(Catalog::reflect(&driver, None));

    let join_tables: Vec<_> = catalog.join_tables().map(|table| table.name.as_str()).collect();
    assert_eq!(join_tables, ["book_tag"]);

    let models = ModelSet::build(&catalog).unwrap();
    let names: Vec<_> = models.iter().map(|model| model.name.to_string()).collect();
    assert_eq!(names, ["Author", "Book", "Tag"]);

    let book = models.get("Book").unwrap();
    let attributes: Vec<_> = book.relations.iter().map(|r| r.attribute.as_str()).collect();
    assert_eq!(attributes, ["Author", "tags"]);
}

#[test]
fn attached_database_is_a_namespace() {
    let connection = Connection::in_memory().unwrap();
    connection
        .execute_batch(
            "
            ATTACH DATABASE ':memory:' AS library;
            CREATE TABLE library.author (id INTEGER PRIMARY KEY);
            CREATE TABLE library.book (
                id INTEGER PRIMARY KEY,
                author_id INTEGER REFERENCES author (id)
            );
            CREATE TABLE main.unrelated (id INTEGER PRIMARY KEY);
            ",
        )
        .unwrap();

    let schema = connection.reflect(Some("library")).unwrap();

    let names: Vec<_> = schema
        .tables
        .iter()
        .map(|table| table.qualified_name())
        .collect();
    assert_eq!(names, ["library.author", "library.book"]);
    assert_eq!(
        schema.tables[1].columns[1].foreign_keys,
        [ForeignKey::new("library.author", "id")]
    );

    let catalog = Catalog::new(schema, Some("library".to_string()));
    let book = catalog.lookup("book").unwrap();
    let target = catalog.target_of(&book.columns[1].foreign_keys[0]).unwrap();
    assert_eq!(target.qualified_name(), "library.author");
}

#[test]
fn unknown_namespace_is_a_driver_error() {
    let connection = Connection::in_memory().unwrap();
    let err = assert_err!(connection.reflect(Some("missing")));
    assert!(err.is_driver());
}

#[test]
fn in_memory_database_starts_empty() {
    let schema = Sqlite::in_memory().reflect(None).unwrap();
    assert_empty!(schema.tables);
}

#[test]
fn connection_urls() {
    assert!(matches!(
        Sqlite::new("sqlite::memory:").unwrap(),
        Sqlite::InMemory
    ));

    let Sqlite::File(path) = Sqlite::new("sqlite:///tmp/bookstore.db").unwrap() else {
        panic!("expected a file database");
    };
    assert_eq!(path.to_str(), Some("/tmp/bookstore.db"));

    assert_eq!(Sqlite::in_memory().url(), "sqlite::memory:");
}

#[test]
fn non_sqlite_urls_are_rejected() {
    let err = assert_err!(Sqlite::new("postgresql://localhost/bookstore"));
    assert!(err.is_invalid_connection_url());

    let err = assert_err!(Sqlite::new("not a url"));
    assert!(err.is_invalid_connection_url());
}
