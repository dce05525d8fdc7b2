use automodel_codegen::{render, render_file, Renderer, SqlAlchemy};
use automodel_core::{
    schema::{
        db::{Column, Schema, Table, Type},
        humanize,
    },
    Catalog, ModelSet,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

fn pk(name: &str) -> Column {
    Column::new(name, Type::Integer(4)).primary_key()
}

fn fk(name: &str, table: &str) -> Column {
    Column::new(name, Type::Integer(4)).references(table, "id")
}

fn lines(lines: &[&str]) -> String {
    let mut ret = lines.join("\n");
    ret.push('\n');
    ret
}

fn bookstore() -> Catalog {
    Catalog::new(
        Schema::new([
            Table::new("author")
                .column(pk("id"))
                .column(Column::new("name", Type::VarChar(100)).not_null()),
            Table::new("publisher").column(pk("id")),
            Table::new("book")
                .column(pk("id"))
                .column(fk("author_id", "author"))
                .column(fk("publisher_id", "publisher")),
            Table::new("tag")
                .column(pk("id"))
                .column(Column::new("label", Type::Text)),
            Table::new("book_tag")
                .column(fk("book_id", "book"))
                .column(fk("tag_id", "tag")),
            Table::new("order_item")
                .column(pk("id"))
                .column(fk("book_id", "book").not_null())
                .column(Column::new("quantity", Type::Integer(2))),
        ]),
        None,
    )
}

fn model_source(catalog: &Catalog, name: &str) -> String {
    let models = assert_ok!(ModelSet::build(catalog));
    let model = assert_some!(models.get(name));
    Renderer::sqlalchemy(catalog).render_model(model)
}

#[test]
fn model_with_direct_and_many_to_many_relations() {
    assert_eq!(
        model_source(&bookstore(), "Book"),
        lines(&[
            "class Book(DeclarativeBase):",
            "    __tablename__ = 'book'",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "    author_id = Column('author_id', INTEGER(), ForeignKey('author.id'))",
            "    publisher_id = Column('publisher_id', INTEGER(), ForeignKey('publisher.id'))",
            "",
            "    #relation definitions",
            "    Author = relation('Author', backref='books')",
            "    Publisher = relation('Publisher', backref='books')",
            "    tags = relation('Tag', secondary=book_tag)",
        ])
    );
}

#[test]
fn model_without_relations() {
    assert_eq!(
        model_source(&bookstore(), "Author"),
        lines(&[
            "class Author(DeclarativeBase):",
            "    __tablename__ = 'author'",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "    name = Column('name', VARCHAR(length=100), nullable=False)",
            "",
            "    #relation definitions",
        ])
    );
}

#[test]
fn other_side_of_many_to_many() {
    assert_eq!(
        model_source(&bookstore(), "Tag"),
        lines(&[
            "class Tag(DeclarativeBase):",
            "    __tablename__ = 'tag'",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "    label = Column('label', TEXT())",
            "",
            "    #relation definitions",
            "    books = relation('Book', secondary=book_tag)",
        ])
    );
}

#[test]
fn header_names_the_model() {
    let catalog = bookstore();
    let models = ModelSet::build(&catalog).unwrap();
    let renderer = Renderer::sqlalchemy(&catalog);

    assert!(catalog.schema().tables.len() >= 5);
    assert_eq!(catalog.join_tables().count(), 1);
    assert_eq!(models.len(), catalog.entity_tables().count());

    for model in &models {
        let source = renderer.render_model(model);
        let header = source.lines().next().unwrap();

        let name = header
            .strip_prefix("class ")
            .and_then(|rest| rest.strip_suffix("(DeclarativeBase):"))
            .unwrap_or_else(|| panic!("unexpected header; header={header:?}"));

        let table = catalog.table(model.table);
        assert_eq!(name, humanize(&table.name));
    }
}

#[test]
fn self_referential_many_to_many_has_join_conditions() {
    let catalog = Catalog::new(
        Schema::new([
            Table::new("person").column(pk("id")),
            Table::new("friendship")
                .column(fk("person_id", "person"))
                .column(fk("friend_id", "person")),
        ]),
        None,
    );

    let source = model_source(&catalog, "Person");
    let relation = source.lines().last().unwrap();

    assert_eq!(
        relation,
        "    persons = relation('Person', secondary=friendship, \
         primaryjoin=lambda: Person.id == friendship.c.person_id, \
         secondaryjoin=lambda: Person.id == friendship.c.friend_id)"
    );
}

#[test]
fn namespaced_self_join_refers_to_the_join_table_variable() {
    let catalog = Catalog::new(
        Schema::new([
            Table::new("person").in_schema("library").column(pk("id")),
            Table::new("friendship")
                .in_schema("library")
                .column(fk("person_id", "library.person"))
                .column(fk("friend_id", "library.person")),
        ]),
        Some("library".to_string()),
    );
    let models = ModelSet::build(&catalog).unwrap();
    let source = Renderer::sqlalchemy(&catalog).render_file(&models);

    assert!(source.contains("library_friendship = Table('friendship', metadata,"));
    assert!(source.contains(
        "    persons = relation('Person', secondary=library_friendship, \
         primaryjoin=lambda: Person.id == library_friendship.c.person_id, \
         secondaryjoin=lambda: Person.id == library_friendship.c.friend_id)"
    ));
}

#[test]
fn namespaced_table() {
    let catalog = Catalog::new(
        Schema::new([
            Table::new("author").in_schema("library").column(pk("id")),
            Table::new("book")
                .in_schema("library")
                .column(pk("id"))
                .column(fk("author_id", "library.author")),
        ]),
        Some("library".to_string()),
    );

    assert_eq!(
        model_source(&catalog, "Book"),
        lines(&[
            "class Book(DeclarativeBase):",
            "    __tablename__ = 'book'",
            "    __table_args__ = {'schema': 'library'}",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "    author_id = Column('author_id', INTEGER(), ForeignKey('library.author.id'))",
            "",
            "    #relation definitions",
            "    Author = relation('Author', backref='books')",
        ])
    );
}

#[test]
fn column_declarations_are_delegated() {
    let catalog = bookstore();
    let models = ModelSet::build(&catalog).unwrap();
    let model = models.get("Publisher").unwrap();

    let columns = |table: &Table, column: &Column| format!("{}.{}", table.name, column.name);

    assert_eq!(
        render(&catalog, model, &columns),
        lines(&[
            "class Publisher(DeclarativeBase):",
            "    __tablename__ = 'publisher'",
            "",
            "    #column definitions",
            "    id = publisher.id",
            "",
            "    #relation definitions",
        ])
    );
}

#[test]
fn whole_file() {
    let catalog = Catalog::new(
        Schema::new([
            Table::new("book").column(pk("id")),
            Table::new("tag").column(pk("id")),
            Table::new("book_tag")
                .column(fk("book_id", "book"))
                .column(fk("tag_id", "tag")),
        ]),
        None,
    );
    let models = ModelSet::build(&catalog).unwrap();

    assert_eq!(
        render_file(&catalog, &models, &SqlAlchemy),
        lines(&[
            "from sqlalchemy import *",
            "from sqlalchemy.orm import relation",
            "from sqlalchemy.ext.declarative import declarative_base",
            "",
            "DeclarativeBase = declarative_base()",
            "metadata = DeclarativeBase.metadata",
            "",
            "book_tag = Table('book_tag', metadata,",
            "    Column('book_id', INTEGER(), ForeignKey('book.id')),",
            "    Column('tag_id', INTEGER(), ForeignKey('tag.id')),",
            ")",
            "",
            "",
            "class Book(DeclarativeBase):",
            "    __tablename__ = 'book'",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "",
            "    #relation definitions",
            "    tags = relation('Tag', secondary=book_tag)",
            "",
            "",
            "class Tag(DeclarativeBase):",
            "    __tablename__ = 'tag'",
            "",
            "    #column definitions",
            "    id = Column('id', INTEGER(), primary_key=True, nullable=False)",
            "",
            "    #relation definitions",
            "    books = relation('Book', secondary=book_tag)",
        ])
    );
}

#[test]
fn unused_join_tables_are_left_out() {
    let catalog = bookstore();
    let models = ModelSet::only(&catalog, ["author"]).unwrap();
    let source = Renderer::sqlalchemy(&catalog).render_file(&models);

    assert!(!source.contains("book_tag = Table("));
    assert!(source.contains("class Author(DeclarativeBase):"));
    assert!(!source.contains("class Book(DeclarativeBase):"));
}
