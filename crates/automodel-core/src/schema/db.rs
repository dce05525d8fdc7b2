mod column;
pub use column::{Column, ColumnId};

mod foreign_key;
pub use foreign_key::ForeignKey;

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::Type;
