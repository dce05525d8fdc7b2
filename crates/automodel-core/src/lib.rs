mod error;
pub use error::{Error, IntoError};

pub mod model;
pub use model::{ModelDefinition, ModelSet};

mod reflect;
pub use reflect::Reflect;

pub mod relation;
pub use relation::{AmbiguousRelationship, Relation, RelationKind};

pub mod schema;
pub use schema::Catalog;

/// A Result type alias that uses automodel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
