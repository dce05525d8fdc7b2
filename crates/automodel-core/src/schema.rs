mod catalog;
pub use catalog::Catalog;

pub mod db;

mod name;
pub use name::{humanize, pluralize, ModelName};
