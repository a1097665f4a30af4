//! Data models.

pub mod definition;
pub mod item;
pub mod taxonomy;

pub use definition::{DEFAULT_ICON, Definition, Feature, NewDefinition};
pub use item::{Item, NewItem, Term};
pub use taxonomy::{NewTaxonomy, TaxonomyDefinition};
