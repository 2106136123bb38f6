//! Reference chat backend: keyword intent matching over a tourism catalog.

pub mod catalog;
pub mod matcher;
pub mod text;

pub use catalog::{Intent, IntentCatalog};
pub use matcher::{DEFAULT_THRESHOLD, IntentMatch, IntentMatcher};
