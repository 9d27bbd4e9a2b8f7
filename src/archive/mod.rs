//! The canonical archive data model and its normalizer
//!
//! Everything decoded from disk or from an imported file passes through
//! [`normalize`] before it becomes an [`Archive`]; the typed model is only
//! ever constructed in canonical form.

mod model;
mod normalize;

pub use model::{Archive, Cat, Document};
pub use normalize::normalize;
