//! Intermediate representation for parsed templates.
//!
//! Templates in YAML or JSON are parsed into the format-agnostic [`Document`]
//! tree. Graph analysis classifies the top-level entries of that tree into
//! [`Entity`] values keyed by their [`Category`].

mod document;
mod entity;

pub use document::*;
pub use entity::*;
