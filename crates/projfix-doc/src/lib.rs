//! An insertion-ordered JSON document tree for rewriting `project.json` manifests.
//!
//! [`Object`] keeps key order through every edit and supports positional
//! inserts ([`Object::insert_after`], [`Object::get_or_insert_object`]), which is
//! what lets a migration move keys around without reshuffling the rest of the
//! file. [`Document`] wraps the root object together with the text style of
//! the file it came from.

mod document;
mod error;
mod node;
mod object;

pub use document::{Document, TextStyle};
pub use error::{DocError, Result, pointer_segment};
pub use node::Node;
pub use object::{Object, Placement};
