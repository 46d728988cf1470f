//! Render Tree
//!
//! Structured view models rendered to HTML.
//!
//! Components build a [`Node`] tree instead of interpolating strings. Text and
//! attribute values are escaped only when the tree is serialised, so user
//! supplied content (toast messages, transaction descriptions) can never
//! inject markup.

mod node;

pub use node::{escape_html, Element, Node};
