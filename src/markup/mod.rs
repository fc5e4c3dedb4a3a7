//! Markup loader: XML documents into an [`Element`] tree.

pub mod element;
pub mod loader;

pub use element::Element;
pub use loader::{load_file, parse_str, MarkupError};
