//! Errors raised while building a UI from markup.

use crate::markup::MarkupError;
use crate::toolkit::ToolkitError;

/// Everything that can go wrong turning a document into widgets.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error("root element must have a geometry attribute (grid or pack)")]
    MissingGeometry,
    #[error("root element geometry must be grid or pack, got '{0}'")]
    InvalidGeometry(String),
    #[error("unrecognized tag name: <{0}>")]
    UnrecognizedTag(String),
    #[error("<{tag}>: {message}")]
    ConflictingAttributes { tag: String, message: String },
    #[error("<{tag}>: {message}")]
    Structure { tag: String, message: String },
    #[error("<{tag}> attribute {attribute}='{value}': {message}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        value: String,
        message: String,
    },
    #[error("no widget with id '{0}'")]
    UnknownId(String),
    #[error("id '{0}' is used by more than one element")]
    DuplicateId(String),
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
