//! Streaming XML reader that assembles an [`Element`] tree.
//!
//! Uses quick-xml's pull parser. Comments, processing instructions and the
//! XML declaration are skipped; character data is kept only when it precedes
//! an element's first child.

use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::element::Element;

/// Errors from loading markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error("bad attribute on <{tag}>: {message}")]
    Attribute { tag: String, message: String },
    #[error("unclosed tag <{0}>")]
    Unclosed(String),
    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),
    #[error("document has more than one root element (second is <{0}>)")]
    MultipleRoots(String),
    #[error("character data outside the root element")]
    StrayText,
    #[error("document contains no elements")]
    Empty,
}

/// Read and parse a markup file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Element, MarkupError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| MarkupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = source.len(), "loading markup");
    parse_str(&source)
}

/// Parse an in-memory markup document into its root element.
pub fn parse_str(input: &str) -> Result<Element, MarkupError> {
    let mut reader = Reader::from_str(input);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                open.push(element_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::End(end)) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let element = open.pop().ok_or(MarkupError::UnexpectedClose(name))?;
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| MarkupError::Syntax {
                    position,
                    message: e.to_string(),
                })?;
                push_text(&mut open, &text)?;
            }
            Ok(Event::CData(data)) => {
                let raw = data.into_inner();
                push_text(&mut open, &String::from_utf8_lossy(&raw))?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MarkupError::Syntax {
                    position,
                    message: e.to_string(),
                })
            }
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(MarkupError::Unclosed(unclosed.tag));
    }
    root.ok_or(MarkupError::Empty)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, MarkupError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag.clone());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| MarkupError::Attribute {
            tag: tag.clone(),
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| MarkupError::Attribute {
            tag: tag.clone(),
            message: e.to_string(),
        })?;
        element.set_attr(key, value.into_owned());
    }
    Ok(element)
}

/// Hand a completed element to its parent, or make it the root.
fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_some() => Err(MarkupError::MultipleRoots(element.tag)),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(open: &mut [Element], text: &str) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(current) if current.children.is_empty() => {
            current.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        // Tail text after a child element carries no meaning here.
        Some(_) => Ok(()),
        None if text.trim().is_empty() => Ok(()),
        None => Err(MarkupError::StrayText),
    }
}
