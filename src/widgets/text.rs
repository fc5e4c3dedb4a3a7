//! Text-bearing widgets: label, message, entry and the multi-line text.
//!
//! `message` and `text` take their text from element content
//! (`<message>Hello</message>`); a `text` attribute on them is an error.

use crate::binding::{Binding, TextVar, WidgetHandle};
use crate::error::Result;
use crate::markup::Element;
use crate::toolkit::{
    Options, TextBuffer, VarRef, Variable, WidgetData, WidgetId, WidgetKind, WidgetTree,
};

use super::options::Attrs;
use super::registry::Built;
use super::create_placed;

/// Attributes of widgets that only show a caption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelConfig {
    pub text: String,
}

impl LabelConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            text: attrs.string("text").unwrap_or_default(),
        })
    }

    pub(crate) fn into_options(self) -> Options {
        Options {
            text: Some(self.text),
            ..Options::default()
        }
    }
}

/// Attributes of `<entry>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryConfig {
    /// Initial value of the entry's variable.
    pub text: String,
    pub width: Option<u16>,
}

impl EntryConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            text: attrs.string("text").unwrap_or_default(),
            width: attrs.cells("width")?,
        })
    }
}

/// Attributes and content of `<text>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub initial: String,
}

impl TextConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        attrs.reject_text_attribute()?;
        Ok(Self {
            width: attrs.cells("width")?,
            height: attrs.cells("height")?,
            initial: attrs.content().unwrap_or_default().to_owned(),
        })
    }
}

pub fn label(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = LabelConfig::parse(Attrs::new(element))?;
    let data = WidgetData::new(WidgetKind::Label).with_options(config.into_options());
    create_placed(tree, master, element, data)
}

pub fn message(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let attrs = Attrs::new(element);
    attrs.reject_text_attribute()?;
    let options = Options {
        text: attrs.content().map(str::to_owned),
        ..Options::default()
    };
    let data = WidgetData::new(WidgetKind::Message).with_options(options);
    create_placed(tree, master, element, data)
}

/// An entry bound to a string variable holding the `text` attribute.
pub fn entry(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = EntryConfig::parse(Attrs::new(element))?;
    let var = Variable::new(config.text);
    let options = Options {
        width: config.width,
        ..Options::default()
    };
    let data = WidgetData::new(WidgetKind::Entry)
        .with_options(options)
        .with_variable(VarRef::Str(var));
    let id = tree.create(master, data)?;
    let handle = WidgetHandle::plain(id, WidgetKind::Entry).with_binding(Binding::Str(var));
    Ok(Built::placed(handle, element))
}

/// A multi-line text widget; its content seeds the buffer and a [`TextVar`]
/// is its binding.
pub fn text(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = TextConfig::parse(Attrs::new(element))?;
    let buffer = Variable::new(TextBuffer::from_text(&config.initial));
    let options = Options {
        width: config.width,
        height: config.height,
        ..Options::default()
    };
    let data = WidgetData::new(WidgetKind::Text)
        .with_options(options)
        .with_buffer(buffer);
    let id = tree.create(master, data)?;
    let handle =
        WidgetHandle::plain(id, WidgetKind::Text).with_binding(Binding::Text(TextVar::new(buffer)));
    Ok(Built::placed(handle, element))
}
