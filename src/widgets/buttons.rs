//! Button-like widgets: button, checkbutton, radiobutton, menubutton, menu.

use crate::binding::{Binding, WidgetHandle};
use crate::error::Result;
use crate::markup::Element;
use crate::toolkit::{Options, State, VarRef, Variable, WidgetData, WidgetId, WidgetKind, WidgetTree};

use super::options::Attrs;
use super::registry::Built;
use super::text::LabelConfig;
use super::create_placed;

// ---------------------------------------------------------------------------
// Configs
// ---------------------------------------------------------------------------

/// Attributes of `<button>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonConfig {
    pub text: String,
    pub state: State,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl ButtonConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            text: attrs.string("text").unwrap_or_default(),
            state: attrs.parse::<State>("state")?.unwrap_or_default(),
            width: attrs.cells("width")?,
            height: attrs.cells("height")?,
        })
    }

    fn into_options(self) -> Options {
        Options {
            text: Some(self.text),
            state: self.state,
            width: self.width,
            height: self.height,
            ..Options::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

pub fn button(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = ButtonConfig::parse(Attrs::new(element))?;
    let data = WidgetData::new(WidgetKind::Button).with_options(config.into_options());
    create_placed(tree, master, element, data)
}

/// A checkbutton bound to an integer variable that starts at 0.
pub fn checkbutton(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = LabelConfig::parse(Attrs::new(element))?;
    let var = Variable::new(0_i64);
    let data = WidgetData::new(WidgetKind::Checkbutton)
        .with_options(config.into_options())
        .with_variable(VarRef::Int(var));
    let id = tree.create(master, data)?;
    let handle = WidgetHandle::plain(id, WidgetKind::Checkbutton).with_binding(Binding::Int(var));
    Ok(Built::placed(handle, element))
}

pub fn radiobutton(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = LabelConfig::parse(Attrs::new(element))?;
    let data = WidgetData::new(WidgetKind::Radiobutton).with_options(config.into_options());
    create_placed(tree, master, element, data)
}

pub fn menubutton(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = LabelConfig::parse(Attrs::new(element))?;
    let data = WidgetData::new(WidgetKind::Menubutton).with_options(config.into_options());
    create_placed(tree, master, element, data)
}

pub fn menu(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Menu))
}
