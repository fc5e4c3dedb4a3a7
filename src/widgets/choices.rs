//! Widgets that choose among values: combobox, optionmenu, spinbox,
//! listbox and treeview.
//!
//! List contents come from `<value>` children. Combobox, optionmenu and
//! spinbox bind a string variable that starts at the first value and carry a
//! width adjuster; when no `width` is given they are sized to their longest
//! value.

use crate::binding::{Binding, WidgetHandle};
use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::toolkit::{
    Options, SelectMode, State, TreeShow, VarRef, Variable, WidgetData, WidgetId, WidgetKind,
    WidgetTree,
};

use super::options::Attrs;
use super::registry::Built;
use super::create_placed;

// ---------------------------------------------------------------------------
// Configs
// ---------------------------------------------------------------------------

/// Attributes of `<combobox>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceConfig {
    pub values: Vec<String>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub state: State,
}

impl ChoiceConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            values: attrs.values(),
            width: attrs.cells("width")?,
            height: attrs.cells("height")?,
            state: attrs.parse::<State>("state")?.unwrap_or_default(),
        })
    }
}

/// Attributes of `<optionmenu>`. Anything besides the values and `width`
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionMenuConfig {
    pub values: Vec<String>,
    pub width: Option<u16>,
}

impl OptionMenuConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            values: attrs.values(),
            width: attrs.cells("width")?,
        })
    }
}

/// Attributes of `<spinbox>`: either a numeric range or a list of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinboxConfig {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub values: Vec<String>,
    pub width: Option<u16>,
}

impl SpinboxConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        let values = attrs.values();
        if !values.is_empty() && (attrs.has("from") || attrs.has("to")) {
            return Err(BuildError::ConflictingAttributes {
                tag: attrs.tag().to_owned(),
                message: "cannot specify both from/to and values".to_owned(),
            });
        }
        Ok(Self {
            from: attrs.number("from")?,
            to: attrs.number("to")?,
            values,
            width: attrs.cells("width")?,
        })
    }

    /// The value the spinbox shows first.
    fn initial(&self) -> String {
        match (self.values.first(), self.from) {
            (Some(first), _) => first.clone(),
            (None, Some(from)) => format_number(from),
            (None, None) => String::new(),
        }
    }
}

/// Attributes of `<listbox>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListboxConfig {
    pub values: Vec<String>,
    pub height: Option<u16>,
    pub select_mode: Option<SelectMode>,
}

impl ListboxConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            values: attrs.values(),
            height: attrs.cells("height")?,
            select_mode: attrs.parse::<SelectMode>("selectmode")?,
        })
    }
}

/// Attributes of `<treeview>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeviewConfig {
    pub height: Option<u16>,
    pub select_mode: Option<SelectMode>,
    pub show: Option<TreeShow>,
}

impl TreeviewConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            height: attrs.cells("height")?,
            select_mode: attrs.parse::<SelectMode>("selectmode")?,
            show: attrs.parse::<TreeShow>("show")?,
        })
    }
}

/// `2.0` prints as `2`, `2.5` as `2.5`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Create a value-list widget bound to `initial`, then size it to its
/// values unless the element set a width.
fn create_choice(
    tree: &mut WidgetTree,
    master: WidgetId,
    element: &Element,
    kind: WidgetKind,
    options: Options,
    initial: String,
) -> Result<Built> {
    let auto_width = options.width.is_none() && !options.values.is_empty();
    let var = Variable::new(initial);
    let data = WidgetData::new(kind)
        .with_options(options)
        .with_variable(VarRef::Str(var));
    let id = tree.create(master, data)?;
    let handle = WidgetHandle::plain(id, kind)
        .with_binding(Binding::Str(var))
        .with_width_adjuster();
    if auto_width {
        if let Some(adjuster) = handle.width_adjuster {
            adjuster.adjust(tree)?;
        }
    }
    Ok(Built::placed(handle, element))
}

pub fn combobox(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = ChoiceConfig::parse(Attrs::new(element))?;
    let initial = config.values.first().cloned().unwrap_or_default();
    let options = Options {
        values: config.values,
        width: config.width,
        height: config.height,
        state: config.state,
        ..Options::default()
    };
    create_choice(tree, master, element, WidgetKind::Combobox, options, initial)
}

pub fn optionmenu(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = OptionMenuConfig::parse(Attrs::new(element))?;
    let initial = config.values.first().cloned().unwrap_or_default();
    let options = Options {
        values: config.values,
        width: config.width,
        ..Options::default()
    };
    create_choice(tree, master, element, WidgetKind::OptionMenu, options, initial)
}

pub fn spinbox(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = SpinboxConfig::parse(Attrs::new(element))?;
    let initial = config.initial();
    let options = Options {
        from: config.from,
        to: config.to,
        values: config.values,
        width: config.width,
        ..Options::default()
    };
    create_choice(tree, master, element, WidgetKind::Spinbox, options, initial)
}

pub fn listbox(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = ListboxConfig::parse(Attrs::new(element))?;
    let options = Options {
        values: config.values,
        height: config.height,
        select_mode: config.select_mode,
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Listbox).with_options(options))
}

pub fn treeview(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = TreeviewConfig::parse(Attrs::new(element))?;
    let options = Options {
        height: config.height,
        select_mode: config.select_mode,
        show: config.show,
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Treeview).with_options(options))
}
