//! Canvas, scale, progressbar, scrollbar, separator, sizegrip.

use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::toolkit::{Options, Orient, WidgetData, WidgetId, WidgetKind, WidgetTree};

use super::options::Attrs;
use super::registry::Built;
use super::create_placed;

/// Attributes of `<scale>` and `<progressbar>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeConfig {
    pub orient: Option<Orient>,
    pub length: Option<u16>,
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub maximum: Option<f64>,
    pub value: Option<f64>,
}

impl RangeConfig {
    pub fn parse(attrs: Attrs<'_>) -> Result<Self> {
        Ok(Self {
            orient: attrs.parse::<Orient>("orient")?,
            length: attrs.cells("length")?,
            from: attrs.number("from")?,
            to: attrs.number("to")?,
            maximum: attrs.number("maximum")?,
            value: attrs.number("value")?,
        })
    }
}

fn oriented(
    tree: &mut WidgetTree,
    master: WidgetId,
    element: &Element,
    kind: WidgetKind,
    default: Orient,
) -> Result<Built> {
    let orient = Attrs::new(element).parse::<Orient>("orient")?;
    let options = Options {
        orient: Some(orient.unwrap_or(default)),
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(kind).with_options(options))
}

pub fn canvas(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let attrs = Attrs::new(element);
    let options = Options {
        width: attrs.cells("width")?,
        height: attrs.cells("height")?,
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Canvas).with_options(options))
}

pub fn scale(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = RangeConfig::parse(Attrs::new(element))?;
    let options = Options {
        orient: Some(config.orient.unwrap_or(Orient::Horizontal)),
        length: config.length,
        from: config.from,
        to: config.to,
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Scale).with_options(options))
}

/// A progressbar; `value` must lie within `0..=maximum` (maximum defaults
/// to 100).
pub fn progressbar(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    let config = RangeConfig::parse(Attrs::new(element))?;
    let maximum = config.maximum.unwrap_or(100.0);
    if let Some(value) = config.value {
        if value < 0.0 || value > maximum {
            return Err(BuildError::InvalidAttribute {
                tag: element.tag.clone(),
                attribute: "value".to_owned(),
                value: Attrs::new(element).string("value").unwrap_or_default(),
                message: format!("expected a number between 0 and {maximum}"),
            });
        }
    }
    let options = Options {
        orient: Some(config.orient.unwrap_or(Orient::Horizontal)),
        length: config.length,
        maximum: Some(maximum),
        value: Some(config.value.unwrap_or(0.0)),
        ..Options::default()
    };
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Progressbar).with_options(options))
}

pub fn scrollbar(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    oriented(tree, master, element, WidgetKind::Scrollbar, Orient::Vertical)
}

pub fn separator(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    oriented(tree, master, element, WidgetKind::Separator, Orient::Horizontal)
}

pub fn sizegrip(tree: &mut WidgetTree, master: WidgetId, element: &Element) -> Result<Built> {
    create_placed(tree, master, element, WidgetData::new(WidgetKind::Sizegrip))
}
