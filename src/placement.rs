//! Deferred geometry placement.
//!
//! Constructors do not place widgets. Each one records a [`GeometryIntent`]:
//! the widget plus the geometry attributes found on its element. Once the
//! whole tree exists, [`MarkupUi::build`](crate::MarkupUi::build) applies the
//! intents in document order with the document's single [`GeometryMode`].

use std::fmt;

use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::toolkit::{
    fits_grid, Fill, GridOptions, Pad, PackOptions, Side, Sticky, WidgetId, WidgetTree, MAX_GRID_CELLS,
};
use crate::widgets::options::Attrs;

/// Attributes read by the grid manager.
pub const GRID_ATTRIBUTES: [&str; 7] = ["row", "column", "sticky", "rowspan", "columnspan", "padx", "pady"];

/// Attributes read by the pack manager.
pub const PACK_ATTRIBUTES: [&str; 3] = ["side", "fill", "expand"];

/// The placement strategy of a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryMode {
    Grid,
    Pack,
}

impl GeometryMode {
    /// Read the required `geometry` attribute of the root element.
    pub fn from_root(root: &Element) -> Result<Self> {
        match root.attr("geometry") {
            None => Err(BuildError::MissingGeometry),
            Some("grid") => Ok(GeometryMode::Grid),
            Some("pack") => Ok(GeometryMode::Pack),
            Some(other) => Err(BuildError::InvalidGeometry(other.to_owned())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeometryMode::Grid => "grid",
            GeometryMode::Pack => "pack",
        }
    }
}

impl fmt::Display for GeometryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A widget plus the geometry attributes of its element.
///
/// Only the attributes named in [`GRID_ATTRIBUTES`] and [`PACK_ATTRIBUTES`]
/// are kept; everything else on the element is dropped here.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryIntent {
    pub widget: WidgetId,
    attributes: Element,
}

impl GeometryIntent {
    pub fn new(widget: WidgetId, element: &Element) -> Self {
        let mut attributes = Element::new(element.tag.clone());
        for (key, value) in element.attributes() {
            if GRID_ATTRIBUTES.contains(&key) || PACK_ATTRIBUTES.contains(&key) {
                attributes.set_attr(key, value);
            }
        }
        Self { widget, attributes }
    }

    /// Tag of the element the intent came from.
    pub fn tag(&self) -> &str {
        &self.attributes.tag
    }

    /// Raw value of a kept geometry attribute.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.attributes.attr(name)
    }

    /// The grid subset, typed. Pack attributes are ignored.
    ///
    /// A row or column whose span reaches past [`MAX_GRID_CELLS`] is an
    /// invalid attribute.
    pub fn grid_options(&self) -> Result<GridOptions> {
        let attrs = Attrs::new(&self.attributes);
        let options = GridOptions {
            row: attrs.cells("row")?,
            column: attrs.cells("column")?,
            sticky: attrs.parse::<Sticky>("sticky")?,
            rowspan: attrs.span("rowspan")?,
            columnspan: attrs.span("columnspan")?,
            padx: attrs.parse::<Pad>("padx")?,
            pady: attrs.parse::<Pad>("pady")?,
        };
        self.check_extent(("row", options.row), ("rowspan", options.rowspan))?;
        self.check_extent(("column", options.column), ("columnspan", options.columnspan))?;
        Ok(options)
    }

    fn check_extent(&self, start: (&str, Option<u16>), span: (&str, Option<u16>)) -> Result<()> {
        if fits_grid(start.1.unwrap_or(0), span.1.unwrap_or(1)) {
            return Ok(());
        }
        // Blame the position when one was given, else the span alone.
        let attribute = if start.1.is_some() { start.0 } else { span.0 };
        Err(BuildError::InvalidAttribute {
            tag: self.tag().to_owned(),
            attribute: attribute.to_owned(),
            value: self.raw(attribute).unwrap_or_default().to_owned(),
            message: format!("grid extends past the last of {MAX_GRID_CELLS} cells"),
        })
    }

    /// The pack subset, typed. Grid attributes are ignored.
    pub fn pack_options(&self) -> Result<PackOptions> {
        let attrs = Attrs::new(&self.attributes);
        Ok(PackOptions {
            side: attrs.parse::<Side>("side")?,
            fill: attrs.parse::<Fill>("fill")?,
            expand: attrs.boolean("expand")?,
        })
    }

    /// Type-check the subset `mode` uses and turn it into a placement.
    pub fn resolve(&self, mode: GeometryMode) -> Result<Placement> {
        Ok(match mode {
            GeometryMode::Grid => Placement::Grid(self.widget, self.grid_options()?),
            GeometryMode::Pack => Placement::Pack(self.widget, self.pack_options()?),
        })
    }
}

/// A typed, ready-to-apply placement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Grid(WidgetId, GridOptions),
    Pack(WidgetId, PackOptions),
}

impl Placement {
    pub fn widget(&self) -> WidgetId {
        match self {
            Placement::Grid(id, _) | Placement::Pack(id, _) => *id,
        }
    }

    /// Hand the widget to its master's geometry manager.
    pub fn apply(&self, tree: &mut WidgetTree) -> Result<()> {
        match *self {
            Placement::Grid(id, options) => {
                tree.grid(id, options)?;
            }
            Placement::Pack(id, options) => {
                tree.pack(id, options)?;
            }
        }
        Ok(())
    }
}
