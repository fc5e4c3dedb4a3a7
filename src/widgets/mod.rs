//! Widget constructors, one per markup tag.
//!
//! Each constructor parses the attributes its kind accepts into a typed
//! config struct, creates the widget in the [`WidgetTree`], and returns a
//! [`Built`]: the widget handle plus its geometry intent.
//!
//! - [`buttons`]: button, checkbutton, radiobutton, menubutton, menu
//! - [`containers`]: frame, labelframe, notebook, page, panedwindow, toplevel
//! - [`text`]: label, message, entry, text
//! - [`choices`]: combobox, optionmenu, spinbox, listbox, treeview
//! - [`ranges`]: canvas, scale, progressbar, scrollbar, separator, sizegrip

pub mod buttons;
pub mod choices;
pub mod containers;
pub mod options;
pub mod ranges;
pub mod registry;
pub mod text;

pub use options::Attrs;
pub use registry::{Built, Constructor, TagRegistry};

use crate::binding::WidgetHandle;
use crate::error::Result;
use crate::markup::Element;
use crate::toolkit::{WidgetData, WidgetId, WidgetTree};

/// Create a widget with no bindings and record its geometry intent.
fn create_placed(
    tree: &mut WidgetTree,
    master: WidgetId,
    element: &Element,
    data: WidgetData,
) -> Result<Built> {
    let kind = data.kind;
    let id = tree.create(master, data)?;
    Ok(Built::placed(WidgetHandle::plain(id, kind), element))
}
