//! Native widget toolkit: the widget arena the markup layer builds into.
//!
//! - [`WidgetTree`]: slotmap arena of [`WidgetData`], windows as roots
//! - [`Variable`]: Tk-style value cells on a thread-local reactive runtime
//! - [`TextBuffer`]: multi-line buffer addressed by `line.char` indices
//! - [`manager`]: grid and pack geometry-manager options
//! - [`scroll`]: scroll views, scrollbar state, view commands

pub mod kind;
pub mod manager;
pub mod options;
pub mod scroll;
pub mod text_buffer;
pub mod tree;
pub mod variable;
pub mod widget;

pub use kind::WidgetKind;
pub use manager::{fits_grid, Fill, GridInfo, GridOptions, Manager, Pad, PackInfo, PackOptions, Side, Sticky, MAX_GRID_CELLS};
pub use options::{Options, Orient, Relief, SelectMode, State, TreeShow};
pub use scroll::{Axis, ScrollState, ScrollbarState, ViewCommand};
pub use text_buffer::{TextBuffer, TextIndex};
pub use tree::{ToolkitError, WidgetTree};
pub use variable::{batch, create_effect, dispose_effect, EffectId, Variable};
pub use widget::{Tab, VarRef, WidgetData, WidgetId};
