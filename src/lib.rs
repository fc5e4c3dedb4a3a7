//! # markup-ui
//!
//! Declare widget trees in XML and build them into a native widget
//! toolkit with Tk-style geometry management.
//!
//! A document's root `<toplevel>` names a geometry mode (`grid` or `pack`).
//! Every nested element becomes a widget built under its parent, and every
//! widget except notebook pages and the toplevel is placed with the root's
//! geometry manager once [`MarkupUi::build`] runs. Widgets declared with an
//! `id` can be looked up afterwards, with their bound variables.
//!
//! ```ignore
//! use markup_ui::{toolkit::WidgetTree, MarkupUi};
//!
//! let mut tree = WidgetTree::new();
//! let window = tree.create_window(None);
//! let mut ui = MarkupUi::from_string(&mut tree, window, r#"
//!     <toplevel geometry="grid" title="Login">
//!       <label text="User"/>
//!       <entry id="user" row="0" column="1"/>
//!     </toplevel>"#)?;
//! ui.build(&mut tree)?;
//! let user = ui.get("user")?.binding.unwrap();
//! user.set_string("alice")?;
//! ```
//!
//! ## Modules
//!
//! - **[`markup`]**: XML reading into an element tree
//! - **[`toolkit`]**: the widget arena, options, geometry managers, variables,
//!   scrolling
//! - **[`widgets`]**: one constructor per tag and the tag registry
//! - **[`builder`]**, **[`placement`]**, **[`ui`]**: building a document and
//!   placing it
//! - **[`binding`]**: variable bindings and the text-widget adapter
//! - **[`layout`]**, **[`render`]**: taffy layout and terminal painting
//! - **[`app`]**, **[`event`]**: the terminal preview
//! - **[`testing`]**: headless rendering helpers

// Foundation
pub mod error;
pub mod geometry;

// Documents
pub mod markup;

// Toolkit and widgets
pub mod toolkit;
pub mod widgets;

// Building
pub mod binding;
pub mod builder;
pub mod placement;
pub mod ui;

// Presentation
pub mod layout;
pub mod render;

// Preview
pub mod app;
pub mod event;
pub mod testing;

pub use binding::{Binding, TextVar, WidgetHandle};
pub use error::{BuildError, Result};
pub use placement::GeometryMode;
pub use ui::MarkupUi;
pub use widgets::TagRegistry;
