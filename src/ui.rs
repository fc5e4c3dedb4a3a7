//! MarkupUi: a built markup document and its widgets.
//!
//! Construction parses the document, checks the root's geometry mode, builds
//! every widget and type-checks every geometry intent. Nothing is placed
//! until [`MarkupUi::build`] runs.
//!
//! ```ignore
//! let mut tree = WidgetTree::new();
//! let window = tree.create_window(None);
//! let mut ui = MarkupUi::from_file(&mut tree, window, "form.xml")?;
//! ui.build(&mut tree)?;
//! ui.map_scrollbars(&mut tree, "log", None, Some("log_scroll"))?;
//! let name = ui.get("name")?.binding;
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::binding::WidgetHandle;
use crate::builder::TreeBuilder;
use crate::error::{BuildError, Result};
use crate::markup::{self, Element};
use crate::placement::{GeometryMode, Placement};
use crate::toolkit::{Axis, WidgetId, WidgetKind, WidgetTree};
use crate::widgets::TagRegistry;

/// A document built into a master widget.
#[derive(Debug)]
pub struct MarkupUi {
    master: WidgetId,
    geometry: GeometryMode,
    widgets: HashMap<String, WidgetHandle>,
    pending: Vec<Placement>,
    built: bool,
}

impl MarkupUi {
    /// Build the document in `path` into `master`.
    pub fn from_file(tree: &mut WidgetTree, master: WidgetId, path: impl AsRef<Path>) -> Result<Self> {
        let root = markup::load_file(path)?;
        Self::from_element(tree, master, &root)
    }

    /// Build an in-memory document into `master`.
    pub fn from_string(tree: &mut WidgetTree, master: WidgetId, source: &str) -> Result<Self> {
        let root = markup::parse_str(source)?;
        Self::from_element(tree, master, &root)
    }

    /// Build an already parsed document with the built-in tags.
    pub fn from_element(tree: &mut WidgetTree, master: WidgetId, root: &Element) -> Result<Self> {
        Self::with_registry(&TagRegistry::with_defaults(), tree, master, root)
    }

    /// Build a parsed document using `registry` for tag lookup.
    pub fn with_registry(
        registry: &TagRegistry,
        tree: &mut WidgetTree,
        master: WidgetId,
        root: &Element,
    ) -> Result<Self> {
        let geometry = GeometryMode::from_root(root)?;
        let output = TreeBuilder::new(registry).build(tree, master, root)?;
        let pending = output
            .intents
            .iter()
            .map(|intent| intent.resolve(geometry))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(
            %geometry,
            ids = output.widgets.len(),
            placements = pending.len(),
            "built markup"
        );
        Ok(Self {
            master,
            geometry,
            widgets: output.widgets,
            pending,
            built: false,
        })
    }

    pub fn geometry(&self) -> GeometryMode {
        self.geometry
    }

    /// The widget the document was built into.
    pub fn master(&self) -> WidgetId {
        self.master
    }

    /// The widget declared with `id`.
    pub fn get(&self, id: &str) -> Result<&WidgetHandle> {
        self.widgets
            .get(id)
            .ok_or_else(|| BuildError::UnknownId(id.to_owned()))
    }

    /// Several widgets at once, in the order asked for.
    pub fn get_many<I, S>(&self, ids: I) -> Result<Vec<&WidgetHandle>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter().map(|id| self.get(id.as_ref())).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    /// Every declared id, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.widgets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Id declared for a widget, if any.
    pub fn id_of(&self, widget: WidgetId) -> Option<&str> {
        self.widgets
            .iter()
            .filter(|(_, handle)| handle.id == widget)
            .map(|(id, _)| id.as_str())
            .min()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Place every widget with the document's geometry manager, in document
    /// order. Once every placement succeeds later calls do nothing.
    ///
    /// On failure the placements from the failing one onwards stay pending,
    /// so calling again retries them and reports the error again.
    pub fn build(&mut self, tree: &mut WidgetTree) -> Result<()> {
        if self.built {
            tracing::debug!("markup already placed");
            return Ok(());
        }
        let failed = self
            .pending
            .iter()
            .enumerate()
            .find_map(|(index, placement)| placement.apply(tree).err().map(|err| (index, err)));
        if let Some((applied, err)) = failed {
            self.pending.drain(..applied);
            return Err(err);
        }
        self.pending.clear();
        self.built = true;
        Ok(())
    }

    /// Wire scrollbars to `target`'s views, for each axis given.
    ///
    /// The target reports view changes to the scrollbar, and moving the
    /// scrollbar scrolls the target.
    pub fn map_scrollbars(
        &self,
        tree: &mut WidgetTree,
        target: &str,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<()> {
        let target = self.get(target)?.id;
        for (axis, scrollbar) in [(Axis::X, x), (Axis::Y, y)] {
            let Some(scrollbar) = scrollbar else {
                continue;
            };
            let scrollbar = self.get(scrollbar)?.id;
            tree.set_scroll_command(target, axis, scrollbar)?;
            tree.set_scrollbar_command(scrollbar, target, axis)?;
        }
        Ok(())
    }

    /// An indented outline of the master's subtree: one line per widget
    /// with its id, text and placement.
    pub fn outline(&self, tree: &WidgetTree) -> String {
        let mut out = String::new();
        self.outline_into(tree, self.master, 0, &mut out);
        out
    }

    fn outline_into(&self, tree: &WidgetTree, widget: WidgetId, depth: usize, out: &mut String) {
        let Some(data) = tree.get(widget) else {
            return;
        };
        let _ = write!(out, "{:indent$}{}", "", data.kind, indent = depth * 2);
        if let Some(id) = self.id_of(widget) {
            let _ = write!(out, " #{id}");
        }
        let text = match data.kind {
            WidgetKind::Window => data.title.clone().unwrap_or_default(),
            WidgetKind::Text => data
                .buffer
                .map(|b| b.with(|buf| buf.lines().next().unwrap_or_default().to_owned()))
                .unwrap_or_default(),
            _ => data.display_text(),
        };
        if !text.is_empty() {
            let _ = write!(out, " {text:?}");
        }
        if data.kind == WidgetKind::Page {
            if let Some(tab) = tree
                .parent(widget)
                .and_then(|nb| tree.get(nb))
                .and_then(|nb| nb.tabs.iter().find(|t| t.page == widget))
            {
                let _ = write!(out, " [tab {:?}]", tab.text);
            }
        }
        if let Some(manager) = &data.manager {
            let _ = write!(out, " [{manager}]");
        }
        out.push('\n');
        for &child in tree.children(widget) {
            self.outline_into(tree, child, depth + 1, out);
        }
    }
}
