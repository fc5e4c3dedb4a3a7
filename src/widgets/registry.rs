//! Tag registry: markup tag name to widget constructor.
//!
//! [`TagRegistry`] is an explicit value owned by the caller. `with_defaults()`
//! installs one constructor per widget kind; tests and embedders can start
//! from `new()` or override single tags with `register()`.

use std::collections::HashMap;
use std::fmt;

use crate::binding::WidgetHandle;
use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::placement::GeometryIntent;
use crate::toolkit::{WidgetId, WidgetTree};

use super::options::VALUE_TAG;
use super::{buttons, choices, containers, ranges, text};

// ---------------------------------------------------------------------------
// Built
// ---------------------------------------------------------------------------

/// What a constructor produces: the widget and, unless the widget is not
/// independently placeable, its geometry intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub handle: WidgetHandle,
    pub intent: Option<GeometryIntent>,
}

impl Built {
    /// A widget its master's geometry manager will place.
    pub fn placed(handle: WidgetHandle, element: &Element) -> Self {
        Self {
            intent: Some(GeometryIntent::new(handle.id, element)),
            handle,
        }
    }

    /// A widget that is placed some other way (a window, a notebook page).
    pub fn unplaced(handle: WidgetHandle) -> Self {
        Self {
            handle,
            intent: None,
        }
    }
}

/// Builds one widget under `master` from `element`.
pub type Constructor = fn(&mut WidgetTree, WidgetId, &Element) -> Result<Built>;

// ---------------------------------------------------------------------------
// TagRegistry
// ---------------------------------------------------------------------------

/// Maps tag names to constructors.
#[derive(Clone)]
pub struct TagRegistry {
    constructors: HashMap<String, Constructor>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with every built-in widget tag.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [(&str, Constructor); 26] = [
            ("button", buttons::button),
            ("canvas", ranges::canvas),
            ("checkbutton", buttons::checkbutton),
            ("combobox", choices::combobox),
            ("entry", text::entry),
            ("frame", containers::frame),
            ("label", text::label),
            ("labelframe", containers::labelframe),
            ("listbox", choices::listbox),
            ("menu", buttons::menu),
            ("menubutton", buttons::menubutton),
            ("message", text::message),
            ("notebook", containers::notebook),
            ("optionmenu", choices::optionmenu),
            ("page", containers::page),
            ("panedwindow", containers::panedwindow),
            ("progressbar", ranges::progressbar),
            ("radiobutton", buttons::radiobutton),
            ("scale", ranges::scale),
            ("scrollbar", ranges::scrollbar),
            ("separator", ranges::separator),
            ("sizegrip", ranges::sizegrip),
            ("spinbox", choices::spinbox),
            ("text", text::text),
            ("toplevel", containers::toplevel),
            ("treeview", choices::treeview),
        ];
        for (tag, constructor) in defaults {
            registry.register(tag, constructor);
        }
        registry
    }

    /// Register a constructor, replacing any existing one for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(tag.into(), constructor);
    }

    /// Remove a tag. Returns its constructor, if any.
    pub fn unregister(&mut self, tag: &str) -> Option<Constructor> {
        self.constructors.remove(tag)
    }

    /// The constructor for `tag`.
    pub fn get(&self, tag: &str) -> Result<Constructor> {
        self.constructors
            .get(tag)
            .copied()
            .ok_or_else(|| BuildError::UnrecognizedTag(tag.to_owned()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Whether `tag` carries data for its parent rather than a widget.
    pub fn is_data_tag(&self, tag: &str) -> bool {
        tag == VALUE_TAG
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry").field("tags", &self.tags()).finish()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
