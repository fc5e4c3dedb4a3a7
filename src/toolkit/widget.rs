//! Widget records stored in the [`WidgetTree`](super::WidgetTree).

use slotmap::new_key_type;

use super::kind::WidgetKind;
use super::manager::Manager;
use super::options::Options;
use super::scroll::{Axis, ScrollState, ScrollbarState};
use super::text_buffer::TextBuffer;
use super::variable::Variable;

new_key_type! {
    /// Handle to a widget in a `WidgetTree`. Copy, lightweight (u64).
    pub struct WidgetId;
}

/// A variable bound to a widget's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRef {
    Int(Variable<i64>),
    Str(Variable<String>),
}

impl VarRef {
    /// The current value rendered as text.
    pub fn display_value(&self) -> String {
        match self {
            VarRef::Int(v) => v.get_untracked().to_string(),
            VarRef::Str(v) => v.get_untracked(),
        }
    }
}

/// One notebook tab: the page widget and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub page: WidgetId,
    pub text: String,
}

/// Everything the toolkit knows about one widget.
#[derive(Debug, Clone)]
pub struct WidgetData {
    pub kind: WidgetKind,
    pub options: Options,
    /// Variable mirroring the widget's value.
    pub variable: Option<VarRef>,
    /// Buffer of a text widget.
    pub buffer: Option<Variable<TextBuffer>>,
    /// Set once a geometry manager has placed the widget.
    pub manager: Option<Manager>,
    /// Window title; only meaningful for windows.
    pub title: Option<String>,
    /// Notebook pages in tab order.
    pub tabs: Vec<Tab>,
    pub selected_tab: Option<usize>,
    /// View over the widget's content, for scrollable kinds.
    pub scroll: ScrollState,
    /// Scrollbars told about view changes, per axis.
    pub xscroll_command: Option<WidgetId>,
    pub yscroll_command: Option<WidgetId>,
    /// For scrollbars: what they show and which view they drive.
    pub scrollbar: ScrollbarState,
    pub command: Option<(WidgetId, Axis)>,
}

impl WidgetData {
    /// A widget of `kind` with default options.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            options: Options::default(),
            variable: None,
            buffer: None,
            manager: None,
            title: None,
            tabs: Vec::new(),
            selected_tab: None,
            scroll: ScrollState::default(),
            xscroll_command: None,
            yscroll_command: None,
            scrollbar: ScrollbarState::default(),
            command: None,
        }
    }

    /// Set the configured options (builder).
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Bind a variable (builder).
    pub fn with_variable(mut self, variable: VarRef) -> Self {
        self.variable = Some(variable);
        self
    }

    /// Attach a text buffer (builder).
    pub fn with_buffer(mut self, buffer: Variable<TextBuffer>) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The text the widget displays: bound variable first, then the `text`
    /// option.
    pub fn display_text(&self) -> String {
        if let Some(var) = &self.variable {
            if !matches!(var, VarRef::Int(_)) {
                return var.display_value();
            }
        }
        self.options.text.clone().unwrap_or_default()
    }

    /// The scrollbar linked to this widget's view on `axis`.
    pub fn scroll_command(&self, axis: Axis) -> Option<WidgetId> {
        match axis {
            Axis::X => self.xscroll_command,
            Axis::Y => self.yscroll_command,
        }
    }

    /// Whether this widget's view can move along `axis`.
    pub fn scrolls(&self, axis: Axis) -> bool {
        let (x, y) = self.kind.scrollable();
        match axis {
            Axis::X => x,
            Axis::Y => y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = WidgetData::new(WidgetKind::Label);
        assert_eq!(data.kind, WidgetKind::Label);
        assert!(data.manager.is_none());
        assert!(data.variable.is_none());
        assert_eq!(data.display_text(), "");
    }

    #[test]
    fn display_text_prefers_string_variable() {
        let var = Variable::new(String::from("typed"));
        let data = WidgetData::new(WidgetKind::Entry)
            .with_options(Options {
                text: Some("initial".into()),
                ..Options::default()
            })
            .with_variable(VarRef::Str(var));
        assert_eq!(data.display_text(), "typed");
    }

    #[test]
    fn display_text_ignores_int_variable() {
        let data = WidgetData::new(WidgetKind::Checkbutton)
            .with_options(Options {
                text: Some("Remember me".into()),
                ..Options::default()
            })
            .with_variable(VarRef::Int(Variable::new(1)));
        assert_eq!(data.display_text(), "Remember me");
    }

    #[test]
    fn scroll_axes_follow_kind() {
        let entry = WidgetData::new(WidgetKind::Entry);
        assert!(entry.scrolls(Axis::X));
        assert!(!entry.scrolls(Axis::Y));
    }
}
