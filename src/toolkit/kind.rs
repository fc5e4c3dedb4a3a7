//! WidgetKind: every widget class the toolkit can instantiate.

use std::fmt;

/// The class of a widget.
///
/// `Window` is the only kind with no markup tag of its own: windows are
/// created by the host, and a `<toplevel>` element configures the window it
/// is built into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Window,
    Button,
    Canvas,
    Checkbutton,
    Combobox,
    Entry,
    Frame,
    Label,
    LabelFrame,
    Listbox,
    Menu,
    Menubutton,
    Message,
    Notebook,
    OptionMenu,
    Page,
    PanedWindow,
    Progressbar,
    Radiobutton,
    Scale,
    Scrollbar,
    Separator,
    Sizegrip,
    Spinbox,
    Text,
    Treeview,
}

impl WidgetKind {
    /// Class name as shown in outlines and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Button => "button",
            Self::Canvas => "canvas",
            Self::Checkbutton => "checkbutton",
            Self::Combobox => "combobox",
            Self::Entry => "entry",
            Self::Frame => "frame",
            Self::Label => "label",
            Self::LabelFrame => "labelframe",
            Self::Listbox => "listbox",
            Self::Menu => "menu",
            Self::Menubutton => "menubutton",
            Self::Message => "message",
            Self::Notebook => "notebook",
            Self::OptionMenu => "optionmenu",
            Self::Page => "page",
            Self::PanedWindow => "panedwindow",
            Self::Progressbar => "progressbar",
            Self::Radiobutton => "radiobutton",
            Self::Scale => "scale",
            Self::Scrollbar => "scrollbar",
            Self::Separator => "separator",
            Self::Sizegrip => "sizegrip",
            Self::Spinbox => "spinbox",
            Self::Text => "text",
            Self::Treeview => "treeview",
        }
    }

    /// Whether the widget has a view that can be scrolled along `x`/`y`.
    pub fn scrollable(self) -> (bool, bool) {
        match self {
            Self::Text | Self::Listbox | Self::Canvas | Self::Treeview => (true, true),
            Self::Entry => (true, false),
            _ => (false, false),
        }
    }

    /// Whether the widget holds a list of values.
    pub fn has_values(self) -> bool {
        matches!(
            self,
            Self::Combobox | Self::OptionMenu | Self::Spinbox | Self::Listbox
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
