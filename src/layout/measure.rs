//! Natural sizes of widgets, in cells.
//!
//! A leaf's natural size is the least space it needs to draw itself; layout
//! uses it as the minimum size. Containers report the space their chrome
//! (borders, tab rows) takes through [`chrome`].

use crate::geometry::{Size, Spacing};
use crate::toolkit::{Orient, Relief, VarRef, WidgetData, WidgetKind};

pub const DEFAULT_ENTRY_WIDTH: u16 = 20;
pub const DEFAULT_LIST_WIDTH: u16 = 20;
pub const DEFAULT_LIST_HEIGHT: u16 = 10;
pub const DEFAULT_TEXT_WIDTH: u16 = 40;
pub const DEFAULT_TEXT_HEIGHT: u16 = 10;
pub const DEFAULT_CANVAS_WIDTH: u16 = 40;
pub const DEFAULT_CANVAS_HEIGHT: u16 = 12;
pub const DEFAULT_LENGTH: u16 = 20;
/// Column at which message text wraps.
pub const MESSAGE_WRAP: usize = 30;

fn chars(s: &str) -> i32 {
    s.chars().count() as i32
}

fn cells(option: Option<u16>, default: u16) -> i32 {
    i32::from(option.unwrap_or(default))
}

/// Greedy word wrap at `width` columns. Words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let len = line.chars().count();
            if len > 0 && len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

/// Cells taken by borders and tab rows around a container's content.
pub fn chrome(data: &WidgetData) -> Spacing {
    match data.kind {
        WidgetKind::Frame if data.options.relief != Relief::Flat => Spacing::all(1),
        WidgetKind::LabelFrame => Spacing::all(1),
        WidgetKind::Notebook => Spacing::new(1, 0, 0, 0),
        _ => Spacing::ZERO,
    }
}

/// Whether the kind lays out child widgets.
pub fn is_container(kind: WidgetKind) -> bool {
    matches!(
        kind,
        WidgetKind::Window
            | WidgetKind::Frame
            | WidgetKind::LabelFrame
            | WidgetKind::Notebook
            | WidgetKind::Page
            | WidgetKind::PanedWindow
    )
}

/// The least size a widget needs to draw itself.
pub fn natural_size(data: &WidgetData) -> Size {
    let options = &data.options;
    let text = data.display_text();
    let vertical = options.orient == Some(Orient::Vertical);
    match data.kind {
        WidgetKind::Window | WidgetKind::Frame | WidgetKind::Page | WidgetKind::PanedWindow => {
            Size::new(cells(options.width, 0), cells(options.height, 0))
        }
        WidgetKind::LabelFrame => Size::new(chars(&text) + 4, 2),
        WidgetKind::Notebook => Size::new(
            data.tabs.iter().map(|t| chars(&t.text) + 3).sum::<i32>() + 1,
            1,
        ),
        WidgetKind::Label => {
            let lines: Vec<&str> = text.split('\n').collect();
            let width = lines.iter().map(|l| chars(l)).max().unwrap_or(0);
            Size::new(width, if text.is_empty() { 1 } else { lines.len() as i32 })
        }
        WidgetKind::Message => {
            let lines = wrap(&text, MESSAGE_WRAP);
            let width = lines.iter().map(|l| chars(l)).max().unwrap_or(0);
            Size::new(width, lines.len() as i32)
        }
        WidgetKind::Button => Size::new(
            cells(options.width, chars(&text) as u16) + 4,
            cells(options.height, 1),
        ),
        WidgetKind::Checkbutton | WidgetKind::Radiobutton => Size::new(chars(&text) + 4, 1),
        WidgetKind::Menubutton => Size::new(chars(&text) + 2, 1),
        WidgetKind::Menu => Size::ZERO,
        WidgetKind::Entry => Size::new(cells(options.width, DEFAULT_ENTRY_WIDTH), 1),
        WidgetKind::Combobox | WidgetKind::Spinbox => {
            Size::new(cells(options.width, DEFAULT_ENTRY_WIDTH) + 2, 1)
        }
        WidgetKind::OptionMenu => {
            let current = match &data.variable {
                Some(VarRef::Str(v)) => chars(&v.get_untracked()),
                _ => 0,
            };
            Size::new(options.width.map_or(current, i32::from) + 2, 1)
        }
        WidgetKind::Text => Size::new(
            cells(options.width, DEFAULT_TEXT_WIDTH),
            cells(options.height, DEFAULT_TEXT_HEIGHT),
        ),
        WidgetKind::Listbox => Size::new(
            cells(options.width, DEFAULT_LIST_WIDTH),
            cells(options.height, DEFAULT_LIST_HEIGHT),
        ),
        WidgetKind::Treeview => {
            let headings = options.show.unwrap_or_default().headings;
            Size::new(
                cells(options.width, DEFAULT_LIST_WIDTH),
                cells(options.height, DEFAULT_LIST_HEIGHT) + i32::from(headings),
            )
        }
        WidgetKind::Canvas => Size::new(
            cells(options.width, DEFAULT_CANVAS_WIDTH),
            cells(options.height, DEFAULT_CANVAS_HEIGHT),
        ),
        WidgetKind::Scale | WidgetKind::Progressbar => {
            let length = cells(options.length, DEFAULT_LENGTH);
            if vertical {
                Size::new(1, length)
            } else {
                Size::new(length, 1)
            }
        }
        WidgetKind::Scrollbar => {
            if options.orient == Some(Orient::Horizontal) {
                Size::new(2, 1)
            } else {
                Size::new(1, 2)
            }
        }
        WidgetKind::Separator | WidgetKind::Sizegrip => Size::new(1, 1),
    }
}
