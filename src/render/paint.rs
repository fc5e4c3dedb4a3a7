//! Painting laid-out widgets into a compositor.
//!
//! Each widget kind has a fixed text rendering: buttons in brackets, check
//! marks, entries padded with underscores, scrollbar troughs with a thumb.
//! Children are clipped to their parent's region.

use std::collections::HashMap;

use crate::geometry::Region;
use crate::layout::measure::{chrome, wrap, MESSAGE_WRAP};
use crate::toolkit::{Orient, Relief, State, VarRef, WidgetData, WidgetId, WidgetKind, WidgetTree};

use super::compositor::Compositor;
use super::strip::{CellStyle, Strip};

/// Box-drawing characters: corners clockwise from top-left, then
/// horizontal and vertical edges.
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_right: char,
    bottom_left: char,
    horizontal: char,
    vertical: char,
}

const LIGHT: BorderChars = BorderChars {
    top_left: '┌',
    top_right: '┐',
    bottom_right: '┘',
    bottom_left: '└',
    horizontal: '─',
    vertical: '│',
};

const HEAVY: BorderChars = BorderChars {
    top_left: '┏',
    top_right: '┓',
    bottom_right: '┛',
    bottom_left: '┗',
    horizontal: '━',
    vertical: '┃',
};

const DOUBLE: BorderChars = BorderChars {
    top_left: '╔',
    top_right: '╗',
    bottom_right: '╝',
    bottom_left: '╚',
    horizontal: '═',
    vertical: '║',
};

const ROUNDED: BorderChars = BorderChars {
    top_left: '╭',
    top_right: '╮',
    bottom_right: '╯',
    bottom_left: '╰',
    horizontal: '─',
    vertical: '│',
};

fn border_chars(relief: Relief) -> &'static BorderChars {
    match relief {
        Relief::Raised => &HEAVY,
        Relief::Sunken => &DOUBLE,
        Relief::Groove | Relief::Ridge => &ROUNDED,
        Relief::Flat | Relief::Solid => &LIGHT,
    }
}

/// Paint `window` and everything laid out under it.
pub fn paint_window(
    tree: &WidgetTree,
    window: WidgetId,
    regions: &HashMap<WidgetId, Region>,
    screen: &mut Compositor,
) {
    let clip = screen.region();
    paint_subtree(tree, window, regions, clip, screen);
}

fn paint_subtree(
    tree: &WidgetTree,
    id: WidgetId,
    regions: &HashMap<WidgetId, Region>,
    clip: Region,
    screen: &mut Compositor,
) {
    let (Some(data), Some(&region)) = (tree.get(id), regions.get(&id)) else {
        return;
    };
    let clip = clip.intersection(region);
    if clip.is_empty() {
        return;
    }
    screen.place_strips(&paint_widget(data, region), clip);

    let inner = clip.intersection(region.shrink(chrome(data)));
    for &child in tree.children(id) {
        paint_subtree(tree, child, regions, inner, screen);
    }
}

fn base_style(data: &WidgetData) -> CellStyle {
    if data.options.state == State::Disabled {
        CellStyle::PLAIN.dim()
    } else {
        CellStyle::PLAIN
    }
}

/// Strips for one widget filling `region`.
pub fn paint_widget(data: &WidgetData, region: Region) -> Vec<Strip> {
    let style = base_style(data);
    let Region { x, y, width, height } = region;
    let text = data.display_text();
    match data.kind {
        WidgetKind::Window
        | WidgetKind::Page
        | WidgetKind::PanedWindow
        | WidgetKind::Menu
        | WidgetKind::Canvas => Vec::new(),
        WidgetKind::Frame => {
            if data.options.relief == Relief::Flat {
                Vec::new()
            } else {
                border(region, border_chars(data.options.relief), None)
            }
        }
        WidgetKind::LabelFrame => border(region, &LIGHT, Some(&text)),
        WidgetKind::Notebook => vec![tab_row(data, x, y)],
        WidgetKind::Label => text
            .split('\n')
            .enumerate()
            .map(|(i, line)| Strip::text(x, y + i as i32, line, style))
            .collect(),
        WidgetKind::Message => wrap(&text, MESSAGE_WRAP)
            .iter()
            .enumerate()
            .map(|(i, line)| Strip::text(x, y + i as i32, line, style))
            .collect(),
        WidgetKind::Button => {
            let inner = width - 4;
            let label = center(&text, inner.max(0));
            vec![Strip::text(x, y + height / 2, &format!("[ {label} ]"), style)]
        }
        WidgetKind::Checkbutton => {
            let checked = matches!(data.variable, Some(VarRef::Int(v)) if v.get_untracked() != 0);
            let mark = if checked { "[x] " } else { "[ ] " };
            vec![Strip::text(x, y, &format!("{mark}{text}"), style)]
        }
        WidgetKind::Radiobutton => vec![Strip::text(x, y, &format!("( ) {text}"), style)],
        WidgetKind::Menubutton => vec![Strip::text(x, y, &format!("{text} ▾"), style)],
        WidgetKind::Entry => {
            let visible: String = text.chars().skip(data.scroll.offset.x as usize).collect();
            vec![Strip::text(x, y, &visible, style.underline()).fit(width, '_', style)]
        }
        WidgetKind::Combobox | WidgetKind::OptionMenu | WidgetKind::Spinbox => {
            let arrow = if data.kind == WidgetKind::Spinbox { " ↕" } else { " ▾" };
            let mut strip = Strip::text(x, y, &text, style).fit(width - 2, '_', style);
            strip.push_str(arrow, style);
            vec![strip]
        }
        WidgetKind::Text => {
            let Some(buffer) = data.buffer else {
                return Vec::new();
            };
            let offset = data.scroll.offset;
            buffer.with(|buf| {
                buf.lines()
                    .skip(offset.y as usize)
                    .take(height.max(0) as usize)
                    .enumerate()
                    .map(|(i, line)| {
                        let visible: String = line.chars().skip(offset.x as usize).collect();
                        Strip::text(x, y + i as i32, &visible, style)
                    })
                    .collect()
            })
        }
        WidgetKind::Listbox => list_rows(&data.options.values, data, x, y, height, style),
        WidgetKind::Treeview => {
            let headings = data.options.show.unwrap_or_default().headings;
            let mut strips = Vec::new();
            let mut top = y;
            if headings {
                strips.push(Strip::repeat(x, y, '─', width, style.bold()));
                top += 1;
            }
            strips.extend(list_rows(&data.options.values, data, x, top, height - (top - y), style));
            strips
        }
        WidgetKind::Scrollbar => scrollbar(data, region, style),
        WidgetKind::Scale => {
            if data.options.orient == Some(Orient::Vertical) {
                let mut strips: Vec<Strip> =
                    (1..height).map(|i| Strip::text(x, y + i, "│", style)).collect();
                strips.push(Strip::text(x, y, "●", style));
                strips
            } else {
                let mut strip = Strip::text(x, y, "●", style);
                strip.push_str(&"─".repeat((width - 1).max(0) as usize), style);
                vec![strip]
            }
        }
        WidgetKind::Progressbar => progressbar(data, region, style),
        WidgetKind::Separator => {
            if data.options.orient == Some(Orient::Vertical) {
                (0..height).map(|i| Strip::text(x, y + i, "│", style)).collect()
            } else {
                vec![Strip::repeat(x, y, '─', width, style)]
            }
        }
        WidgetKind::Sizegrip => vec![Strip::text(x + width - 1, y + height - 1, "◢", style)],
    }
}

fn center(text: &str, width: i32) -> String {
    let len = text.chars().count() as i32;
    if len >= width {
        return text.to_owned();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{text}{}", " ".repeat(left as usize), " ".repeat(right as usize))
}

fn border(region: Region, chars: &BorderChars, title: Option<&str>) -> Vec<Strip> {
    let Region { x, y, width, height } = region;
    if width < 2 || height < 2 {
        return Vec::new();
    }
    let style = CellStyle::PLAIN;
    let mut top = Strip::new(y, x);
    top.push(chars.top_left, style);
    let mut span = width - 2;
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let title: String = format!(" {title} ").chars().take(span.max(0) as usize).collect();
        span -= title.chars().count() as i32;
        top.push_str(&title, style.bold());
    }
    for _ in 0..span {
        top.push(chars.horizontal, style);
    }
    top.push(chars.top_right, style);

    let mut strips = vec![top];
    for row in 1..height - 1 {
        strips.push(Strip::text(x, y + row, &chars.vertical.to_string(), style));
        strips.push(Strip::text(x + width - 1, y + row, &chars.vertical.to_string(), style));
    }
    let mut bottom = Strip::new(y + height - 1, x);
    bottom.push(chars.bottom_left, style);
    for _ in 0..width - 2 {
        bottom.push(chars.horizontal, style);
    }
    bottom.push(chars.bottom_right, style);
    strips.push(bottom);
    strips
}

fn tab_row(data: &WidgetData, x: i32, y: i32) -> Strip {
    let mut strip = Strip::new(y, x);
    for (i, tab) in data.tabs.iter().enumerate() {
        strip.push_str("│ ", CellStyle::PLAIN);
        let style = if data.selected_tab == Some(i) {
            CellStyle::PLAIN.bold().reverse()
        } else {
            CellStyle::PLAIN
        };
        strip.push_str(&tab.text, style);
        strip.push(' ', CellStyle::PLAIN);
    }
    if !data.tabs.is_empty() {
        strip.push('│', CellStyle::PLAIN);
    }
    strip
}

fn list_rows(
    values: &[String],
    data: &WidgetData,
    x: i32,
    y: i32,
    height: i32,
    style: CellStyle,
) -> Vec<Strip> {
    let offset = data.scroll.offset;
    values
        .iter()
        .skip(offset.y as usize)
        .take(height.max(0) as usize)
        .enumerate()
        .map(|(i, value)| {
            let visible: String = value.chars().skip(offset.x as usize).collect();
            Strip::text(x, y + i as i32, &visible, style)
        })
        .collect()
}

fn scrollbar(data: &WidgetData, region: Region, style: CellStyle) -> Vec<Strip> {
    let Region { x, y, width, height } = region;
    let horizontal = data.options.orient == Some(Orient::Horizontal);
    let track = if horizontal { width } else { height };
    let (start, len) = data.scrollbar.thumb(track);
    let cell = |i: i32| if i >= start && i < start + len { '█' } else { '░' };
    if horizontal {
        let mut strip = Strip::new(y, x);
        for i in 0..track {
            strip.push(cell(i), style);
        }
        vec![strip]
    } else {
        (0..track)
            .map(|i| Strip::text(x, y + i, &cell(i).to_string(), style))
            .collect()
    }
}

fn progressbar(data: &WidgetData, region: Region, style: CellStyle) -> Vec<Strip> {
    let Region { x, y, width, height } = region;
    let maximum = data.options.maximum.unwrap_or(100.0);
    let value = data.options.value.unwrap_or(0.0);
    let fraction = if maximum > 0.0 { (value / maximum).clamp(0.0, 1.0) } else { 0.0 };
    if data.options.orient == Some(Orient::Vertical) {
        // Fills from the bottom up.
        let filled = (fraction * f64::from(height)).round() as i32;
        (0..height)
            .map(|i| {
                let ch = if i >= height - filled { "█" } else { "░" };
                Strip::text(x, y + i, ch, style)
            })
            .collect()
    } else {
        let filled = (fraction * f64::from(width)).round() as i32;
        let mut strip = Strip::repeat(x, y, '█', filled, style);
        for _ in filled..width {
            strip.push('░', style);
        }
        vec![strip]
    }
}
