//! Preview: shows built markup documents in the terminal.
//!
//! [`Preview`] owns the widget tree, one [`MarkupUi`] per window, the key
//! bindings and the terminal driver. `new_headless` skips the driver so the
//! preview can be driven from tests.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::event::{BindingAction, InputEvent, KeyBindingRegistry};
use crate::geometry::{Offset, Region, Size};
use crate::layout::layout_window;
use crate::render::{paint_window, CellStyle, Compositor, Driver, Strip};
use crate::toolkit::{Axis, ViewCommand, WidgetId, WidgetKind, WidgetTree};
use crate::ui::MarkupUi;

// ---------------------------------------------------------------------------
// PreviewConfig
// ---------------------------------------------------------------------------

/// Settings for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Title of the primary window until a document sets one.
    pub title: Option<String>,
    /// Screen size when running without a terminal.
    pub headless_size: Size,
    /// Print outlines instead of opening the terminal UI.
    pub dump: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: None,
            headless_size: Size::new(80, 24),
            dump: false,
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_headless_size(mut self, size: Size) -> Self {
        self.headless_size = size;
        self
    }

    pub fn with_dump(mut self, dump: bool) -> Self {
        self.dump = dump;
        self
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Documents built into windows, with one window shown at a time.
///
/// The top screen row is a title bar; the shown window is laid out below it.
pub struct Preview {
    pub tree: WidgetTree,
    uis: Vec<(WidgetId, MarkupUi)>,
    primary: WidgetId,
    active: usize,
    pub bindings: KeyBindingRegistry,
    pub config: PreviewConfig,
    driver: Option<Driver>,
    screen: Compositor,
    running: bool,
}

impl Preview {
    /// A preview writing to the real terminal, sized to it.
    pub fn new(config: PreviewConfig) -> io::Result<Self> {
        let size = Driver::terminal_size()?;
        let mut preview = Self::with_size(config, size);
        preview.driver = Some(Driver::new());
        Ok(preview)
    }

    /// A preview with no terminal, sized from the config.
    pub fn new_headless(config: PreviewConfig) -> Self {
        let size = config.headless_size;
        Self::with_size(config, size)
    }

    fn with_size(config: PreviewConfig, size: Size) -> Self {
        let mut tree = WidgetTree::new();
        let primary = tree.create_window(config.title.as_deref());
        Self {
            tree,
            uis: Vec::new(),
            primary,
            active: 0,
            bindings: KeyBindingRegistry::with_defaults(),
            config,
            driver: None,
            screen: Compositor::new(size),
            running: true,
        }
    }

    /// Build and place a document file. The first document goes into the
    /// primary window; each later one gets a window of its own.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<WidgetId> {
        let window = self.next_window();
        let ui = MarkupUi::from_file(&mut self.tree, window, path)?;
        self.install(window, ui)
    }

    /// Like [`load_file`](Preview::load_file) for in-memory markup.
    pub fn load_str(&mut self, markup: &str) -> Result<WidgetId> {
        let window = self.next_window();
        let ui = MarkupUi::from_string(&mut self.tree, window, markup)?;
        self.install(window, ui)
    }

    fn next_window(&mut self) -> WidgetId {
        if self.uis.is_empty() {
            self.primary
        } else {
            self.tree.create_window(None)
        }
    }

    fn install(&mut self, window: WidgetId, mut ui: MarkupUi) -> Result<WidgetId> {
        ui.build(&mut self.tree)?;
        self.uis.push((window, ui));
        Ok(window)
    }

    /// Windows holding a document, in load order.
    pub fn windows(&self) -> Vec<WidgetId> {
        self.uis.iter().map(|(window, _)| *window).collect()
    }

    /// The shown window.
    pub fn active_window(&self) -> WidgetId {
        self.uis
            .get(self.active)
            .map_or(self.primary, |(window, _)| *window)
    }

    /// The document built into `window`.
    pub fn ui(&self, window: WidgetId) -> Option<&MarkupUi> {
        self.uis.iter().find(|(w, _)| *w == window).map(|(_, ui)| ui)
    }

    /// Wire scrollbars to a view in `window`'s document. See
    /// [`MarkupUi::map_scrollbars`].
    pub fn map_scrollbars(
        &mut self,
        window: WidgetId,
        target: &str,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<()> {
        let Some((_, ui)) = self.uis.iter().find(|(w, _)| *w == window) else {
            return Err(crate::toolkit::ToolkitError::NoSuchWidget.into());
        };
        ui.map_scrollbars(&mut self.tree, target, x, y)
    }

    pub fn screen(&self) -> &Compositor {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        !self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = self.bindings.resolve(&key) {
                    self.perform(action);
                }
            }
            InputEvent::Wheel(lines) => self.scroll(ViewCommand::Units(lines)),
            InputEvent::Resize { width, height } => {
                self.screen.resize(Size::new(i32::from(width), i32::from(height)));
            }
        }
    }

    fn perform(&mut self, action: BindingAction) {
        let count = self.uis.len().max(1);
        match action {
            BindingAction::Quit => self.running = false,
            BindingAction::NextWindow => self.active = (self.active + 1) % count,
            BindingAction::PrevWindow => self.active = (self.active + count - 1) % count,
            BindingAction::Scroll(lines) => self.scroll(ViewCommand::Units(lines)),
            BindingAction::Page(pages) => self.scroll(ViewCommand::Pages(pages)),
            BindingAction::NextTab => self.next_tab(),
        }
    }

    /// Scroll every view in the shown window that has a vertical scrollbar
    /// wired to it.
    fn scroll(&mut self, command: ViewCommand) {
        let window = self.active_window();
        let targets: Vec<WidgetId> = self
            .tree
            .walk_depth_first(window)
            .into_iter()
            .filter(|&id| {
                self.tree
                    .get(id)
                    .is_some_and(|data| data.scroll_command(Axis::Y).is_some())
            })
            .collect();
        for target in targets {
            if let Err(err) = self.tree.view(target, Axis::Y, command) {
                tracing::warn!(%err, "scroll failed");
            }
        }
    }

    /// Select the next tab of the first notebook in the shown window.
    fn next_tab(&mut self) {
        let window = self.active_window();
        let notebook = self
            .tree
            .walk_depth_first(window)
            .into_iter()
            .find(|&id| self.tree.kind(id) == Some(WidgetKind::Notebook));
        let Some((notebook, next)) = notebook.and_then(|nb| {
            let data = self.tree.get(nb)?;
            let count = data.tabs.len();
            (count > 0).then(|| (nb, data.selected_tab.map_or(0, |i| (i + 1) % count)))
        }) else {
            return;
        };
        if let Err(err) = self.tree.notebook_select(notebook, next) {
            tracing::warn!(%err, "tab switch failed");
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Lay out and paint the shown window into the screen buffer.
    ///
    /// A layout failure is logged and leaves only the title bar.
    pub fn render(&mut self) -> &Compositor {
        let size = self.screen.size();
        let window = self.active_window();
        self.screen.clear();

        let body = Size::new(size.width, (size.height - 1).max(0));
        let regions = match layout_window(&mut self.tree, window, body) {
            Ok(regions) => regions
                .into_iter()
                .map(|(id, region)| (id, region.translate(Offset::new(0, 1))))
                .collect(),
            Err(err) => {
                tracing::warn!(%err, "layout failed");
                HashMap::new()
            }
        };
        paint_window(&self.tree, window, &regions, &mut self.screen);

        let bar = Strip::text(0, 0, &self.title_bar(), CellStyle::PLAIN.reverse())
            .fit(size.width, ' ', CellStyle::PLAIN.reverse());
        let clip = Region::new(0, 0, size.width, 1);
        self.screen.place_strips(&[bar], clip);
        &self.screen
    }

    fn title_bar(&self) -> String {
        let window = self.active_window();
        let title = self
            .tree
            .get(window)
            .and_then(|data| data.title.clone())
            .unwrap_or_else(|| "markup-ui".to_owned());
        if self.uis.len() > 1 {
            format!(" {title}  [{}/{}]", self.active + 1, self.uis.len())
        } else {
            format!(" {title}")
        }
    }

    /// Outline of every document window, in load order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, (_, ui)) in self.uis.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{}", ui.outline(&self.tree));
        }
        out
    }

    // ── Event loop ───────────────────────────────────────────────────

    /// Run until a quit key. Only draws changed cells between frames.
    pub fn run(&mut self) -> io::Result<()> {
        let Some(mut driver) = self.driver.take() else {
            return Err(io::Error::other("preview has no terminal"));
        };
        driver.enter()?;
        let result = self.event_loop(&mut driver);
        let left = driver.leave();
        self.driver = Some(driver);
        result.and(left)
    }

    fn event_loop(&mut self, driver: &mut Driver) -> io::Result<()> {
        let mut previous = Compositor::new(Size::ZERO);
        while self.running {
            let frame = self.render().clone();
            if frame.size() != previous.size() {
                // Redraw everything after a resize.
                driver.clear()?;
                previous = Compositor::new(Size::ZERO);
            }
            driver.apply_updates(&frame.diff(&previous))?;
            driver.flush()?;
            previous = frame;

            if let Some(event) = InputEvent::from_crossterm(crossterm::event::read()?) {
                self.handle_input(event);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, KeyEvent, Modifiers};
    use crate::error::BuildError;

    const LOG: &str = r#"
        <toplevel geometry="grid" title="Log">
          <text id="log" height="3" width="10">a
b
c
d
e
f</text>
          <scrollbar id="bar" column="1" sticky="ns"/>
        </toplevel>"#;

    fn headless() -> Preview {
        Preview::new_headless(PreviewConfig::new().with_headless_size(Size::new(30, 6)))
    }

    fn press(preview: &mut Preview, key: Key) {
        preview.handle_input(InputEvent::Key(KeyEvent::plain(key)));
    }

    #[test]
    fn config_builder() {
        let config = PreviewConfig::new()
            .with_title("Demo")
            .with_headless_size(Size::new(40, 10))
            .with_dump(true);
        assert_eq!(config.title.as_deref(), Some("Demo"));
        assert_eq!(config.headless_size, Size::new(40, 10));
        assert!(config.dump);
    }

    #[test]
    fn headless_has_no_driver() {
        let preview = headless();
        assert!(!preview.has_driver());
        assert!(!preview.should_quit());
        assert_eq!(preview.screen().size(), Size::new(30, 6));
    }

    #[test]
    fn first_document_uses_primary_window() {
        let mut preview = headless();
        let first = preview.load_str(r#"<toplevel geometry="pack"/>"#).unwrap();
        let second = preview.load_str(r#"<toplevel geometry="pack"/>"#).unwrap();
        assert_eq!(first, preview.primary);
        assert_ne!(first, second);
        assert_eq!(preview.windows(), vec![first, second]);
        assert_eq!(preview.tree.windows().len(), 2);
    }

    #[test]
    fn failed_document_is_reported() {
        let mut preview = headless();
        let err = preview.load_str("<toplevel><label/></toplevel>").unwrap_err();
        assert!(matches!(err, BuildError::MissingGeometry));
        assert!(preview.windows().is_empty());
    }

    #[test]
    fn quit_keys() {
        for key in [Key::Char('q'), Key::Escape] {
            let mut preview = headless();
            press(&mut preview, key);
            assert!(preview.should_quit());
        }
        let mut preview = headless();
        preview.handle_input(InputEvent::Key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)));
        assert!(preview.should_quit());
    }

    #[test]
    fn tab_cycles_windows() {
        let mut preview = headless();
        let a = preview.load_str(r#"<toplevel geometry="pack"/>"#).unwrap();
        let b = preview.load_str(r#"<toplevel geometry="pack"/>"#).unwrap();
        assert_eq!(preview.active_window(), a);
        press(&mut preview, Key::Tab);
        assert_eq!(preview.active_window(), b);
        press(&mut preview, Key::Tab);
        assert_eq!(preview.active_window(), a);
        press(&mut preview, Key::BackTab);
        assert_eq!(preview.active_window(), b);
    }

    #[test]
    fn arrow_keys_scroll_wired_views() {
        let mut preview = headless();
        let window = preview.load_str(LOG).unwrap();
        preview.map_scrollbars(window, "log", None, Some("bar")).unwrap();
        let log = preview.ui(window).unwrap().get("log").unwrap().id;
        preview.render();

        press(&mut preview, Key::Down);
        assert_eq!(preview.tree.get(log).unwrap().scroll.offset.y, 1);
        press(&mut preview, Key::PageDown);
        assert_eq!(preview.tree.get(log).unwrap().scroll.offset.y, 3);
        press(&mut preview, Key::Up);
        assert_eq!(preview.tree.get(log).unwrap().scroll.offset.y, 2);
    }

    #[test]
    fn render_draws_title_bar_and_widgets() {
        let mut preview = headless();
        preview
            .load_str(r#"<toplevel geometry="pack" title="Hello"><label text="hi" side="left"/></toplevel>"#)
            .unwrap();
        let text = preview.render().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " Hello");
        assert!(lines[1..].iter().any(|l| l.starts_with("hi")));
    }

    #[test]
    fn resize_changes_the_screen() {
        let mut preview = headless();
        preview.handle_input(InputEvent::Resize { width: 50, height: 12 });
        assert_eq!(preview.screen().size(), Size::new(50, 12));
    }

    #[test]
    fn dump_outlines_every_window() {
        let mut preview = headless();
        preview
            .load_str(r#"<toplevel geometry="pack" title="One"><label id="a" text="A"/></toplevel>"#)
            .unwrap();
        preview.load_str(r#"<toplevel geometry="grid" title="Two"/>"#).unwrap();
        insta::assert_snapshot!(preview.dump(), @r###"
        window "One"
          label #a "A" [pack side=top]

        window "Two"
        "###);
    }
}
