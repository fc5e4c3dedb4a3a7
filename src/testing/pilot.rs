//! Pilot: scripted interaction with a headless [`Preview`].

use crate::app::{Preview, PreviewConfig};
use crate::error::Result;
use crate::event::{InputEvent, Key, KeyEvent, Modifiers};
use crate::geometry::Size;
use crate::toolkit::WidgetId;

/// Drives a [`Preview`] with no terminal attached.
///
/// ```ignore
/// let mut pilot = Pilot::new(40, 10);
/// pilot.load(r#"<toplevel geometry="pack"><label text="hi"/></toplevel>"#)?;
/// pilot.press(Key::Tab);
/// assert!(pilot.snapshot().contains("hi"));
/// ```
pub struct Pilot {
    preview: Preview,
}

impl Pilot {
    /// A headless preview of `width` x `height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(PreviewConfig::new().with_headless_size(Size::new(width, height)))
    }

    pub fn with_config(config: PreviewConfig) -> Self {
        Self {
            preview: Preview::new_headless(config),
        }
    }

    /// Build and place a document; see [`Preview::load_str`].
    pub fn load(&mut self, markup: &str) -> Result<WidgetId> {
        self.preview.load_str(markup)
    }

    pub fn press(&mut self, key: Key) {
        self.press_with(key, Modifiers::NONE);
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) {
        self.preview.handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Turn the mouse wheel; negative scrolls up.
    pub fn wheel(&mut self, lines: i32) {
        self.preview.handle_input(InputEvent::Wheel(lines));
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.preview.handle_input(InputEvent::Resize { width, height });
    }

    /// Render a frame and return it as text.
    pub fn snapshot(&mut self) -> String {
        self.preview.render().to_text()
    }

    pub fn is_running(&self) -> bool {
        !self.preview.should_quit()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut Preview {
        &mut self.preview
    }
}
