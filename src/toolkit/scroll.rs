//! Scroll views and scrollbars.
//!
//! `ScrollState` tracks how much of a widget's content is visible. A linked
//! scrollbar learns the visible span as a `(first, last)` pair of fractions
//! through [`ScrollbarState`], and drives the view back with
//! [`ViewCommand`]s.

use crate::geometry::{Offset, Size};

/// A scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A request to move a view, in the shape of Tk's `xview`/`yview`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Put the given fraction of the content at the leading edge.
    MoveTo(f32),
    /// Scroll by a number of lines or characters.
    Units(i32),
    /// Scroll by a number of screenfuls.
    Pages(i32),
}

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Scroll position of a widget's view over its content.
///
/// The offset is always clamped to `[0, content - viewport]` on each axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: Offset,
    pub content_size: Size,
    pub viewport_size: Size,
}

impl ScrollState {
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            offset: Offset::ZERO,
            content_size,
            viewport_size,
        }
    }

    fn extent(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::X => (self.content_size.width, self.viewport_size.width),
            Axis::Y => (self.content_size.height, self.viewport_size.height),
        }
    }

    /// Largest valid offset on `axis`.
    pub fn max_scroll(&self, axis: Axis) -> i32 {
        let (content, viewport) = self.extent(axis);
        (content - viewport).max(0)
    }

    fn set_axis_offset(&mut self, axis: Axis, value: i32) {
        let clamped = value.clamp(0, self.max_scroll(axis));
        match axis {
            Axis::X => self.offset.x = clamped,
            Axis::Y => self.offset.y = clamped,
        }
    }

    fn axis_offset(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.offset.x,
            Axis::Y => self.offset.y,
        }
    }

    /// Apply a view command on one axis.
    pub fn apply(&mut self, axis: Axis, command: ViewCommand) {
        let (content, viewport) = self.extent(axis);
        let current = self.axis_offset(axis);
        let target = match command {
            ViewCommand::MoveTo(fraction) => (fraction.clamp(0.0, 1.0) * content as f32).round() as i32,
            ViewCommand::Units(n) => current + n,
            ViewCommand::Pages(n) => current + n * viewport.max(1),
        };
        self.set_axis_offset(axis, target);
    }

    /// Visible span on `axis` as fractions of the content.
    ///
    /// Empty content, or content that fits, reads as `(0.0, 1.0)`.
    pub fn fractions(&self, axis: Axis) -> (f32, f32) {
        let (content, viewport) = self.extent(axis);
        if content <= 0 || content <= viewport {
            return (0.0, 1.0);
        }
        let offset = self.axis_offset(axis);
        let first = offset as f32 / content as f32;
        let last = ((offset + viewport) as f32 / content as f32).min(1.0);
        (first, last)
    }

    /// Update the content size and re-clamp.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.reclamp();
    }

    /// Update the viewport size and re-clamp.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
        self.reclamp();
    }

    fn reclamp(&mut self) {
        self.set_axis_offset(Axis::X, self.offset.x);
        self.set_axis_offset(Axis::Y, self.offset.y);
    }
}

// ---------------------------------------------------------------------------
// ScrollbarState
// ---------------------------------------------------------------------------

/// What a scrollbar shows: the visible span of its view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarState {
    pub first: f32,
    pub last: f32,
}

impl Default for ScrollbarState {
    fn default() -> Self {
        Self {
            first: 0.0,
            last: 1.0,
        }
    }
}

impl ScrollbarState {
    /// Thumb start and length in cells for a trough of `track` cells.
    pub fn thumb(&self, track: i32) -> (i32, i32) {
        if track <= 0 {
            return (0, 0);
        }
        let start = (self.first * track as f32).floor() as i32;
        let end = (self.last * track as f32).ceil() as i32;
        let len = (end - start).max(1);
        (start.min(track - 1), len.min(track))
    }
}
