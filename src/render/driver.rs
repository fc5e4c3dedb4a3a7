//! Crossterm terminal backend.
//!
//! The `Driver` owns a buffered stdout writer. It enters and leaves the
//! alternate screen and writes compositor diffs; styles map to SGR
//! attributes.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::geometry::Size;

use super::compositor::CellUpdate;
use super::strip::CellStyle;

/// Terminal output through crossterm.
///
/// Creating a driver does not touch the terminal; call
/// [`enter`](Driver::enter) first and [`leave`](Driver::leave) when done.
pub struct Driver {
    writer: BufWriter<Stdout>,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
        }
    }

    /// Enable raw mode and mouse reporting, switch to the alternate screen
    /// and hide the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    /// Undo [`enter`](Driver::enter).
    pub fn leave(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Queue the changed cells. Call [`flush`](Driver::flush) to send them.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        let mut current = CellStyle::PLAIN;
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            if update.cell.style != current {
                self.queue_style(update.cell.style)?;
                current = update.cell.style;
            }
            queue!(self.writer, Print(update.cell.ch))?;
        }
        if current != CellStyle::PLAIN {
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    /// Clear the whole screen, e.g. after a resize or window switch.
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Terminal size in cells.
    pub fn terminal_size() -> io::Result<Size> {
        let (width, height) = terminal::size()?;
        Ok(Size::new(i32::from(width), i32::from(height)))
    }

    fn queue_style(&mut self, style: CellStyle) -> io::Result<()> {
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if style.underline {
            queue!(self.writer, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
