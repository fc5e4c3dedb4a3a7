//! Strip: a horizontal run of styled cells.
//!
//! Widget painters produce strips; the compositor clips them into the
//! screen buffer.

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Attributes of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        bold: false,
        dim: false,
        underline: false,
        reverse: false,
    };

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn underline(self) -> Self {
        Self { underline: true, ..self }
    }

    pub fn reverse(self) -> Self {
        Self { reverse: true, ..self }
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// One character and its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    pub fn blank() -> Self {
        Self::new(' ', CellStyle::PLAIN)
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// Cells on row `y`, starting at column `x_offset` (absolute screen
/// coordinates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// A strip holding `text` in one style.
    pub fn text(x: i32, y: i32, text: &str, style: CellStyle) -> Self {
        let mut strip = Self::new(y, x);
        strip.push_str(text, style);
        strip
    }

    /// `ch` repeated `count` times.
    pub fn repeat(x: i32, y: i32, ch: char, count: i32, style: CellStyle) -> Self {
        let mut strip = Self::new(y, x);
        for _ in 0..count.max(0) {
            strip.push(ch, style);
        }
        strip
    }

    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        self.cells.extend(text.chars().map(|ch| StyledCell::new(ch, style)));
    }

    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Column just past the last cell.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Pad with blanks, or truncate, to exactly `width` cells.
    pub fn fit(mut self, width: i32, pad: char, style: CellStyle) -> Self {
        let width = width.max(0) as usize;
        self.cells.resize(width, StyledCell::new(pad, style));
        self
    }

    /// The characters of the strip, without styles.
    pub fn plain_text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}
