//! Geometry-manager options: grid and pack.
//!
//! `GridOptions` / `PackOptions` are what a caller asks for (every field
//! optional). The tree resolves them against its defaults into
//! `GridInfo` / `PackInfo`, which is what a placed widget records.

use std::fmt;
use std::str::FromStr;

use super::options::OptionValueError;

// ---------------------------------------------------------------------------
// Sticky
// ---------------------------------------------------------------------------

/// Which cell edges a gridded widget sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sticky {
    pub n: bool,
    pub e: bool,
    pub s: bool,
    pub w: bool,
}

impl Sticky {
    pub const NONE: Sticky = Sticky { n: false, e: false, s: false, w: false };
    pub const ALL: Sticky = Sticky { n: true, e: true, s: true, w: true };
}

impl FromStr for Sticky {
    type Err = OptionValueError;

    /// Accepts any combination of `n`, `s`, `e`, `w`, optionally separated
    /// by commas or spaces (`"nsew"`, `"n, s"`, `"we"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sticky = Sticky::NONE;
        for ch in s.chars() {
            match ch.to_ascii_lowercase() {
                'n' => sticky.n = true,
                'e' => sticky.e = true,
                's' => sticky.s = true,
                'w' => sticky.w = true,
                ',' | ' ' => {}
                _ => return Err(OptionValueError::new("a combination of n, s, e, w", s)),
            }
        }
        Ok(sticky)
    }
}

impl fmt::Display for Sticky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, ch) in [(self.n, 'n'), (self.e, 'e'), (self.s, 's'), (self.w, 'w')] {
            if on {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pad
// ---------------------------------------------------------------------------

/// External padding along one axis: `before` (left/top) and `after`
/// (right/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pad {
    pub before: u16,
    pub after: u16,
}

impl Pad {
    pub const fn uniform(amount: u16) -> Self {
        Self {
            before: amount,
            after: amount,
        }
    }
}

impl FromStr for Pad {
    type Err = OptionValueError;

    /// `"3"` pads both sides by 3; `"1 4"` pads 1 before and 4 after.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OptionValueError::new("one or two non-negative integers", s);
        let parts: Vec<u16> = s
            .split_whitespace()
            .map(|p| p.parse::<u16>().map_err(|_| err()))
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [amount] => Ok(Pad::uniform(*amount)),
            [before, after] => Ok(Pad {
                before: *before,
                after: *after,
            }),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.before == self.after {
            write!(f, "{}", self.before)
        } else {
            write!(f, "{} {}", self.before, self.after)
        }
    }
}

// ---------------------------------------------------------------------------
// Side / Fill
// ---------------------------------------------------------------------------

/// Edge of the master's remaining space a packed widget is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Whether widgets packed on this side stack horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl FromStr for Side {
    type Err = OptionValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(OptionValueError::new("top, bottom, left or right", s)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// Directions a packed widget grows to fill its parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    #[default]
    None,
    X,
    Y,
    Both,
}

impl Fill {
    pub fn fills_x(self) -> bool {
        matches!(self, Fill::X | Fill::Both)
    }

    pub fn fills_y(self) -> bool {
        matches!(self, Fill::Y | Fill::Both)
    }
}

impl FromStr for Fill {
    type Err = OptionValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Fill::None),
            "x" => Ok(Fill::X),
            "y" => Ok(Fill::Y),
            "both" => Ok(Fill::Both),
            _ => Err(OptionValueError::new("none, x, y or both", s)),
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fill::None => "none",
            Fill::X => "x",
            Fill::Y => "y",
            Fill::Both => "both",
        })
    }
}

// ---------------------------------------------------------------------------
// Requested options
// ---------------------------------------------------------------------------

/// Cells a grid axis can hold. Layout numbers grid lines as `i16`, and a
/// widget's end line (one past its last cell) must stay within that range.
pub const MAX_GRID_CELLS: u16 = i16::MAX as u16 - 1;

/// Whether a widget starting at `start` and spanning `span` cells ends
/// within [`MAX_GRID_CELLS`].
pub fn fits_grid(start: u16, span: u16) -> bool {
    u32::from(start) + u32::from(span) <= u32::from(MAX_GRID_CELLS)
}

/// Grid placement request. Unset fields take the manager's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridOptions {
    pub row: Option<u16>,
    pub column: Option<u16>,
    pub sticky: Option<Sticky>,
    pub rowspan: Option<u16>,
    pub columnspan: Option<u16>,
    pub padx: Option<Pad>,
    pub pady: Option<Pad>,
}

/// Pack placement request. Unset fields take the manager's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackOptions {
    pub side: Option<Side>,
    pub fill: Option<Fill>,
    pub expand: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved info
// ---------------------------------------------------------------------------

/// Where a gridded widget sits in its master's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridInfo {
    pub row: u16,
    pub column: u16,
    pub rowspan: u16,
    pub columnspan: u16,
    pub sticky: Sticky,
    pub padx: Pad,
    pub pady: Pad,
}

/// How a packed widget sits in its master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackInfo {
    pub side: Side,
    pub fill: Fill,
    pub expand: bool,
}

/// The geometry manager responsible for a widget, with its placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manager {
    Grid(GridInfo),
    Pack(PackInfo),
}

impl Manager {
    pub fn name(&self) -> &'static str {
        match self {
            Manager::Grid(_) => "grid",
            Manager::Pack(_) => "pack",
        }
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Manager::Grid(g) => {
                write!(f, "grid row={} column={}", g.row, g.column)?;
                if g.rowspan > 1 {
                    write!(f, " rowspan={}", g.rowspan)?;
                }
                if g.columnspan > 1 {
                    write!(f, " columnspan={}", g.columnspan)?;
                }
                if g.sticky != Sticky::NONE {
                    write!(f, " sticky={}", g.sticky)?;
                }
                if g.padx != Pad::default() {
                    write!(f, " padx={}", g.padx)?;
                }
                if g.pady != Pad::default() {
                    write!(f, " pady={}", g.pady)?;
                }
                Ok(())
            }
            Manager::Pack(p) => {
                write!(f, "pack side={}", p.side)?;
                if p.fill != Fill::None {
                    write!(f, " fill={}", p.fill)?;
                }
                if p.expand {
                    f.write_str(" expand")?;
                }
                Ok(())
            }
        }
    }
}
