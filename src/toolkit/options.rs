//! Widget configuration options and their string forms.
//!
//! Option values arrive as strings (markup attributes) and are parsed with
//! `FromStr`. Spellings follow Tk's: `readonly`, `sunken`, `browse`, ...

use std::fmt;
use std::str::FromStr;

/// A string that is not a valid spelling of an option value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got '{got}'")]
pub struct OptionValueError {
    pub expected: &'static str,
    pub got: String,
}

impl OptionValueError {
    pub fn new(expected: &'static str, got: &str) -> Self {
        Self {
            expected,
            got: got.to_owned(),
        }
    }
}

/// Parse a Tk boolean: `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn parse_bool(s: &str) -> Result<bool, OptionValueError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OptionValueError::new("a boolean (1/0, true/false, yes/no, on/off)", s)),
    }
}

/// Declare a plain keyword enum with `FromStr` and `Display`.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $expected:literal {
            $($variant:ident => $word:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = OptionValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($word => Ok(Self::$variant),)+
                    _ => Err(OptionValueError::new($expected, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $word,)+
                })
            }
        }
    };
}

keyword_enum! {
    /// Interactive state of a widget.
    State, "normal, disabled, readonly or active" {
        Normal => "normal",
        Disabled => "disabled",
        Readonly => "readonly",
        Active => "active",
    }
}

keyword_enum! {
    /// Border style of frames.
    Relief, "flat, raised, sunken, groove, ridge or solid" {
        Flat => "flat",
        Raised => "raised",
        Sunken => "sunken",
        Groove => "groove",
        Ridge => "ridge",
        Solid => "solid",
    }
}

keyword_enum! {
    /// Orientation of scrollbars, separators, scales and paned windows.
    Orient, "horizontal or vertical" {
        Horizontal => "horizontal",
        Vertical => "vertical",
    }
}

keyword_enum! {
    /// Selection behavior of lists and trees.
    SelectMode, "browse, extended, single, multiple or none" {
        Browse => "browse",
        Extended => "extended",
        Single => "single",
        Multiple => "multiple",
        None => "none",
    }
}

impl Default for State {
    fn default() -> Self {
        Self::Normal
    }
}

impl Default for Relief {
    fn default() -> Self {
        Self::Flat
    }
}

/// Which parts of a tree view are shown: any of `tree`, `headings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeShow {
    pub tree: bool,
    pub headings: bool,
}

impl Default for TreeShow {
    fn default() -> Self {
        Self {
            tree: true,
            headings: true,
        }
    }
}

impl FromStr for TreeShow {
    type Err = OptionValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut show = TreeShow {
            tree: false,
            headings: false,
        };
        for word in s.split_whitespace() {
            match word {
                "tree" => show.tree = true,
                "headings" => show.headings = true,
                _ => return Err(OptionValueError::new("a list of tree and/or headings", s)),
            }
        }
        Ok(show)
    }
}

impl fmt::Display for TreeShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tree, self.headings) {
            (true, true) => f.write_str("tree headings"),
            (true, false) => f.write_str("tree"),
            (false, true) => f.write_str("headings"),
            (false, false) => Ok(()),
        }
    }
}

/// Configured options of a widget.
///
/// Each widget kind reads the subset that applies to it. Sizes are in cells
/// (characters for width, lines for height).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub text: Option<String>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub state: State,
    pub relief: Relief,
    pub orient: Option<Orient>,
    /// List contents for combobox, option menu, spinbox and listbox.
    pub values: Vec<String>,
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub select_mode: Option<SelectMode>,
    pub show: Option<TreeShow>,
    pub length: Option<u16>,
    pub maximum: Option<f64>,
    pub value: Option<f64>,
}
