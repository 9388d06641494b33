//! Two-state node color.
//!
//! Stored on the wire as `0` (red) or `1` (black).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Color {
    Red,
    Black,
}

/// Color given to freshly inserted nodes unless configured otherwise.
pub const DEFAULT_NEW_NODE_COLOR: Color = Color::Red;

impl Color {
    /// The other color.
    pub fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => 0,
            Color::Black => 1,
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Red),
            1 => Ok(Color::Black),
            other => Err(format!("invalid color {}, expected 0 or 1", other)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Black => "black",
        })
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "0" => Ok(Color::Red),
            "black" | "1" => Ok(Color::Black),
            other => Err(format!("invalid color {}", other)),
        }
    }
}
