use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The seven belt ranks, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Belt {
    White,
    Yellow,
    Orange,
    Green,
    Blue,
    Brown,
    Black,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown belt {0}")]
pub struct UnknownBelt(pub String);

impl Belt {
    pub const ALL: [Belt; 7] = [
        Belt::White,
        Belt::Yellow,
        Belt::Orange,
        Belt::Green,
        Belt::Blue,
        Belt::Brown,
        Belt::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Belt::White => "white",
            Belt::Yellow => "yellow",
            Belt::Orange => "orange",
            Belt::Green => "green",
            Belt::Blue => "blue",
            Belt::Brown => "brown",
            Belt::Black => "black",
        }
    }

    /// Display label used in the exported files.
    pub fn arabic_label(&self) -> &'static str {
        match self {
            Belt::White => "أبيض",
            Belt::Yellow => "أصفر",
            Belt::Orange => "برتقالي",
            Belt::Green => "أخضر",
            Belt::Blue => "أزرق",
            Belt::Brown => "بني",
            Belt::Black => "أسود",
        }
    }

    /// Label for a raw belt column value, falling back to the stored string
    /// when it is not one of the known ranks.
    pub fn label_for(code: &str) -> String {
        match Belt::from_str(code) {
            Ok(belt) => belt.arabic_label().to_string(),
            Err(_) => code.to_string(),
        }
    }
}

impl FromStr for Belt {
    type Err = UnknownBelt;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Belt::White),
            "yellow" => Ok(Belt::Yellow),
            "orange" => Ok(Belt::Orange),
            "green" => Ok(Belt::Green),
            "blue" => Ok(Belt::Blue),
            "brown" => Ok(Belt::Brown),
            "black" => Ok(Belt::Black),
            other => Err(UnknownBelt(other.to_string())),
        }
    }
}

impl std::fmt::Display for Belt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
