//! Die faces and their chat glyphs.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One face of a six-sided die.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum DieFace {
    /// 1
    One,
    /// 2
    Two,
    /// 3
    Three,
    /// 4
    Four,
    /// 5
    Five,
    /// 6
    Six,
}

impl DieFace {
    /// Numeric value, 1-6.
    pub fn value(self) -> u8 {
        match self {
            DieFace::One => 1,
            DieFace::Two => 2,
            DieFace::Three => 3,
            DieFace::Four => 4,
            DieFace::Five => 5,
            DieFace::Six => 6,
        }
    }

    /// Face for a value in 1-6.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(DieFace::One),
            2 => Some(DieFace::Two),
            3 => Some(DieFace::Three),
            4 => Some(DieFace::Four),
            5 => Some(DieFace::Five),
            6 => Some(DieFace::Six),
            _ => None,
        }
    }

    /// Unicode die glyph for this face.
    pub fn glyph(self) -> &'static str {
        match self {
            DieFace::One => "\u{2680}",
            DieFace::Two => "\u{2681}",
            DieFace::Three => "\u{2682}",
            DieFace::Four => "\u{2683}",
            DieFace::Five => "\u{2684}",
            DieFace::Six => "\u{2685}",
        }
    }

    /// Rolls a fair die.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(1..=6u8) {
            1 => DieFace::One,
            2 => DieFace::Two,
            3 => DieFace::Three,
            4 => DieFace::Four,
            5 => DieFace::Five,
            _ => DieFace::Six,
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.glyph(), self.value())
    }
}
