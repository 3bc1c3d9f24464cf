//! Scalar types shared by every variant: colors, board extents, game values,
//! tapered evaluation scores and the small rule enums.

use serde::Serialize;
use std::ops::Not;

// ============================================================================
// Colors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Color {
    White,
    Black,
}

pub const COLOR_NB: usize = 2;

impl Color {
    pub const ALL: [Color; COLOR_NB] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// ============================================================================
// Board extents
// ============================================================================

/// Zero-based file index (`a` = 0).
pub type File = u8;
/// Zero-based rank index (`1` = 0).
pub type Rank = u8;

pub const FILE_A: File = 0;
pub const FILE_B: File = 1;
pub const FILE_C: File = 2;
pub const FILE_D: File = 3;
pub const FILE_E: File = 4;
pub const FILE_F: File = 5;
pub const FILE_G: File = 6;
pub const FILE_H: File = 7;
pub const FILE_I: File = 8;
pub const FILE_J: File = 9;
pub const FILE_K: File = 10;
pub const FILE_L: File = 11;
pub const FILE_NB: usize = 12;
pub const FILE_MAX: File = FILE_L;

pub const RANK_1: Rank = 0;
pub const RANK_2: Rank = 1;
pub const RANK_3: Rank = 2;
pub const RANK_4: Rank = 3;
pub const RANK_5: Rank = 4;
pub const RANK_6: Rank = 5;
pub const RANK_7: Rank = 6;
pub const RANK_8: Rank = 7;
pub const RANK_9: Rank = 8;
pub const RANK_10: Rank = 9;
pub const RANK_NB: usize = 10;
pub const RANK_MAX: Rank = RANK_10;

// ============================================================================
// Game values
// ============================================================================

/// Game-theoretic value from the point of view of the side to move.
pub type Value = i32;

pub const VALUE_ZERO: Value = 0;
pub const VALUE_DRAW: Value = 0;
pub const VALUE_MATE: Value = 32000;

// ============================================================================
// Tapered scores
// ============================================================================

/// Middlegame / endgame pair used by the evaluation weight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

/// Shorthand constructor, mirrors the `S(mg, eg)` notation of the weight tables.
#[inline]
pub const fn s(mg: i32, eg: i32) -> Score {
    Score { mg, eg }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Middlegame,
    Endgame,
}

pub const PHASE_NB: usize = 2;

// ============================================================================
// Rule enums
// ============================================================================

/// Capture-by-enclosure rule (reversi-style flips, ataxx-style drops).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EnclosingRule {
    #[default]
    None,
    Reversi,
    Ataxx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChasingRule {
    #[default]
    None,
    Axf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MaterialCounting {
    #[default]
    None,
    JanggiMaterial,
    UnweightedMaterial,
    WhiteDrawOdds,
    BlackDrawOdds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CountingRule {
    #[default]
    None,
    Makruk,
    Cambodian,
    Asean,
}

impl EnclosingRule {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "reversi" => Some(Self::Reversi),
            "ataxx" => Some(Self::Ataxx),
            _ => None,
        }
    }
}

impl ChasingRule {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "axf" => Some(Self::Axf),
            _ => None,
        }
    }
}

impl MaterialCounting {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "janggi" => Some(Self::JanggiMaterial),
            "unweighted" => Some(Self::UnweightedMaterial),
            "whitedrawodds" => Some(Self::WhiteDrawOdds),
            "blackdrawodds" => Some(Self::BlackDrawOdds),
            _ => None,
        }
    }
}

impl CountingRule {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "makruk" => Some(Self::Makruk),
            "cambodian" => Some(Self::Cambodian),
            "asean" => Some(Self::Asean),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flip() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!!Color::Black, Color::Black);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(CountingRule::from_name("asean"), Some(CountingRule::Asean));
        assert_eq!(MaterialCounting::from_name("janggi"), Some(MaterialCounting::JanggiMaterial));
        assert_eq!(EnclosingRule::from_name("sideways"), None);
    }
}
