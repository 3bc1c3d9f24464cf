use crate::types::Color;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

pub const PIECE_TYPE_BITS: u8 = 6;
pub const PIECE_TYPE_NB: usize = 1 << PIECE_TYPE_BITS;
pub const PIECE_NB: usize = 2 * PIECE_TYPE_NB;
pub const CUSTOM_PIECES_NB: usize = 25;

/// Piece type identifier.
///
/// The numeric value is the stable total order used wherever the active
/// piece set is iterated (NNUE index assignment in particular). Types with a
/// value in `CUSTOM_PIECES..CUSTOM_PIECES + CUSTOM_PIECES_NB` are custom
/// pieces whose movement comes from a Betza string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceType(u8);

impl PieceType {
    pub const NONE: PieceType = PieceType(0);
    /// Wildcard for "any piece type" in extinction and must-drop rules.
    pub const ALL_PIECES: PieceType = PieceType(0);
    pub const PAWN: PieceType = PieceType(1);
    pub const KNIGHT: PieceType = PieceType(2);
    pub const BISHOP: PieceType = PieceType(3);
    pub const ROOK: PieceType = PieceType(4);
    pub const QUEEN: PieceType = PieceType(5);
    pub const FERS: PieceType = PieceType(6);
    pub const MET: PieceType = Self::FERS;
    pub const ALFIL: PieceType = PieceType(7);
    pub const FERS_ALFIL: PieceType = PieceType(8);
    pub const SILVER: PieceType = PieceType(9);
    pub const KHON: PieceType = Self::SILVER;
    pub const AIWOK: PieceType = PieceType(10);
    pub const BERS: PieceType = PieceType(11);
    pub const DRAGON: PieceType = Self::BERS;
    pub const ARCHBISHOP: PieceType = PieceType(12);
    pub const CHANCELLOR: PieceType = PieceType(13);
    pub const AMAZON: PieceType = PieceType(14);
    pub const KNIBIS: PieceType = PieceType(15);
    pub const BISKNI: PieceType = PieceType(16);
    pub const KNIROO: PieceType = PieceType(17);
    pub const ROOKNI: PieceType = PieceType(18);
    pub const SHOGI_PAWN: PieceType = PieceType(19);
    pub const LANCE: PieceType = PieceType(20);
    pub const SHOGI_KNIGHT: PieceType = PieceType(21);
    pub const GOLD: PieceType = PieceType(22);
    pub const DRAGON_HORSE: PieceType = PieceType(23);
    pub const CLOBBER_PIECE: PieceType = PieceType(24);
    pub const BREAKTHROUGH_PIECE: PieceType = PieceType(25);
    pub const IMMOBILE_PIECE: PieceType = PieceType(26);
    pub const CANNON: PieceType = PieceType(27);
    pub const JANGGI_CANNON: PieceType = PieceType(28);
    pub const SOLDIER: PieceType = PieceType(29);
    pub const HORSE: PieceType = PieceType(30);
    pub const ELEPHANT: PieceType = PieceType(31);
    pub const JANGGI_ELEPHANT: PieceType = PieceType(32);
    pub const BANNER: PieceType = PieceType(33);
    pub const WAZIR: PieceType = PieceType(34);
    pub const COMMONER: PieceType = PieceType(35);
    pub const CENTAUR: PieceType = PieceType(36);
    pub const CUSTOM_PIECES: PieceType = PieceType(37);
    pub const KING: PieceType = PieceType(37 + CUSTOM_PIECES_NB as u8);

    /// First non-orthodox type. Everything below is pawn..queen.
    pub const FAIRY_PIECES: PieceType = PieceType(6);

    /// Builds a piece type from its raw value, rejecting out-of-range values.
    #[inline]
    pub const fn from_index(index: usize) -> Option<PieceType> {
        if index < PIECE_TYPE_NB {
            Some(PieceType(index as u8))
        } else {
            None
        }
    }

    /// The `n`-th custom piece type (zero-based).
    #[inline]
    pub const fn custom(n: usize) -> Option<PieceType> {
        if n < CUSTOM_PIECES_NB {
            Some(PieceType(Self::CUSTOM_PIECES.0 + n as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::CUSTOM_PIECES.0 && self.0 < Self::CUSTOM_PIECES.0 + CUSTOM_PIECES_NB as u8
    }

    /// Slot in the custom piece Betza table, if this is a custom type.
    #[inline]
    pub const fn custom_index(self) -> Option<usize> {
        if self.is_custom() {
            Some((self.0 - Self::CUSTOM_PIECES.0) as usize)
        } else {
            None
        }
    }

    /// Canonical configuration name (`shogiKnight`, `customPiece3`, ...).
    pub fn name(self) -> String {
        if let Some(n) = self.custom_index() {
            return format!("customPiece{}", n + 1);
        }
        PIECE_NAMES
            .iter()
            .find(|(_, pt)| *pt == self)
            .map(|(name, _)| (*name).to_string())
            .unwrap_or_else(|| format!("pieceType{}", self.0))
    }

    /// Looks up a piece type by configuration name, including aliases.
    pub fn from_name(name: &str) -> Option<PieceType> {
        PIECE_NAME_LOOKUP.get(name).copied()
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Named piece types, canonical names first so reverse lookup picks them.
static PIECE_NAMES: &[(&str, PieceType)] = &[
    ("pawn", PieceType::PAWN),
    ("knight", PieceType::KNIGHT),
    ("bishop", PieceType::BISHOP),
    ("rook", PieceType::ROOK),
    ("queen", PieceType::QUEEN),
    ("fers", PieceType::FERS),
    ("alfil", PieceType::ALFIL),
    ("fersAlfil", PieceType::FERS_ALFIL),
    ("silver", PieceType::SILVER),
    ("aiwok", PieceType::AIWOK),
    ("bers", PieceType::BERS),
    ("archbishop", PieceType::ARCHBISHOP),
    ("chancellor", PieceType::CHANCELLOR),
    ("amazon", PieceType::AMAZON),
    ("knibis", PieceType::KNIBIS),
    ("biskni", PieceType::BISKNI),
    ("kniroo", PieceType::KNIROO),
    ("rookni", PieceType::ROOKNI),
    ("shogiPawn", PieceType::SHOGI_PAWN),
    ("lance", PieceType::LANCE),
    ("shogiKnight", PieceType::SHOGI_KNIGHT),
    ("gold", PieceType::GOLD),
    ("dragonHorse", PieceType::DRAGON_HORSE),
    ("clobber", PieceType::CLOBBER_PIECE),
    ("breakthrough", PieceType::BREAKTHROUGH_PIECE),
    ("immobile", PieceType::IMMOBILE_PIECE),
    ("cannon", PieceType::CANNON),
    ("janggiCannon", PieceType::JANGGI_CANNON),
    ("soldier", PieceType::SOLDIER),
    ("horse", PieceType::HORSE),
    ("elephant", PieceType::ELEPHANT),
    ("janggiElephant", PieceType::JANGGI_ELEPHANT),
    ("banner", PieceType::BANNER),
    ("wazir", PieceType::WAZIR),
    ("commoner", PieceType::COMMONER),
    ("centaur", PieceType::CENTAUR),
    ("king", PieceType::KING),
    // aliases
    ("met", PieceType::MET),
    ("khon", PieceType::KHON),
    ("dragon", PieceType::DRAGON),
];

static PIECE_NAME_LOOKUP: Lazy<FxHashMap<String, PieceType>> = Lazy::new(|| {
    let mut map: FxHashMap<String, PieceType> = PIECE_NAMES
        .iter()
        .map(|(name, pt)| ((*name).to_string(), *pt))
        .collect();
    for n in 0..CUSTOM_PIECES_NB {
        if let Some(pt) = PieceType::custom(n) {
            map.insert(format!("customPiece{}", n + 1), pt);
        }
    }
    map
});

/// A colored piece: `color << PIECE_TYPE_BITS | piece type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(u8);

impl Piece {
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(((color as u8) << PIECE_TYPE_BITS) | piece_type.0)
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 >> PIECE_TYPE_BITS == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        PieceType(self.0 & (PIECE_TYPE_NB as u8 - 1))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[inline]
pub const fn make_piece(color: Color, piece_type: PieceType) -> Piece {
    Piece::new(color, piece_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_range() {
        assert!(!PieceType::CENTAUR.is_custom());
        assert!(PieceType::CUSTOM_PIECES.is_custom());
        assert_eq!(PieceType::custom(CUSTOM_PIECES_NB - 1).map(|pt| pt.index() + 1), Some(PieceType::KING.index()));
        assert!(!PieceType::KING.is_custom());
        assert!(PieceType::KING.index() < PIECE_TYPE_NB);
        assert_eq!(PieceType::custom(CUSTOM_PIECES_NB), None);
    }

    #[test]
    fn test_piece_packing() {
        let p = make_piece(Color::Black, PieceType::GOLD);
        assert_eq!(p.color(), Color::Black);
        assert_eq!(p.piece_type(), PieceType::GOLD);
        assert!(p.index() < PIECE_NB);
        assert_eq!(make_piece(Color::White, PieceType::KING).index(), PieceType::KING.index());
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(PieceType::from_name("shogiKnight"), Some(PieceType::SHOGI_KNIGHT));
        assert_eq!(PieceType::from_name("dragon"), Some(PieceType::BERS));
        assert_eq!(PieceType::from_name("customPiece3"), PieceType::custom(2));
        assert_eq!(PieceType::BERS.name(), "bers");
        assert_eq!(PieceType::custom(0).map(|pt| pt.name()), Some("customPiece1".to_string()));
        assert_eq!(PieceType::from_name("dragonKing"), None);
    }
}
