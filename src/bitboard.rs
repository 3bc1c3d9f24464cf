//! Minimal board primitives for the configuration core.
//!
//! Squares are laid out rank-major on a fixed 12x10 grid regardless of the
//! variant's real extent, so a region is always a 128-bit set. Only what the
//! rule declarations need lives here: square arithmetic, region sets and the
//! region syntax used in variant definitions.

use crate::types::{Color, File, Rank, FILE_MAX, FILE_NB, RANK_MAX, RANK_NB};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

pub const SQUARE_NB: usize = FILE_NB * RANK_NB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);

    /// Square for a file/rank pair, `None` if outside the 12x10 grid.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Option<Square> {
        if file <= FILE_MAX && rank <= RANK_MAX {
            Some(Square(rank * FILE_NB as u8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> File {
        self.0 % FILE_NB as u8
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.0 / FILE_NB as u8
    }

    /// The square as seen from `color`'s side of a board whose last rank is `max_rank`.
    #[inline]
    pub fn relative(self, color: Color, max_rank: Rank) -> Option<Square> {
        match color {
            Color::White => Some(self),
            Color::Black => max_rank.checked_sub(self.rank()).and_then(|r| Square::new(self.file(), r)),
        }
    }

    /// Parses algebraic notation such as `e4` or `c10`.
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = parse_file(chars.next()?)?;
        let rank = parse_rank(chars.as_str())?;
        Square::new(file, rank)
    }
}

/// `a`..`l` to a zero-based file.
#[inline]
pub fn parse_file(c: char) -> Option<File> {
    let c = c.to_ascii_lowercase();
    if ('a'..='l').contains(&c) {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

/// `1`..`10` to a zero-based rank.
#[inline]
pub fn parse_rank(s: &str) -> Option<Rank> {
    match s.parse::<u8>() {
        Ok(r) if (1..=RANK_NB as u8).contains(&r) => Some(r - 1),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u128);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard((1u128 << SQUARE_NB) - 1);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1u128 << sq.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u128 << sq.0) != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn file(file: File) -> Bitboard {
        (0..RANK_NB as u8)
            .filter_map(|r| Square::new(file, r))
            .fold(Bitboard::EMPTY, |bb, sq| bb | sq)
    }

    pub fn rank(rank: Rank) -> Bitboard {
        (0..FILE_NB as u8)
            .filter_map(|f| Square::new(f, rank))
            .fold(Bitboard::EMPTY, |bb, sq| bb | sq)
    }

    /// All squares of a board with the given extent.
    pub fn board(max_file: File, max_rank: Rank) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for r in 0..=max_rank.min(RANK_MAX) {
            for f in 0..=max_file.min(FILE_MAX) {
                if let Some(sq) = Square::new(f, r) {
                    bb |= sq;
                }
            }
        }
        bb
    }

    /// Parses a whitespace separated region: `d1 e1 f1`, `*8` (whole rank),
    /// `c*` (whole file) or `*` (everything). Returns `None` on any bad token.
    pub fn parse_region(s: &str) -> Option<Bitboard> {
        let mut bb = Bitboard::EMPTY;
        for token in s.split_whitespace() {
            let mut chars = token.chars();
            let head = chars.next()?;
            let tail = chars.as_str();
            bb |= match (head, tail) {
                ('*', "") | ('*', "*") => Bitboard::ALL,
                ('*', rank) => Bitboard::rank(parse_rank(rank)?),
                (file, "*") => Bitboard::file(parse_file(file)?),
                _ => Bitboard::from_square(Square::parse(token)?),
            };
        }
        Some(bb)
    }

    pub fn squares(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Square(idx))
        })
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOr<Square> for Bitboard {
    type Output = Bitboard;
    fn bitor(self, rhs: Square) -> Bitboard {
        self | Bitboard::from_square(rhs)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Square> for Bitboard {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= 1u128 << rhs.0;
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & Bitboard::ALL.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FILE_E, FILE_H, RANK_1, RANK_8};

    #[test]
    fn test_square_parse() {
        assert_eq!(Square::parse("a1"), Some(Square::A1));
        assert_eq!(Square::parse("e1"), Square::new(FILE_E, RANK_1));
        assert_eq!(Square::parse("l10").map(|s| s.index()), Some(SQUARE_NB - 1));
        assert_eq!(Square::parse("m1"), None);
        assert_eq!(Square::parse("a11"), None);
        assert_eq!(Square::parse("a0"), None);
    }

    #[test]
    fn test_relative_square() {
        let e1 = Square::parse("e1").unwrap();
        assert_eq!(e1.relative(Color::Black, RANK_8), Square::parse("e8"));
        assert_eq!(e1.relative(Color::White, RANK_8), Some(e1));
    }

    #[test]
    fn test_region_parse() {
        let palace = Bitboard::parse_region("d1 e1 f1 d2 e2 f2 d3 e3 f3").unwrap();
        assert_eq!(palace.count(), 9);
        assert_eq!(Bitboard::parse_region("*8").unwrap(), Bitboard::rank(RANK_8));
        assert_eq!(Bitboard::parse_region("h*").unwrap(), Bitboard::file(FILE_H));
        assert_eq!(Bitboard::parse_region("*").unwrap(), Bitboard::ALL);
        assert_eq!(Bitboard::parse_region("").unwrap(), Bitboard::EMPTY);
        assert!(Bitboard::parse_region("d1 zz").is_none());
    }

    #[test]
    fn test_board_mask() {
        assert_eq!(Bitboard::board(FILE_H, RANK_8).count(), 64);
        assert_eq!(Bitboard::board(FILE_MAX, RANK_MAX), Bitboard::ALL);
        assert_eq!((!Bitboard::EMPTY).count() as usize, SQUARE_NB);
        assert_eq!(Bitboard::rank(RANK_1).squares().count(), FILE_NB);
    }
}
