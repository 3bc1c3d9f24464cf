//! Piece registry: the active piece set and its character tables.
//!
//! Four tables describe how a piece type is written: the rule-notation
//! letter (lower case, per type), the board letter per colored piece, an
//! optional synonym letter per colored piece and the score-display letter.
//! They are only touched through `add`, `remove` and `reset`, which keep
//! them in step with the active set.

use crate::pieces::{make_piece, Piece, PieceType, CUSTOM_PIECES_NB, PIECE_NB, PIECE_TYPE_NB};
use crate::types::Color;
use std::collections::BTreeSet;

const BLANK: u8 = b' ';

/// A piece type that lost its letter to a later `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceConflict {
    pub letter: char,
    pub evicted: PieceType,
    pub incoming: PieceType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceTables {
    piece_types: BTreeSet<PieceType>,
    piece_type_to_char: [u8; PIECE_TYPE_NB],
    score_to_char: [u8; PIECE_TYPE_NB],
    piece_to_char: [u8; PIECE_NB],
    piece_to_char_synonyms: [u8; PIECE_NB],
    custom_piece: [String; CUSTOM_PIECES_NB],
}

impl Default for PieceTables {
    /// Orthodox chess pieces.
    fn default() -> Self {
        let mut tables = PieceTables::empty();
        for (pt, c) in [
            (PieceType::PAWN, 'p'),
            (PieceType::KNIGHT, 'n'),
            (PieceType::BISHOP, 'b'),
            (PieceType::ROOK, 'r'),
            (PieceType::QUEEN, 'q'),
            (PieceType::KING, 'k'),
        ] {
            tables.add(pt, c, "", ' ');
        }
        tables
    }
}

impl PieceTables {
    pub fn empty() -> Self {
        PieceTables {
            piece_types: BTreeSet::new(),
            piece_type_to_char: [BLANK; PIECE_TYPE_NB],
            score_to_char: [BLANK; PIECE_TYPE_NB],
            piece_to_char: [BLANK; PIECE_NB],
            piece_to_char_synonyms: [BLANK; PIECE_NB],
            custom_piece: std::array::from_fn(|_| String::new()),
        }
    }

    /// Registers `pt` under letter `c` (and optional synonym `c2`, `' '` = none).
    ///
    /// Letters are unique across active types: an active type already using
    /// `c` as its letter is removed first, and a synonym already in use is
    /// dropped. Returns the conflicts that were resolved this way.
    pub fn add(&mut self, pt: PieceType, c: char, betza: &str, c2: char) -> Vec<PieceConflict> {
        let mut conflicts = Vec::new();
        if pt.is_none() || pt.index() >= PIECE_TYPE_NB || !c.is_ascii_graphic() {
            return conflicts;
        }
        let lower = c.to_ascii_lowercase() as u8;

        // Re-adding a type replaces its previous letters.
        self.remove(pt);

        if let Some(holder) = self.owner_of(lower) {
            conflicts.push(PieceConflict { letter: lower as char, evicted: holder, incoming: pt });
            self.remove(holder);
        }

        // Another type may use the new letter as its synonym.
        for other in self.piece_types.iter().copied().collect::<Vec<_>>() {
            if self.synonym_lower(other) == Some(lower) {
                self.set_synonym(other, BLANK);
            }
        }

        let synonym = if c2.is_ascii_graphic() {
            let syn = c2.to_ascii_lowercase() as u8;
            if syn == lower || self.owner_of(syn).is_some() || self.synonym_owner_of(syn).is_some() {
                BLANK
            } else {
                syn
            }
        } else {
            BLANK
        };

        self.piece_type_to_char[pt.index()] = lower;
        self.score_to_char[pt.index()] = lower;
        self.piece_to_char[make_piece(Color::White, pt).index()] = lower.to_ascii_uppercase();
        self.piece_to_char[make_piece(Color::Black, pt).index()] = lower;
        self.set_synonym(pt, synonym);
        self.piece_types.insert(pt);

        if let Some(slot) = pt.custom_index() {
            self.custom_piece[slot] = betza.to_string();
        }
        conflicts
    }

    /// Inverse of [`add`](Self::add). Removing an inactive type is a no-op.
    pub fn remove(&mut self, pt: PieceType) {
        if pt.index() >= PIECE_TYPE_NB {
            return;
        }
        self.piece_type_to_char[pt.index()] = BLANK;
        self.score_to_char[pt.index()] = BLANK;
        for color in Color::ALL {
            let pc = make_piece(color, pt).index();
            self.piece_to_char[pc] = BLANK;
            self.piece_to_char_synonyms[pc] = BLANK;
        }
        if let Some(slot) = pt.custom_index() {
            self.custom_piece[slot].clear();
        }
        self.piece_types.remove(&pt);
    }

    pub fn reset(&mut self) {
        *self = PieceTables::empty();
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Active piece types in ascending type order.
    pub fn piece_types(&self) -> impl ExactSizeIterator<Item = PieceType> + '_ {
        self.piece_types.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.piece_types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece_types.is_empty()
    }

    #[inline]
    pub fn contains(&self, pt: PieceType) -> bool {
        self.piece_types.contains(&pt)
    }

    /// Board letter of a colored piece, `None` when blank.
    #[inline]
    pub fn piece_to_char(&self, pc: Piece) -> Option<char> {
        non_blank(self.piece_to_char[pc.index()])
    }

    #[inline]
    pub fn synonym_char(&self, pc: Piece) -> Option<char> {
        non_blank(self.piece_to_char_synonyms[pc.index()])
    }

    /// Lower-case rule-notation letter of a piece type.
    #[inline]
    pub fn piece_type_char(&self, pt: PieceType) -> Option<char> {
        self.piece_type_to_char.get(pt.index()).copied().and_then(non_blank)
    }

    #[inline]
    pub fn score_char(&self, pt: PieceType) -> Option<char> {
        self.score_to_char.get(pt.index()).copied().and_then(non_blank)
    }

    /// Betza movement of a custom piece type, empty for built-in types.
    pub fn custom_piece_betza(&self, pt: PieceType) -> &str {
        pt.custom_index().map(|slot| self.custom_piece[slot].as_str()).unwrap_or("")
    }

    /// Colored piece written as `c` on the board, primary letters first.
    pub fn piece_from_char(&self, c: char) -> Option<Piece> {
        if !c.is_ascii_graphic() {
            return None;
        }
        let b = c as u8;
        let find = |table: &[u8; PIECE_NB]| {
            self.piece_types.iter().find_map(|&pt| {
                Color::ALL
                    .into_iter()
                    .map(|color| make_piece(color, pt))
                    .find(|pc| table[pc.index()] == b)
            })
        };
        find(&self.piece_to_char).or_else(|| find(&self.piece_to_char_synonyms))
    }

    /// Piece type denoted by `c` in either case, via letter or synonym.
    pub fn piece_type_from_char(&self, c: char) -> Option<PieceType> {
        if !c.is_ascii_graphic() {
            return None;
        }
        let lower = c.to_ascii_lowercase() as u8;
        self.owner_of(lower).or_else(|| self.synonym_owner_of(lower))
    }

    /// Whether `c` is a board letter or synonym of any active colored piece.
    pub fn is_piece_char(&self, c: char) -> bool {
        c != BLANK as char && c.is_ascii() && {
            let b = c as u8;
            self.piece_to_char.contains(&b) || self.piece_to_char_synonyms.contains(&b)
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn owner_of(&self, lower: u8) -> Option<PieceType> {
        self.piece_types
            .iter()
            .copied()
            .find(|pt| self.piece_type_to_char[pt.index()] == lower)
    }

    fn synonym_owner_of(&self, lower: u8) -> Option<PieceType> {
        self.piece_types
            .iter()
            .copied()
            .find(|&pt| self.synonym_lower(pt) == Some(lower))
    }

    fn synonym_lower(&self, pt: PieceType) -> Option<u8> {
        let c = self.piece_to_char_synonyms[make_piece(Color::Black, pt).index()];
        (c != BLANK).then_some(c)
    }

    fn set_synonym(&mut self, pt: PieceType, lower: u8) {
        self.piece_to_char_synonyms[make_piece(Color::White, pt).index()] = lower.to_ascii_uppercase();
        self.piece_to_char_synonyms[make_piece(Color::Black, pt).index()] = lower;
    }
}

#[inline]
fn non_blank(c: u8) -> Option<char> {
    (c != BLANK).then_some(c as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(t: &PieceTables) {
        for idx in 1..PIECE_TYPE_NB {
            let pt = PieceType::from_index(idx).unwrap();
            let active = t.contains(pt);
            assert_eq!(t.piece_type_char(pt).is_some(), active, "{pt}");
            assert_eq!(t.score_char(pt).is_some(), active, "{pt}");
            for color in Color::ALL {
                assert_eq!(t.piece_to_char(make_piece(color, pt)).is_some(), active, "{pt}");
            }
        }
    }

    #[test]
    fn test_default_is_orthodox() {
        let t = PieceTables::default();
        assert_eq!(t.len(), 6);
        assert_eq!(t.piece_to_char(make_piece(Color::White, PieceType::KNIGHT)), Some('N'));
        assert_eq!(t.piece_to_char(make_piece(Color::Black, PieceType::KING)), Some('k'));
        assert_eq!(t.piece_from_char('Q'), Some(make_piece(Color::White, PieceType::QUEEN)));
        assert_consistent(&t);
    }

    #[test]
    fn test_add_remove_reset_round_trip() {
        let mut t = PieceTables::empty();
        t.add(PieceType::ARCHBISHOP, 'A', "", 'h');
        assert_eq!(t.piece_type_char(PieceType::ARCHBISHOP), Some('a'));
        assert_eq!(t.synonym_char(make_piece(Color::White, PieceType::ARCHBISHOP)), Some('H'));
        t.remove(PieceType::ARCHBISHOP);
        t.reset();
        assert!(t.is_empty());
        assert_eq!(t, PieceTables::empty());
    }

    #[test]
    fn test_remove_inactive_is_noop() {
        let mut t = PieceTables::default();
        let before = t.clone();
        t.remove(PieceType::CANNON);
        assert_eq!(t, before);
    }

    #[test]
    fn test_custom_betza() {
        let mut t = PieceTables::default();
        let pt = PieceType::custom(0).unwrap();
        t.add(pt, 'a', "mNcK", ' ');
        assert_eq!(t.custom_piece_betza(pt), "mNcK");
        assert_eq!(t.custom_piece_betza(PieceType::KNIGHT), "");
        t.remove(pt);
        assert_eq!(t.custom_piece_betza(pt), "");
    }

    #[test]
    fn test_letter_collision_evicts_previous_owner() {
        let mut t = PieceTables::default();
        let conflicts = t.add(PieceType::COMMONER, 'k', "", ' ');
        assert_eq!(
            conflicts,
            vec![PieceConflict { letter: 'k', evicted: PieceType::KING, incoming: PieceType::COMMONER }]
        );
        assert!(!t.contains(PieceType::KING));
        assert_eq!(t.piece_type_from_char('K'), Some(PieceType::COMMONER));
        assert_consistent(&t);
    }

    #[test]
    fn test_synonym_collision_is_dropped() {
        let mut t = PieceTables::default();
        t.add(PieceType::GOLD, 'g', "", 'n');
        assert_eq!(t.synonym_char(make_piece(Color::Black, PieceType::GOLD)), None);
        t.add(PieceType::SILVER, 's', "", 'v');
        t.add(PieceType::WAZIR, 'v', "", ' ');
        assert_eq!(t.synonym_char(make_piece(Color::Black, PieceType::SILVER)), None);
        assert_eq!(t.piece_type_from_char('v'), Some(PieceType::WAZIR));
        assert_consistent(&t);
    }
}
