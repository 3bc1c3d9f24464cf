//! Variant descriptor.
//!
//! A [`Variant`] is built from a template (or the orthodox defaults), edited
//! through its grouped rule accessors and the piece registry operations, and
//! finally concluded. Once registered it is shared as `Arc<Variant>` and
//! never mutated again.

mod conclude;
pub mod eval_weights;
mod piece_table;
pub mod rules;
pub mod templates;

pub use conclude::Derived;
pub use eval_weights::EvalWeights;
pub use piece_table::{PieceConflict, PieceTables};
pub use rules::*;

use crate::bitboard::Bitboard;
use crate::pieces::{make_piece, Piece, PieceType};
use crate::types::{Color, FILE_MAX, RANK_MAX};
use crate::utils::fen_piece_letters;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    name: String,
    board: BoardRules,
    movement: MovementRules,
    promotion: PromotionRules,
    drops: DropRules,
    castling: CastlingRules,
    gating: GatingRules,
    captures: CaptureRules,
    checks: CheckRules,
    end: EndRules,
    eval: EvalWeights,
    pieces: PieceTables,
    piece_conflicts: Vec<PieceConflict>,
    derived: Derived,
    concluded: bool,
}

impl Default for Variant {
    /// Orthodox chess rules with the `fairy` template name, not yet concluded.
    fn default() -> Self {
        Variant::new("fairy")
    }
}

/// Generates the shared/mutable accessor pair of a rule group.
macro_rules! rule_group {
    ($($field:ident, $field_mut:ident: $ty:ty;)*) => {
        $(
            #[inline]
            pub fn $field(&self) -> &$ty {
                &self.$field
            }

            /// Mutable access; the variant must be concluded again afterwards.
            #[inline]
            pub fn $field_mut(&mut self) -> &mut $ty {
                self.concluded = false;
                &mut self.$field
            }
        )*
    };
}

impl Variant {
    pub fn new(name: &str) -> Self {
        Variant {
            name: name.to_string(),
            board: BoardRules::default(),
            movement: MovementRules::default(),
            promotion: PromotionRules::default(),
            drops: DropRules::default(),
            castling: CastlingRules::default(),
            gating: GatingRules::default(),
            captures: CaptureRules::default(),
            checks: CheckRules::default(),
            end: EndRules::default(),
            eval: EvalWeights::default(),
            pieces: PieceTables::default(),
            piece_conflicts: Vec::new(),
            derived: Derived::default(),
            concluded: false,
        }
    }

    /// Fresh copy of `self` to derive a new variant from, with per-variant state cleared.
    pub fn derive_child(&self, name: &str) -> Variant {
        let mut child = self.clone();
        child.name = name.to_string();
        child.board.nnue_alias.clear();
        child.piece_conflicts.clear();
        child.concluded = false;
        child
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    rule_group! {
        board, board_mut: BoardRules;
        movement, movement_mut: MovementRules;
        promotion, promotion_mut: PromotionRules;
        drops, drops_mut: DropRules;
        castling, castling_mut: CastlingRules;
        gating, gating_mut: GatingRules;
        captures, captures_mut: CaptureRules;
        checks, checks_mut: CheckRules;
        end, end_mut: EndRules;
        eval, eval_mut: EvalWeights;
    }

    // ------------------------------------------------------------------------
    // Piece registry
    // ------------------------------------------------------------------------

    /// Activates `pt` under letter `c`; see [`PieceTables::add`] for collisions.
    pub fn add_piece(&mut self, pt: PieceType, c: char) {
        self.add_piece_full(pt, c, "", ' ');
    }

    pub fn add_piece_with_synonym(&mut self, pt: PieceType, c: char, synonym: char) {
        self.add_piece_full(pt, c, "", synonym);
    }

    /// Activates a custom piece with its Betza movement.
    pub fn add_custom_piece(&mut self, pt: PieceType, c: char, betza: &str) {
        self.add_piece_full(pt, c, betza, ' ');
    }

    pub fn add_piece_full(&mut self, pt: PieceType, c: char, betza: &str, synonym: char) {
        self.concluded = false;
        for conflict in self.pieces.add(pt, c, betza, synonym) {
            tracing::warn!(
                variant = %self.name,
                letter = %conflict.letter,
                evicted = %conflict.evicted,
                incoming = %conflict.incoming,
                "piece letter reassigned"
            );
            self.piece_conflicts.push(conflict);
        }
    }

    pub fn remove_piece(&mut self, pt: PieceType) {
        self.concluded = false;
        self.pieces.remove(pt);
    }

    pub fn reset_pieces(&mut self) {
        self.concluded = false;
        self.pieces.reset();
    }

    #[inline]
    pub fn pieces(&self) -> &PieceTables {
        &self.pieces
    }

    /// Active piece types in ascending type order.
    pub fn piece_types(&self) -> impl ExactSizeIterator<Item = PieceType> + '_ {
        self.pieces.piece_types()
    }

    /// Letter reassignments made by `add_piece*` since this variant was created.
    pub fn piece_conflicts(&self) -> &[PieceConflict] {
        &self.piece_conflicts
    }

    #[inline]
    pub fn piece_to_char(&self, color: Color, pt: PieceType) -> Option<char> {
        self.pieces.piece_to_char(make_piece(color, pt))
    }

    #[inline]
    pub fn piece_from_char(&self, c: char) -> Option<Piece> {
        self.pieces.piece_from_char(c)
    }

    // ------------------------------------------------------------------------
    // Derived data
    // ------------------------------------------------------------------------

    #[inline]
    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Whether the derived block reflects the current configuration.
    #[inline]
    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    /// Consistency problems that a lenient loader tolerates but a strict one rejects.
    pub fn validate(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .piece_conflicts
            .iter()
            .map(|c| format!("letter '{}' of {} taken over by {}", c.letter, c.evicted, c.incoming))
            .collect();
        problems.extend(self.rule_problems());
        problems
    }

    /// [`Variant::validate`] without the recorded piece conflicts.
    pub(crate) fn rule_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let board = &self.board;

        if board.max_file > FILE_MAX || board.max_rank > RANK_MAX {
            problems.push(format!(
                "board of {}x{} exceeds the supported 12x10",
                u32::from(board.max_file) + 1,
                u32::from(board.max_rank) + 1
            ));
        }
        if self.pieces.is_empty() {
            problems.push("no piece types defined".to_string());
        }
        let on_board = Bitboard::board(board.max_file, board.max_rank);
        for pt in self.pieces.piece_types() {
            for color in Color::ALL {
                let region = self.movement.region(color, pt);
                if !region.is_empty() && (region & on_board).is_empty() {
                    problems.push(format!("{color:?} mobility region of {pt} covers no square of the board"));
                }
            }
        }
        for c in fen_piece_letters(&board.start_fen) {
            if !self.pieces.is_piece_char(c) {
                problems.push(format!("start position uses undefined piece letter '{c}'"));
                break;
            }
        }
        if self.pieces.contains(PieceType::PAWN) {
            if let Some(pt) = self.promotion.promotion_piece_types.iter().find(|pt| !self.pieces.contains(**pt)) {
                problems.push(format!("promotion piece type {pt} is not in the piece set"));
            }
        }
        for (idx, promoted) in self.promotion.promoted_piece_type.iter().enumerate() {
            let base = PieceType::from_index(idx).unwrap_or(PieceType::NONE);
            if !promoted.is_none() && self.pieces.contains(base) && !self.pieces.contains(*promoted) {
                problems.push(format!("promoted form {promoted} of {base} is not in the piece set"));
            }
        }
        if let Some(pt) = self.end.extinction_piece_types.iter().find(|pt| !pt.is_none() && !self.pieces.contains(**pt)) {
            problems.push(format!("extinction piece type {pt} is not in the piece set"));
        }
        if let Some(pt) = self.end.flag_piece.filter(|pt| !self.pieces.contains(*pt)) {
            problems.push(format!("flag piece type {pt} is not in the piece set"));
        }
        if self.castling.castling {
            for pt in [self.castling.king_piece, self.castling.rook_piece] {
                if !self.pieces.contains(pt) {
                    problems.push(format!("castling piece type {pt} is not in the piece set"));
                }
            }
        }
        if self.pieces.contains(PieceType::KING)
            && self.movement.king_type != PieceType::KING
            && self.movement.king_type.is_custom()
            && self.pieces.custom_piece_betza(self.movement.king_type).is_empty()
        {
            problems.push(format!("king type {} has no movement", self.movement.king_type));
        }
        problems
    }

    /// Serializable overview of identity and derived values.
    pub fn summary(&self) -> VariantSummary {
        let d = &self.derived;
        VariantSummary {
            name: self.name.clone(),
            template: self.board.variant_template.clone(),
            nnue_alias: self.board.nnue_alias.clone(),
            files: u32::from(self.board.max_file) + 1,
            ranks: u32::from(self.board.max_rank) + 1,
            start_fen: self.board.start_fen.clone(),
            pieces: self
                .pieces
                .piece_types()
                .map(|pt| PieceSummary {
                    name: pt.name(),
                    letter: self.pieces.piece_type_char(pt).unwrap_or(' '),
                    betza: self.pieces.custom_piece_betza(pt).to_string(),
                })
                .collect(),
            fast_attacks: d.fast_attacks,
            fast_attacks2: d.fast_attacks2,
            nnue_king: d.nnue_king.map(|pt| pt.name()),
            nnue_use_pockets: d.nnue_use_pockets,
            nnue_king_buckets: d.nnue_king_buckets,
            nnue_dimensions: d.nnue_dimensions,
            nnue_max_pieces: d.nnue_max_pieces,
            endgame_eval: d.endgame_eval,
            shogi_style_promotions: d.shogi_style_promotions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSummary {
    pub name: String,
    pub letter: char,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub betza: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    pub name: String,
    pub template: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nnue_alias: String,
    pub files: u32,
    pub ranks: u32,
    pub start_fen: String,
    pub pieces: Vec<PieceSummary>,
    pub fast_attacks: bool,
    pub fast_attacks2: bool,
    pub nnue_king: Option<String>,
    pub nnue_use_pockets: bool,
    pub nnue_king_buckets: u32,
    pub nnue_dimensions: u32,
    pub nnue_max_pieces: u32,
    pub endgame_eval: bool,
    pub shogi_style_promotions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_invalidates_conclusion() {
        let mut v = Variant::default();
        assert!(!v.is_concluded());
        v.conclude();
        assert!(v.is_concluded());
        let _ = v.board();
        assert!(v.is_concluded());
        v.drops_mut().piece_drops = true;
        assert!(!v.is_concluded());
        v.conclude();
        v.add_piece(PieceType::AMAZON, 'a');
        assert!(!v.is_concluded());
    }

    #[test]
    fn test_validate_default_is_clean() {
        assert!(Variant::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_conflicts_and_unknown_letters() {
        let mut v = Variant::default();
        v.add_piece(PieceType::CANNON, 'n');
        let problems = v.validate();
        assert!(problems.iter().any(|p| p.contains("letter 'n'")));
        assert!(problems.iter().any(|p| p.contains("promotion piece type knight")));

        let mut v = Variant::default();
        v.board_mut().start_fen = "8/8/8/8/8/8/8/KZ5k w - - 0 1".to_string();
        assert!(v.validate().iter().any(|p| p.contains("'Z'")));
    }

    #[test]
    fn test_validate_reports_off_board_region() {
        let mut v = Variant::default();
        v.movement_mut().mobility_region[Color::White.index()][PieceType::KING.index()] =
            Bitboard::parse_region("l10").unwrap();
        let problems = v.validate();
        assert_eq!(problems.len(), 1, "{problems:?}");
        assert!(problems[0].contains("mobility region of king"));

        v.movement_mut().mobility_region[Color::White.index()][PieceType::KING.index()] =
            Bitboard::parse_region("e1 l10").unwrap();
        assert!(v.validate().is_empty());
    }

    #[test]
    fn test_derive_child_clears_alias() {
        let mut parent = Variant::new("parent");
        parent.board_mut().nnue_alias = "chess".to_string();
        parent.conclude();
        let child = parent.derive_child("child");
        assert_eq!(child.name(), "child");
        assert!(child.board().nnue_alias.is_empty());
        assert!(!child.is_concluded());
        assert_eq!(child.piece_types().len(), 6);
    }
}
