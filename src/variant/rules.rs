//! Rule groups of a variant descriptor.
//!
//! Each group is plain data with the defaults of orthodox chess. They are
//! edited through the grouped accessors on [`Variant`](super::Variant) and
//! frozen once the variant is concluded and registered.

use crate::bitboard::Bitboard;
use crate::pieces::{PieceType, PIECE_TYPE_NB};
use crate::types::*;
use arrayvec::ArrayVec;
use std::collections::BTreeSet;

/// Board identity and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRules {
    /// Name of the template the variant is built on (reported by the front-end).
    pub variant_template: String,
    /// Piece-image table for GUIs, `-` when unused.
    pub piece_to_char_table: String,
    /// Network file alias, lets related variants share one NNUE.
    pub nnue_alias: String,
    pub max_rank: Rank,
    pub max_file: File,
    pub chess960: bool,
    pub two_boards: bool,
    /// Displayed pocket slots per side, 0 = derive from the piece set.
    pub pocket_size: u32,
    pub start_fen: String,
}

impl Default for BoardRules {
    fn default() -> Self {
        BoardRules {
            variant_template: "fairy".to_string(),
            piece_to_char_table: "-".to_string(),
            nnue_alias: String::new(),
            max_rank: RANK_8,
            max_file: FILE_H,
            chess960: false,
            two_boards: false,
            pocket_size: 0,
            start_fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
        }
    }
}

/// Movement restrictions and movement-related special rules.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRules {
    /// Squares a piece type may stand on, per color. Empty = unrestricted.
    pub mobility_region: [[Bitboard; PIECE_TYPE_NB]; COLOR_NB],
    /// Movement of the king piece; anything but `KING` makes it a fairy royal.
    pub king_type: PieceType,
    pub double_step: bool,
    pub double_step_rank: Rank,
    pub double_step_rank_min: Rank,
    pub en_passant_region: Bitboard,
    pub cambodian_moves: bool,
    pub diagonal_lines: Bitboard,
    pub pass: bool,
    pub pass_on_stalemate: bool,
    pub flying_general: bool,
    pub soldier_promotion_rank: Rank,
    pub immobility_illegal: bool,
}

impl Default for MovementRules {
    fn default() -> Self {
        MovementRules {
            mobility_region: [[Bitboard::EMPTY; PIECE_TYPE_NB]; COLOR_NB],
            king_type: PieceType::KING,
            double_step: true,
            double_step_rank: RANK_2,
            double_step_rank_min: RANK_2,
            en_passant_region: Bitboard::ALL,
            cambodian_moves: false,
            diagonal_lines: Bitboard::EMPTY,
            pass: false,
            pass_on_stalemate: false,
            flying_general: false,
            soldier_promotion_rank: RANK_1,
            immobility_illegal: false,
        }
    }
}

impl MovementRules {
    #[inline]
    pub fn region(&self, color: Color, pt: PieceType) -> Bitboard {
        self.mobility_region[color.index()][pt.index()]
    }

    /// Whether either color has a mobility region for `pt`.
    #[inline]
    pub fn is_restricted(&self, pt: PieceType) -> bool {
        !self.region(Color::White, pt).is_empty() || !self.region(Color::Black, pt).is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRules {
    pub promotion_rank: Rank,
    /// Pawn promotion choices, kept in descending piece-type order.
    pub promotion_piece_types: ArrayVec<PieceType, PIECE_TYPE_NB>,
    pub sittuyin_promotion: bool,
    /// Maximum number of pieces of a type reachable by promotion, 0 = unlimited.
    pub promotion_limit: [u32; PIECE_TYPE_NB],
    /// Promoted form of a piece type (shogi-style), `NONE` if it doesn't promote.
    pub promoted_piece_type: [PieceType; PIECE_TYPE_NB],
    pub piece_promotion_on_capture: bool,
    pub mandatory_pawn_promotion: bool,
    pub mandatory_piece_promotion: bool,
    pub piece_demotion: bool,
}

impl Default for PromotionRules {
    fn default() -> Self {
        let mut promotion_piece_types = ArrayVec::new();
        promotion_piece_types.extend([PieceType::QUEEN, PieceType::ROOK, PieceType::BISHOP, PieceType::KNIGHT]);
        PromotionRules {
            promotion_rank: RANK_8,
            promotion_piece_types,
            sittuyin_promotion: false,
            promotion_limit: [0; PIECE_TYPE_NB],
            promoted_piece_type: [PieceType::NONE; PIECE_TYPE_NB],
            piece_promotion_on_capture: false,
            mandatory_pawn_promotion: true,
            mandatory_piece_promotion: false,
            piece_demotion: false,
        }
    }
}

impl PromotionRules {
    /// Replaces the pawn promotion choices, deduplicated and sorted descending.
    pub fn set_promotion_piece_types<I: IntoIterator<Item = PieceType>>(&mut self, types: I) {
        let set: BTreeSet<PieceType> = types.into_iter().filter(|pt| !pt.is_none()).collect();
        self.promotion_piece_types.clear();
        self.promotion_piece_types.extend(set.into_iter().rev());
    }

    /// Whether any piece type has a promoted (and thus demotable) form.
    pub fn has_promoted_types(&self) -> bool {
        self.promoted_piece_type.iter().any(|pt| !pt.is_none())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropRules {
    pub piece_drops: bool,
    pub drop_loop: bool,
    pub captures_to_hand: bool,
    pub first_rank_pawn_drops: bool,
    pub promotion_zone_pawn_drops: bool,
    pub drop_on_top: bool,
    pub enclosing_drop: EnclosingRule,
    pub enclosing_drop_start: Bitboard,
    pub white_drop_region: Bitboard,
    pub black_drop_region: Bitboard,
    pub sittuyin_rook_drop: bool,
    pub drop_opposite_colored_bishop: bool,
    pub drop_promoted: bool,
    /// Piece type that may not be dropped onto a file it already occupies.
    pub drop_no_doubled: PieceType,
    pub drop_no_doubled_count: u32,
    pub must_drop: bool,
    /// Type that must be dropped, `NONE` = any.
    pub must_drop_type: PieceType,
    pub free_drops: bool,
}

impl Default for DropRules {
    fn default() -> Self {
        DropRules {
            piece_drops: false,
            drop_loop: false,
            captures_to_hand: false,
            first_rank_pawn_drops: false,
            promotion_zone_pawn_drops: false,
            drop_on_top: false,
            enclosing_drop: EnclosingRule::None,
            enclosing_drop_start: Bitboard::EMPTY,
            white_drop_region: Bitboard::ALL,
            black_drop_region: Bitboard::ALL,
            sittuyin_rook_drop: false,
            drop_opposite_colored_bishop: false,
            drop_promoted: false,
            drop_no_doubled: PieceType::NONE,
            drop_no_doubled_count: 1,
            must_drop: false,
            must_drop_type: PieceType::NONE,
            free_drops: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastlingRules {
    pub castling: bool,
    pub castling_dropped_piece: bool,
    pub kingside_file: File,
    pub queenside_file: File,
    pub rank: Rank,
    pub king_file: File,
    pub king_piece: PieceType,
    pub rook_piece: PieceType,
}

impl Default for CastlingRules {
    fn default() -> Self {
        CastlingRules {
            castling: true,
            castling_dropped_piece: false,
            kingside_file: FILE_G,
            queenside_file: FILE_C,
            rank: RANK_1,
            king_file: FILE_E,
            king_piece: PieceType::KING,
            rook_piece: PieceType::ROOK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatingRules {
    pub gating: bool,
    pub arrow_gating: bool,
    pub seirawan_gating: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureRules {
    pub must_capture: bool,
    pub blast_on_capture: bool,
    pub flip_enclosed_pieces: EnclosingRule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckRules {
    pub checking: bool,
    pub drop_checks: bool,
    pub check_counting: bool,
    pub makpong_rule: bool,
    pub shogi_pawn_drop_mate_illegal: bool,
    pub shatar_mate_rule: bool,
    pub bikjang_rule: bool,
}

impl Default for CheckRules {
    fn default() -> Self {
        CheckRules {
            checking: true,
            drop_checks: true,
            check_counting: false,
            makpong_rule: false,
            shogi_pawn_drop_mate_illegal: false,
            shatar_mate_rule: false,
            bikjang_rule: false,
        }
    }
}

/// Win, loss and draw conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct EndRules {
    pub n_move_rule: u32,
    pub n_fold_rule: u32,
    pub n_fold_value: Value,
    pub n_fold_value_absolute: bool,
    pub perpetual_check_illegal: bool,
    pub move_repetition_illegal: bool,
    pub chasing_rule: ChasingRule,
    pub stalemate_value: Value,
    /// Multiply the stalemate value by the sign of the piece count difference.
    pub stalemate_piece_count: bool,
    pub checkmate_value: Value,
    /// Value for the side whose extinction pieces are gone, `None` = no extinction rule.
    pub extinction_value: Option<Value>,
    pub extinction_claim: bool,
    pub extinction_pseudo_royal: bool,
    pub extinction_piece_types: BTreeSet<PieceType>,
    pub extinction_piece_count: u32,
    pub extinction_opponent_piece_count: u32,
    pub flag_piece: Option<PieceType>,
    pub white_flag: Bitboard,
    pub black_flag: Bitboard,
    pub flag_move: bool,
    pub connect_n: u32,
    pub material_counting: MaterialCounting,
    pub counting_rule: CountingRule,
}

impl Default for EndRules {
    fn default() -> Self {
        EndRules {
            n_move_rule: 50,
            n_fold_rule: 3,
            n_fold_value: VALUE_DRAW,
            n_fold_value_absolute: false,
            perpetual_check_illegal: false,
            move_repetition_illegal: false,
            chasing_rule: ChasingRule::None,
            stalemate_value: VALUE_DRAW,
            stalemate_piece_count: false,
            checkmate_value: -VALUE_MATE,
            extinction_value: None,
            extinction_claim: false,
            extinction_pseudo_royal: false,
            extinction_piece_types: BTreeSet::new(),
            extinction_piece_count: 0,
            extinction_opponent_piece_count: 0,
            flag_piece: None,
            white_flag: Bitboard::EMPTY,
            black_flag: Bitboard::EMPTY,
            flag_move: false,
            connect_n: 0,
            material_counting: MaterialCounting::None,
            counting_rule: CountingRule::None,
        }
    }
}

impl EndRules {
    /// Whether reaching a flag region wins.
    pub fn has_flag_rule(&self) -> bool {
        self.flag_piece.is_some() || !self.white_flag.is_empty() || !self.black_flag.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_types_sorted_descending() {
        let mut rules = PromotionRules::default();
        rules.set_promotion_piece_types([PieceType::KNIGHT, PieceType::QUEEN, PieceType::KNIGHT, PieceType::NONE]);
        assert_eq!(rules.promotion_piece_types.as_slice(), &[PieceType::QUEEN, PieceType::KNIGHT]);
    }

    #[test]
    fn test_mobility_restriction() {
        let mut rules = MovementRules::default();
        assert!(!rules.is_restricted(PieceType::KING));
        rules.mobility_region[Color::Black.index()][PieceType::KING.index()] = Bitboard::rank(RANK_8);
        assert!(rules.is_restricted(PieceType::KING));
        assert!(!rules.is_restricted(PieceType::QUEEN));
    }
}
