//! Derivation of the engine-internal parameters of a variant.
//!
//! Everything in [`Derived`] is a pure function of the configured fields.
//! The step must not panic on a half-configured or inconsistent variant,
//! since the loader also runs it on candidate definitions it may reject.

use super::Variant;
use crate::bitboard::{Square, SQUARE_NB};
use crate::pieces::{make_piece, PieceType, PIECE_NB};
use crate::types::{Color, CountingRule, MaterialCounting, COLOR_NB, FILE_MAX, RANK_MAX, VALUE_DRAW, VALUE_MATE};
use crate::utils::fen_board;

/// Parameters computed by [`Variant::conclude`]. Read-only outside this module.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Derived {
    /// Every active piece has a plain slider/leaper attack generator.
    pub fast_attacks: bool,
    /// Same for the second family of generators (shogi/xiangqi-style steppers).
    pub fast_attacks2: bool,
    /// Royal piece selecting the king bucket, `None` for a single bucket.
    pub nnue_king: Option<PieceType>,
    pub nnue_use_pockets: bool,
    /// Pocket slots per (piece color, piece type) plane, 0 without pockets.
    pub nnue_pockets: u32,
    /// Feature span of one king bucket.
    pub nnue_piece_indices: u32,
    pub nnue_king_buckets: u32,
    pub nnue_dimensions: u32,
    /// Base of the board plane for `[perspective][piece]`.
    pub piece_square_index: [[Option<u32>; PIECE_NB]; COLOR_NB],
    /// Base of the pocket plane for `[perspective][piece]`.
    pub piece_hand_index: [[Option<u32>; PIECE_NB]; COLOR_NB],
    /// Bucket offset for a royal square, indexed by NNUE square (row-major on the variant board).
    pub king_square_index: [Option<u32>; SQUARE_NB],
    pub nnue_max_pieces: u32,
    pub endgame_eval: bool,
    pub shogi_style_promotions: bool,
}

impl Default for Derived {
    fn default() -> Self {
        Derived {
            fast_attacks: false,
            fast_attacks2: false,
            nnue_king: None,
            nnue_use_pockets: false,
            nnue_pockets: 0,
            nnue_piece_indices: 0,
            nnue_king_buckets: 0,
            nnue_dimensions: 0,
            piece_square_index: [[None; PIECE_NB]; COLOR_NB],
            piece_hand_index: [[None; PIECE_NB]; COLOR_NB],
            king_square_index: [None; SQUARE_NB],
            nnue_max_pieces: 0,
            endgame_eval: false,
            shogi_style_promotions: false,
        }
    }
}

impl Derived {
    /// Board feature for a piece of color `pc_color` on NNUE square `sq`, seen from `perspective`.
    #[inline]
    pub fn square_feature(&self, perspective: Color, pc_color: Color, pt: PieceType, sq: usize) -> Option<u32> {
        self.piece_square_index[perspective.index()][make_piece(pc_color, pt).index()].map(|base| base + sq as u32)
    }
}

const FAST_ATTACK_TYPES: [PieceType; 4] = [
    PieceType::COMMONER,
    PieceType::IMMOBILE_PIECE,
    PieceType::ARCHBISHOP,
    PieceType::CHANCELLOR,
];

const FAST_ATTACK2_TYPES: [PieceType; 11] = [
    PieceType::COMMONER,
    PieceType::FERS,
    PieceType::WAZIR,
    PieceType::BREAKTHROUGH_PIECE,
    PieceType::SHOGI_PAWN,
    PieceType::GOLD,
    PieceType::SILVER,
    PieceType::SHOGI_KNIGHT,
    PieceType::DRAGON,
    PieceType::DRAGON_HORSE,
    PieceType::LANCE,
];

impl Variant {
    /// Recomputes the derived block from the configuration.
    ///
    /// Idempotent; must run again after any configuration change.
    pub fn conclude(&mut self) -> &mut Self {
        let mut d = Derived::default();
        let board_ok = self.board.max_file <= FILE_MAX && self.board.max_rank <= RANK_MAX;

        d.fast_attacks = board_ok && self.fast_attack_eligible(&FAST_ATTACK_TYPES);
        d.fast_attacks2 = board_ok && self.fast_attack_eligible(&FAST_ATTACK2_TYPES);

        self.conclude_nnue(&mut d, board_ok);

        d.nnue_max_pieces = fen_board(&self.board.start_fen)
            .chars()
            .filter(|&c| self.pieces.is_piece_char(c))
            .count() as u32;
        if self.board.two_boards {
            d.nnue_max_pieces *= 2;
        }

        d.endgame_eval = self.endgame_eval_applicable();
        d.shogi_style_promotions = self.promotion.has_promoted_types();

        tracing::debug!(
            variant = %self.name,
            dimensions = d.nnue_dimensions,
            buckets = d.nnue_king_buckets,
            pockets = d.nnue_use_pockets,
            endgame_eval = d.endgame_eval,
            "concluded variant"
        );

        self.derived = d;
        self.concluded = true;
        self
    }

    fn fast_attack_eligible(&self, allowed: &[PieceType]) -> bool {
        self.pieces.piece_types().all(|pt| {
            (pt < PieceType::FAIRY_PIECES
                || allowed.contains(&pt)
                || (pt == PieceType::KING && self.movement.king_type == PieceType::KING))
                && !self.movement.is_restricted(pt)
        }) && !self.movement.cambodian_moves
            && self.movement.diagonal_lines.is_empty()
    }

    /// King, or the single extinction type that must not die out, if unique on the start board.
    fn nnue_royal(&self) -> Option<PieceType> {
        let end = &self.end;
        let candidate = if self.pieces.contains(PieceType::KING) {
            Some(PieceType::KING)
        } else if end.extinction_piece_count == 0 && end.extinction_piece_types.len() == 1 {
            end.extinction_piece_types
                .iter()
                .next()
                .copied()
                .filter(|&pt| self.pieces.contains(pt))
        } else {
            None
        }?;

        let board = fen_board(&self.board.start_fen);
        let unique = Color::ALL.into_iter().all(|color| {
            self.pieces
                .piece_to_char(make_piece(color, candidate))
                .is_some_and(|c| board.chars().filter(|&b| b == c).count() == 1)
        });
        unique.then_some(candidate)
    }

    fn conclude_nnue(&self, d: &mut Derived, board_ok: bool) {
        let max_file = u32::from(self.board.max_file);
        let max_rank = u32::from(self.board.max_rank);
        let royal = self.nnue_royal();
        let piece_count = self.pieces.len() as u32;
        let royal_count = u32::from(royal.is_some());

        let squares = (max_rank + 1) * (max_file + 1);
        let drops = &self.drops;
        d.nnue_use_pockets = (drops.piece_drops
            && (drops.captures_to_hand || (!drops.must_drop && !self.gating.arrow_gating && piece_count != 1)))
            || self.gating.seirawan_gating;
        d.nnue_pockets = if d.nnue_use_pockets { 2 * (max_file + 1) } else { 0 };

        let board_planes = 2 * piece_count - royal_count;
        let non_drop_indices = board_planes * squares;
        let hand_planes = 2 * (piece_count - royal_count);
        d.nnue_piece_indices = non_drop_indices + hand_planes * d.nnue_pockets;
        d.nnue_king = royal;

        let mut board_plane = 0;
        let mut hand_plane = 0;
        for pt in self.pieces.piece_types() {
            for perspective in Color::ALL {
                let own = make_piece(perspective, pt).index();
                let theirs = make_piece(!perspective, pt).index();
                let squares_of = &mut d.piece_square_index[perspective.index()];
                let hands_of = &mut d.piece_hand_index[perspective.index()];
                if Some(pt) == royal {
                    // Own royal square is carried by the king bucket.
                    squares_of[own] = None;
                    squares_of[theirs] = Some(board_plane * squares);
                } else {
                    squares_of[own] = Some(board_plane * squares);
                    squares_of[theirs] = Some((board_plane + 1) * squares);
                    if d.nnue_use_pockets {
                        hands_of[own] = Some(non_drop_indices + hand_plane * d.nnue_pockets);
                        hands_of[theirs] = Some(non_drop_indices + (hand_plane + 1) * d.nnue_pockets);
                    }
                }
            }
            if Some(pt) == royal {
                board_plane += 1;
            } else {
                board_plane += 2;
                hand_plane += 2;
            }
        }

        // Enumerate reachable royal squares, e.g. xiangqi maps 90 squares to
        // the 9 palace squares. Oversized boards and regions that miss the
        // board fall back to one bucket.
        let mut buckets = 0;
        if let Some(king) = royal.filter(|_| board_ok && squares as usize <= SQUARE_NB) {
            let white = self.movement.region(Color::White, king);
            let black = self.movement.region(Color::Black, king);
            for s in 0..squares {
                let (file, rank) = ((s % (max_file + 1)) as u8, (s / (max_file + 1)) as u8);
                let Some(sq) = Square::new(file, rank) else { continue };
                let reachable = white.is_empty()
                    || black.is_empty()
                    || white.contains(sq)
                    || sq
                        .relative(Color::Black, self.board.max_rank)
                        .is_some_and(|rel| black.contains(rel));
                if reachable {
                    d.king_square_index[s as usize] = Some(buckets * d.nnue_piece_indices);
                    buckets += 1;
                }
            }
        }
        if buckets == 0 {
            d.king_square_index[Square::A1.index()] = Some(0);
            buckets = 1;
        }
        debug_assert!(buckets as usize <= SQUARE_NB);

        d.nnue_king_buckets = buckets;
        d.nnue_dimensions = buckets * d.nnue_piece_indices;
    }

    /// No special win, counting or mechanics rule that invalidates endgame knowledge.
    fn endgame_eval_applicable(&self) -> bool {
        let end = &self.end;
        !self.pieces.piece_types().any(|pt| self.movement.is_restricted(pt))
            && end.extinction_value.is_none()
            && end.extinction_piece_types.is_empty()
            && end.checkmate_value == -VALUE_MATE
            && end.stalemate_value == VALUE_DRAW
            && end.material_counting == MaterialCounting::None
            && end.counting_rule == CountingRule::None
            && !end.has_flag_rule()
            && !self.captures.must_capture
            && !self.checks.check_counting
            && !self.checks.makpong_rule
            && end.connect_n == 0
            && !self.captures.blast_on_capture
            && !self.drops.captures_to_hand
            && !self.board.two_boards
            && self.movement.king_type == PieceType::KING
    }
}
