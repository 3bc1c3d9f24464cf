//! Static evaluation tuning data carried by every variant.
//!
//! Nothing here is derived; variants override individual entries and the
//! evaluator reads them as-is.

use crate::bitboard::{Square, SQUARE_NB};
use crate::pieces::{PieceType, PIECE_TYPE_NB};
use crate::types::*;

pub const MOBILITY_NB: usize = 4 * RANK_NB;

/// Evaluation terms reported in the trace (`TERM_NB` rows).
pub const TERMS: [&str; 9] = [
    "material", "imbalance", "mobility", "threat", "passed", "space", "variant", "winnable", "total",
];
pub const TERM_NB: usize = TERMS.len();

#[derive(Debug, Clone, PartialEq)]
pub struct EvalWeights {
    pub lazy_threshold1: Value,
    pub lazy_threshold2: Value,
    pub space_threshold: Value,
    pub king_attack_weights: [i32; PIECE_TYPE_NB],
    /// Safe check bonus per piece type, `[single, multiple]`.
    pub safe_check: [[i32; 2]; PIECE_TYPE_NB],
    /// Indexed by piece type and number of attacked squares in the mobility area.
    pub mobility_bonus: [[Score; MOBILITY_NB]; PIECE_TYPE_NB],
    pub max_mobility: Score,
    pub drop_mobility: Score,
    pub bishop_pawns: [Score; FILE_NB / 2],
    pub king_protector: [Score; 2],
    pub outpost: [Score; 2],
    pub passed_rank: [Score; RANK_NB],
    pub rook_on_closed_file: Score,
    pub rook_on_open_file: [Score; 2],
    pub threat_by_minor: [Score; PIECE_TYPE_NB],
    pub threat_by_rook: [Score; PIECE_TYPE_NB],
    pub cornered_bishop: Value,
    pub hanging: Score,
    pub restricted_piece: Score,
    pub threat_by_king: Score,
    pub king_proximity: Score,
    pub endgame_king_proximity: Score,
    pub connected_soldier: Score,
    pub virtual_check: i32,
    pub promotion_bonus: Score,
    /// Scale of the piece-square terms, in centipawns.
    pub psq_value: Score,
    pub piece_value: [[Value; PIECE_TYPE_NB]; PHASE_NB],
    /// Per-term scaling of the evaluation trace, in centipawns.
    pub score_value: [[i32; TERM_NB]; PHASE_NB],
    piece_square_bonus: Vec<i32>,
}

impl Default for EvalWeights {
    fn default() -> Self {
        let mut weights = EvalWeights {
            lazy_threshold1: 1565,
            lazy_threshold2: 1102,
            space_threshold: 11551,
            king_attack_weights: [0; PIECE_TYPE_NB],
            safe_check: [[0; 2]; PIECE_TYPE_NB],
            mobility_bonus: [[Score::default(); MOBILITY_NB]; PIECE_TYPE_NB],
            max_mobility: s(150, 200),
            drop_mobility: s(10, 10),
            bishop_pawns: [s(3, 8), s(3, 9), s(2, 8), s(3, 8), s(0, 0), s(0, 0)],
            king_protector: [s(8, 9), s(6, 9)],
            outpost: [s(57, 38), s(31, 24)],
            passed_rank: [
                s(0, 0), s(7, 27), s(16, 32), s(17, 40), s(64, 71),
                s(170, 174), s(278, 262), s(0, 0), s(0, 0), s(0, 0),
            ],
            rook_on_closed_file: s(10, 5),
            rook_on_open_file: [s(19, 6), s(47, 26)],
            threat_by_minor: [Score::default(); PIECE_TYPE_NB],
            threat_by_rook: [Score::default(); PIECE_TYPE_NB],
            cornered_bishop: 50,
            hanging: s(69, 36),
            restricted_piece: s(7, 7),
            threat_by_king: s(24, 89),
            king_proximity: s(2, 6),
            endgame_king_proximity: s(0, 10),
            connected_soldier: s(20, 20),
            virtual_check: 600,
            promotion_bonus: s(1, 1),
            psq_value: s(100, 100),
            piece_value: [[0; PIECE_TYPE_NB]; PHASE_NB],
            score_value: [[100; TERM_NB]; PHASE_NB],
            piece_square_bonus: vec![0; PHASE_NB * PIECE_TYPE_NB * SQUARE_NB],
        };

        let orthodox = [PieceType::PAWN, PieceType::KNIGHT, PieceType::BISHOP, PieceType::ROOK, PieceType::QUEEN];
        for (pt, weight) in orthodox.iter().zip([0, 81, 52, 44, 10]) {
            weights.king_attack_weights[pt.index()] = weight;
        }
        weights.king_attack_weights[PieceType::KING.index()] = 40;
        for (pt, checks) in orthodox.iter().zip([[600, 600], [803, 1292], [639, 974], [1087, 1878], [759, 1132]]) {
            weights.safe_check[pt.index()] = checks;
        }
        weights.safe_check[PieceType::KING.index()] = [600, 900];

        let mobility: [&[Score]; 4] = [
            &[s(-62, -79), s(-53, -57), s(-12, -31), s(-3, -17), s(3, 7), s(12, 13), s(21, 16), s(28, 21), s(37, 26)],
            &[
                s(-47, -59), s(-20, -25), s(14, -8), s(29, 12), s(39, 21), s(53, 40), s(53, 56),
                s(60, 58), s(62, 65), s(69, 72), s(78, 78), s(83, 87), s(91, 88), s(96, 98),
            ],
            &[
                s(-60, -82), s(-24, -15), s(0, 17), s(3, 43), s(4, 72), s(14, 100), s(20, 102),
                s(30, 122), s(41, 133), s(41, 139), s(41, 153), s(45, 160), s(57, 165), s(58, 170), s(67, 175),
            ],
            &[
                s(-29, -49), s(-16, -29), s(-8, -8), s(-8, 17), s(18, 39), s(25, 54), s(23, 59),
                s(37, 73), s(41, 76), s(54, 95), s(65, 95), s(68, 101), s(69, 124), s(70, 128),
                s(70, 132), s(70, 133), s(71, 136), s(72, 140), s(74, 147), s(76, 149), s(90, 153),
                s(104, 169), s(105, 171), s(106, 171), s(112, 178), s(114, 185), s(114, 187), s(119, 221),
            ],
        ];
        for (pt, bonus) in orthodox[1..].iter().zip(mobility) {
            weights.mobility_bonus[pt.index()][..bonus.len()].copy_from_slice(bonus);
        }

        for (pt, (minor, rook)) in orthodox.iter().zip([
            (s(5, 32), s(3, 44)),
            (s(55, 41), s(37, 68)),
            (s(77, 56), s(42, 60)),
            (s(89, 119), s(0, 39)),
            (s(79, 162), s(58, 43)),
        ]) {
            weights.threat_by_minor[pt.index()] = minor;
            weights.threat_by_rook[pt.index()] = rook;
        }

        for idx in 0..PIECE_TYPE_NB {
            if let Some(pt) = PieceType::from_index(idx) {
                let value = default_piece_value(pt);
                weights.piece_value[Phase::Middlegame as usize][idx] = value.mg;
                weights.piece_value[Phase::Endgame as usize][idx] = value.eg;
            }
        }
        weights
    }
}

impl EvalWeights {
    #[inline]
    fn psq_offset(phase: Phase, pt: PieceType, sq: Square) -> usize {
        ((phase as usize) * PIECE_TYPE_NB + pt.index()) * SQUARE_NB + sq.index()
    }

    #[inline]
    pub fn piece_square_bonus(&self, phase: Phase, pt: PieceType, sq: Square) -> i32 {
        self.piece_square_bonus[Self::psq_offset(phase, pt, sq)]
    }

    pub fn set_piece_square_bonus(&mut self, phase: Phase, pt: PieceType, sq: Square, bonus: i32) {
        let offset = Self::psq_offset(phase, pt, sq);
        self.piece_square_bonus[offset] = bonus;
    }

    #[inline]
    pub fn piece_value(&self, phase: Phase, pt: PieceType) -> Value {
        self.piece_value[phase as usize][pt.index()]
    }
}

/// Material values the engine starts from before variant-specific tuning.
pub fn default_piece_value(pt: PieceType) -> Score {
    match pt {
        PieceType::PAWN => s(126, 208),
        PieceType::KNIGHT => s(781, 854),
        PieceType::BISHOP => s(825, 915),
        PieceType::ROOK => s(1276, 1380),
        PieceType::QUEEN => s(2538, 2682),
        PieceType::FERS => s(165, 181),
        PieceType::ALFIL => s(105, 81),
        PieceType::FERS_ALFIL => s(320, 352),
        PieceType::SILVER => s(635, 630),
        PieceType::AIWOK => s(2333, 2494),
        PieceType::BERS => s(2023, 2208),
        PieceType::ARCHBISHOP => s(2200, 2300),
        PieceType::CHANCELLOR => s(2300, 2500),
        PieceType::AMAZON => s(2800, 3000),
        PieceType::SHOGI_PAWN => s(90, 127),
        PieceType::LANCE => s(350, 250),
        PieceType::SHOGI_KNIGHT => s(350, 300),
        PieceType::GOLD => s(720, 700),
        PieceType::DRAGON_HORSE => s(1500, 1500),
        PieceType::CANNON => s(800, 700),
        PieceType::JANGGI_CANNON => s(800, 600),
        PieceType::SOLDIER => s(150, 300),
        PieceType::HORSE => s(700, 900),
        PieceType::ELEPHANT => s(300, 300),
        PieceType::JANGGI_ELEPHANT => s(340, 350),
        PieceType::BANNER => s(3400, 3500),
        PieceType::WAZIR => s(245, 325),
        PieceType::COMMONER => s(700, 900),
        PieceType::CENTAUR => s(1800, 1900),
        _ => Score::default(),
    }
}
