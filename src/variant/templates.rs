//! Built-in variant templates.
//!
//! Every constructor returns a concluded variant. Definitions loaded from
//! text may name any of these as parent (`[name:parent]`).

use super::Variant;
use crate::bitboard::Bitboard;
use crate::pieces::PieceType;
use crate::types::*;

/// Constructor of one built-in variant.
pub type TemplateFn = fn() -> Variant;

/// All built-in templates, by registry name.
pub static BUILTIN: &[(&str, TemplateFn)] = &[
    ("3check", three_check),
    ("antichess", antichess),
    ("atomic", atomic),
    ("breakthrough", breakthrough),
    ("cambodian", cambodian),
    ("capablanca", capablanca),
    ("chess", chess),
    ("connect4", connect4),
    ("crazyhouse", crazyhouse),
    ("extinction", extinction),
    ("fairy", fairy),
    ("fischerandom", fischerandom),
    ("giveaway", giveaway),
    ("grand", grand),
    ("kinglet", kinglet),
    ("kingofthehill", kingofthehill),
    ("loop", loop_chess),
    ("makruk", makruk),
    ("minishogi", minishogi),
    ("nocastle", nocastle),
    ("placement", placement),
    ("racingkings", racingkings),
    ("seirawan", seirawan),
    ("shatranj", shatranj),
    ("shogi", shogi),
    ("tictactoe", tictactoe),
    ("xiangqi", xiangqi),
];

/// Builds the built-in variant called `name`.
pub fn by_name(name: &str) -> Option<Variant> {
    BUILTIN.iter().find(|(n, _)| *n == name).map(|(_, build)| build())
}

fn concluded(mut v: Variant) -> Variant {
    v.conclude();
    v
}

fn region(s: &str) -> Bitboard {
    Bitboard::parse_region(s).unwrap_or_default()
}

// ============================================================================
// Orthodox chess and close relatives
// ============================================================================

/// Base template for user definitions without a parent.
pub fn fairy() -> Variant {
    concluded(Variant::new("fairy"))
}

pub fn chess() -> Variant {
    concluded(Variant::new("chess"))
}

pub fn nocastle() -> Variant {
    let mut v = Variant::new("nocastle");
    v.board_mut().start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1".to_string();
    v.castling_mut().castling = false;
    concluded(v)
}

pub fn fischerandom() -> Variant {
    let mut v = Variant::new("fischerandom");
    v.board_mut().chess960 = true;
    v.board_mut().nnue_alias = "chess".to_string();
    concluded(v)
}

pub fn kingofthehill() -> Variant {
    let mut v = Variant::new("kingofthehill");
    let hill = region("d4 e4 d5 e5");
    let end = v.end_mut();
    end.flag_piece = Some(PieceType::KING);
    end.white_flag = hill;
    end.black_flag = hill;
    concluded(v)
}

pub fn racingkings() -> Variant {
    let mut v = Variant::new("racingkings");
    v.board_mut().start_fen = "8/8/8/8/8/8/krbnNBRK/qrbnNBRQ w - - 0 1".to_string();
    v.castling_mut().castling = false;
    v.checks_mut().checking = false;
    let end = v.end_mut();
    end.flag_piece = Some(PieceType::KING);
    end.white_flag = Bitboard::rank(RANK_8);
    end.black_flag = Bitboard::rank(RANK_8);
    end.flag_move = true;
    concluded(v)
}

pub fn three_check() -> Variant {
    let mut v = Variant::new("3check");
    v.board_mut().start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3+3 0 1".to_string();
    v.checks_mut().check_counting = true;
    concluded(v)
}

// ============================================================================
// Extinction and capture-rule variants
// ============================================================================

/// Chess with a non-royal king (commoner) that can be captured.
fn commoner_king(name: &str) -> Variant {
    let mut v = Variant::new(name);
    v.remove_piece(PieceType::KING);
    v.add_piece(PieceType::COMMONER, 'k');
    v.castling_mut().king_piece = PieceType::COMMONER;
    v
}

pub fn atomic() -> Variant {
    let mut v = commoner_king("atomic");
    v.board_mut().variant_template = "atomic".to_string();
    v.captures_mut().blast_on_capture = true;
    let end = v.end_mut();
    end.extinction_value = Some(-VALUE_MATE);
    end.extinction_piece_types = [PieceType::COMMONER].into();
    end.extinction_pseudo_royal = true;
    concluded(v)
}

pub fn extinction() -> Variant {
    let mut v = commoner_king("extinction");
    v.promotion_mut().set_promotion_piece_types([
        PieceType::COMMONER,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
    ]);
    let end = v.end_mut();
    end.extinction_value = Some(-VALUE_MATE);
    end.extinction_piece_types = [
        PieceType::COMMONER,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
        PieceType::PAWN,
    ]
    .into();
    concluded(v)
}

pub fn kinglet() -> Variant {
    let mut v = commoner_king("kinglet");
    v.promotion_mut().set_promotion_piece_types([PieceType::COMMONER]);
    let end = v.end_mut();
    end.extinction_value = Some(-VALUE_MATE);
    end.extinction_piece_types = [PieceType::PAWN].into();
    concluded(v)
}

pub fn giveaway() -> Variant {
    let mut v = commoner_king("giveaway");
    v.board_mut().variant_template = "giveaway".to_string();
    v.promotion_mut().set_promotion_piece_types([
        PieceType::COMMONER,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
    ]);
    v.captures_mut().must_capture = true;
    let end = v.end_mut();
    end.stalemate_value = VALUE_MATE;
    end.extinction_value = Some(VALUE_MATE);
    end.extinction_piece_types = [PieceType::ALL_PIECES].into();
    concluded(v)
}

pub fn antichess() -> Variant {
    let mut v = giveaway();
    v.set_name("antichess");
    v.board_mut().start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1".to_string();
    v.castling_mut().castling = false;
    concluded(v)
}

// ============================================================================
// Drop variants
// ============================================================================

pub fn crazyhouse() -> Variant {
    let mut v = Variant::new("crazyhouse");
    let board = v.board_mut();
    board.variant_template = "crazyhouse".to_string();
    board.start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1".to_string();
    board.pocket_size = 5;
    let drops = v.drops_mut();
    drops.piece_drops = true;
    drops.captures_to_hand = true;
    concluded(v)
}

pub fn loop_chess() -> Variant {
    let mut v = crazyhouse();
    v.set_name("loop");
    v.board_mut().nnue_alias = "crazyhouse".to_string();
    v.drops_mut().drop_loop = true;
    concluded(v)
}

pub fn placement() -> Variant {
    let mut v = Variant::new("placement");
    let board = v.board_mut();
    board.variant_template = "crazyhouse".to_string();
    board.start_fen = "8/pppppppp/8/8/8/8/PPPPPPPP/8[KQRRBBNNkqrrbbnn] w - - 0 1".to_string();
    board.pocket_size = 5;
    let drops = v.drops_mut();
    drops.piece_drops = true;
    drops.must_drop = true;
    drops.white_drop_region = Bitboard::rank(RANK_1);
    drops.black_drop_region = Bitboard::rank(RANK_8);
    v.castling_mut().castling_dropped_piece = true;
    concluded(v)
}

pub fn seirawan() -> Variant {
    let mut v = Variant::new("seirawan");
    v.board_mut().variant_template = "seirawan".to_string();
    v.board_mut().start_fen =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[HEhe] w KQBCDFGkqbcdfg - 0 1".to_string();
    v.add_piece(PieceType::ARCHBISHOP, 'h');
    v.add_piece(PieceType::CHANCELLOR, 'e');
    v.promotion_mut().set_promotion_piece_types([
        PieceType::ARCHBISHOP,
        PieceType::CHANCELLOR,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
    ]);
    let gating = v.gating_mut();
    gating.gating = true;
    gating.seirawan_gating = true;
    concluded(v)
}

// ============================================================================
// Large boards
// ============================================================================

pub fn capablanca() -> Variant {
    let mut v = Variant::new("capablanca");
    let board = v.board_mut();
    board.max_file = FILE_J;
    board.start_fen = "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1".to_string();
    v.add_piece(PieceType::ARCHBISHOP, 'a');
    v.add_piece(PieceType::CHANCELLOR, 'c');
    v.promotion_mut().set_promotion_piece_types([
        PieceType::ARCHBISHOP,
        PieceType::CHANCELLOR,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
    ]);
    let castling = v.castling_mut();
    castling.kingside_file = FILE_I;
    castling.queenside_file = FILE_C;
    castling.king_file = FILE_F;
    concluded(v)
}

pub fn grand() -> Variant {
    let mut v = Variant::new("grand");
    let board = v.board_mut();
    board.max_file = FILE_J;
    board.max_rank = RANK_10;
    board.start_fen =
        "r8r/1nbqkcabn1/pppppppppp/10/10/10/10/PPPPPPPPPP/1NBQKCABN1/R8R w - - 0 1".to_string();
    v.add_piece(PieceType::ARCHBISHOP, 'a');
    v.add_piece(PieceType::CHANCELLOR, 'c');
    let promotion = v.promotion_mut();
    promotion.set_promotion_piece_types([
        PieceType::ARCHBISHOP,
        PieceType::CHANCELLOR,
        PieceType::QUEEN,
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::KNIGHT,
    ]);
    promotion.promotion_rank = RANK_8;
    promotion.mandatory_pawn_promotion = false;
    for (pt, limit) in [
        (PieceType::ARCHBISHOP, 1),
        (PieceType::CHANCELLOR, 1),
        (PieceType::QUEEN, 1),
        (PieceType::ROOK, 2),
        (PieceType::BISHOP, 2),
        (PieceType::KNIGHT, 2),
    ] {
        promotion.promotion_limit[pt.index()] = limit;
    }
    let movement = v.movement_mut();
    movement.double_step_rank = RANK_3;
    movement.double_step_rank_min = RANK_3;
    v.castling_mut().castling = false;
    concluded(v)
}

// ============================================================================
// Asian variants
// ============================================================================

fn makruk_base(name: &str) -> Variant {
    let mut v = Variant::new(name);
    v.board_mut().variant_template = "makruk".to_string();
    v.board_mut().start_fen = "rnsmksnr/8/pppppppp/8/8/PPPPPPPP/8/RNSKMSNR w - - 0 1".to_string();
    v.reset_pieces();
    v.add_piece(PieceType::PAWN, 'p');
    v.add_piece(PieceType::KNIGHT, 'n');
    v.add_piece(PieceType::KHON, 's');
    v.add_piece(PieceType::ROOK, 'r');
    v.add_piece(PieceType::MET, 'm');
    v.add_piece(PieceType::KING, 'k');
    let promotion = v.promotion_mut();
    promotion.promotion_rank = RANK_6;
    promotion.set_promotion_piece_types([PieceType::MET]);
    v.movement_mut().double_step = false;
    v.castling_mut().castling = false;
    v.end_mut().n_move_rule = 0;
    v.end_mut().counting_rule = CountingRule::Makruk;
    v
}

pub fn makruk() -> Variant {
    concluded(makruk_base("makruk"))
}

pub fn cambodian() -> Variant {
    let mut v = makruk_base("cambodian");
    v.board_mut().start_fen = "rnsmksnr/8/pppppppp/8/8/PPPPPPPP/8/RNSKMSNR w DEde - 0 1".to_string();
    v.movement_mut().cambodian_moves = true;
    v.end_mut().counting_rule = CountingRule::Cambodian;
    concluded(v)
}

pub fn shatranj() -> Variant {
    let mut v = Variant::new("shatranj");
    v.board_mut().start_fen = "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR w - - 0 1".to_string();
    v.reset_pieces();
    v.add_piece(PieceType::PAWN, 'p');
    v.add_piece(PieceType::KNIGHT, 'n');
    v.add_piece(PieceType::ALFIL, 'b');
    v.add_piece(PieceType::ROOK, 'r');
    v.add_piece(PieceType::FERS, 'q');
    v.add_piece(PieceType::KING, 'k');
    v.promotion_mut().set_promotion_piece_types([PieceType::FERS]);
    v.movement_mut().double_step = false;
    v.castling_mut().castling = false;
    let end = v.end_mut();
    end.n_move_rule = 70;
    end.stalemate_value = -VALUE_MATE;
    end.extinction_value = Some(-VALUE_MATE);
    end.extinction_claim = true;
    end.extinction_piece_types = [PieceType::ALL_PIECES].into();
    end.extinction_piece_count = 1;
    end.extinction_opponent_piece_count = 2;
    concluded(v)
}

fn shogi_base(name: &str, start_fen: &str, max_file: File, max_rank: Rank) -> Variant {
    let mut v = Variant::new(name);
    let board = v.board_mut();
    board.variant_template = "shogi".to_string();
    board.max_file = max_file;
    board.max_rank = max_rank;
    board.start_fen = start_fen.to_string();
    board.pocket_size = 7;
    v.reset_pieces();
    v.add_piece(PieceType::SHOGI_PAWN, 'p');
    v.add_piece(PieceType::SILVER, 's');
    v.add_piece(PieceType::GOLD, 'g');
    v.add_piece(PieceType::BISHOP, 'b');
    v.add_piece(PieceType::DRAGON_HORSE, 'h');
    v.add_piece(PieceType::ROOK, 'r');
    v.add_piece(PieceType::DRAGON, 'd');
    v.add_piece(PieceType::KING, 'k');

    let promotion = v.promotion_mut();
    promotion.promotion_piece_types.clear();
    promotion.promotion_rank = max_rank.saturating_sub(2).min(RANK_7);
    promotion.mandatory_pawn_promotion = false;
    promotion.piece_demotion = true;
    for (from, to) in [
        (PieceType::SHOGI_PAWN, PieceType::GOLD),
        (PieceType::SILVER, PieceType::GOLD),
        (PieceType::BISHOP, PieceType::DRAGON_HORSE),
        (PieceType::ROOK, PieceType::DRAGON),
    ] {
        promotion.promoted_piece_type[from.index()] = to;
    }

    let drops = v.drops_mut();
    drops.piece_drops = true;
    drops.captures_to_hand = true;
    drops.drop_no_doubled = PieceType::SHOGI_PAWN;

    v.movement_mut().double_step = false;
    v.castling_mut().castling = false;
    v.checks_mut().shogi_pawn_drop_mate_illegal = true;
    let end = v.end_mut();
    end.n_move_rule = 0;
    end.n_fold_rule = 4;
    end.perpetual_check_illegal = true;
    end.stalemate_value = -VALUE_MATE;
    v
}

pub fn shogi() -> Variant {
    let mut v = shogi_base(
        "shogi",
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] w 0 1",
        FILE_I,
        RANK_9,
    );
    v.add_piece(PieceType::LANCE, 'l');
    v.add_piece(PieceType::SHOGI_KNIGHT, 'n');
    let promotion = v.promotion_mut();
    promotion.promoted_piece_type[PieceType::LANCE.index()] = PieceType::GOLD;
    promotion.promoted_piece_type[PieceType::SHOGI_KNIGHT.index()] = PieceType::GOLD;
    concluded(v)
}

pub fn minishogi() -> Variant {
    let mut v = shogi_base("minishogi", "rbsgk/4p/5/P4/KGSBR[-] w 0 1", FILE_E, RANK_5);
    v.promotion_mut().promotion_rank = RANK_5;
    concluded(v)
}

pub fn xiangqi() -> Variant {
    let mut v = Variant::new("xiangqi");
    let board = v.board_mut();
    board.variant_template = "xiangqi".to_string();
    board.max_file = FILE_I;
    board.max_rank = RANK_10;
    board.start_fen =
        "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1".to_string();
    v.reset_pieces();
    v.add_piece(PieceType::SOLDIER, 'p');
    v.add_piece(PieceType::HORSE, 'n');
    v.add_piece(PieceType::ELEPHANT, 'b');
    v.add_piece(PieceType::ROOK, 'r');
    v.add_piece(PieceType::CANNON, 'c');
    v.add_piece(PieceType::FERS, 'a');
    v.add_piece(PieceType::KING, 'k');

    let white_palace = region("d1 e1 f1 d2 e2 f2 d3 e3 f3");
    let black_palace = region("d8 e8 f8 d9 e9 f9 d10 e10 f10");
    let movement = v.movement_mut();
    movement.king_type = PieceType::WAZIR;
    movement.double_step = false;
    movement.flying_general = true;
    movement.soldier_promotion_rank = RANK_6;
    for (pt, white, black) in [
        (PieceType::KING, white_palace, black_palace),
        (PieceType::FERS, white_palace, black_palace),
        (PieceType::ELEPHANT, region("*1 *2 *3 *4 *5"), region("*6 *7 *8 *9 *10")),
    ] {
        movement.mobility_region[Color::White.index()][pt.index()] = white;
        movement.mobility_region[Color::Black.index()][pt.index()] = black;
    }

    let promotion = v.promotion_mut();
    promotion.promotion_piece_types.clear();
    promotion.promotion_rank = RANK_10;
    v.castling_mut().castling = false;
    let end = v.end_mut();
    end.n_move_rule = 0;
    end.stalemate_value = -VALUE_MATE;
    end.perpetual_check_illegal = true;
    end.chasing_rule = ChasingRule::Axf;
    concluded(v)
}

// ============================================================================
// Connection and race games
// ============================================================================

fn connect_base(name: &str, max_file: File, max_rank: Rank, start_fen: &str, n: u32) -> Variant {
    let mut v = Variant::new(name);
    let board = v.board_mut();
    board.max_file = max_file;
    board.max_rank = max_rank;
    board.start_fen = start_fen.to_string();
    v.reset_pieces();
    v.add_piece(PieceType::IMMOBILE_PIECE, 'p');
    v.promotion_mut().promotion_piece_types.clear();
    let drops = v.drops_mut();
    drops.piece_drops = true;
    drops.drop_on_top = max_rank > RANK_3;
    v.movement_mut().double_step = false;
    v.castling_mut().castling = false;
    v.checks_mut().checking = false;
    let end = v.end_mut();
    end.stalemate_value = VALUE_DRAW;
    end.connect_n = n;
    v
}

pub fn connect4() -> Variant {
    concluded(connect_base(
        "connect4",
        FILE_G,
        RANK_6,
        "7/7/7/7/7/7[PPPPPPPPPPPPPPPPPPPPPppppppppppppppppppppp] w - - 0 1",
        4,
    ))
}

pub fn tictactoe() -> Variant {
    concluded(connect_base("tictactoe", FILE_C, RANK_3, "3/3/3[PPPPPpppp] w - - 0 1", 3))
}

pub fn breakthrough() -> Variant {
    let mut v = Variant::new("breakthrough");
    v.board_mut().start_fen = "pppppppp/pppppppp/8/8/8/8/PPPPPPPP/PPPPPPPP w 0 1".to_string();
    v.reset_pieces();
    v.add_piece(PieceType::BREAKTHROUGH_PIECE, 'p');
    v.promotion_mut().promotion_piece_types.clear();
    v.movement_mut().double_step = false;
    v.castling_mut().castling = false;
    v.checks_mut().checking = false;
    let end = v.end_mut();
    end.flag_piece = Some(PieceType::BREAKTHROUGH_PIECE);
    end.white_flag = Bitboard::rank(RANK_8);
    end.black_flag = Bitboard::rank(RANK_1);
    concluded(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_sorted_and_unique() {
        let names: Vec<&str> = BUILTIN.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_builtins_are_concluded_and_named() {
        for (name, build) in BUILTIN {
            let v = build();
            assert_eq!(v.name(), *name);
            assert!(v.is_concluded(), "{name}");
        }
    }

    #[test]
    fn test_builtins_validate_cleanly() {
        for (name, build) in BUILTIN {
            let problems = build().validate();
            assert!(problems.is_empty(), "{name}: {problems:?}");
        }
    }

    #[test]
    fn test_xiangqi_palace_buckets() {
        let v = xiangqi();
        let d = v.derived();
        assert_eq!(d.nnue_king, Some(PieceType::KING));
        assert_eq!(d.nnue_king_buckets, 9);
        assert_eq!(d.nnue_piece_indices, 13 * 90);
        assert_eq!(d.nnue_dimensions, 10530);
        assert!(!d.fast_attacks);
        assert!(!d.endgame_eval);
    }

    #[test]
    fn test_shogi_promotions() {
        let v = shogi();
        let d = v.derived();
        assert!(d.shogi_style_promotions);
        assert!(d.nnue_use_pockets);
        assert_eq!(d.nnue_pockets, 18);
        assert_eq!(d.nnue_max_pieces, 40);
        assert!(d.fast_attacks2);
        assert!(!d.fast_attacks);
    }

    #[test]
    fn test_atomic_commoner_royal() {
        let v = atomic();
        let d = v.derived();
        assert_eq!(d.nnue_king, Some(PieceType::COMMONER));
        assert_eq!(d.nnue_king_buckets, 64);
        assert!(!d.endgame_eval);
    }

    #[test]
    fn test_connect4_single_bucket() {
        let v = connect4();
        let d = v.derived();
        assert_eq!(d.nnue_king, None);
        assert!(!d.nnue_use_pockets);
        assert_eq!(d.nnue_king_buckets, 1);
        assert_eq!(d.nnue_dimensions, 2 * 42);
        assert_eq!(d.nnue_max_pieces, 42);
    }
}
