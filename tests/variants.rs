use hydrochess_variants::bitboard::{Bitboard, SQUARE_NB};
use hydrochess_variants::pieces::make_piece;
use hydrochess_variants::types::{Color, CountingRule, MaterialCounting, VALUE_MATE};
use hydrochess_variants::variant::templates;
use hydrochess_variants::{PieceType, Variant, VariantMap};

/// Feature ranges `(start, len)` of one perspective.
fn perspective_ranges(v: &Variant, perspective: Color) -> Vec<(u32, u32)> {
    let d = v.derived();
    let squares = (u32::from(v.board().max_file) + 1) * (u32::from(v.board().max_rank) + 1);
    let mut ranges = Vec::new();
    for pt in v.piece_types() {
        for color in Color::ALL {
            let pc = make_piece(color, pt).index();
            if let Some(base) = d.piece_square_index[perspective.index()][pc] {
                ranges.push((base, squares));
            }
            if let Some(base) = d.piece_hand_index[perspective.index()][pc] {
                ranges.push((base, d.nnue_pockets));
            }
        }
    }
    ranges
}

#[test]
fn test_nnue_ranges_disjoint_for_builtins() {
    let variants = VariantMap::with_builtins();
    for name in variants.get_keys() {
        let v = variants.get(name).unwrap();
        let d = v.derived();
        for perspective in Color::ALL {
            let mut ranges = perspective_ranges(v, perspective);
            ranges.sort_unstable();
            for pair in ranges.windows(2) {
                assert!(pair[0].0 + pair[0].1 <= pair[1].0, "{name}: overlapping {pair:?}");
            }
            if let Some(&(start, len)) = ranges.last() {
                assert!(start + len <= d.nnue_piece_indices, "{name}: range past bucket span");
            }
        }
        let top_bucket = d.king_square_index.iter().flatten().max().copied().unwrap_or(0);
        assert!(top_bucket + d.nnue_piece_indices <= d.nnue_dimensions || d.nnue_dimensions == 0, "{name}");
        println!("{name:>14}: {} buckets, {} dimensions", d.nnue_king_buckets, d.nnue_dimensions);
    }
}

#[test]
fn test_buckets_bounded_by_squares() {
    let variants = VariantMap::with_builtins();
    for name in variants.get_keys() {
        let v = variants.get(name).unwrap();
        let squares = (u32::from(v.board().max_file) + 1) * (u32::from(v.board().max_rank) + 1);
        let d = v.derived();
        assert!(d.nnue_king_buckets >= 1, "{name}");
        assert!(d.nnue_king_buckets <= squares, "{name}");
        assert!(d.nnue_king_buckets as usize <= SQUARE_NB, "{name}");
        assert_eq!(d.king_square_index.iter().flatten().count() as u32, d.nnue_king_buckets, "{name}");
    }
}

#[test]
fn test_every_active_type_has_letters() {
    for (name, build) in templates::BUILTIN {
        let v = build();
        for pt in v.piece_types() {
            for color in Color::ALL {
                let c = v.piece_to_char(color, pt).unwrap_or_else(|| panic!("{name}: {pt} has no letter"));
                assert_eq!(v.piece_from_char(c), Some(make_piece(color, pt)), "{name}: {c}");
            }
            assert!(v.pieces().piece_type_char(pt).is_some(), "{name}: {pt}");
            assert!(v.pieces().score_char(pt).is_some(), "{name}: {pt}");
        }
    }
}

#[test]
fn test_standard_chess() {
    let v = templates::chess();
    let d = v.derived();
    assert_eq!(v.piece_types().len(), 6);
    assert_eq!(d.nnue_king, Some(PieceType::KING));
    assert_eq!(d.nnue_king_buckets, 64);
    assert_eq!(d.nnue_dimensions, 64 * 11 * 64);
    assert!(!d.nnue_use_pockets);
    assert_eq!(d.nnue_max_pieces, 32);
    assert!(d.fast_attacks);
    assert!(d.endgame_eval);
}

#[test]
fn test_crazyhouse_pockets_beyond_baseline() {
    let chess = templates::chess();
    let zh = templates::crazyhouse();
    let d = zh.derived();
    assert!(d.nnue_use_pockets);
    assert_eq!(d.nnue_pockets, 2 * 8);
    assert_eq!(d.nnue_piece_indices, 11 * 64 + 10 * 16);
    assert!(d.nnue_dimensions > chess.derived().nnue_dimensions);
    assert!(!d.endgame_eval);
}

#[test]
fn test_non_unique_substitute_royal_collapses_to_one_bucket() {
    let mut v = templates::atomic();
    v.board_mut().start_fen = "rnbkkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKKBNR w - - 0 1".to_string();
    v.conclude();
    let d = v.derived();
    assert_eq!(d.nnue_king, None);
    assert_eq!(d.nnue_king_buckets, 1);
    assert_eq!(d.nnue_piece_indices, 12 * 64);
    assert_eq!(d.nnue_dimensions, d.nnue_piece_indices);
}

#[test]
fn test_colliding_letter_stays_consistent() {
    let mut v = templates::chess();
    v.add_piece(PieceType::CANNON, 'n');
    v.conclude();

    assert!(!v.pieces().contains(PieceType::KNIGHT));
    assert!(v.pieces().contains(PieceType::CANNON));
    assert_eq!(v.pieces().piece_type_from_char('N'), Some(PieceType::CANNON));
    assert_eq!(v.piece_to_char(Color::White, PieceType::KNIGHT), None);
    assert_eq!(v.piece_types().len(), 6);
    assert_eq!(v.piece_conflicts().len(), 1);
    assert_eq!(v.piece_conflicts()[0].evicted, PieceType::KNIGHT);
    assert!(!v.derived().fast_attacks);
    assert!(!v.validate().is_empty());
}

#[test]
fn test_add_remove_round_trip() {
    let mut v = templates::chess();
    let before = v.pieces().clone();
    v.add_custom_piece(PieceType::custom(4).unwrap(), 'z', "NN");
    assert_ne!(v.pieces(), &before);
    v.remove_piece(PieceType::custom(4).unwrap());
    assert_eq!(v.pieces(), &before);

    v.remove_piece(PieceType::AMAZON);
    assert_eq!(v.pieces(), &before);

    v.reset_pieces();
    assert!(v.pieces().is_empty());
    assert_eq!(v.pieces().piece_type_from_char('k'), None);
}

#[test]
fn test_endgame_eval_gates() {
    let gates: [(&str, fn(&mut Variant)); 13] = [
        ("restricted king", |v| {
            v.movement_mut().mobility_region[0][PieceType::KING.index()] = Bitboard::rank(0);
        }),
        ("extinction", |v| v.end_mut().extinction_value = Some(-VALUE_MATE)),
        ("stalemate loss", |v| v.end_mut().stalemate_value = -VALUE_MATE),
        ("counting", |v| v.end_mut().counting_rule = CountingRule::Makruk),
        ("flag", |v| v.end_mut().flag_piece = Some(PieceType::KING)),
        ("must capture", |v| v.captures_mut().must_capture = true),
        ("check counting", |v| v.checks_mut().check_counting = true),
        ("connect", |v| v.end_mut().connect_n = 4),
        ("two boards", |v| v.board_mut().two_boards = true),
        ("king type", |v| v.movement_mut().king_type = PieceType::WAZIR),
        ("makpong", |v| v.checks_mut().makpong_rule = true),
        ("material counting", |v| v.end_mut().material_counting = MaterialCounting::UnweightedMaterial),
        ("extinction types only", |v| v.end_mut().extinction_piece_types = [PieceType::QUEEN].into()),
    ];
    for (label, gate) in gates {
        let mut v = templates::chess();
        assert!(v.derived().endgame_eval);
        gate(&mut v);
        v.conclude();
        assert!(!v.derived().endgame_eval, "{label}");
    }
}

#[test]
fn test_fast_attack_gates() {
    let gates: [(&str, fn(&mut Variant)); 3] = [
        ("diagonal lines", |v| v.movement_mut().diagonal_lines = Bitboard::parse_region("a1 h8").unwrap()),
        ("cambodian moves", |v| v.movement_mut().cambodian_moves = true),
        ("restricted knight", |v| {
            v.movement_mut().mobility_region[1][PieceType::KNIGHT.index()] = Bitboard::rank(0);
        }),
    ];
    for (label, gate) in gates {
        let mut v = templates::chess();
        gate(&mut v);
        v.conclude();
        let d = v.derived();
        assert!(!d.fast_attacks && !d.fast_attacks2, "{label}");
    }

    assert!(templates::makruk().derived().fast_attacks2);
    let cambodian = templates::cambodian();
    assert!(cambodian.movement().cambodian_moves);
    assert!(!cambodian.derived().fast_attacks && !cambodian.derived().fast_attacks2);
}

#[test]
fn test_custom_royal_needs_unique_start_square() {
    let royal = PieceType::custom(1).unwrap();
    let mut v = templates::chess();
    v.remove_piece(PieceType::KING);
    v.add_custom_piece(royal, 'k', "K");
    v.castling_mut().castling = false;
    let end = v.end_mut();
    end.extinction_value = Some(-VALUE_MATE);
    end.extinction_piece_types = [royal].into();
    v.conclude();
    assert_eq!(v.derived().nnue_king, Some(royal));
    assert_eq!(v.derived().nnue_king_buckets, 64);

    v.board_mut().start_fen = "rnbkkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKKBNR w - - 0 1".to_string();
    v.conclude();
    let d = v.derived();
    assert_eq!(d.nnue_king, None);
    assert_eq!(d.nnue_king_buckets, 1);
    assert_eq!(d.nnue_piece_indices, 12 * 64);
    assert_eq!(d.nnue_dimensions, d.nnue_piece_indices);
}

#[test]
fn test_two_boards_doubles_max_pieces() {
    let mut v = templates::crazyhouse();
    v.board_mut().two_boards = true;
    v.conclude();
    assert_eq!(v.derived().nnue_max_pieces, 64);
}

#[test]
fn test_concluded_variants_shared_across_threads() {
    let variants = VariantMap::with_builtins();
    let xiangqi = variants.get("xiangqi").cloned().unwrap();
    let handle = std::thread::spawn(move || xiangqi.derived().nnue_dimensions);
    assert_eq!(handle.join().unwrap(), 10530);
}

#[test]
fn test_summary_json() {
    let v = templates::xiangqi();
    let json = serde_json::to_value(v.summary()).unwrap();
    assert_eq!(json["name"], "xiangqi");
    assert_eq!(json["files"], 9);
    assert_eq!(json["ranks"], 10);
    assert_eq!(json["nnue_king"], "king");
    assert_eq!(json["nnue_king_buckets"], 9);
    assert_eq!(json["pieces"].as_array().map(Vec::len), Some(7));
    assert!(json.get("nnue_alias").is_none());
}
