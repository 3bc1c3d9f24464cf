//! Reader for variant definitions.
//!
//! The format is the INI dialect used by fairy chess engines:
//!
//! ```text
//! # comment
//! [name]            new variant on the default (orthodox) rules
//! [name:parent]     copy of a registered or built-in variant
//! key = value
//! ```
//!
//! Piece declarations (`knight = n`, `customPiece1 = a:mW`, `queen = -`)
//! and `pieceToCharTable` are applied before every other key of a section,
//! so rules that name pieces by letter see the final piece set.

use crate::bitboard::{parse_file, parse_rank, Bitboard};
use crate::error::ConfigError;
use crate::pieces::PieceType;
use crate::types::*;
use crate::utils::parse_bool;
use crate::variant::Variant;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Variants read from one source, in order of first definition.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub variants: Vec<Variant>,
    /// Problems found in strict mode. Always empty in lenient mode.
    pub errors: Vec<ConfigError>,
}

struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    line: usize,
}

struct Section<'a> {
    name: &'a str,
    parent: Option<&'a str>,
    line: usize,
    entries: Vec<Entry<'a>>,
}

enum KeyError {
    Unknown,
    Invalid,
}

type KeyResult = Result<(), KeyError>;

/// Parses every section of `source`.
///
/// `parent` resolves `[name:parent]` headers that don't refer to a section
/// defined earlier in the same source. `registered` tells whether a name is
/// already taken outside this source, which strict mode rejects.
/// In strict mode a section with any problem is left out of the output and
/// its problems are returned; in lenient mode problems are logged, bad keys
/// keep their inherited value and later duplicates replace earlier ones.
pub fn parse_variants<P, R>(source: &str, strict: bool, parent: P, registered: R) -> ParseOutput
where
    P: Fn(&str) -> Option<Variant>,
    R: Fn(&str) -> bool,
{
    let mut out = ParseOutput::default();
    let report = |errors: &mut Vec<ConfigError>, error: ConfigError| {
        if strict {
            errors.push(error);
        } else {
            tracing::warn!("{error}");
        }
    };

    let (sections, syntax_errors) = split_sections(source);
    for error in syntax_errors {
        report(&mut out.errors, error);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for section in sections {
        let mut problems = Vec::new();
        if !seen.insert(section.name) || (strict && registered(section.name)) {
            report(
                &mut problems,
                ConfigError::DuplicateVariant { variant: section.name.to_string(), line: section.line },
            );
        }

        let base = match section.parent {
            Some(name) => out
                .variants
                .iter()
                .find(|v| v.name() == name)
                .cloned()
                .or_else(|| parent(name)),
            None => Some(Variant::new(section.name)),
        };
        let Some(base) = base else {
            report(
                &mut out.errors,
                ConfigError::UnknownParent {
                    variant: section.name.to_string(),
                    parent: section.parent.unwrap_or_default().to_string(),
                },
            );
            continue;
        };

        let mut variant = base.derive_child(section.name);
        let (piece_entries, rule_entries): (Vec<_>, Vec<_>) =
            section.entries.iter().partition(|e| is_piece_key(e.key));
        for entry in piece_entries.into_iter().chain(rule_entries) {
            let result = apply_key(&mut variant, entry.key, entry.value);
            let error = match result {
                Ok(()) => continue,
                Err(KeyError::Unknown) => ConfigError::UnknownKey {
                    variant: section.name.to_string(),
                    key: entry.key.to_string(),
                    line: entry.line,
                },
                Err(KeyError::Invalid) => ConfigError::InvalidValue {
                    variant: section.name.to_string(),
                    key: entry.key.to_string(),
                    value: entry.value.to_string(),
                    line: entry.line,
                },
            };
            report(&mut problems, error);
        }

        variant.conclude();
        if strict {
            problems.extend(variant.piece_conflicts().iter().map(|c| ConfigError::PieceConflict {
                variant: section.name.to_string(),
                letter: c.letter,
                evicted: c.evicted.to_string(),
                incoming: c.incoming.to_string(),
            }));
            problems.extend(variant.rule_problems().into_iter().map(|reason| ConfigError::Inconsistent {
                variant: section.name.to_string(),
                reason,
            }));
        }

        if !problems.is_empty() {
            out.errors.extend(problems);
            continue;
        }
        tracing::debug!(variant = %variant.name(), parent = ?section.parent, "parsed variant");
        match out.variants.iter_mut().find(|v| v.name() == variant.name()) {
            Some(slot) => *slot = variant,
            None => out.variants.push(variant),
        }
    }
    out
}

/// Splits the source into sections, collecting lines that don't parse.
fn split_sections(source: &str) -> (Vec<Section<'_>>, Vec<ConfigError>) {
    let mut sections: Vec<Section<'_>> = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        if let Some(header) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let (name, parent) = match header.split_once(':') {
                Some((name, parent)) => (name.trim(), Some(parent.trim())),
                None => (header.trim(), None),
            };
            if name.is_empty() || parent.is_some_and(str::is_empty) {
                errors.push(ConfigError::Syntax { line, text: text.to_string() });
                continue;
            }
            sections.push(Section { name, parent, line, entries: Vec::new() });
            continue;
        }

        let Some((key, value)) = text.split_once('=') else {
            errors.push(ConfigError::Syntax { line, text: text.to_string() });
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            errors.push(ConfigError::Syntax { line, text: text.to_string() });
            continue;
        }
        match sections.last_mut() {
            Some(section) => section.entries.push(Entry { key, value, line }),
            None => errors.push(ConfigError::NoSection { line, key: key.to_string() }),
        }
    }
    (sections, errors)
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn is_piece_key(key: &str) -> bool {
    key == "pieceToCharTable" || PieceType::from_name(key).is_some()
}

// ============================================================================
// Value syntax
// ============================================================================

fn bool_value(s: &str) -> Result<bool, KeyError> {
    parse_bool(s).ok_or(KeyError::Invalid)
}

fn int_value(s: &str) -> Result<u32, KeyError> {
    s.parse().map_err(|_| KeyError::Invalid)
}

fn file_value(s: &str) -> Result<File, KeyError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => parse_file(c).ok_or(KeyError::Invalid),
        _ => Err(KeyError::Invalid),
    }
}

fn rank_value(s: &str) -> Result<Rank, KeyError> {
    parse_rank(s).ok_or(KeyError::Invalid)
}

fn region_value(s: &str) -> Result<Bitboard, KeyError> {
    Bitboard::parse_region(s).ok_or(KeyError::Invalid)
}

/// Game result value seen from the side to move.
fn score_value(s: &str) -> Result<Value, KeyError> {
    match s {
        "win" => Ok(VALUE_MATE),
        "loss" => Ok(-VALUE_MATE),
        "draw" => Ok(VALUE_DRAW),
        _ => Err(KeyError::Invalid),
    }
}

fn enum_value<T>(s: &str, from_name: fn(&str) -> Option<T>) -> Result<T, KeyError> {
    from_name(&s.to_ascii_lowercase()).ok_or(KeyError::Invalid)
}

/// A single piece type, by letter of an active piece or by name.
fn piece_value(v: &Variant, s: &str) -> Result<PieceType, KeyError> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(pt) = v.pieces().piece_type_from_char(c) {
            return Ok(pt);
        }
    }
    PieceType::from_name(s).ok_or(KeyError::Invalid)
}

/// Piece type or `-` for none.
fn optional_piece_value(v: &Variant, s: &str) -> Result<PieceType, KeyError> {
    if s == "-" { Ok(PieceType::NONE) } else { piece_value(v, s) }
}

/// Letters of active pieces, `-` for the empty list, `*` for all pieces.
fn piece_list_value(v: &Variant, s: &str) -> Result<Vec<PieceType>, KeyError> {
    match s {
        "-" | "" => Ok(Vec::new()),
        "*" => Ok(vec![PieceType::ALL_PIECES]),
        _ => s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| v.pieces().piece_type_from_char(c).ok_or(KeyError::Invalid))
            .collect(),
    }
}

/// `p:g s:g` style pairs of a piece letter and a value.
fn pair_list(s: &str) -> Result<SmallVec<[(char, &str); 8]>, KeyError> {
    s.split_whitespace()
        .map(|token| {
            let (letter, value) = token.split_once(':').ok_or(KeyError::Invalid)?;
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !value.is_empty() => Ok((c, value)),
                _ => Err(KeyError::Invalid),
            }
        })
        .collect()
}

fn piece_int_pairs(v: &Variant, s: &str) -> Result<SmallVec<[(PieceType, i32); 8]>, KeyError> {
    pair_list(s)?
        .into_iter()
        .map(|(c, value)| {
            let pt = v.pieces().piece_type_from_char(c).ok_or(KeyError::Invalid)?;
            let n = value.parse().map_err(|_| KeyError::Invalid)?;
            Ok((pt, n))
        })
        .collect()
}

/// `mobilityRegionWhiteKing` → (white, king).
fn mobility_region_key(key: &str) -> Option<(Color, PieceType)> {
    let rest = key.strip_prefix("mobilityRegion")?;
    let (color, name) = if let Some(name) = rest.strip_prefix("White") {
        (Color::White, name)
    } else {
        (Color::Black, rest.strip_prefix("Black")?)
    };
    let mut chars = name.chars();
    let first = chars.next()?;
    let name = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
    PieceType::from_name(&name).map(|pt| (color, pt))
}

// ============================================================================
// Key application
// ============================================================================

fn apply_piece_key(v: &mut Variant, pt: PieceType, value: &str) -> KeyResult {
    if value == "-" {
        v.remove_piece(pt);
        return Ok(());
    }
    let (letters, betza) = match value.split_once(':') {
        Some((letters, betza)) if pt.is_custom() && !betza.is_empty() => (letters, betza),
        Some(_) => return Err(KeyError::Invalid),
        None if pt.is_custom() => return Err(KeyError::Invalid),
        None => (value, ""),
    };
    let mut chars = letters.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), synonym, None) if c.is_ascii_alphabetic() && synonym.is_none_or(|s| s.is_ascii_alphabetic()) => {
            v.add_piece_full(pt, c, betza, synonym.unwrap_or(' '));
            Ok(())
        }
        _ => Err(KeyError::Invalid),
    }
}

fn apply_key(v: &mut Variant, key: &str, value: &str) -> KeyResult {
    if let Some(pt) = PieceType::from_name(key) {
        return apply_piece_key(v, pt, value);
    }
    if let Some((color, pt)) = mobility_region_key(key) {
        let region = region_value(value)?;
        v.movement_mut().mobility_region[color.index()][pt.index()] = region;
        return Ok(());
    }

    match key {
        // Board
        "variantTemplate" => v.board_mut().variant_template = value.to_string(),
        "pieceToCharTable" => v.board_mut().piece_to_char_table = value.to_string(),
        "nnueAlias" => v.board_mut().nnue_alias = value.to_string(),
        "maxRank" => v.board_mut().max_rank = rank_value(value)?,
        "maxFile" => v.board_mut().max_file = file_value(value)?,
        "chess960" => v.board_mut().chess960 = bool_value(value)?,
        "twoBoards" => v.board_mut().two_boards = bool_value(value)?,
        "pocketSize" => v.board_mut().pocket_size = int_value(value)?,
        "startFen" => v.board_mut().start_fen = value.to_string(),

        // Movement
        "kingType" => v.movement_mut().king_type = piece_value(v, value)?,
        "doubleStep" => v.movement_mut().double_step = bool_value(value)?,
        "doubleStepRank" => v.movement_mut().double_step_rank = rank_value(value)?,
        "doubleStepRankMin" => v.movement_mut().double_step_rank_min = rank_value(value)?,
        "enPassantRegion" => v.movement_mut().en_passant_region = region_value(value)?,
        "cambodianMoves" => v.movement_mut().cambodian_moves = bool_value(value)?,
        "diagonalLines" => v.movement_mut().diagonal_lines = region_value(value)?,
        "pass" => v.movement_mut().pass = bool_value(value)?,
        "passOnStalemate" => v.movement_mut().pass_on_stalemate = bool_value(value)?,
        "flyingGeneral" => v.movement_mut().flying_general = bool_value(value)?,
        "soldierPromotionRank" => v.movement_mut().soldier_promotion_rank = rank_value(value)?,
        "immobilityIllegal" => v.movement_mut().immobility_illegal = bool_value(value)?,

        // Promotion
        "promotionRank" => v.promotion_mut().promotion_rank = rank_value(value)?,
        "promotionPieceTypes" => {
            let types = piece_list_value(v, value)?;
            v.promotion_mut().set_promotion_piece_types(types);
        }
        "sittuyinPromotion" => v.promotion_mut().sittuyin_promotion = bool_value(value)?,
        "promotionLimit" => {
            let pairs = piece_int_pairs(v, value)?;
            let promotion = v.promotion_mut();
            for (pt, n) in pairs {
                promotion.promotion_limit[pt.index()] = u32::try_from(n).map_err(|_| KeyError::Invalid)?;
            }
        }
        "promotedPieceType" => {
            let pairs = pair_list(value)?
                .into_iter()
                .map(|(c, to)| {
                    let from = v.pieces().piece_type_from_char(c).ok_or(KeyError::Invalid)?;
                    Ok((from, piece_value(v, to)?))
                })
                .collect::<Result<SmallVec<[(PieceType, PieceType); 8]>, KeyError>>()?;
            let promotion = v.promotion_mut();
            promotion.promoted_piece_type = [PieceType::NONE; crate::pieces::PIECE_TYPE_NB];
            for (from, to) in pairs {
                promotion.promoted_piece_type[from.index()] = to;
            }
        }
        "piecePromotionOnCapture" => v.promotion_mut().piece_promotion_on_capture = bool_value(value)?,
        "mandatoryPawnPromotion" => v.promotion_mut().mandatory_pawn_promotion = bool_value(value)?,
        "mandatoryPiecePromotion" => v.promotion_mut().mandatory_piece_promotion = bool_value(value)?,
        "pieceDemotion" => v.promotion_mut().piece_demotion = bool_value(value)?,

        // Drops
        "pieceDrops" => v.drops_mut().piece_drops = bool_value(value)?,
        "dropLoop" => v.drops_mut().drop_loop = bool_value(value)?,
        "capturesToHand" => v.drops_mut().captures_to_hand = bool_value(value)?,
        "firstRankPawnDrops" => v.drops_mut().first_rank_pawn_drops = bool_value(value)?,
        "promotionZonePawnDrops" => v.drops_mut().promotion_zone_pawn_drops = bool_value(value)?,
        "dropOnTop" => v.drops_mut().drop_on_top = bool_value(value)?,
        "enclosingDrop" => v.drops_mut().enclosing_drop = enum_value(value, EnclosingRule::from_name)?,
        "enclosingDropStart" => v.drops_mut().enclosing_drop_start = region_value(value)?,
        "whiteDropRegion" => v.drops_mut().white_drop_region = region_value(value)?,
        "blackDropRegion" => v.drops_mut().black_drop_region = region_value(value)?,
        "sittuyinRookDrop" => v.drops_mut().sittuyin_rook_drop = bool_value(value)?,
        "dropOppositeColoredBishop" => v.drops_mut().drop_opposite_colored_bishop = bool_value(value)?,
        "dropPromoted" => v.drops_mut().drop_promoted = bool_value(value)?,
        "dropNoDoubled" => v.drops_mut().drop_no_doubled = optional_piece_value(v, value)?,
        "dropNoDoubledCount" => v.drops_mut().drop_no_doubled_count = int_value(value)?,
        "mustDrop" => v.drops_mut().must_drop = bool_value(value)?,
        "mustDropType" => {
            let pt = if value == "*" { PieceType::ALL_PIECES } else { piece_value(v, value)? };
            v.drops_mut().must_drop_type = pt;
        }
        "freeDrops" => v.drops_mut().free_drops = bool_value(value)?,

        // Castling
        "castling" => v.castling_mut().castling = bool_value(value)?,
        "castlingDroppedPiece" => v.castling_mut().castling_dropped_piece = bool_value(value)?,
        "castlingKingsideFile" => v.castling_mut().kingside_file = file_value(value)?,
        "castlingQueensideFile" => v.castling_mut().queenside_file = file_value(value)?,
        "castlingRank" => v.castling_mut().rank = rank_value(value)?,
        "castlingKingFile" => v.castling_mut().king_file = file_value(value)?,
        "castlingKingPiece" => v.castling_mut().king_piece = piece_value(v, value)?,
        "castlingRookPiece" => v.castling_mut().rook_piece = piece_value(v, value)?,

        // Gating
        "gating" => v.gating_mut().gating = bool_value(value)?,
        "arrowGating" => v.gating_mut().arrow_gating = bool_value(value)?,
        "seirawanGating" => v.gating_mut().seirawan_gating = bool_value(value)?,

        // Captures
        "mustCapture" => v.captures_mut().must_capture = bool_value(value)?,
        "blastOnCapture" => v.captures_mut().blast_on_capture = bool_value(value)?,
        "flipEnclosedPieces" => v.captures_mut().flip_enclosed_pieces = enum_value(value, EnclosingRule::from_name)?,

        // Checks
        "checking" => v.checks_mut().checking = bool_value(value)?,
        "dropChecks" => v.checks_mut().drop_checks = bool_value(value)?,
        "checkCounting" => v.checks_mut().check_counting = bool_value(value)?,
        "makpongRule" => v.checks_mut().makpong_rule = bool_value(value)?,
        "shogiPawnDropMateIllegal" => v.checks_mut().shogi_pawn_drop_mate_illegal = bool_value(value)?,
        "shatarMateRule" => v.checks_mut().shatar_mate_rule = bool_value(value)?,
        "bikjangRule" => v.checks_mut().bikjang_rule = bool_value(value)?,

        // Game end
        "nMoveRule" => v.end_mut().n_move_rule = int_value(value)?,
        "nFoldRule" => v.end_mut().n_fold_rule = int_value(value)?,
        "nFoldValue" => v.end_mut().n_fold_value = score_value(value)?,
        "nFoldValueAbsolute" => v.end_mut().n_fold_value_absolute = bool_value(value)?,
        "perpetualCheckIllegal" => v.end_mut().perpetual_check_illegal = bool_value(value)?,
        "moveRepetitionIllegal" => v.end_mut().move_repetition_illegal = bool_value(value)?,
        "chasingRule" => v.end_mut().chasing_rule = enum_value(value, ChasingRule::from_name)?,
        "stalemateValue" => v.end_mut().stalemate_value = score_value(value)?,
        "stalematePieceCount" => v.end_mut().stalemate_piece_count = bool_value(value)?,
        "checkmateValue" => v.end_mut().checkmate_value = score_value(value)?,
        "extinctionValue" => {
            v.end_mut().extinction_value = if value == "none" { None } else { Some(score_value(value)?) };
        }
        "extinctionClaim" => v.end_mut().extinction_claim = bool_value(value)?,
        "extinctionPseudoRoyal" => v.end_mut().extinction_pseudo_royal = bool_value(value)?,
        "extinctionPieceTypes" => {
            let types = piece_list_value(v, value)?;
            v.end_mut().extinction_piece_types = types.into_iter().collect();
        }
        "extinctionPieceCount" => v.end_mut().extinction_piece_count = int_value(value)?,
        "extinctionOpponentPieceCount" => v.end_mut().extinction_opponent_piece_count = int_value(value)?,
        "flagPiece" => {
            let pt = optional_piece_value(v, value)?;
            v.end_mut().flag_piece = (!pt.is_none()).then_some(pt);
        }
        "whiteFlag" => v.end_mut().white_flag = region_value(value)?,
        "blackFlag" => v.end_mut().black_flag = region_value(value)?,
        "flagMove" => v.end_mut().flag_move = bool_value(value)?,
        "connectN" => v.end_mut().connect_n = int_value(value)?,
        "materialCounting" => v.end_mut().material_counting = enum_value(value, MaterialCounting::from_name)?,
        "countingRule" => v.end_mut().counting_rule = enum_value(value, CountingRule::from_name)?,

        // Evaluation
        "pieceValueMg" | "pieceValueEg" => {
            let phase = if key == "pieceValueMg" { Phase::Middlegame } else { Phase::Endgame };
            let pairs = piece_int_pairs(v, value)?;
            let eval = v.eval_mut();
            for (pt, n) in pairs {
                eval.piece_value[phase as usize][pt.index()] = n;
            }
        }

        _ => return Err(KeyError::Unknown),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::templates;

    fn parse(source: &str, strict: bool) -> ParseOutput {
        parse_variants(source, strict, templates::by_name, |_| false)
    }

    #[test]
    fn test_parse_inherits_parent() {
        let out = parse(
            "[mini:chess]\nmaxRank = 6\nmaxFile = f\nstartFen = rnbqkr/pppppp/6/6/PPPPPP/RNBQKR w - - 0 1\ncastling = false\n",
            true,
        );
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let v = &out.variants[0];
        assert_eq!(v.name(), "mini");
        assert_eq!(v.board().max_rank, RANK_6);
        assert_eq!(v.board().max_file, FILE_F);
        assert!(v.is_concluded());
        assert_eq!(v.derived().nnue_max_pieces, 24);
        assert_eq!(v.derived().nnue_king_buckets, 36);
    }

    #[test]
    fn test_piece_keys_apply_first() {
        // promotionPieceTypes names 'a' before the amazon is declared.
        let source = "[amazons:chess]\npromotionPieceTypes = aq\namazon = a\n";
        let out = parse(source, true);
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let types: Vec<_> = out.variants[0].promotion().promotion_piece_types.iter().copied().collect();
        assert_eq!(types, vec![PieceType::AMAZON, PieceType::QUEEN]);
    }

    #[test]
    fn test_custom_piece_and_comments() {
        let source = "; leading comment\n[custom:chess]\ncustomPiece1 = a:mWcF # trailing\n";
        let out = parse(source, true);
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let v = &out.variants[0];
        let pt = PieceType::custom(0).unwrap();
        assert_eq!(v.pieces().custom_piece_betza(pt), "mWcF");
        assert_eq!(v.pieces().piece_type_char(pt), Some('a'));
    }

    #[test]
    fn test_strict_collects_errors() {
        let source = "[bad:chess]\nnoSuchKey = 1\nmaxRank = 99\n[good:chess]\ncastling = false\n";
        let out = parse(source, true);
        assert_eq!(out.variants.len(), 1);
        assert_eq!(out.variants[0].name(), "good");
        assert_eq!(out.errors.len(), 2);
        assert!(matches!(out.errors[0], ConfigError::UnknownKey { line: 2, .. }));
        assert!(matches!(out.errors[1], ConfigError::InvalidValue { line: 3, .. }));
    }

    #[test]
    fn test_lenient_keeps_inherited_values() {
        let source = "[bad:chess]\nnoSuchKey = 1\nmaxRank = 99\npieceDrops = true\n";
        let out = parse(source, false);
        assert!(out.errors.is_empty());
        let v = &out.variants[0];
        assert_eq!(v.board().max_rank, RANK_8);
        assert!(v.drops().piece_drops);
    }

    #[test]
    fn test_unknown_parent_and_syntax() {
        let out = parse("[x:nosuchvariant]\nfoo\n", true);
        assert!(out.variants.is_empty());
        assert!(out.errors.iter().any(|e| matches!(e, ConfigError::UnknownParent { .. })));
        assert!(out.errors.iter().any(|e| matches!(e, ConfigError::Syntax { line: 2, .. })));

        let out = parse("maxRank = 4\n", true);
        assert!(matches!(out.errors[0], ConfigError::NoSection { line: 1, .. }));
    }

    #[test]
    fn test_duplicates() {
        let source = "[twice:chess]\nmaxRank = 7\n[twice:chess]\nmaxRank = 6\n";
        let out = parse(source, false);
        assert_eq!(out.variants.len(), 1);
        assert_eq!(out.variants[0].board().max_rank, RANK_6);

        let out = parse(source, true);
        assert!(out.errors.iter().any(|e| matches!(e, ConfigError::DuplicateVariant { line: 3, .. })));
    }

    #[test]
    fn test_strict_reports_letter_conflict() {
        let out = parse("[clash:chess]\ncannon = n\n", true);
        assert!(out.variants.is_empty());
        assert!(out
            .errors
            .iter()
            .any(|e| matches!(e, ConfigError::PieceConflict { letter: 'n', .. })));
    }

    #[test]
    fn test_parent_from_same_source() {
        let source = "[base:chess]\npieceDrops = true\ncapturesToHand = true\n[child:base]\nmustCapture = true\n";
        let out = parse(source, true);
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let child = &out.variants[1];
        assert!(child.drops().captures_to_hand);
        assert!(child.captures().must_capture);
        assert!(child.derived().nnue_use_pockets);
    }

    #[test]
    fn test_mobility_region_and_values() {
        let source = "[palace:chess]\nmobilityRegionWhiteKing = d1 e1 f1 d2 e2 f2\nmobilityRegionBlackKing = d7 e7 f7 d8 e8 f8\nstalemateValue = loss\nextinctionValue = none\nchasingRule = axf\n";
        let out = parse(source, true);
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let v = &out.variants[0];
        assert_eq!(v.movement().region(Color::White, PieceType::KING).count(), 6);
        assert_eq!(v.end().stalemate_value, -VALUE_MATE);
        assert_eq!(v.end().chasing_rule, ChasingRule::Axf);
        assert_eq!(v.derived().nnue_king_buckets, 6);
        assert!(!v.derived().endgame_eval);
    }
}
