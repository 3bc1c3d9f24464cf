// ============================================================================
// FEN helpers shared by the derivation step and the loader
// ============================================================================

/// Board part of a FEN: everything before the first whitespace.
///
/// Includes any in-hand suffix such as `[Pp]`; callers only count letters.
#[inline]
pub fn fen_board(fen: &str) -> &str {
    let fen = fen.trim_start();
    fen.split(char::is_whitespace).next().unwrap_or("")
}

/// Letters on the board part of a FEN that are not digits, row separators,
/// promotion markers or pocket brackets.
pub fn fen_piece_letters(fen: &str) -> impl Iterator<Item = char> + '_ {
    fen_board(fen)
        .chars()
        .filter(|c| !c.is_ascii_digit() && !matches!(c, '/' | '+' | '~' | '[' | ']' | '-' | '*'))
}

/// Parses the boolean spellings accepted in variant definitions.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_board() {
        assert_eq!(fen_board("8/8/8/8/8/8/8/K6k w - - 0 1"), "8/8/8/8/8/8/8/K6k");
        assert_eq!(fen_board("  rnbqkbnr/8[Pp] w"), "rnbqkbnr/8[Pp]");
        assert_eq!(fen_board(""), "");
    }

    #[test]
    fn test_fen_piece_letters() {
        let letters: String = fen_piece_letters("lnsgk+p/9[-] w 0 1").collect();
        assert_eq!(letters, "lnsgkp");
        assert_eq!(fen_piece_letters("10/10 w").count(), 0);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
