// Lenient integer syntax shared by subject directory names and label cells:
// surrounding whitespace, an optional sign, ASCII digits, and single
// underscores between digits ("1_000").

/// Whether `text` is an integer literal. Length is unbounded, so a name of
/// forty digits still counts.
pub fn is_integer(text: &str) -> bool {
    let s = text.trim();
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return false;
    }
    digits.chars().all(|c| c.is_ascii_digit() || c == '_') && !digits.contains("__")
}

/// Parse an integer literal into an `i64`; `None` if the syntax is wrong or
/// the value does not fit.
pub fn parse_integer(text: &str) -> Option<i64> {
    if !is_integer(text) {
        return None;
    }
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_names() {
        for name in ["0", "00012", "123", "-4", "+7", " 8 ", "1_000"] {
            assert!(is_integer(name), "{name:?} should be accepted");
        }
        for name in ["", "abc", ".DS_Store", "12a", "1.0", "_1", "1_", "1__0", "+", "--1"] {
            assert!(!is_integer(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn parse_values() {
        assert_eq!(parse_integer("1"), Some(1));
        assert_eq!(parse_integer(" 0 "), Some(0));
        assert_eq!(parse_integer("1_0"), Some(10));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("+00012"), Some(12));
        assert_eq!(parse_integer("0.5"), None);
        assert_eq!(parse_integer("yes"), None);
        assert_eq!(parse_integer("1__0"), None);
    }

    #[test]
    fn long_names_are_integers_but_do_not_fit_i64() {
        let long = "9".repeat(40);
        assert!(is_integer(&long));
        assert_eq!(parse_integer(&long), None);
    }
}
