// Fixed substitution table for characters OCR commonly confuses with digits
pub const DIGIT_CONFUSIONS: [(char, char); 4] = [('O', '0'), ('o', '0'), ('I', '1'), ('l', '1')];

/// Rewrites a date candidate so only digits and '/' separators remain.
/// Look-alike letters become digits first, then every other non-digit becomes '/'.
pub fn normalize_date_candidate(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            let c = DIGIT_CONFUSIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c);
            if c.is_ascii_digit() {
                c
            } else {
                '/'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_date_untouched() {
        assert_eq!(normalize_date_candidate("01/01/2000"), "01/01/2000");
    }

    #[test]
    fn test_letter_confusions() {
        assert_eq!(normalize_date_candidate("0l/0I/2OOO"), "01/01/2000");
        assert_eq!(normalize_date_candidate("o1/O1/199o"), "01/01/1990");
    }

    #[test]
    fn test_other_separators_become_slashes() {
        assert_eq!(normalize_date_candidate("01-01-2000"), "01/01/2000");
        assert_eq!(normalize_date_candidate("01.01.2000"), "01/01/2000");
        assert_eq!(normalize_date_candidate("DOB:01"), "/0//01");
    }

    #[test]
    fn test_lowercase_i_is_not_a_digit() {
        assert_eq!(normalize_date_candidate("i1/01/2000"), "/1/01/2000");
    }
}
