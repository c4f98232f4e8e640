use std::collections::HashSet;

/// Split a raw input string into atomic tokens.
///
/// Whitespace-separated input yields one token per part. A single
/// whitespace-free run longer than one character that is not purely
/// alphanumeric splits into one token per character, so a symbol run
/// like `!@#$` becomes four individually combinable tokens. Anything
/// else is a single token.
pub fn normalize_tokens(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() > 1 {
        return parts.into_iter().map(String::from).collect();
    }

    if raw.chars().count() > 1 && !raw.chars().all(char::is_alphanumeric) {
        return raw.chars().map(String::from).collect();
    }

    vec![raw.to_string()]
}

/// Produce the letter-case variants of a token, capped at `max_variants`.
///
/// Each alphabetic character contributes a `{lower, upper}` choice, every
/// other character only itself. The running product of choice counts is
/// checked prefix by prefix: full expansion is exponential in the number
/// of alphabetic characters, so once the product exceeds the cap the
/// exhaustive expansion is abandoned in favor of the fallback set
/// `[original, lower, upper, title]`. Results are unique, first-seen
/// order preserved.
pub fn case_variants(token: &str, max_variants: usize) -> Vec<String> {
    let mut choices: Vec<Vec<String>> = Vec::new();
    for ch in token.chars() {
        if ch.is_alphabetic() {
            let lower: String = ch.to_lowercase().collect();
            let upper: String = ch.to_uppercase().collect();
            if lower == upper {
                choices.push(vec![lower]);
            } else {
                choices.push(vec![lower, upper]);
            }
        } else {
            choices.push(vec![ch.to_string()]);
        }
    }

    let mut total: usize = 1;
    for choice in &choices {
        total = total.saturating_mul(choice.len());
        if total > max_variants {
            return dedup_preserving_order(vec![
                token.to_string(),
                token.to_lowercase(),
                token.to_uppercase(),
                title_case(token),
            ]);
        }
    }

    // Cartesian product, prefix-major: the leftmost position varies
    // slowest, lowercase before uppercase at each position.
    let mut variants: Vec<String> = vec![String::new()];
    for choice in &choices {
        let mut next = Vec::with_capacity(variants.len() * choice.len());
        for prefix in &variants {
            for cand in choice {
                let mut s = String::with_capacity(prefix.len() + cand.len());
                s.push_str(prefix);
                s.push_str(cand);
                next.push(s);
            }
        }
        variants = next;
    }

    dedup_preserving_order(variants)
}

/// Title-case a token: every alphabetic character that starts an
/// alphabetic run is uppercased, the rest of the run lowercased,
/// non-alphabetic characters pass through and reset the run.
pub fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut in_run = false;
    for ch in token.chars() {
        if ch.is_alphabetic() {
            if in_run {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Remove duplicates, keeping the first occurrence of each string.
pub(crate) fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_tokens("").is_empty());
        assert!(normalize_tokens("   \t ").is_empty());
    }

    #[test]
    fn test_normalize_whitespace_separated() {
        assert_eq!(normalize_tokens("omer faruk toptas"), vec!["omer", "faruk", "toptas"]);
        assert_eq!(normalize_tokens("  19 90\t2025 "), vec!["19", "90", "2025"]);
    }

    #[test]
    fn test_normalize_symbol_run_splits_per_character() {
        assert_eq!(normalize_tokens("!@#$"), vec!["!", "@", "#", "$"]);
    }

    #[test]
    fn test_normalize_mixed_run_splits_per_character() {
        // Not purely alphanumeric, so it splits like a symbol run.
        assert_eq!(normalize_tokens("ab!"), vec!["a", "b", "!"]);
    }

    #[test]
    fn test_normalize_single_word_stays_whole() {
        assert_eq!(normalize_tokens("omer"), vec!["omer"]);
        assert_eq!(normalize_tokens("1990"), vec!["1990"]);
        assert_eq!(normalize_tokens("!"), vec!["!"]);
    }

    #[test]
    fn test_case_variants_order_and_count() {
        assert_eq!(case_variants("ab", 1024), vec!["ab", "aB", "Ab", "AB"]);
        assert_eq!(case_variants("a1", 1024), vec!["a1", "A1"]);
        assert_eq!(case_variants("123", 1024), vec!["123"]);
    }

    #[test]
    fn test_case_variants_exhaustive_count_is_power_of_two() {
        // 5 alphabetic characters, well under the cap: 2^5 variants.
        let variants = case_variants("abcde", 1024);
        assert_eq!(variants.len(), 32);
    }

    #[test]
    fn test_case_variants_cap_fallback() {
        // Running product trips the cap at the third character.
        let variants = case_variants("abc", 4);
        assert_eq!(variants, vec!["abc", "ABC", "Abc"]);
    }

    #[test]
    fn test_case_variants_cap_boundary_not_tripped() {
        // 2^2 == cap exactly: still expanded exhaustively.
        assert_eq!(case_variants("ab", 4).len(), 4);
    }

    #[test]
    fn test_title_case_restarts_after_separator() {
        assert_eq!(title_case("abc-def"), "Abc-Def");
        assert_eq!(title_case("OMER"), "Omer");
        assert_eq!(title_case("a1b"), "A1B");
    }

    #[test]
    fn test_dedup_preserving_order() {
        let items = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_preserving_order(items), vec!["b", "a"]);
    }
}
