use crate::error::{Error, Result};
use crate::seeds::Seeds;
use crate::token::{case_variants, dedup_preserving_order};

/// Pairs an original token with the number of case variants it
/// produced (1 when expansion was off). Reporting only; generation
/// never reads these.
#[derive(Debug, Clone)]
pub struct ExpansionRecord {
    pub original: String,
    pub variants: usize,
}

/// The deduplicated, ordered working set of tokens used as the alphabet
/// for sequence generation. Built once per run, read-only afterwards.
/// Invariant: no duplicates, no empty entries.
#[derive(Debug)]
pub struct TokenPool {
    tokens: Vec<String>,
    char_lens: Vec<usize>,
    expansions: Vec<ExpansionRecord>,
}

impl TokenPool {
    /// Merge the seed categories, optionally case-expand, deduplicate
    /// keeping first occurrences, and validate.
    pub fn build(seeds: &Seeds, case_expand: bool, max_variants: usize) -> Result<Self> {
        let originals: Vec<String> = seeds
            .ordered()
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if originals.is_empty() {
            return Err(Error::NoTokens);
        }

        let mut expansions = Vec::with_capacity(originals.len());
        let working = if case_expand {
            let mut expanded = Vec::new();
            for original in &originals {
                let variants = case_variants(original, max_variants);
                expansions.push(ExpansionRecord {
                    original: original.clone(),
                    variants: variants.len(),
                });
                expanded.extend(variants);
            }
            expanded
        } else {
            for original in &originals {
                expansions.push(ExpansionRecord {
                    original: original.clone(),
                    variants: 1,
                });
            }
            originals
        };

        let tokens = dedup_preserving_order(working);
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(Error::EmptyToken);
        }

        let char_lens = tokens.iter().map(|t| t.chars().count()).collect();

        Ok(Self {
            tokens,
            char_lens,
            expansions,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Per-token character lengths, parallel to `tokens()`.
    pub fn char_lens(&self) -> &[usize] {
        &self.char_lens
    }

    pub fn expansions(&self) -> &[ExpansionRecord] {
        &self.expansions
    }

    /// Tokens with their character lengths, in pool order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, usize)> + '_ {
        self.tokens
            .iter()
            .zip(self.char_lens.iter())
            .map(|(t, &l)| (t.as_str(), l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(words: &[&str], numbers: &[&str], symbols: &[&str]) -> Seeds {
        Seeds {
            words: words.iter().map(|s| s.to_string()).collect(),
            numbers: numbers.iter().map(|s| s.to_string()).collect(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_merges_categories_in_order() {
        let pool = TokenPool::build(&seeds(&["a"], &["1"], &["!"]), false, 1024).unwrap();
        assert_eq!(pool.tokens(), &["a", "1", "!"]);
        assert_eq!(pool.char_lens(), &[1, 1, 1]);
    }

    #[test]
    fn test_build_dedups_first_occurrence_wins() {
        let pool = TokenPool::build(&seeds(&["a", "b", "a"], &["b"], &[]), false, 1024).unwrap();
        assert_eq!(pool.tokens(), &["a", "b"]);
        // Records cover every original, including the duplicates.
        assert_eq!(pool.expansions().len(), 4);
    }

    #[test]
    fn test_build_rejects_empty_input() {
        match TokenPool::build(&seeds(&[], &[], &[]), false, 1024) {
            Err(Error::NoTokens) => {}
            other => panic!("expected NoTokens, got {:?}", other),
        }

        // Empty strings are dropped before the emptiness check.
        match TokenPool::build(&seeds(&["", ""], &[], &[]), false, 1024) {
            Err(Error::NoTokens) => {}
            other => panic!("expected NoTokens, got {:?}", other),
        }
    }

    #[test]
    fn test_case_expansion_records_variant_counts() {
        let pool = TokenPool::build(&seeds(&["ab"], &["12"], &[]), true, 1024).unwrap();
        assert_eq!(pool.tokens(), &["ab", "aB", "Ab", "AB", "12"]);

        let records = pool.expansions();
        assert_eq!(records[0].original, "ab");
        assert_eq!(records[0].variants, 4);
        assert_eq!(records[1].original, "12");
        assert_eq!(records[1].variants, 1);
    }

    #[test]
    fn test_case_expansion_dedups_across_tokens() {
        // "ab" and "AB" expand to the same variant set.
        let pool = TokenPool::build(&seeds(&["ab", "AB"], &[], &[]), true, 1024).unwrap();
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_char_lens_count_characters_not_bytes() {
        let pool = TokenPool::build(&seeds(&["über"], &[], &[]), false, 1024).unwrap();
        assert_eq!(pool.char_lens(), &[4]);
    }
}
