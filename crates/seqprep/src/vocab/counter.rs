//! # Token Frequency Counter

use std::collections::{HashMap, HashSet};

use crate::types::IndexTokenTable;
use crate::vocab::{Vocabulary, VocabularyOptions};

/// Accumulated stats for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenStats {
    /// The number of observations.
    count: usize,

    /// Rank of the first observation, for deterministic tie-breaks.
    first_seen: usize,
}

/// Frequency-accumulation builder for [`Vocabulary`].
///
/// Counts are mutable only while the counter is held;
/// [`TokenCounter::into_vocabulary`] consumes the counter, so a frozen
/// vocabulary can never be refit.
#[derive(Debug, Default)]
pub struct TokenCounter {
    /// The per-token observation stats.
    token_stats: HashMap<String, TokenStats>,
}

impl TokenCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update counts inplace from a token iterator.
    pub fn update_from_tokens<I>(
        &mut self,
        tokens: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            let first_seen = self.token_stats.len();
            let stats = self
                .token_stats
                .entry(token.as_ref().to_string())
                .or_insert(TokenStats {
                    count: 0,
                    first_seen,
                });
            stats.count += 1;
        }
    }

    /// Update counts inplace from an iterator of token sequences.
    pub fn update_from_sequences<S>(
        &mut self,
        sequences: S,
    ) where
        S: IntoIterator,
        S::Item: IntoIterator,
        <S::Item as IntoIterator>::Item: AsRef<str>,
    {
        for sequence in sequences {
            self.update_from_tokens(sequence);
        }
    }

    /// The number of distinct tokens observed.
    pub fn distinct(&self) -> usize {
        self.token_stats.len()
    }

    /// Returns true if no tokens have been observed.
    pub fn is_empty(&self) -> bool {
        self.token_stats.is_empty()
    }

    /// The observed count for a token.
    pub fn count(&self, token: &str) -> usize {
        self.token_stats.get(token).map_or(0, |stats| stats.count)
    }

    /// Consume the counter and freeze a [`Vocabulary`].
    ///
    /// Special tokens are inserted first, in canonical order. Corpus tokens
    /// follow in descending frequency, ties broken by first appearance in
    /// the corpus. Insertion stops once `max_size` non-special entries are
    /// placed, or once frequency drops below `min_freq`; special tokens
    /// count against neither bound.
    ///
    /// A corpus token that collides with a configured special surface form
    /// keeps the reserved low index and is not inserted twice.
    pub fn into_vocabulary(
        self,
        options: &VocabularyOptions,
    ) -> Vocabulary {
        let mut ranked: Vec<(String, TokenStats)> = self.token_stats.into_iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then(a.first_seen.cmp(&b.first_seen))
        });

        let mut index_table: IndexTokenTable =
            options.specials.in_order().map(str::to_string).collect();
        let reserved: HashSet<String> = index_table.iter().cloned().collect();

        let budget = options.max_size.unwrap_or(usize::MAX);
        let mut placed = 0;

        for (token, stats) in ranked {
            if stats.count < options.min_freq || placed == budget {
                break;
            }
            if reserved.contains(&token) {
                continue;
            }
            index_table.push(token);
            placed += 1;
        }

        log::debug!(
            "froze vocabulary: {} entries ({} reserved)",
            index_table.len(),
            reserved.len()
        );

        Vocabulary::from_parts(index_table, options.specials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::SpecialTokens;

    #[test]
    fn test_counts() {
        let mut counter = TokenCounter::new();
        assert!(counter.is_empty());

        counter.update_from_tokens(["a", "b", "a"]);
        counter.update_from_tokens(["b", "a"]);

        assert_eq!(counter.distinct(), 2);
        assert_eq!(counter.count("a"), 3);
        assert_eq!(counter.count("b"), 2);
        assert_eq!(counter.count("missing"), 0);
    }

    #[test]
    fn test_frequency_ranking_with_first_seen_ties() {
        let mut counter = TokenCounter::new();
        counter.update_from_sequences([vec!["a", "b", "c"], vec!["b", "c"]]);

        let options = VocabularyOptions::default()
            .with_specials(SpecialTokens::none());
        let vocab = counter.into_vocabulary(&options);

        // b and c tie at frequency 2; b was seen first. a trails at 1.
        assert_eq!(vocab.token_at(0), Some("b"));
        assert_eq!(vocab.token_at(1), Some("c"));
        assert_eq!(vocab.token_at(2), Some("a"));
    }

    #[test]
    fn test_min_freq_cutoff() {
        let mut counter = TokenCounter::new();
        counter.update_from_tokens(["the", "the", "the", "quick", "quick", "brown"]);

        let options = VocabularyOptions::default()
            .with_specials(SpecialTokens::none())
            .with_min_freq(2);
        let vocab = counter.into_vocabulary(&options);

        assert!(vocab.contains("the"));
        assert!(vocab.contains("quick"));
        assert!(!vocab.contains("brown"));
    }

    #[test]
    fn test_max_size_excludes_specials() {
        let mut counter = TokenCounter::new();
        counter.update_from_tokens(["a", "a", "b", "b", "c"]);

        let options = VocabularyOptions::default().with_max_size(2);
        let vocab = counter.into_vocabulary(&options);

        // 4 specials + the 2 highest-frequency corpus tokens.
        assert_eq!(vocab.len(), 4 + 2);
        assert!(vocab.contains("a"));
        assert!(vocab.contains("b"));
        assert!(!vocab.contains("c"));
    }

    #[test]
    fn test_special_collision_keeps_reserved_index() {
        let mut counter = TokenCounter::new();
        counter.update_from_tokens(["<unk>", "<unk>", "word"]);

        let options = VocabularyOptions::default();
        let vocab = counter.into_vocabulary(&options);

        assert_eq!(vocab.index_of("<unk>"), Some(0));
        assert_eq!(vocab.len(), 4 + 1);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = ["d a b c a", "c b d d", "e e e a"];

        let fit = || {
            let mut counter = TokenCounter::new();
            counter.update_from_sequences(corpus.iter().map(|line| line.split_whitespace()));
            counter.into_vocabulary(&VocabularyOptions::default())
        };

        // Hash-map iteration order never leaks into the ranking.
        for _ in 0..10 {
            assert_eq!(fit(), fit());
        }
    }

    #[test]
    fn test_empty_corpus_yields_specials_only() {
        let counter = TokenCounter::new();
        let vocab = counter.into_vocabulary(&VocabularyOptions::default());

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.token_at(0), Some("<unk>"));
        assert_eq!(vocab.token_at(3), Some("<eos>"));
    }
}
