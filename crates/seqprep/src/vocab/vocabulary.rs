//! # Frozen Vocabulary

use crate::errors::{Result, SeqprepError};
use crate::types::{IndexSequence, IndexTokenTable, TokenIndexMap};
use crate::vocab::{SpecialTokens, TokenCounter};

/// Options for fitting a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabularyOptions {
    /// The reserved-symbol configuration.
    pub specials: SpecialTokens,

    /// Maximum number of corpus tokens to retain.
    ///
    /// Special tokens do not count against this bound.
    pub max_size: Option<usize>,

    /// Minimum observed frequency for a corpus token to be retained.
    ///
    /// Special tokens are exempt.
    pub min_freq: usize,
}

impl Default for VocabularyOptions {
    fn default() -> Self {
        Self {
            specials: SpecialTokens::default(),
            max_size: None,
            min_freq: 1,
        }
    }
}

impl VocabularyOptions {
    /// Sets the reserved-symbol configuration.
    pub fn with_specials(
        self,
        specials: SpecialTokens,
    ) -> Self {
        Self { specials, ..self }
    }

    /// Bounds the number of retained corpus tokens.
    pub fn with_max_size(
        self,
        max_size: usize,
    ) -> Self {
        Self {
            max_size: Some(max_size),
            ..self
        }
    }

    /// Sets the minimum retained frequency.
    pub fn with_min_freq(
        self,
        min_freq: usize,
    ) -> Self {
        Self { min_freq, ..self }
    }
}

/// Frozen bidirectional `{ token <-> index }` mapping with reserved
/// special symbols.
///
/// Built by [`Vocabulary::fit`] (or [`TokenCounter::into_vocabulary`]), or
/// reconstructed read-only from persisted JSON; immutable either way.
/// Index assignment is dense, zero-based, and contiguous, with the enabled
/// special tokens occupying the lowest indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    /// `{ token -> index }`.
    token_map: TokenIndexMap,

    /// Dense `index -> token` table.
    index_table: IndexTokenTable,

    /// The reserved-symbol configuration.
    specials: SpecialTokens,
}

impl Vocabulary {
    /// Fit a vocabulary from an iterator of token sequences.
    ///
    /// ## Arguments
    /// * `sequences` - An iterator of token sequences.
    /// * `options` - Special-token, size, and frequency configuration.
    ///
    /// ## Returns
    /// A frozen `Vocabulary`.
    pub fn fit<S>(
        sequences: S,
        options: &VocabularyOptions,
    ) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator,
        <S::Item as IntoIterator>::Item: AsRef<str>,
    {
        let mut counter = TokenCounter::new();
        counter.update_from_sequences(sequences);
        counter.into_vocabulary(options)
    }

    /// Assemble a vocabulary from a dense index table.
    ///
    /// The table must not contain duplicate tokens; [`TokenCounter`]
    /// guarantees this for fitted tables. Deserialized tables go through
    /// [`Vocabulary::try_from_parts`] instead.
    pub(crate) fn from_parts(
        index_table: IndexTokenTable,
        specials: SpecialTokens,
    ) -> Self {
        let token_map: TokenIndexMap = index_table
            .iter()
            .enumerate()
            .map(|(index, token)| (token.clone(), index))
            .collect();

        Self {
            token_map,
            index_table,
            specials,
        }
    }

    /// Validating variant of [`Vocabulary::from_parts`].
    ///
    /// ## Returns
    /// The vocabulary, or a configuration error if the table contains a
    /// duplicate token.
    pub(crate) fn try_from_parts(
        index_table: IndexTokenTable,
        specials: SpecialTokens,
    ) -> Result<Self> {
        let vocab = Self::from_parts(index_table, specials);
        if vocab.token_map.len() != vocab.index_table.len() {
            return Err(SeqprepError::Configuration(
                "vocabulary table contains a duplicate token".into(),
            ));
        }
        Ok(vocab)
    }

    /// The number of entries, special tokens included.
    pub fn len(&self) -> usize {
        self.index_table.len()
    }

    /// Returns true if the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.index_table.is_empty()
    }

    /// Returns true if the token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.token_map.contains_key(token)
    }

    /// The index assigned to a token, if present.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.token_map.get(token).copied()
    }

    /// The token at an index, if in range.
    pub fn token_at(&self, index: usize) -> Option<&str> {
        self.index_table.get(index).map(String::as_str)
    }

    /// All tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.index_table
    }

    /// The reserved-symbol configuration.
    pub fn specials(&self) -> &SpecialTokens {
        &self.specials
    }

    /// The index of the unknown token, if configured.
    pub fn unknown_index(&self) -> Option<usize> {
        self.special_index(self.specials.unknown.as_deref())
    }

    /// The index of the padding token, if configured.
    pub fn padding_index(&self) -> Option<usize> {
        self.special_index(self.specials.padding.as_deref())
    }

    /// The index of the begin-of-sequence token, if configured.
    pub fn bos_index(&self) -> Option<usize> {
        self.special_index(self.specials.bos.as_deref())
    }

    /// The index of the end-of-sequence token, if configured.
    pub fn eos_index(&self) -> Option<usize> {
        self.special_index(self.specials.eos.as_deref())
    }

    fn special_index(&self, token: Option<&str>) -> Option<usize> {
        token.and_then(|t| self.index_of(t))
    }

    /// Numerize a token sequence.
    ///
    /// Out-of-vocabulary tokens map to the unknown-token index when one is
    /// configured.
    ///
    /// ## Returns
    /// The index sequence, or a configuration error on an out-of-vocabulary
    /// token with no unknown slot reserved.
    pub fn to_indices<I>(
        &self,
        tokens: I,
    ) -> Result<IndexSequence>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let unknown = self.unknown_index();

        tokens
            .into_iter()
            .map(|token| {
                let token = token.as_ref();
                match self.index_of(token) {
                    Some(index) => Ok(index),
                    None => unknown.ok_or_else(|| {
                        SeqprepError::Configuration(format!(
                            "no unknown token reserved for out-of-vocabulary token {token:?}"
                        ))
                    }),
                }
            })
            .collect()
    }

    /// Detokenize an index sequence.
    ///
    /// ## Returns
    /// The token sequence, or an out-of-range error.
    pub fn to_tokens(
        &self,
        indices: &[usize],
    ) -> Result<Vec<String>> {
        indices
            .iter()
            .map(|&index| {
                self.index_table
                    .get(index)
                    .cloned()
                    .ok_or(SeqprepError::IndexOutOfRange {
                        index,
                        len: self.index_table.len(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::specials::UNKNOWN_TOKEN;

    fn sample_vocab(specials: SpecialTokens) -> Vocabulary {
        let corpus = [vec!["a", "b", "c"], vec!["b", "c"]];
        Vocabulary::fit(corpus, &VocabularyOptions::default().with_specials(specials))
    }

    #[test]
    fn test_fit_places_specials_lowest() {
        let vocab = sample_vocab(SpecialTokens::for_inputs());

        assert_eq!(vocab.token_at(0), Some(UNKNOWN_TOKEN));
        assert_eq!(vocab.token_at(1), Some("<pad>"));

        assert_eq!(vocab.unknown_index(), Some(0));
        assert_eq!(vocab.padding_index(), Some(1));
        assert_eq!(vocab.bos_index(), None);
        assert_eq!(vocab.eos_index(), None);

        // b/c tie at frequency 2 and precede a.
        assert_eq!(vocab.index_of("b"), Some(2));
        assert_eq!(vocab.index_of("c"), Some(3));
        assert_eq!(vocab.index_of("a"), Some(4));
    }

    #[test]
    fn test_to_indices_round_trip() {
        let vocab = sample_vocab(SpecialTokens::for_inputs());

        let indices = vocab.to_indices(["a", "b", "c"]).unwrap();
        assert_eq!(indices, vec![4, 2, 3]);

        let tokens = vocab.to_tokens(&indices).unwrap();
        assert_eq!(tokens, vec!["a", "b", "c"]);

        let again = vocab.to_indices(tokens.iter()).unwrap();
        assert_eq!(again, indices);
    }

    #[test]
    fn test_unknown_fallback() {
        let vocab = sample_vocab(SpecialTokens::for_inputs());

        let indices = vocab.to_indices(["a", "zzz"]).unwrap();
        assert_eq!(indices[1], vocab.unknown_index().unwrap());

        let tokens = vocab.to_tokens(&indices).unwrap();
        assert_eq!(tokens, vec!["a", UNKNOWN_TOKEN]);
    }

    #[test]
    fn test_missing_unknown_is_a_configuration_error() {
        let vocab = sample_vocab(SpecialTokens::none());

        let err = vocab.to_indices(["zzz"]).unwrap_err();
        assert!(matches!(err, SeqprepError::Configuration(_)));
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let vocab = sample_vocab(SpecialTokens::none());

        let err = vocab.to_tokens(&[vocab.len()]).unwrap_err();
        assert!(matches!(
            err,
            SeqprepError::IndexOutOfRange { index: 3, len: 3 }
        ));
    }

    #[test]
    fn test_empty_sequence() {
        let vocab = sample_vocab(SpecialTokens::for_inputs());

        let empty: [&str; 0] = [];
        assert_eq!(vocab.to_indices(empty).unwrap(), Vec::<usize>::new());
        assert_eq!(vocab.to_tokens(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_size_bound_includes_specials_separately() {
        let corpus = [vec!["a", "a", "b", "c", "d"]];
        let options = VocabularyOptions::default()
            .with_specials(SpecialTokens::for_inputs())
            .with_max_size(2);
        let vocab = Vocabulary::fit(corpus, &options);

        assert!(vocab.len() <= 2 + vocab.specials().count());
    }

    #[test]
    fn test_try_from_parts_rejects_duplicates() {
        let table = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let err = Vocabulary::try_from_parts(table, SpecialTokens::none()).unwrap_err();
        assert!(matches!(err, SeqprepError::Configuration(_)));
    }
}
