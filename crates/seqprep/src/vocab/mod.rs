//! # Vocabulary
//!
//! Frequency-ranked, size-bounded, index-addressable token vocabularies.
//!
//! A [`TokenCounter`] accumulates frequency counts and is consumed exactly
//! once to produce a frozen [`Vocabulary`]; alternatively a vocabulary is
//! reconstructed read-only from persisted JSON via [`io`].
//!
//! Reserved symbols (unknown, padding, begin/end of sequence) are
//! configured per vocabulary role with [`SpecialTokens`] and occupy the
//! lowest index values.

pub mod counter;
pub mod io;
pub mod specials;
pub mod vocabulary;

#[doc(inline)]
pub use counter::TokenCounter;
#[doc(inline)]
pub use specials::SpecialTokens;
#[doc(inline)]
pub use vocabulary::{Vocabulary, VocabularyOptions};
