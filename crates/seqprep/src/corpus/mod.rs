//! # Corpus Helpers
//!
//! Line-oriented text loading, whitespace tokenization, numerization,
//! and the seeded train/valid partition over aligned streams.

pub mod split;
pub mod text;

#[doc(inline)]
pub use split::{DEFAULT_SPLIT_SEED, DEFAULT_VALID_RATIO, SplitOptions, split_aligned};
#[doc(inline)]
pub use text::{load_text_lines, numerize_lines, split_whitespace_tokens};
