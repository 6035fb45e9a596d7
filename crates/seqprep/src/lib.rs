//! # `seqprep` Sequence Labeling Dataset Preparation
//!
//! `seqprep` turns raw aligned text files into frequency-ranked,
//! size-bounded, index-addressable vocabularies, and deterministically
//! converts raw text/label lines into integer index sequences suitable for
//! batched model training.
//!
//! See:
//! * [`vocab`] to fit, freeze, and persist token vocabularies.
//! * [`corpus`] for line loading, tokenization, numerization, and the
//!   seeded train/valid split.
//! * [`builders`] for the NER / SLU / word-segmentation dataset builders.
//! * [`loader`] to reconstruct persisted vocabularies for inference.
//!
//! ## Pipeline
//!
//! Raw text files are tokenized by whitespace; vocabularies are fit from a
//! frequency pass; the raw parallel lines are split into train/valid
//! partitions; each partition is numerized against its vocabulary and
//! persisted as JSON. The downstream batch loader (external to this
//! crate) consumes the persisted dataset paths.
//!
//! ```rust,ignore
//! use seqprep::builders::{DatasetBuilder, FileFormat, NerDatasetBuilder};
//!
//! let mut builder = NerDatasetBuilder::from_paths(
//!     "corpus/input.txt",
//!     "corpus/labels.txt",
//!     FileFormat::Text,
//!     "dataset/ner",
//! )?;
//!
//! builder.build_vocabulary(Some(50_000), 2)?;
//! builder.build_trainable_dataset()?;
//!
//! let train_path = builder.train_dataset_path().unwrap();
//! ```
#![warn(missing_docs, unused)]

pub mod builders;
pub mod corpus;
pub mod errors;
pub mod loader;
pub mod types;
pub mod vocab;

// Re-exports
pub use errors::SeqprepError;
pub use loader::{TaskKind, TaskVocabularies, load_vocab_dir, load_vocab_file};
pub use vocab::{SpecialTokens, TokenCounter, Vocabulary, VocabularyOptions};

/// This library's version number.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
