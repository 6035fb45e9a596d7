//! # Dataset Builders
//!
//! Task-specific builders orchestrate vocabulary construction and
//! train/valid dataset emission:
//! * [`NerDatasetBuilder`] - input + per-token entity tags.
//! * [`SluDatasetBuilder`] - input + per-token slots + one intent per line.
//! * [`WordSegmentationDatasetBuilder`] - boundary tags derived from the
//!   input itself.
//!
//! All builders share the [`DatasetBuilder`] lifecycle: raw text is loaded
//! eagerly at construction, `build_vocabulary` fits and persists the role
//! vocabularies, and `build_trainable_dataset` splits, numerizes, and
//! persists the train/valid JSON artifacts.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::errors::{Result, SeqprepError};

pub mod ner;
pub mod slu;
pub mod word_segment;

#[doc(inline)]
pub use ner::{NerDataset, NerDatasetBuilder};
#[doc(inline)]
pub use slu::{SluDataset, SluDatasetBuilder};
#[doc(inline)]
pub use word_segment::{SegmentationDataset, WordSegmentationDatasetBuilder};

/// Input vocabulary artifact name within a dataset directory.
pub const INPUT_VOCAB_FILENAME: &str = "input_vocab.json";

/// Label/tag vocabulary artifact name within a dataset directory.
pub const LABEL_VOCAB_FILENAME: &str = "label_vocab.json";

/// Class/intent vocabulary artifact name within a dataset directory.
pub const CLASS_VOCAB_FILENAME: &str = "class_vocab.json";

/// Training dataset artifact name within a dataset directory.
pub const TRAIN_DATASET_FILENAME: &str = "train.json";

/// Validation dataset artifact name within a dataset directory.
pub const VALID_DATASET_FILENAME: &str = "valid.json";

/// Instant (single-shot inference) dataset artifact name.
pub const INSTANT_DATASET_FILENAME: &str = "instant.json";

/// Raw corpus file format accepted by the builders.
///
/// Only [`FileFormat::Text`] is implemented; requesting any other format
/// at construction is a configuration error.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FileFormat {
    /// Plain text, one example per line.
    #[default]
    Text,

    /// Line-delimited JSON. Recognized, not implemented.
    Json,
}

pub(crate) fn expect_text_format(format: FileFormat) -> Result<()> {
    if format != FileFormat::Text {
        return Err(SeqprepError::Configuration(format!(
            "unsupported file format: {format}"
        )));
    }
    Ok(())
}

/// Shared dataset-builder lifecycle.
pub trait DatasetBuilder {
    /// Fit and persist the vocabularies still missing.
    ///
    /// `max_size` and `min_freq` apply to the input vocabulary; label and
    /// class vocabularies are closed sets and retain everything observed.
    /// A vocabulary injected at construction is kept as-is (and persisted
    /// alongside the freshly-fit ones).
    fn build_vocabulary(
        &mut self,
        max_size: Option<usize>,
        min_freq: usize,
    ) -> Result<()>;

    /// Split, numerize, and persist the train/valid datasets.
    ///
    /// Fails with a "vocabulary not built" error when called before
    /// [`DatasetBuilder::build_vocabulary`].
    fn build_trainable_dataset(&mut self) -> Result<()>;

    /// Path of the emitted training dataset, once built.
    ///
    /// The external batch-loading collaborator consumes this path.
    fn train_dataset_path(&self) -> Option<&Path>;

    /// Path of the emitted validation dataset, once built.
    fn valid_dataset_path(&self) -> Option<&Path>;
}

/// Write a value to a file as pretty-printed JSON.
///
/// Overwrites existing content; a write failure is an I/O error and any
/// partially written file is left in place.
pub fn save_json<T: Serialize, P: AsRef<Path>>(
    path: P,
    value: &T,
) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Create the dataset directory, with intermediate directories as needed.
///
/// Idempotent; an existing directory is not an error.
pub fn ensure_dataset_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format_tags() {
        assert_eq!(FileFormat::Text.to_string(), "text");
        assert_eq!("text".parse::<FileFormat>().unwrap(), FileFormat::Text);
        assert_eq!("json".parse::<FileFormat>().unwrap(), FileFormat::Json);
        assert!("parquet".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_expect_text_format() {
        assert!(expect_text_format(FileFormat::Text).is_ok());

        let err = expect_text_format(FileFormat::Json).unwrap_err();
        assert!(matches!(err, SeqprepError::Configuration(_)));
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_ensure_dataset_dir_is_idempotent() {
        tempdir::TempDir::new("builders_test")
            .and_then(|dir| {
                let nested = dir.path().join("a").join("b");

                ensure_dataset_dir(&nested).unwrap();
                assert!(nested.is_dir());

                ensure_dataset_dir(&nested).unwrap();

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_save_json_overwrites() {
        tempdir::TempDir::new("builders_test")
            .and_then(|dir| {
                let path = dir.path().join("data.json");

                save_json(&path, &vec![vec![1_usize, 2], vec![3]]).unwrap();
                save_json(&path, &vec![vec![9_usize]]).unwrap();

                let text = fs::read_to_string(&path)?;
                assert!(text.contains('9'));
                assert!(!text.contains('3'));

                Ok(())
            })
            .unwrap();
    }
}
