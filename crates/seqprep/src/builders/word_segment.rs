//! # Word Segmentation Dataset Builder

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    builders::{
        DatasetBuilder, FileFormat, INPUT_VOCAB_FILENAME, LABEL_VOCAB_FILENAME,
        TRAIN_DATASET_FILENAME, VALID_DATASET_FILENAME, ensure_dataset_dir, expect_text_format,
        save_json,
    },
    corpus::{
        SplitOptions, load_text_lines, numerize_lines, split_aligned, split_whitespace_tokens,
    },
    errors::{Result, SeqprepError},
    types::IndexSequence,
    vocab::{SpecialTokens, Vocabulary, VocabularyOptions},
};

/// Persisted word-segmentation dataset shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationDataset {
    /// Numerized character lines.
    pub inputs: Vec<IndexSequence>,

    /// Numerized boundary-tag lines, aligned with `inputs`.
    pub labels: Vec<IndexSequence>,
}

/// Per-character boundary tags for one whitespace-separated word:
/// `S` for a single-character word, otherwise `B`, `I`..., `E`.
fn boundary_tags(word: &str) -> Vec<&'static str> {
    let len = word.chars().count();
    match len {
        0 => Vec::new(),
        1 => vec!["S"],
        _ => {
            let mut tags = Vec::with_capacity(len);
            tags.push("B");
            for _ in 1..len - 1 {
                tags.push("I");
            }
            tags.push("E");
            tags
        }
    }
}

/// Re-express a raw spaced line as aligned character and tag lines.
fn derive_segment_line(line: &str) -> (String, String) {
    let mut chars: Vec<String> = Vec::new();
    let mut tags: Vec<&'static str> = Vec::new();

    for word in line.split_whitespace() {
        chars.extend(word.chars().map(String::from));
        tags.extend(boundary_tags(word));
    }

    (chars.join(" "), tags.join(" "))
}

/// Builder for word-segmentation train/valid datasets.
///
/// The label stream is derived from the input itself: each word
/// contributes per-character boundary tags, and the input stream is
/// re-expressed as the character sequence. Emission then follows the NER
/// shape with `{"inputs", "labels"}` fields.
#[derive(Debug)]
pub struct WordSegmentationDatasetBuilder {
    char_lines: Vec<String>,
    tag_lines: Vec<String>,

    input_vocab: Option<Vocabulary>,
    label_vocab: Option<Vocabulary>,

    dataset_dir: PathBuf,
    split: SplitOptions,

    train_data_path: Option<PathBuf>,
    valid_data_path: Option<PathBuf>,
}

impl WordSegmentationDatasetBuilder {
    /// Construct from a raw spaced-text file.
    ///
    /// Raw text is loaded eagerly, the character/tag streams are derived,
    /// and the dataset directory is created.
    ///
    /// ## Arguments
    /// * `input_path` - one whitespace-segmented example per line.
    /// * `format` - raw corpus format; only text is implemented.
    /// * `dataset_dir` - destination for vocabulary and dataset artifacts.
    pub fn from_path<P: AsRef<Path>>(
        input_path: P,
        format: FileFormat,
        dataset_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        expect_text_format(format)?;

        let dataset_dir = dataset_dir.into();
        ensure_dataset_dir(&dataset_dir)?;

        let raw_input = load_text_lines(input_path)?;
        let (char_lines, tag_lines): (Vec<String>, Vec<String>) = raw_input
            .iter()
            .map(|line| derive_segment_line(line))
            .unzip();

        Ok(Self {
            char_lines,
            tag_lines,
            input_vocab: None,
            label_vocab: None,
            dataset_dir,
            split: SplitOptions::default(),
            train_data_path: None,
            valid_data_path: None,
        })
    }

    /// Injects a pre-fitted input vocabulary.
    pub fn with_input_vocab(
        self,
        vocab: Vocabulary,
    ) -> Self {
        Self {
            input_vocab: Some(vocab),
            ..self
        }
    }

    /// Sets the train/valid split options.
    pub fn with_split_options(
        self,
        split: SplitOptions,
    ) -> Self {
        Self { split, ..self }
    }

    /// The fitted character vocabulary, if built.
    pub fn input_vocab(&self) -> Option<&Vocabulary> {
        self.input_vocab.as_ref()
    }

    /// The fitted boundary-tag vocabulary, if built.
    pub fn label_vocab(&self) -> Option<&Vocabulary> {
        self.label_vocab.as_ref()
    }
}

impl DatasetBuilder for WordSegmentationDatasetBuilder {
    fn build_vocabulary(
        &mut self,
        max_size: Option<usize>,
        min_freq: usize,
    ) -> Result<()> {
        if self.input_vocab.is_none() {
            let mut options = VocabularyOptions::default()
                .with_specials(SpecialTokens::for_inputs())
                .with_min_freq(min_freq);
            if let Some(max_size) = max_size {
                options = options.with_max_size(max_size);
            }

            self.input_vocab = Some(Vocabulary::fit(
                split_whitespace_tokens(&self.char_lines),
                &options,
            ));
        }

        if self.label_vocab.is_none() {
            let options =
                VocabularyOptions::default().with_specials(SpecialTokens::for_labels());

            self.label_vocab = Some(Vocabulary::fit(
                split_whitespace_tokens(&self.tag_lines),
                &options,
            ));
        }

        let input_vocab = self
            .input_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("input"))?;
        let label_vocab = self
            .label_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("label"))?;

        input_vocab.to_json_path(self.dataset_dir.join(INPUT_VOCAB_FILENAME))?;
        label_vocab.to_json_path(self.dataset_dir.join(LABEL_VOCAB_FILENAME))?;

        log::info!(
            "fit segmentation vocabularies: {} characters, {} tags",
            input_vocab.len(),
            label_vocab.len()
        );
        Ok(())
    }

    fn build_trainable_dataset(&mut self) -> Result<()> {
        let input_vocab = self
            .input_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("input"))?;
        let label_vocab = self
            .label_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("label"))?;

        let (train, valid) = split_aligned(
            &[self.char_lines.as_slice(), self.tag_lines.as_slice()],
            &self.split,
        )?;

        let numerize = |streams: &[Vec<String>]| -> Result<SegmentationDataset> {
            Ok(SegmentationDataset {
                inputs: numerize_lines(&streams[0], input_vocab)?,
                labels: numerize_lines(&streams[1], label_vocab)?,
            })
        };

        let train_path = self.dataset_dir.join(TRAIN_DATASET_FILENAME);
        let valid_path = self.dataset_dir.join(VALID_DATASET_FILENAME);

        save_json(&train_path, &numerize(&train)?)?;
        save_json(&valid_path, &numerize(&valid)?)?;

        log::info!(
            "wrote segmentation datasets: {} train / {} valid examples",
            train[0].len(),
            valid[0].len()
        );

        self.train_data_path = Some(train_path);
        self.valid_data_path = Some(valid_path);
        Ok(())
    }

    fn train_dataset_path(&self) -> Option<&Path> {
        self.train_data_path.as_deref()
    }

    fn valid_dataset_path(&self) -> Option<&Path> {
        self.valid_data_path.as_deref()
    }
}
