//! # NER Dataset Builder

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

/// Persisted NER dataset shape.
///
/// Fields are aligned by position: entry `i` of `entities` tags entry `i`
/// of `inputs`, token for token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerDataset {
    /// Numerized input lines.
    pub inputs: Vec<IndexSequence>,

    /// Numerized entity-tag lines.
    pub entities: Vec<IndexSequence>,
}

/// Builder for NER train/valid datasets.
///
/// Two aligned raw streams: input sentences and per-token entity tags.
/// The input vocabulary reserves unknown + padding; the tag vocabulary
/// disables the unknown slot (the tag set is closed).
#[derive(Debug)]
pub struct NerDatasetBuilder {
    raw_input: Vec<String>,
    raw_label: Vec<String>,

    input_vocab: Option<Vocabulary>,
    label_vocab: Option<Vocabulary>,

    dataset_dir: PathBuf,
    split: SplitOptions,

    train_data_path: Option<PathBuf>,
    valid_data_path: Option<PathBuf>,
}

impl NerDatasetBuilder {
    /// Construct from raw input/label text files.
    ///
    /// Raw text is loaded eagerly, and the dataset directory is created.
    ///
    /// ## Arguments
    /// * `input_path` - one example sentence per line.
    /// * `label_path` - per-token entity tags, aligned with the inputs.
    /// * `format` - raw corpus format; only text is implemented.
    /// * `dataset_dir` - destination for vocabulary and dataset artifacts.
    pub fn from_paths<P: AsRef<Path>>(
        input_path: P,
        label_path: P,
        format: FileFormat,
        dataset_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        expect_text_format(format)?;

        let dataset_dir = dataset_dir.into();
        ensure_dataset_dir(&dataset_dir)?;

        Ok(Self {
            raw_input: load_text_lines(input_path)?,
            raw_label: load_text_lines(label_path)?,
            input_vocab: None,
            label_vocab: None,
            dataset_dir,
            split: SplitOptions::default(),
            train_data_path: None,
            valid_data_path: None,
        })
    }

    /// Injects a pre-fitted input vocabulary.
    ///
    /// [`DatasetBuilder::build_vocabulary`] will then only fit the label
    /// side.
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

    /// The fitted input vocabulary, if built.
    pub fn input_vocab(&self) -> Option<&Vocabulary> {
        self.input_vocab.as_ref()
    }

    /// The fitted tag vocabulary, if built.
    pub fn label_vocab(&self) -> Option<&Vocabulary> {
        self.label_vocab.as_ref()
    }
}

impl DatasetBuilder for NerDatasetBuilder {
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
                split_whitespace_tokens(&self.raw_input),
                &options,
            ));
        }

        if self.label_vocab.is_none() {
            let options =
                VocabularyOptions::default().with_specials(SpecialTokens::for_labels());

            self.label_vocab = Some(Vocabulary::fit(
                split_whitespace_tokens(&self.raw_label),
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
            "fit NER vocabularies: {} input tokens, {} tags",
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
            &[self.raw_input.as_slice(), self.raw_label.as_slice()],
            &self.split,
        )?;

        let numerize = |streams: &[Vec<String>]| -> Result<NerDataset> {
            Ok(NerDataset {
                inputs: numerize_lines(&streams[0], input_vocab)?,
                entities: numerize_lines(&streams[1], label_vocab)?,
            })
        };

        let train_path = self.dataset_dir.join(TRAIN_DATASET_FILENAME);
        let valid_path = self.dataset_dir.join(VALID_DATASET_FILENAME);

        save_json(&train_path, &numerize(&train)?)?;
        save_json(&valid_path, &numerize(&valid)?)?;

        log::info!(
            "wrote NER datasets: {} train / {} valid examples",
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
