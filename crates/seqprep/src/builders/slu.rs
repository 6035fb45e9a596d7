//! # SLU Dataset Builder

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    builders::{
        CLASS_VOCAB_FILENAME, DatasetBuilder, FileFormat, INPUT_VOCAB_FILENAME,
        INSTANT_DATASET_FILENAME, LABEL_VOCAB_FILENAME, TRAIN_DATASET_FILENAME,
        VALID_DATASET_FILENAME, ensure_dataset_dir, expect_text_format, save_json,
    },
    corpus::{
        SplitOptions, load_text_lines, numerize_lines, split_aligned, split_whitespace_tokens,
    },
    errors::{Result, SeqprepError},
    types::IndexSequence,
    vocab::{SpecialTokens, Vocabulary, VocabularyOptions},
};

/// Persisted SLU dataset shape.
///
/// Fields are aligned by position; `intents` holds a single-element index
/// sequence per example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SluDataset {
    /// Numerized input lines.
    pub inputs: Vec<IndexSequence>,

    /// Numerized per-token slot-label lines.
    pub slots: Vec<IndexSequence>,

    /// Numerized whole-example intent labels.
    pub intents: Vec<IndexSequence>,
}

/// Builder for SLU (slot + intent) train/valid datasets.
///
/// Three aligned raw streams: input sentences, per-token slot labels, and
/// one intent label per line. The intent vocabulary reserves no special
/// symbols at all: each example contributes exactly one whole-sequence
/// label, so padding and sequence framing are meaningless there.
#[derive(Debug)]
pub struct SluDatasetBuilder {
    raw_input: Vec<String>,
    raw_label: Vec<String>,
    raw_class: Vec<String>,

    input_vocab: Option<Vocabulary>,
    label_vocab: Option<Vocabulary>,
    class_vocab: Option<Vocabulary>,

    dataset_dir: PathBuf,
    split: SplitOptions,

    train_data_path: Option<PathBuf>,
    valid_data_path: Option<PathBuf>,
}

impl SluDatasetBuilder {
    /// Construct from raw input/slot/intent text files.
    ///
    /// Raw text is loaded eagerly, and the dataset directory is created.
    /// The three files must have matching line counts; the mismatch is
    /// reported when the split runs.
    ///
    /// ## Arguments
    /// * `input_path` - one example sentence per line.
    /// * `label_path` - per-token slot labels, aligned with the inputs.
    /// * `class_path` - one intent label per line.
    /// * `format` - raw corpus format; only text is implemented.
    /// * `dataset_dir` - destination for vocabulary and dataset artifacts.
    pub fn from_paths<P: AsRef<Path>>(
        input_path: P,
        label_path: P,
        class_path: P,
        format: FileFormat,
        dataset_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        expect_text_format(format)?;

        let dataset_dir = dataset_dir.into();
        ensure_dataset_dir(&dataset_dir)?;

        Ok(Self {
            raw_input: load_text_lines(input_path)?,
            raw_label: load_text_lines(label_path)?,
            raw_class: load_text_lines(class_path)?,
            input_vocab: None,
            label_vocab: None,
            class_vocab: None,
            dataset_dir,
            split: SplitOptions::default(),
            train_data_path: None,
            valid_data_path: None,
        })
    }

    /// Injects a pre-fitted input vocabulary.
    ///
    /// [`DatasetBuilder::build_vocabulary`] will then only fit the slot and
    /// intent sides.
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

    /// The fitted slot-label vocabulary, if built.
    pub fn label_vocab(&self) -> Option<&Vocabulary> {
        self.label_vocab.as_ref()
    }

    /// The fitted intent vocabulary, if built.
    pub fn class_vocab(&self) -> Option<&Vocabulary> {
        self.class_vocab.as_ref()
    }

    /// Numerize fresh example files against the already-fitted
    /// vocabularies, without any train/valid split, and persist them as a
    /// standalone dataset for single-shot inference scoring.
    ///
    /// ## Arguments
    /// * `input_path` / `label_path` / `class_path` - fresh example files,
    ///   not part of the original fit corpus.
    /// * `data_path` - destination; defaults to `instant.json` in the
    ///   dataset directory.
    ///
    /// ## Returns
    /// The path of the persisted instant dataset.
    pub fn build_instant_dataset<P: AsRef<Path>>(
        &self,
        input_path: P,
        label_path: P,
        class_path: P,
        data_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let input_vocab = self
            .input_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("input"))?;
        let label_vocab = self
            .label_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("label"))?;
        let class_vocab = self
            .class_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("class"))?;

        let raw_input = load_text_lines(input_path)?;
        let raw_label = load_text_lines(label_path)?;
        let raw_class = load_text_lines(class_path)?;

        let dataset = SluDataset {
            inputs: numerize_lines(&raw_input, input_vocab)?,
            slots: numerize_lines(&raw_label, label_vocab)?,
            intents: numerize_lines(&raw_class, class_vocab)?,
        };

        let data_path =
            data_path.unwrap_or_else(|| self.dataset_dir.join(INSTANT_DATASET_FILENAME));
        save_json(&data_path, &dataset)?;

        log::info!(
            "wrote instant SLU dataset: {} examples at {}",
            dataset.inputs.len(),
            data_path.display()
        );
        Ok(data_path)
    }
}

impl DatasetBuilder for SluDatasetBuilder {
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

        if self.class_vocab.is_none() {
            let options =
                VocabularyOptions::default().with_specials(SpecialTokens::for_classes());

            self.class_vocab = Some(Vocabulary::fit(
                split_whitespace_tokens(&self.raw_class),
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
        let class_vocab = self
            .class_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("class"))?;

        input_vocab.to_json_path(self.dataset_dir.join(INPUT_VOCAB_FILENAME))?;
        label_vocab.to_json_path(self.dataset_dir.join(LABEL_VOCAB_FILENAME))?;
        class_vocab.to_json_path(self.dataset_dir.join(CLASS_VOCAB_FILENAME))?;

        log::info!(
            "fit SLU vocabularies: {} input tokens, {} slots, {} intents",
            input_vocab.len(),
            label_vocab.len(),
            class_vocab.len()
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
        let class_vocab = self
            .class_vocab
            .as_ref()
            .ok_or(SeqprepError::VocabularyNotBuilt("class"))?;

        let (train, valid) = split_aligned(
            &[
                self.raw_input.as_slice(),
                self.raw_label.as_slice(),
                self.raw_class.as_slice(),
            ],
            &self.split,
        )?;

        let numerize = |streams: &[Vec<String>]| -> Result<SluDataset> {
            Ok(SluDataset {
                inputs: numerize_lines(&streams[0], input_vocab)?,
                slots: numerize_lines(&streams[1], label_vocab)?,
                intents: numerize_lines(&streams[2], class_vocab)?,
            })
        };

        let train_path = self.dataset_dir.join(TRAIN_DATASET_FILENAME);
        let valid_path = self.dataset_dir.join(VALID_DATASET_FILENAME);

        save_json(&train_path, &numerize(&train)?)?;
        save_json(&valid_path, &numerize(&valid)?)?;

        log::info!(
            "wrote SLU datasets: {} train / {} valid examples",
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

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use super::*;

    fn write_lines(path: &Path, lines: &[&str]) {
        let mut file = fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    fn sample_builder(dir: &Path) -> SluDatasetBuilder {
        let input_path = dir.join("input.txt");
        let label_path = dir.join("label.txt");
        let class_path = dir.join("class.txt");

        write_lines(&input_path, &["book a flight", "what is the weather"]);
        write_lines(&label_path, &["O O B-svc", "O O O B-svc"]);
        write_lines(&class_path, &["flight", "weather"]);

        SluDatasetBuilder::from_paths(
            &input_path,
            &label_path,
            &class_path,
            FileFormat::Text,
            dir.join("dataset"),
        )
        .unwrap()
    }

    #[test]
    fn test_intent_vocab_has_no_specials() {
        tempdir::TempDir::new("slu_test")
            .and_then(|dir| {
                let mut builder = sample_builder(dir.path());
                builder.build_vocabulary(None, 1).unwrap();

                let class_vocab = builder.class_vocab().unwrap();
                assert_eq!(class_vocab.specials().count(), 0);
                assert_eq!(class_vocab.len(), 2);

                // No unknown fallback: an unseen intent is a configuration error.
                let err = class_vocab.to_indices(["billing"]).unwrap_err();
                assert!(matches!(err, SeqprepError::Configuration(_)));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_instant_dataset() {
        tempdir::TempDir::new("slu_test")
            .and_then(|dir| {
                let mut builder = sample_builder(dir.path());
                builder.build_vocabulary(None, 1).unwrap();

                let fresh_input = dir.path().join("fresh_input.txt");
                let fresh_label = dir.path().join("fresh_label.txt");
                let fresh_class = dir.path().join("fresh_class.txt");
                write_lines(&fresh_input, &["book a flight"]);
                write_lines(&fresh_label, &["O O B-svc"]);
                write_lines(&fresh_class, &["flight"]);

                let path = builder
                    .build_instant_dataset(&fresh_input, &fresh_label, &fresh_class, None)
                    .unwrap();

                assert_eq!(path, dir.path().join("dataset").join(INSTANT_DATASET_FILENAME));

                let loaded: SluDataset =
                    serde_json::from_reader(fs::File::open(&path).unwrap()).unwrap();
                assert_eq!(loaded.inputs.len(), 1);
                assert_eq!(loaded.intents[0].len(), 1);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_instant_dataset_requires_vocabulary() {
        tempdir::TempDir::new("slu_test")
            .and_then(|dir| {
                let builder = sample_builder(dir.path());

                let err = builder
                    .build_instant_dataset("in.txt", "lb.txt", "cl.txt", None)
                    .unwrap_err();
                assert!(matches!(err, SeqprepError::VocabularyNotBuilt("input")));

                Ok(())
            })
            .unwrap();
    }
}
