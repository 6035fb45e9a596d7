//! # Vocabulary Reconstruction Facade
//!
//! Rebuilds the vocabularies a builder persisted for a task directory, so
//! inference can numerize fresh text without refitting.

use std::path::Path;

use crate::{
    builders::{CLASS_VOCAB_FILENAME, INPUT_VOCAB_FILENAME, LABEL_VOCAB_FILENAME},
    errors::{Result, SeqprepError},
    vocab::{Vocabulary, io::load_vocabulary_json_path},
};

/// Dataset-preparation task families.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    /// Named-entity recognition: input + per-token entity tags.
    Ner,

    /// Slot/intent labeling: input + per-token slots + one intent per line.
    Slu,

    /// Word segmentation: characters + derived boundary tags.
    WordSegment,
}

/// Vocabularies reconstructed for a task, keyed by role.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskVocabularies {
    /// The input-token vocabulary.
    pub input: Vocabulary,

    /// The label/tag vocabulary.
    pub label: Vocabulary,

    /// The intent/class vocabulary; present for SLU only.
    pub class: Option<Vocabulary>,
}

/// Load a single persisted vocabulary JSON file.
pub fn load_vocab_file<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
    load_vocabulary_json_path(path)
}

/// Reconstruct the vocabularies persisted for a task directory.
///
/// NER and word-segmentation expect {input, label}; SLU additionally
/// expects the class vocabulary. An unrecognized task tag fails.
///
/// ## Arguments
/// * `task` - the task tag: `"ner"`, `"slu"`, or `"word_segment"`.
/// * `dir` - the dataset directory a builder persisted into.
pub fn load_vocab_dir<P: AsRef<Path>>(
    task: &str,
    dir: P,
) -> Result<TaskVocabularies> {
    let kind: TaskKind = task
        .parse()
        .map_err(|_| SeqprepError::UnknownTaskKind(task.to_string()))?;

    load_task_vocab_dir(kind, dir)
}

/// [`load_vocab_dir`] over an already-parsed [`TaskKind`].
pub fn load_task_vocab_dir<P: AsRef<Path>>(
    kind: TaskKind,
    dir: P,
) -> Result<TaskVocabularies> {
    let dir = dir.as_ref();

    let input = load_vocab_file(dir.join(INPUT_VOCAB_FILENAME))?;
    let label = load_vocab_file(dir.join(LABEL_VOCAB_FILENAME))?;

    let class = match kind {
        TaskKind::Slu => Some(load_vocab_file(dir.join(CLASS_VOCAB_FILENAME))?),
        TaskKind::Ner | TaskKind::WordSegment => None,
    };

    Ok(TaskVocabularies {
        input,
        label,
        class,
    })
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::vocab::{SpecialTokens, VocabularyOptions};

    #[test]
    fn test_task_kind_tags() {
        assert_eq!(TaskKind::Ner.to_string(), "ner");
        assert_eq!(TaskKind::Slu.to_string(), "slu");
        assert_eq!(TaskKind::WordSegment.to_string(), "word_segment");

        for kind in TaskKind::iter() {
            assert_eq!(kind.to_string().parse::<TaskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_task_tag() {
        let err = load_vocab_dir("translation", "dataset").unwrap_err();
        assert!(matches!(err, SeqprepError::UnknownTaskKind(_)));
        assert!(err.to_string().contains("translation"));
    }

    #[test]
    fn test_load_vocab_dir_round_trip() {
        tempdir::TempDir::new("loader_test")
            .and_then(|dir| {
                let input = Vocabulary::fit(
                    [vec!["a", "b"]],
                    &VocabularyOptions::default().with_specials(SpecialTokens::for_inputs()),
                );
                let label = Vocabulary::fit(
                    [vec!["O", "B"]],
                    &VocabularyOptions::default().with_specials(SpecialTokens::for_labels()),
                );

                input.to_json_path(dir.path().join(INPUT_VOCAB_FILENAME)).unwrap();
                label.to_json_path(dir.path().join(LABEL_VOCAB_FILENAME)).unwrap();

                let vocabs = load_vocab_dir("ner", dir.path()).unwrap();
                assert_eq!(vocabs.input, input);
                assert_eq!(vocabs.label, label);
                assert!(vocabs.class.is_none());

                // SLU expects a class vocabulary this directory lacks.
                let err = load_vocab_dir("slu", dir.path()).unwrap_err();
                assert!(matches!(err, SeqprepError::Io(_)));

                Ok(())
            })
            .unwrap();
    }
}
