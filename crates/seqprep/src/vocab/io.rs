//! # Vocabulary JSON IO

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    vocab::{SpecialTokens, Vocabulary},
};

/// On-disk record for a persisted [`Vocabulary`].
///
/// The dense `index -> token` table carries the full mapping; the
/// `token -> index` side is rebuilt on load.
#[derive(Debug, Serialize, Deserialize)]
struct VocabularyRecord {
    index_to_token: Vec<String>,
    specials: SpecialTokens,
}

/// Write a [`Vocabulary`] to a writer as pretty-printed JSON.
pub fn write_vocabulary_json<W: Write>(
    vocab: &Vocabulary,
    writer: &mut W,
) -> Result<()> {
    let record = VocabularyRecord {
        index_to_token: vocab.tokens().to_vec(),
        specials: vocab.specials().clone(),
    };
    serde_json::to_writer_pretty(writer, &record)?;
    Ok(())
}

/// Read a [`Vocabulary`] from a JSON reader.
pub fn read_vocabulary_json<R: Read>(reader: R) -> Result<Vocabulary> {
    let record: VocabularyRecord = serde_json::from_reader(reader)?;
    Vocabulary::try_from_parts(record.index_to_token, record.specials)
}

/// Save a [`Vocabulary`] to a JSON file, overwriting existing content.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocabulary_json_path<P: AsRef<Path>>(
    vocab: &Vocabulary,
    path: P,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_vocabulary_json(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a [`Vocabulary`] from a JSON file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocabulary_json_path<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_vocabulary_json(reader)
}

impl Vocabulary {
    /// Persist as pretty-printed JSON at `path`; overwrites existing content.
    pub fn to_json_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<()> {
        save_vocabulary_json_path(self, path)
    }

    /// Reconstruct a read-only vocabulary from a persisted JSON file.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_vocabulary_json_path(path)
    }
}
