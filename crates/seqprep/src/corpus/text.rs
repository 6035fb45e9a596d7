//! # Line-Oriented Corpus Text

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{errors::Result, types::IndexSequence, vocab::Vocabulary};

/// Read a text file into raw lines.
///
/// Trailing newlines (and carriage returns) are trimmed; empty lines are
/// preserved as empty strings. An unreadable path or a mid-file read
/// failure is an I/O error.
pub fn load_text_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }

    Ok(lines)
}

/// Tokenize raw lines by whitespace.
///
/// An empty line yields an empty token sequence.
pub fn split_whitespace_tokens(lines: &[String]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Numerize raw lines against a vocabulary, order-preserving.
///
/// Composes whitespace tokenization with [`Vocabulary::to_indices`] per
/// line; an empty line yields an empty index sequence.
pub fn numerize_lines(
    lines: &[String],
    vocab: &Vocabulary,
) -> Result<Vec<IndexSequence>> {
    lines
        .iter()
        .map(|line| vocab.to_indices(line.split_whitespace()))
        .collect()
}
