//! # Common Types

use std::collections::HashMap;

/// `{ String -> usize }` map.
///
/// ## Style Hints
/// Instance names should prefer `token_map`, or `token_index_map`.
pub type TokenIndexMap = HashMap<String, usize>;

/// Dense `index -> token` table; position is the index.
///
/// ## Style Hints
/// Instance names should prefer `index_table`, or `index_token_table`.
pub type IndexTokenTable = Vec<String>;

/// A numerized line: one vocabulary index per token.
pub type IndexSequence = Vec<usize>;
