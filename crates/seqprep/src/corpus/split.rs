//! # Seeded Train/Valid Partitioning
//!
//! The split is a reproducible pseudo-random partition: a fixed seed and
//! length always produce the same shuffled index order, and the same
//! selected indices are applied to every aligned stream.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::errors::{Result, SeqprepError};

/// Default seed threaded through split calls when none is configured.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Default fraction of examples held out for validation.
pub const DEFAULT_VALID_RATIO: f64 = 0.1;

/// Options for [`split_aligned`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of examples held out for validation.
    pub valid_ratio: f64,

    /// Shuffle seed.
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            valid_ratio: DEFAULT_VALID_RATIO,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl SplitOptions {
    /// Sets the validation fraction.
    pub fn with_valid_ratio(
        self,
        valid_ratio: f64,
    ) -> Self {
        Self { valid_ratio, ..self }
    }

    /// Sets the shuffle seed.
    pub fn with_seed(
        self,
        seed: u64,
    ) -> Self {
        Self { seed, ..self }
    }
}

/// Deterministically shuffled `0..len` index order for a seed.
pub fn shuffled_indices(
    len: usize,
    seed: u64,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Partition N aligned streams into (train, valid).
///
/// The first `round(len * valid_ratio)` shuffled indices form the
/// validation partition; the remainder form training. Line `i` of every
/// stream travels together, so alignment is preserved.
///
/// ## Arguments
/// * `streams` - Aligned raw-line streams, all the same length.
/// * `options` - Ratio and seed.
///
/// ## Returns
/// `(train, valid)` partitions, one `Vec<String>` per input stream, or a
/// configuration error on mismatched stream lengths.
pub fn split_aligned(
    streams: &[&[String]],
    options: &SplitOptions,
) -> Result<(Vec<Vec<String>>, Vec<Vec<String>>)> {
    let Some(first) = streams.first() else {
        return Ok((Vec::new(), Vec::new()));
    };

    let len = first.len();
    for stream in streams {
        if stream.len() != len {
            return Err(SeqprepError::Configuration(format!(
                "aligned streams differ in length: {} != {}",
                stream.len(),
                len
            )));
        }
    }

    let valid_count = ((len as f64) * options.valid_ratio).round() as usize;
    let valid_count = valid_count.min(len);

    let indices = shuffled_indices(len, options.seed);
    let (valid_indices, train_indices) = indices.split_at(valid_count);

    let select = |picked: &[usize]| -> Vec<Vec<String>> {
        streams
            .iter()
            .map(|stream| picked.iter().map(|&i| stream[i].clone()).collect())
            .collect()
    };

    log::debug!(
        "split {} examples: {} train, {} valid (seed {})",
        len,
        train_indices.len(),
        valid_indices.len(),
        options.seed
    );

    Ok((select(train_indices), select(valid_indices)))
}
