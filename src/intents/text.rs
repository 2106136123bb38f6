//! Text normalization for intent matching.

use std::collections::HashSet;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

/// Lowercases, strips punctuation, splits into words and stems them.
pub struct Normalizer {
    stemmer: Stemmer,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("language", &"spanish")
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::spanish()
    }
}

impl Normalizer {
    pub fn spanish() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Spanish),
        }
    }

    /// Stemmed word set of `text`.
    pub fn tokens(&self, text: &str) -> HashSet<String> {
        preprocess(text)
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect()
    }
}

/// Lowercase and drop ASCII punctuation.
pub fn preprocess(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Jaccard similarity of two token sets; 0 when either is empty.
#[allow(clippy::cast_precision_loss)]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
