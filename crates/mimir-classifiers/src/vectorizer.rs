//! TF-IDF text vectorizer
//!
//! Fit once over a training corpus, then transform arbitrary text into
//! L2-normalized sparse vectors. A fitted vectorizer is immutable; refitting
//! produces a new value.

use std::collections::{BTreeMap, HashMap};

/// Sparse vector: (term index, weight) pairs sorted by index
pub type SparseVector = Vec<(usize, f32)>;

/// A vectorizer fitted over a fixed corpus
#[derive(Debug, Clone)]
pub struct FittedVectorizer {
    vocab: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl FittedVectorizer {
    /// Fit a vectorizer over the given documents.
    ///
    /// Vocabulary order is deterministic (lexicographic) so that repeated
    /// fits over the same corpus produce identical vectors.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in docs {
            let mut seen: Vec<String> = Vec::new();
            for token in tokenize(doc.as_ref()) {
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
            for token in seen {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f32;
        let mut vocab = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());

        for (index, (token, df)) in doc_freq.into_iter().enumerate() {
            // Smoothed idf, never zero
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
            vocab.insert(token, index);
        }

        Self { vocab, idf }
    }

    /// Transform text into an L2-normalized sparse TF-IDF vector.
    ///
    /// Tokens outside the fitted vocabulary are ignored; text with no known
    /// tokens maps to the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocab.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = vector
            .iter()
            .map(|(_, w)| w * w)
            .sum::<f32>()
            .sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }

        vector
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocab_size(&self) -> usize {
        self.idf.len()
    }
}

/// Dot product of a sparse vector against a dense one
pub fn sparse_dot(sparse: &SparseVector, dense: &[f32]) -> f32 {
    sparse
        .iter()
        .map(|&(index, w)| w * dense.get(index).copied().unwrap_or(0.0))
        .sum()
}

/// Unicode-lowercased alphanumeric word split
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_builds_deterministic_vocab() {
        let docs = ["xin chào bạn", "bạn bị đánh"];
        let a = FittedVectorizer::fit(&docs);
        let b = FittedVectorizer::fit(&docs);

        assert_eq!(a.vocab_size(), b.vocab_size());
        assert_eq!(a.transform("bạn bị đánh"), b.transform("bạn bị đánh"));
    }

    #[test]
    fn transform_is_l2_normalized() {
        let vectorizer = FittedVectorizer::fit(&["hello world", "hello again"]);
        let vector = vectorizer.transform("hello world world");

        let norm: f32 = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_tokens_map_to_zero_vector() {
        let vectorizer = FittedVectorizer::fit(&["hello world"]);
        assert!(vectorizer.transform("completely unrelated").is_empty());
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        let vectorizer = FittedVectorizer::fit(&["Hello World"]);
        let upper = vectorizer.transform("HELLO");
        let lower = vectorizer.transform("hello");
        assert_eq!(upper, lower);
        assert!(!upper.is_empty());
    }

    #[test]
    fn sparse_dot_matches_manual_product() {
        let sparse = vec![(0, 0.5f32), (2, 0.5)];
        let dense = vec![1.0f32, 10.0, 2.0];
        assert!((sparse_dot(&sparse, &dense) - 1.5).abs() < 1e-6);
    }
}
