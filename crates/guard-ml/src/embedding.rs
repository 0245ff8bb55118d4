//! Embedding backend seam and per-framework embedding cache

use crate::FeatureVector;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Text-embedding backend.
///
/// Implementations wrap whatever model hosting is deployed (ONNX runtime,
/// remote inference service). `None` signals the model is unavailable, which
/// callers treat as a degrade-to-fallback condition rather than an error.
pub trait EmbeddingBackend: Send + Sync {
    /// Encode one text into a fixed-length vector
    fn encode(&self, text: &str) -> Option<FeatureVector>;

    /// Encode a batch; any single failure fails the batch
    fn encode_batch(&self, texts: &[String]) -> Option<Vec<FeatureVector>> {
        texts.iter().map(|t| self.encode(t)).collect()
    }
}

/// Memoized per-framework control embeddings.
///
/// Populated lazily on first use and read-only afterwards. Concurrent first
/// access may recompute the same entry; the last writer wins, which is only
/// a performance cost since embeddings are deterministic per backend.
pub struct EmbeddingCache {
    entries: RwLock<HashMap<String, Arc<Vec<FeatureVector>>>>,
}

impl EmbeddingCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }

    /// Return cached embeddings for `key`, computing them via `compute` on
    /// first access. Returns `None` when `compute` reports the backend
    /// unavailable; unavailability is not cached so a later call can retry.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Option<Arc<Vec<FeatureVector>>>
    where
        F: FnOnce() -> Option<Vec<FeatureVector>>,
    {
        if let Some(cached) = self.entries.read().get(key) {
            return Some(Arc::clone(cached));
        }

        let computed = Arc::new(compute()?);
        self.entries
            .write()
            .insert(key.to_string(), Arc::clone(&computed));
        Some(computed)
    }

    /// Number of cached framework entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new()
    }
}
