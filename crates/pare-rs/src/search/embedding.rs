//! Cache-aside lookup for query embeddings.
//!
//! The embedding function itself is an external collaborator; this module
//! only supplies the check/compute/store discipline around it. The cache is
//! an explicitly injected object, not ambient global state — the owner
//! decides its lifetime and its thread-safety. A concurrent race on one key
//! can cause a redundant compute but never a wrong stored value, since the
//! embedding function is assumed deterministic.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Error, Result};

/// Storage seam for computed embeddings, keyed by normalized query string.
///
/// Implementations are responsible for their own synchronization; the
/// lookup path takes `&self` so a shared cache can serve concurrent
/// callers.
pub trait EmbeddingCache {
    /// Fetch a cached embedding.
    fn get(&self, key: &str) -> Option<Vec<f32>>;
    /// Store a computed embedding.
    fn set(&self, key: &str, value: Vec<f32>);
}

/// Mutex-backed in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryEmbeddingCache {
    entries: Mutex<HashMap<String, Vec<f32>>>,
}

impl MemoryEmbeddingCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache poisoned").len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmbeddingCache for MemoryEmbeddingCache {
    fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.entries.lock().expect("cache poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: Vec<f32>) {
        self.entries
            .lock()
            .expect("cache poisoned")
            .insert(key.to_string(), value);
    }
}

/// Fetch the embedding for `query`, computing and caching it on a miss.
///
/// The query is whitespace-trimmed before use as the cache key; an empty
/// query is an [`Error::InvalidInput`].
pub fn query_embedding<C, F>(query: &str, cache: &C, embed_fn: F) -> Result<Vec<f32>>
where
    C: EmbeddingCache + ?Sized,
    F: Fn(&str) -> Vec<f32>,
{
    let normalized = query.trim();
    if normalized.is_empty() {
        return Err(Error::InvalidInput(
            "query must be a non-empty string".to_string(),
        ));
    }

    if let Some(cached) = cache.get(normalized) {
        debug!(query = normalized, "embedding cache hit");
        return Ok(cached);
    }

    let embedding = embed_fn(normalized);
    cache.set(normalized, embedding.clone());
    Ok(embedding)
}
