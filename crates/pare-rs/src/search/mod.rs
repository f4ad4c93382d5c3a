//! Search-side helpers: rank fusion and the embedding cache discipline.
//!
//! - [`hybrid`] — deduplicate and linearly combine two scored result lists
//!   by document id, returning the top-k.
//! - [`embedding`] — cache-aside lookup around an externally supplied
//!   embedding function.

pub mod embedding;
pub mod hybrid;

pub use embedding::{EmbeddingCache, MemoryEmbeddingCache, query_embedding};
pub use hybrid::{FusedItem, FusionConfig, ScoredItem, hybrid_merge};
