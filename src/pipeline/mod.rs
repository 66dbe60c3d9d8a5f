//! Document question-answering pipeline.
//!
//! One request flows strictly left to right: retrieval → extraction → relevance
//! filtering → normalization → chunking → fan-out generation per chunk → answer
//! parsing → aggregation. The stages before the fan-out are pure functions; the
//! fan-out stage tolerates per-chunk failures so a single bad invocation degrades
//! only the answers that chunk would have contributed.

pub mod aggregate;
pub mod chunking;
pub mod normalize;
pub mod parse;
pub mod prompt;
pub mod relevance;
mod service;
pub mod types;

pub use aggregate::SENTINEL_ANSWER;
pub use service::{PipelineSettings, QaApi, QaService};
pub use types::{Chunk, ChunkAnswerSet, QaError};
