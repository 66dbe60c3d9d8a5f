//! Core data types and error definitions for the question-answering pipeline.

use crate::document::{ExtractionError, RetrievalError};
use thiserror::Error;

/// A bounded, possibly overlapping slice of document text submitted to the backend in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in document order, starting at zero.
    pub index: usize,
    /// Text carried by the chunk.
    pub text: String,
}

/// Per-chunk answers indexed by question number.
///
/// Entry `i` holds the answer to question `i` as found in one chunk, or `None` when the
/// chunk did not address the question or its response line failed to parse.
pub type ChunkAnswerSet = Vec<Option<String>>;

/// Failures that abort a whole run request.
///
/// Only the stages before the fan-out can fail the request; individual chunk invocation
/// failures are absorbed and surface as sentinel answers instead.
#[derive(Debug, Error)]
pub enum QaError {
    /// Document could not be retrieved from its address.
    #[error("Failed to retrieve document: {0}")]
    Retrieval(#[from] RetrievalError),
    /// Retrieved blob could not be decoded to text.
    #[error("Failed to extract document text: {0}")]
    Extraction(#[from] ExtractionError),
}
