//! Collaborators for retrieving source documents and decoding them to text.
//!
//! Both collaborators are opaque to the rest of the pipeline: the store turns a document
//! address into a binary blob, and the extractor turns that blob into text. Failures here
//! are fatal to the request because nothing downstream can proceed without text.

mod extract;
mod store;

pub use extract::{ExtractionError, extract_text};
pub use store::{DocumentStoreClient, RetrievalError};
