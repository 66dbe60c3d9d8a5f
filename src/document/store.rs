//! HTTP client wrapper for fetching source documents by address.

use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Errors raised while retrieving a document from its address.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport-level failure reaching the document address.
    #[error("Failed to retrieve document: {0}")]
    Transport(#[from] reqwest::Error),
    /// Document store answered with a non-success status.
    #[error("Document store returned {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status received from the store.
        status: StatusCode,
        /// Response body captured for diagnostics.
        body: String,
    },
}

/// Lightweight HTTP client for the external document store.
pub struct DocumentStoreClient {
    client: Client,
}

impl DocumentStoreClient {
    /// Construct a new client for document retrieval.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent("policyqa/0.1").build()?;
        Ok(Self { client })
    }

    /// Download the binary blob behind `address`.
    pub async fn fetch(&self, address: &str) -> Result<Vec<u8>, RetrievalError> {
        tracing::debug!(address, "Fetching source document");
        let response = self.client.get(address).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = RetrievalError::UnexpectedStatus { status, body };
            tracing::error!(address, error = %error, "Document retrieval failed");
            return Err(error);
        }

        let bytes = response.bytes().await?;
        tracing::debug!(address, size = bytes.len(), "Document retrieved");
        Ok(bytes.to_vec())
    }
}
