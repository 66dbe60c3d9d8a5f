//! Best-effort text extraction from retrieved document blobs.

use thiserror::Error;

/// Errors raised while decoding a document blob into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// PDF decoding failed on a corrupt or unsupported file.
    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),
    /// Non-PDF blob was not valid UTF-8 text.
    #[error("Document is neither a PDF nor valid UTF-8 text")]
    InvalidEncoding,
    /// Extraction task was cancelled or panicked.
    #[error("Extraction task failed: {0}")]
    Task(String),
    /// Extraction produced no usable text.
    #[error("Document contained no extractable text")]
    Empty,
}

/// Decode a document blob into plain text.
///
/// Blobs starting with the `%PDF` magic go through `pdf-extract`; everything else is
/// accepted as UTF-8 plain text. PDF decoding is CPU-bound, so it runs on the blocking
/// pool rather than stalling the async executor.
pub async fn extract_text(blob: Vec<u8>) -> Result<String, ExtractionError> {
    let text = if blob.starts_with(b"%PDF") {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&blob))
            .await
            .map_err(|error| ExtractionError::Task(error.to_string()))?
            .map_err(|error| ExtractionError::Pdf(error.to_string()))?
    } else {
        String::from_utf8(blob).map_err(|_| ExtractionError::InvalidEncoding)?
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_text_blob_passes_through() {
        let text = extract_text(b"A grace period of thirty days applies.".to_vec())
            .await
            .expect("extraction succeeds");
        assert_eq!(text, "A grace period of thirty days applies.");
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected() {
        let error = extract_text(vec![0xff, 0xfe, 0x80])
            .await
            .expect_err("extraction fails");
        assert!(matches!(error, ExtractionError::InvalidEncoding));
    }

    #[tokio::test]
    async fn whitespace_only_document_is_rejected() {
        let error = extract_text(b"   \n\t  ".to_vec())
            .await
            .expect_err("extraction fails");
        assert!(matches!(error, ExtractionError::Empty));
    }
}
