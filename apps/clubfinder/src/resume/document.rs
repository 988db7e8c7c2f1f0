//! Resume decoding: turns an uploaded file into the plain text the extractor scores.
//!
//! PDF text extraction is CPU-bound, so it runs inside `tokio::task::spawn_blocking`.

use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// An uploaded resume, before decoding.
#[derive(Debug, Clone)]
pub enum ResumeDocument {
    Pdf(Vec<u8>),
    PlainText(String),
}

impl ResumeDocument {
    /// Picks a variant from the file contents: PDF by magic bytes, otherwise UTF-8 text.
    pub fn sniff(bytes: Vec<u8>) -> Result<Self, AppError> {
        if bytes.starts_with(PDF_MAGIC) {
            return Ok(ResumeDocument::Pdf(bytes));
        }
        String::from_utf8(bytes)
            .map(ResumeDocument::PlainText)
            .map_err(|_| AppError::Document("file is neither a PDF nor UTF-8 text".to_string()))
    }

    /// Decodes to a single string. An empty result is valid (scanned PDFs have no text layer)
    /// and simply yields no tags.
    pub async fn decode(self) -> Result<String, AppError> {
        match self {
            ResumeDocument::PlainText(text) => Ok(text),
            ResumeDocument::Pdf(bytes) => {
                let size = bytes.len();
                let text = tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                })
                .await
                .map_err(|e| {
                    // pdf-extract panics on some malformed files
                    if e.is_panic() {
                        AppError::Document("PDF decoder aborted on a malformed file".to_string())
                    } else {
                        AppError::Internal(anyhow::anyhow!(
                            "spawn_blocking failed in PDF decode: {e}"
                        ))
                    }
                })?
                .map_err(|e| AppError::Document(format!("PDF text extraction failed: {e}")))?;

                if text.trim().is_empty() {
                    warn!(bytes = size, "PDF contained no extractable text");
                } else {
                    debug!(bytes = size, chars = text.len(), "PDF decoded");
                }
                Ok(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_text() {
        let doc = ResumeDocument::sniff(b"Volunteer coordinator".to_vec()).unwrap();
        assert!(matches!(doc, ResumeDocument::PlainText(ref t) if t == "Volunteer coordinator"));
    }

    #[test]
    fn test_sniff_pdf_by_magic() {
        let doc = ResumeDocument::sniff(b"%PDF-1.7\n...".to_vec()).unwrap();
        assert!(matches!(doc, ResumeDocument::Pdf(_)));
    }

    #[test]
    fn test_sniff_rejects_binary() {
        let err = ResumeDocument::sniff(vec![0xff, 0xfe, 0x00, 0x80]).unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
    }

    #[tokio::test]
    async fn test_plain_text_decodes_as_is() {
        let text = ResumeDocument::PlainText("mentor\nvolunteer".to_string())
            .decode()
            .await
            .unwrap();
        assert_eq!(text, "mentor\nvolunteer");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_document_error() {
        let err = ResumeDocument::Pdf(b"%PDF-1.4 this is not really a pdf".to_vec())
            .decode()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
    }
}
