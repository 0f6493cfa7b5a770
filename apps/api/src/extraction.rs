//! Document-to-text boundary. Only PDFs are accepted; type validation
//! happens before extraction is attempted.

use bytes::Bytes;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Extracts plain text from an uploaded PDF.
pub fn extract_pdf_text(data: &Bytes) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Extraction(format!("Could not read PDF: {e}")))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Extraction(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let data = Bytes::from_static(b"definitely not a pdf");
        let err = extract_pdf_text(&data).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
