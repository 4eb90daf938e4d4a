use bytes::Bytes;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";
const PDF_HEADER_WINDOW: usize = 1024;

/// Extracts plain text from an uploaded PDF resume.
///
/// Runs on the blocking pool: extraction is CPU-bound and the parser may
/// panic on malformed input, which surfaces here as a join error.
pub async fn extract_resume_text(data: Bytes) -> Result<String, AppError> {
    if !has_pdf_header(&data) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction aborted: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction failed: {e}")))?;

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the PDF".to_string(),
        ));
    }
    Ok(text)
}

/// Readers accept the `%PDF` marker anywhere in the first 1024 bytes.
fn has_pdf_header(data: &[u8]) -> bool {
    data[..data.len().min(PDF_HEADER_WINDOW)]
        .windows(PDF_MAGIC.len())
        .any(|window| window == PDF_MAGIC)
}

/// Collapses runs of blank lines and trailing spaces left by PDF layout.
fn normalize_whitespace(text: &str) -> String {
    let mut out = Vec::new();
    let mut blank_run = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !blank_run && !out.is_empty() {
                out.push("");
            }
            blank_run = true;
        } else {
            out.push(line);
            blank_run = false;
        }
    }
    while out.last() == Some(&"") {
        out.pop();
    }
    out.join("\n")
}
