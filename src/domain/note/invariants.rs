use crate::domain::{DomainResult, ValidationError};

/// Upper bound for a single note, in UTF-16 code units.
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Length of note content as the server counts it (UTF-16 code units).
pub fn content_length(content: &str) -> usize {
    content.encode_utf16().count()
}

/// Validates note content against `limit`.
///
/// Emptiness is checked first, so whitespace-only text longer than the
/// limit still reports `EmptyContent`.
pub fn validate_note_content(content: &str, limit: usize) -> DomainResult<()> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    let length = content_length(content);
    if length > limit {
        return Err(ValidationError::TooLong { length, limit });
    }

    Ok(())
}
