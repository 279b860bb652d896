pub mod invariants;

pub use invariants::{content_length, validate_note_content, MAX_CONTENT_LENGTH};
