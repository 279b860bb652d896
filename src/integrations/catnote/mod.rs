pub mod client;

pub use client::{
    endpoint_url, note_payload, CatNoteClient, NoteTransport, TransportResponse, DEFAULT_TIMEOUT,
};

#[cfg(test)]
pub use client::MockNoteTransport;
