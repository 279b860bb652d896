// src/integrations/mod.rs
//
// External Integrations Module

pub mod catnote;

pub use catnote::{
    endpoint_url, note_payload, CatNoteClient, NoteTransport, TransportResponse, DEFAULT_TIMEOUT,
};

#[cfg(test)]
pub use catnote::MockNoteTransport;
