pub mod resolver;

pub use resolver::{resolve_secret, ResolvedSecret, SecretResolver, API_PATH_MARKER, DEFAULT_API_HOST};
