// src/domain/secret/resolver.rs
//
// Secret Resolution
//
// Users paste either a bare token or an address copied from the CatNote
// web UI (with or without scheme). Both must yield the same token.
//
// Precedence:
// - Literal token only when the text neither starts with "http" nor
//   contains the API path for the configured host
// - Everything else goes through URL parsing

use std::fmt;

use url::Url;

use crate::domain::SecretError;

/// Host the API lives under (`api.<host>`).
pub const DEFAULT_API_HOST: &str = "catnote.cn";

/// Path segment that precedes the secret in API addresses.
pub const API_PATH_MARKER: &str = "/sapi/";

/// A canonical, non-empty secret token.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret(String);

impl ResolvedSecret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Log-safe form: first three characters followed by `***`.
    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(3).collect();
        format!("{}***", visible)
    }
}

impl fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolvedSecret").field(&self.masked()).finish()
    }
}

impl AsRef<str> for ResolvedSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Maps raw user input to a secret for a fixed API host.
#[derive(Debug, Clone)]
pub struct SecretResolver {
    /// Lowercased `api.<host>/sapi/`
    api_path: String,
}

impl SecretResolver {
    pub fn new(api_host: &str) -> Self {
        Self {
            api_path: format!("api.{}{}", api_host.trim(), API_PATH_MARKER).to_lowercase(),
        }
    }

    /// Resolve raw input into a secret.
    pub fn resolve(&self, raw_input: &str) -> Result<ResolvedSecret, SecretError> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Err(SecretError::EmptySecret);
        }

        let looks_like_url = starts_with_http(trimmed);
        let has_api_path = trimmed.to_lowercase().contains(&self.api_path);

        if !looks_like_url && !has_api_path {
            return Ok(ResolvedSecret(trimmed.to_string()));
        }

        let candidate = if looks_like_url {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed.trim_start_matches('/'))
        };

        let url = Url::parse(&candidate).map_err(|e| {
            log::debug!("Secret input is not a parseable URL: {}", e);
            SecretError::InvalidSecretOrUrl
        })?;

        extract_from_path(url.path())
    }
}

impl Default for SecretResolver {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST)
    }
}

/// Free-function form of [`SecretResolver::resolve`].
pub fn resolve_secret(api_host: &str, raw_input: &str) -> Result<ResolvedSecret, SecretError> {
    SecretResolver::new(api_host).resolve(raw_input)
}

fn starts_with_http(text: &str) -> bool {
    text.get(..4)
        .map(|prefix| prefix.eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}

/// First non-empty segment after the marker, percent-decoded.
///
/// `Url::path()` is already encoded; the endpoint encodes the secret again,
/// so the token is kept in its plain form here.
fn extract_from_path(path: &str) -> Result<ResolvedSecret, SecretError> {
    // ASCII lowercasing keeps byte offsets aligned with `path`.
    let marker_index = path
        .to_ascii_lowercase()
        .find(API_PATH_MARKER)
        .ok_or(SecretError::InvalidSecretOrUrl)?;

    let remainder = &path[marker_index + API_PATH_MARKER.len()..];
    let secret = remainder
        .split('/')
        .find(|segment| !segment.is_empty())
        .ok_or(SecretError::MissingSecretInPath)?;

    let secret = urlencoding::decode(secret).map_err(|e| {
        log::debug!("Secret segment is not valid UTF-8 once decoded: {}", e);
        SecretError::InvalidSecretOrUrl
    })?;

    if secret.trim().is_empty() {
        return Err(SecretError::MissingSecretInPath);
    }

    Ok(ResolvedSecret(secret.into_owned()))
}
