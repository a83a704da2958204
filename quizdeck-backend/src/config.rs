use std::env;

/// The address of a local development backend.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8090";

/// The environment variable that overrides the backend address.
pub const BACKEND_URL_VAR: &str = "QUIZDECK_BACKEND_URL";

/// Returns the backend base url, preferring the environment override when it
/// is set to something non-blank
pub fn resolve_backend_url() -> String {
    env::var(BACKEND_URL_VAR)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}
