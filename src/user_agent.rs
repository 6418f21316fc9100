//! User-Agent string for APOD API and media requests.

/// Client identifier sent with every request.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("apod-client/{version} (astronomy-picture-of-the-day)")
}
