//! Vocabulary source acquisition.

use vocab_core::IngestError;

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Read the raw text of a vocabulary source.
///
/// `location` is an http(s) URL or a filesystem path.
pub async fn load(location: &str) -> Result<String, IngestError> {
    let unavailable = |reason: String| {
        IngestError::SourceUnavailable(format!("{}: {}", location, reason))
    };

    if is_remote(location) {
        tracing::debug!(url = location, "Fetching vocabulary");
        let response = reqwest::get(location)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| unavailable(e.to_string()))?;
        response.text().await.map_err(|e| unavailable(e.to_string()))
    } else {
        tracing::debug!(path = location, "Reading vocabulary");
        tokio::fs::read_to_string(location)
            .await
            .map_err(|e| unavailable(e.to_string()))
    }
}
