use thiserror::Error;

/// Failure of one of the two upstream weather requests.
///
/// The variants only matter for log diagnostics; the orchestrator swallows
/// them all identically and the rendered view never distinguishes them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode weather service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Keep error bodies short enough for a log line.
///
/// The cut is pulled back to a char boundary so multibyte bodies clip
/// cleanly instead of panicking.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_owned();
    }

    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}
