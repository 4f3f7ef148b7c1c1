/// Failures while asking the language model for a dialog
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),
    #[error("generation provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode completion response: {0}")]
    Decode(String),
    #[error("generation provider error: {0}")]
    Provider(String),
    #[error("generation provider returned no choices")]
    NoChoices,
    #[error("could not parse dialog payload: {0}")]
    MalformedPayload(String),
    #[error("generation provider returned no usable turns")]
    NoTurns,
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
}

/// Cut provider text down for diagnostics without splitting a character
pub fn truncate_for_log(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
