/// A turn that could not be voiced. Aborts the whole dialog.
#[derive(Debug, thiserror::Error)]
#[error("synthesis failed for turn {turn}: {message}")]
pub struct SynthesisError {
    pub turn: usize,
    pub message: String,
}

impl SynthesisError {
    pub fn new(turn: usize, message: impl Into<String>) -> Self {
        Self {
            turn,
            message: message.into(),
        }
    }
}
