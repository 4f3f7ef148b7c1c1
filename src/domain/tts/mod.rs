pub mod error;
pub mod service;
pub mod voice;

pub use error::SynthesisError;
pub use service::{placeholder_audio_url, DialogSynthesizer, AUDIO_DATA_URL_PREFIX};
pub use voice::openai_voice_for_language;
