pub mod dialog;
pub mod generation;
pub mod tts;
