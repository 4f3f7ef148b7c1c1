pub mod dialog_repository;
pub mod elevenlabs_tts_repository;
pub mod llm_repository;
pub mod openai_llm_repository;
pub mod openai_tts_repository;
pub mod stub_llm_repository;
pub mod stub_tts_repository;
pub mod tts_repository;

pub use dialog_repository::{DialogRepository, PgDialogRepository};
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use llm_repository::LlmRepository;
pub use openai_llm_repository::OpenAiLlmRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use stub_llm_repository::StubLlmRepository;
pub use stub_tts_repository::StubTtsRepository;
pub use tts_repository::TtsRepository;
