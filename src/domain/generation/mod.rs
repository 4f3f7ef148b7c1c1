pub mod error;
pub mod prompt;
pub mod response;
pub mod service;

pub use error::GenerationError;
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
pub use response::{parse_dialog_payload, strip_code_fence, DialogPayload, TurnPayload};
pub use service::DialogGenerator;
