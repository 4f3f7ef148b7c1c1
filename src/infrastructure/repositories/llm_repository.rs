use crate::domain::dialog::GenerateDialogParams;
use crate::domain::generation::{DialogPayload, GenerationError};
use async_trait::async_trait;

/// Repository for dialog generation.
/// Abstracts the underlying language model (OpenAI-compatible chat API, local stub, etc.)
///
/// Implementations return the model's dialog JSON as parsed; validation and
/// alignment with the input words happen in the domain.
#[async_trait]
pub trait LlmRepository: Send + Sync {
    /// Produce one dialog for the given level, languages and vocabulary
    ///
    /// # Errors
    /// Returns error on transport failure, a rejected request, or output that is not dialog JSON
    async fn generate(
        &self,
        params: &GenerateDialogParams,
    ) -> Result<DialogPayload, GenerationError>;
}
