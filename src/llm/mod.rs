pub mod gemini;

use async_trait::async_trait;

use crate::error::Result;

/// Generative reasoning collaborator: a role-specific system instruction plus
/// a task-specific prompt body in, free text out.
///
/// Stages hold this behind an `Arc` so a single client, constructed at
/// startup, serves the whole workflow.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, system_instruction: &str, input: &str) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::AppError;

    /// Completion double that returns the same canned text for every call.
    pub struct CannedCompletion(pub String);

    #[async_trait]
    impl TextCompletion for CannedCompletion {
        async fn complete(&self, _system_instruction: &str, _input: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    /// Completion double that fails every call.
    pub struct FailingCompletion;

    #[async_trait]
    impl TextCompletion for FailingCompletion {
        async fn complete(&self, _system_instruction: &str, _input: &str) -> Result<String> {
            Err(AppError::LlmApi("completion service unavailable".to_string()))
        }
    }
}
