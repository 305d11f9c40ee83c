//! Answer generation over retrieved context

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{LlmProvider, VectorSearchResult};

use super::prompt::PromptBuilder;

/// Fallback answer when retrieval produced no context. This is a normal
/// answer, not an error.
pub const NOT_ENOUGH_CONTEXT: &str = "Not enough context. Try uploading relevant documents.";

/// Formats retrieved context into a prompt and invokes the language model.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerGenerator {
    /// Create a new answer generator
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Answer a question given retrieved chunks.
    ///
    /// Empty context short-circuits to [`NOT_ENOUGH_CONTEXT`] without
    /// invoking the model. Otherwise the model is called exactly once and
    /// its response returned trimmed.
    pub async fn answer(&self, question: &str, context: &[VectorSearchResult]) -> Result<String> {
        if context.is_empty() {
            tracing::debug!("No context retrieved, skipping model call");
            return Ok(NOT_ENOUGH_CONTEXT.to_string());
        }

        let context_block = PromptBuilder::build_context(context);
        let prompt = PromptBuilder::build_qa_prompt(question, &context_block);

        let response = self.llm.generate(&prompt).await?;
        Ok(response.trim().to_string())
    }
}
