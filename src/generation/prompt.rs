//! Prompt templates for question answering

use crate::providers::VectorSearchResult;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts into one context block, order preserved,
    /// separated by a blank line.
    pub fn build_context(results: &[VectorSearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The fixed question-answering prompt: role instruction, context block,
    /// question, and the trailing "Answer:" cue.
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are a helpful assistant.
Use the information below to answer the question.

Context:
{context}

Question:
{question}

Answer:"#,
            context = context,
            question = question
        )
    }
}
