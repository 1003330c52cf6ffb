use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{prompt::build_analysis_prompt, validation::{process_model_output, ResponseError}};
use crate::models::SymptomResult;
use crate::services::GenerationError;

/// Message shown to end users for any analysis failure
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze symptoms. Please try again later.";

/// Errors from a single symptom analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Symptom description is empty")]
    EmptySymptoms,

    #[error("Model request failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Invalid model response: {0}")]
    Response(#[from] ResponseError),
}

impl AnalysisError {
    /// Fixed, user-facing text for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::EmptySymptoms => "Please describe your symptoms.",
            _ => ANALYSIS_FAILED_MESSAGE,
        }
    }
}

/// A remote text generation model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt and return the model's raw text reply
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Symptom analysis pipeline
///
/// Builds the prompt, performs one model call and validates the reply.
/// There is no retry: every failure ends the request.
#[derive(Clone)]
pub struct SymptomAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl SymptomAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Analyze a free-text symptom description
    pub async fn analyze(&self, symptoms: &str) -> Result<SymptomResult, AnalysisError> {
        if symptoms.trim().is_empty() {
            return Err(AnalysisError::EmptySymptoms);
        }

        let prompt = build_analysis_prompt(symptoms);
        let raw = self.generator.generate(&prompt).await?;

        tracing::debug!("Model reply ({} bytes): {}", raw.len(), raw);

        let result = process_model_output(&raw, symptoms).map_err(|e| {
            tracing::warn!("Rejected model reply: {}", e);
            e
        })?;

        tracing::info!(
            "Analysis complete: severity {}, {} conditions",
            result.severity,
            result.possible_conditions.len()
        );

        Ok(result)
    }
}
