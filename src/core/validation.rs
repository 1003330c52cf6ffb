use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::core::{extract::extract_json_object, normalize::normalize_response};
use crate::models::{SymptomResult, UrgencyLevel};

/// Errors raised while turning model output into a validated payload
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("No JSON object found in model output")]
    NoJsonFound,

    #[error("Malformed JSON in model output: {0}")]
    MalformedJson(String),

    #[error("Model output does not match the expected schema: {0}")]
    SchemaMismatch(String),
}

/// Condition as reported by the model, probability as a fraction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModelCondition {
    pub name: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub probability: f64,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDiet {
    pub recommended_foods: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub hydration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelMedications {
    pub recommended: Vec<String>,
    pub supplements: Vec<String>,
    pub precautions: String,
}

/// Model payload after parsing and schema checks
///
/// Every field is required. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    #[validate(nested)]
    pub possible_conditions: Vec<ModelCondition>,
    pub urgency_level: UrgencyLevel,
    pub recommendations: Vec<String>,
    pub requires_attention: bool,
    pub disclaimer: String,
    pub diet: ModelDiet,
    pub medications: ModelMedications,
}

/// Extract, parse and schema-check raw model output
pub fn validate_model_output(raw: &str) -> Result<ModelResponse, ResponseError> {
    let json = extract_json_object(raw)?;

    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ResponseError::MalformedJson(e.to_string()))?;

    let response: ModelResponse = serde_json::from_value(value)
        .map_err(|e| ResponseError::SchemaMismatch(e.to_string()))?;

    response
        .validate()
        .map_err(|e| ResponseError::SchemaMismatch(e.to_string()))?;

    Ok(response)
}

/// Full validate-and-normalize step for one model reply
pub fn process_model_output(raw: &str, symptoms: &str) -> Result<SymptomResult, ResponseError> {
    let response = validate_model_output(raw)?;
    Ok(normalize_response(&response, symptoms))
}
