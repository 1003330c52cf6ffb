// Symptom analysis pipeline exports
pub mod analyzer;
pub mod extract;
pub mod normalize;
pub mod prompt;
pub mod validation;

pub use analyzer::{AnalysisError, SymptomAnalyzer, TextGenerator, ANALYSIS_FAILED_MESSAGE};
pub use extract::extract_json_object;
pub use normalize::{generate_summary, normalize_response, to_percentage};
pub use prompt::build_analysis_prompt;
pub use validation::{process_model_output, validate_model_output, ModelResponse, ResponseError};
