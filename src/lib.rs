//! Symptom Checker - symptom analysis and patient portal service
//!
//! This library turns a free-text symptom description into a structured,
//! validated result using a remote language model, and exposes the patient
//! and doctor portal data kept in Supabase.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{process_model_output, validate_model_output, AnalysisError, ResponseError, SymptomAnalyzer, TextGenerator};
pub use crate::models::{PossibleCondition, SymptomResult, UrgencyLevel};
