use serde::{Deserialize, Serialize};
use crate::models::domain::{DoctorProfile, Profile, SymptomRecord, SymptomResult};

/// Response for the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSymptomsResponse {
    pub symptoms: String,
    pub result: SymptomResult,
}

/// Symptom history for one user, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomHistoryResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub entries: Vec<SymptomRecord>,
    pub count: usize,
}

/// Public doctor page data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorResponse {
    pub profile: Profile,
    pub details: Option<DoctorProfile>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
