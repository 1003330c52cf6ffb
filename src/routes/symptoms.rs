use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::core::AnalysisError;
use crate::models::{
    AnalyzeSymptomsRequest, AnalyzeSymptomsResponse, ErrorResponse, HealthResponse,
    SymptomHistoryResponse, SymptomRecord,
};
use crate::routes::{backend_error, bad_request, AppState};

/// `?userId=` query used by the per-user listing endpoints
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Configure symptom checker routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/symptoms/analyze", web::post().to(analyze_symptoms))
        .route("/symptoms/history", web::get().to(symptom_history));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Analyze symptoms endpoint
///
/// POST /api/v1/symptoms/analyze
///
/// Request body:
/// ```json
/// {
///   "symptoms": "string",
///   "userId": "string"
/// }
/// ```
async fn analyze_symptoms(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeSymptomsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for analyze request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let symptoms = req.symptoms.trim();

    tracing::info!(
        "Analyzing symptoms ({} chars) for user {:?}",
        symptoms.chars().count(),
        req.user_id
    );

    let result = match state.analyzer.analyze(symptoms).await {
        Ok(result) => result,
        Err(e @ AnalysisError::EmptySymptoms) => {
            return bad_request("Validation failed", e.user_message().to_string());
        }
        Err(e) => {
            tracing::error!("Error analyzing symptoms: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "analysis_failed".to_string(),
                message: e.user_message().to_string(),
                status_code: 502,
            });
        }
    };

    // History is best-effort: the user still gets the analysis
    if let Some(user_id) = req.user_id.as_deref().filter(|id| !id.is_empty()) {
        let record = SymptomRecord::from_result(user_id, symptoms, &result);
        if let Err(e) = state.supabase.record_symptom_check(&record).await {
            tracing::warn!("Analysis for {} not saved to history: {}", user_id, e);
        }
    }

    HttpResponse::Ok().json(AnalyzeSymptomsResponse {
        symptoms: symptoms.to_string(),
        result,
    })
}

/// Symptom history for a user
///
/// GET /api/v1/symptoms/history?userId={userId}
async fn symptom_history(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let user_id = &query.user_id;
    if user_id.is_empty() {
        return bad_request("Missing userId parameter", "userId query parameter is required".to_string());
    }

    match state.supabase.list_symptom_history(user_id).await {
        Ok(entries) => HttpResponse::Ok().json(SymptomHistoryResponse {
            user_id: user_id.clone(),
            count: entries.len(),
            entries,
        }),
        Err(e) => backend_error("Failed to fetch symptom history", e),
    }
}
