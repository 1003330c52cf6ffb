// Route exports
pub mod appointments;
pub mod profiles;
pub mod symptoms;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::SymptomAnalyzer;
use crate::models::ErrorResponse;
use crate::services::{SupabaseClient, SupabaseError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SymptomAnalyzer>,
    pub supabase: Arc<SupabaseClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(symptoms::configure)
            .configure(profiles::configure)
            .configure(appointments::configure),
    );
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Map a backend failure to a JSON error response
pub(crate) fn backend_error(context: &str, err: SupabaseError) -> HttpResponse {
    match err {
        SupabaseError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: other.to_string(),
                status_code: 500,
            })
        }
    }
}
