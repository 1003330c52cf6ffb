use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{DoctorProfile, DoctorResponse, Profile, UpsertDoctorProfileRequest, UpsertProfileRequest};
use crate::routes::{backend_error, bad_request, AppState};
use crate::services::SupabaseError;

/// Configure profile and doctor routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}", web::put().to(save_profile))
        .route("/profiles/{id}/doctor", web::put().to(save_doctor_details))
        .route("/doctors/{id}", web::get().to(get_doctor));
}

/// GET /api/v1/profiles/{id}
///
/// Users without a saved profile get an empty patient profile.
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.supabase.get_profile(&user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(SupabaseError::NotFound(_)) => {
            tracing::debug!("No profile for {}, returning default", user_id);
            HttpResponse::Ok().json(Profile::default_for(&user_id))
        }
        Err(e) => backend_error("Failed to fetch profile", e),
    }
}

/// PUT /api/v1/profiles/{id}
async fn save_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpsertProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let profile = Profile {
        id: path.into_inner(),
        full_name: req.full_name,
        date_of_birth: req.date_of_birth,
        gender: req.gender,
        blood_type: req.blood_type,
        allergies: trim_all(req.allergies),
        current_medications: trim_all(req.current_medications),
        emergency_contact_name: req.emergency_contact_name,
        emergency_contact_phone: req.emergency_contact_phone,
        role: req.role,
        updated_at: Some(chrono::Utc::now()),
    };

    match state.supabase.upsert_profile(&profile).await {
        Ok(saved) => {
            tracing::info!("Profile updated for {}", saved.id);
            HttpResponse::Ok().json(saved)
        }
        Err(e) => backend_error("Failed to update profile", e),
    }
}

/// PUT /api/v1/profiles/{id}/doctor
///
/// Only profiles with the doctor role may carry doctor details.
async fn save_doctor_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpsertDoctorProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let profile_id = path.into_inner();

    match state.supabase.get_profile(&profile_id).await {
        Ok(profile) if profile.is_doctor() => {}
        Ok(_) => {
            return bad_request(
                "Not a doctor",
                format!("Profile {} does not have the doctor role", profile_id),
            );
        }
        Err(e) => return backend_error("Failed to fetch profile", e),
    }

    let req = req.into_inner();
    let doctor = DoctorProfile {
        profile_id,
        specialization: req.specialization,
        qualifications: trim_all(req.qualifications),
        experience_years: req.experience_years,
        consultation_fee: req.consultation_fee,
        clinic_address: req.clinic_address,
        about: req.about,
    };

    match state.supabase.upsert_doctor_profile(&doctor).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => backend_error("Failed to update doctor details", e),
    }
}

/// GET /api/v1/doctors/{id}
async fn get_doctor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.supabase.get_doctor(&path).await {
        Ok((profile, details)) => HttpResponse::Ok().json(DoctorResponse { profile, details }),
        Err(e) => backend_error("Failed to fetch doctor", e),
    }
}

/// Trim comma-split list entries and drop empty ones
fn trim_all(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
