use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::models::{Appointment, AppointmentStatus, BookAppointmentRequest};
use crate::routes::{backend_error, bad_request, symptoms::UserQuery, AppState};

/// Configure appointment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/appointments", web::get().to(list_appointments))
        .route("/appointments", web::post().to(book_appointment));
}

/// GET /api/v1/appointments?userId={userId}
async fn list_appointments(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if query.user_id.is_empty() {
        return bad_request("Missing userId parameter", "userId query parameter is required".to_string());
    }

    match state.supabase.list_appointments(&query.user_id).await {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(e) => backend_error("Failed to fetch appointments", e),
    }
}

/// Book appointment endpoint
///
/// POST /api/v1/appointments
///
/// Request body:
/// ```json
/// {
///   "patientId": "string",
///   "doctorId": "string",
///   "scheduledFor": "2025-05-01T09:30:00Z",
///   "reason": "string"
/// }
/// ```
async fn book_appointment(
    state: web::Data<AppState>,
    req: web::Json<BookAppointmentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let now = Utc::now();
    if req.scheduled_for <= now {
        return bad_request(
            "Invalid appointment time",
            "Appointments must be scheduled in the future".to_string(),
        );
    }

    let req = req.into_inner();
    let appointment = Appointment {
        id: uuid::Uuid::new_v4(),
        patient_id: req.patient_id,
        doctor_id: req.doctor_id,
        scheduled_for: req.scheduled_for,
        reason: req.reason,
        status: AppointmentStatus::Scheduled,
        created_at: now,
    };

    match state.supabase.create_appointment(&appointment).await {
        Ok(saved) => {
            tracing::info!("Appointment {} booked for {}", saved.id, saved.patient_id);
            HttpResponse::Created().json(saved)
        }
        Err(e) => backend_error("Failed to book appointment", e),
    }
}
