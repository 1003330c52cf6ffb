// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Appointment, AppointmentStatus, DietGuidance, DoctorProfile, MedicationGuidance,
    PossibleCondition, Profile, SymptomRecord, SymptomResult, UrgencyLevel, UserRole,
};
pub use requests::{AnalyzeSymptomsRequest, BookAppointmentRequest, UpsertDoctorProfileRequest, UpsertProfileRequest};
pub use responses::{AnalyzeSymptomsResponse, DoctorResponse, ErrorResponse, HealthResponse, SymptomHistoryResponse};
