use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::UserRole;

/// Request to analyze a free-text symptom description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeSymptomsRequest {
    #[validate(length(min = 1, max = 4000), custom(function = "not_blank"))]
    pub symptoms: String,
    #[serde(default)]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
}

/// Profile fields editable by the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 200))]
    #[serde(alias = "full_name", rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    #[serde(alias = "date_of_birth", rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    #[serde(alias = "blood_type", rename = "bloodType")]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    #[serde(alias = "current_medications", rename = "currentMedications")]
    pub current_medications: Vec<String>,
    #[serde(default)]
    #[serde(alias = "emergency_contact_name", rename = "emergencyContactName")]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    #[serde(alias = "emergency_contact_phone", rename = "emergencyContactPhone")]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// Doctor-specific profile fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertDoctorProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub specialization: String,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[validate(range(max = 80))]
    #[serde(default)]
    #[serde(alias = "experience_years", rename = "experienceYears")]
    pub experience_years: u32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    #[serde(alias = "consultation_fee", rename = "consultationFee")]
    pub consultation_fee: f64,
    #[serde(default)]
    #[serde(alias = "clinic_address", rename = "clinicAddress")]
    pub clinic_address: String,
    #[serde(default)]
    pub about: String,
}

/// Request to book an appointment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookAppointmentRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "patient_id", rename = "patientId")]
    pub patient_id: String,
    #[serde(default)]
    #[serde(alias = "doctor_id", rename = "doctorId")]
    pub doctor_id: Option<String>,
    #[serde(alias = "scheduled_for", rename = "scheduledFor")]
    pub scheduled_for: DateTime<Utc>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub reason: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
