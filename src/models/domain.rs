use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Urgency label returned by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Emergency,
    ];

    /// Numeric severity shown to the user (1 = mild, 4 = emergency)
    pub fn severity(self) -> u8 {
        match self {
            UrgencyLevel::Low => 1,
            UrgencyLevel::Medium => 2,
            UrgencyLevel::High => 3,
            UrgencyLevel::Emergency => 4,
        }
    }

    /// Advice sentence appended to the result summary
    pub fn advice(self) -> &'static str {
        match self {
            UrgencyLevel::Emergency => {
                "This appears to be a medical emergency. Seek immediate medical attention."
            }
            UrgencyLevel::High => {
                "This requires prompt medical attention. Contact your healthcare provider as soon as possible."
            }
            UrgencyLevel::Medium => {
                "Medical consultation is recommended to properly evaluate these symptoms."
            }
            UrgencyLevel::Low => {
                "The symptoms appear to be mild. Monitor your condition and consult a doctor if they worsen."
            }
        }
    }
}

/// A candidate condition with its likelihood as a percentage (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleCondition {
    pub name: String,
    pub probability: f64,
    pub description: String,
}

/// Dietary guidance attached to a symptom result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietGuidance {
    pub recommended_foods: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub hydration: String,
}

/// Medication and supplement guidance attached to a symptom result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationGuidance {
    pub recommended: Vec<String>,
    pub supplements: Vec<String>,
    pub precautions: String,
}

/// Normalized outcome of a symptom analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomResult {
    pub summary: String,
    pub possible_conditions: Vec<PossibleCondition>,
    pub severity: u8,
    pub recommendations: Vec<String>,
    pub requires_attention: bool,
    pub disclaimer: String,
    pub diet: DietGuidance,
    pub medications: MedicationGuidance,
}

impl SymptomResult {
    /// Name of the most likely condition, if the model returned any
    pub fn top_condition(&self) -> Option<&str> {
        self.possible_conditions.first().map(|c| c.name.as_str())
    }
}

/// Read a nullable column, treating `null` like a missing value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Patient,
    Doctor,
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_medications: Vec<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Placeholder shown to users who have not saved a profile yet
    pub fn default_for(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            full_name: String::new(),
            date_of_birth: None,
            gender: None,
            blood_type: None,
            allergies: vec![],
            current_medications: vec![],
            emergency_contact_name: None,
            emergency_contact_phone: None,
            role: UserRole::Patient,
            updated_at: None,
        }
    }

    pub fn is_doctor(&self) -> bool {
        self.role == UserRole::Doctor
    }
}

/// Row of the `doctor_profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub profile_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualifications: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_years: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consultation_fee: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clinic_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: String,
}

/// Row of the `symptoms` history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symptoms_input: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: u8,
    pub created_at: DateTime<Utc>,
}

impl SymptomRecord {
    /// Build the history row for a finished analysis
    pub fn from_result(user_id: &str, symptoms: &str, result: &SymptomResult) -> Self {
        Self {
            user_id: user_id.to_string(),
            symptoms_input: symptoms.to_string(),
            result: result.top_condition().unwrap_or("Inconclusive").to_string(),
            severity: result.severity,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

/// Row of the `appointments` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    #[serde(default)]
    pub doctor_id: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}
