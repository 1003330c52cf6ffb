use crate::models::{Appointment, DoctorProfile, Profile, SymptomRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// PostgREST code for "relation does not exist"
const UNDEFINED_TABLE: &str = "42P01";

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error {status}: {message}")]
    ApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl SupabaseError {
    fn is_undefined_table(&self) -> bool {
        matches!(self, SupabaseError::ApiError { code: Some(code), .. } if code == UNDEFINED_TABLE)
    }
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub doctor_profiles: String,
    pub symptoms: String,
    pub appointments: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            profiles: "profiles".to_string(),
            doctor_profiles: "doctor_profiles".to_string(),
            symptoms: "symptoms".to_string(),
            appointments: "appointments".to_string(),
        }
    }
}

/// Supabase REST (PostgREST) client
///
/// Handles all row-level reads and writes:
/// - Patient and doctor profiles
/// - Symptom check history
/// - Appointments
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SupabaseError> {
        let filters = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.table_url(table), filters);

        tracing::debug!("Selecting from {}: {}", table, filters);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {} rows: {}", table, e)))
    }

    async fn write<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
        upsert: bool,
    ) -> Result<T, SupabaseError> {
        let prefer = if upsert {
            "resolution=merge-duplicates,return=representation"
        } else {
            "return=representation"
        };

        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {} rows: {}", table, e)))?;

        if rows.is_empty() {
            return Err(SupabaseError::InvalidResponse(format!(
                "Write to {} returned no rows",
                table
            )));
        }

        Ok(rows.swap_remove(0))
    }

    /// Fetch the profile row for a user
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, SupabaseError> {
        let rows: Vec<Profile> = self
            .select(
                &self.tables.profiles,
                &[("select", "*".to_string()), ("id", format!("eq.{}", user_id))],
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Insert or update a profile row keyed by user id
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, SupabaseError> {
        let saved: Profile = self.write(&self.tables.profiles, profile, true).await?;
        tracing::debug!("Upserted profile {}", saved.id);
        Ok(saved)
    }

    /// Fetch doctor details for a profile
    pub async fn get_doctor_profile(&self, profile_id: &str) -> Result<DoctorProfile, SupabaseError> {
        let rows: Vec<DoctorProfile> = self
            .select(
                &self.tables.doctor_profiles,
                &[
                    ("select", "*".to_string()),
                    ("profile_id", format!("eq.{}", profile_id)),
                ],
            )
            .await?;

        rows.into_iter().next().ok_or_else(|| {
            SupabaseError::NotFound(format!("Doctor profile not found for {}", profile_id))
        })
    }

    /// Insert or update doctor details keyed by profile id
    pub async fn upsert_doctor_profile(
        &self,
        doctor: &DoctorProfile,
    ) -> Result<DoctorProfile, SupabaseError> {
        self.write(&self.tables.doctor_profiles, doctor, true).await
    }

    /// Fetch a doctor's public profile and details
    ///
    /// Only profiles with the doctor role are returned. Missing details
    /// are reported as `None` rather than an error.
    pub async fn get_doctor(
        &self,
        profile_id: &str,
    ) -> Result<(Profile, Option<DoctorProfile>), SupabaseError> {
        let rows: Vec<Profile> = self
            .select(
                &self.tables.profiles,
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", profile_id)),
                    ("role", "eq.doctor".to_string()),
                ],
            )
            .await?;

        let profile = rows
            .into_iter()
            .find(Profile::is_doctor)
            .ok_or_else(|| SupabaseError::NotFound(format!("Doctor not found: {}", profile_id)))?;

        let details = match self.get_doctor_profile(profile_id).await {
            Ok(details) => Some(details),
            Err(SupabaseError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        Ok((profile, details))
    }

    /// Append a symptom check to the user's history
    pub async fn record_symptom_check(
        &self,
        record: &SymptomRecord,
    ) -> Result<SymptomRecord, SupabaseError> {
        self.write(&self.tables.symptoms, record, false).await
    }

    /// List a user's symptom checks, newest first
    ///
    /// A project without the history table yields an empty history.
    pub async fn list_symptom_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<SymptomRecord>, SupabaseError> {
        let result = self
            .select(
                &self.tables.symptoms,
                &[
                    ("select", "user_id,symptoms_input,result,severity,created_at".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await;

        match result {
            Err(e) if e.is_undefined_table() => {
                tracing::warn!("Symptom history table is missing, returning empty history");
                Ok(vec![])
            }
            other => other,
        }
    }

    /// List a patient's appointments, soonest first
    pub async fn list_appointments(&self, patient_id: &str) -> Result<Vec<Appointment>, SupabaseError> {
        self.select(
            &self.tables.appointments,
            &[
                ("select", "*".to_string()),
                ("patient_id", format!("eq.{}", patient_id)),
                ("order", "scheduled_for.asc".to_string()),
            ],
        )
        .await
    }

    /// Insert a new appointment
    pub async fn create_appointment(
        &self,
        appointment: &Appointment,
    ) -> Result<Appointment, SupabaseError> {
        let saved: Appointment = self.write(&self.tables.appointments, appointment, false).await?;
        tracing::debug!("Booked appointment {} for {}", saved.id, saved.patient_id);
        Ok(saved)
    }
}

async fn check_status(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::error!("Supabase request failed: {} - {}", status, body);

    let parsed = serde_json::from_str::<PostgrestError>(&body).ok();
    let (code, message) = match parsed {
        Some(err) => (err.code, err.message.unwrap_or(body)),
        None => (None, body),
    };

    Err(SupabaseError::ApiError {
        status: status.as_u16(),
        code,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.test/".to_string(),
            "anon_key".to_string(),
            SupabaseTables::default(),
            30,
        )
        .unwrap();

        assert_eq!(client.table_url("profiles"), "https://project.supabase.test/rest/v1/profiles");
        assert_eq!(client.api_key, "anon_key");
    }

    #[test]
    fn test_undefined_table_detection() {
        let err = SupabaseError::ApiError {
            status: 404,
            code: Some("42P01".to_string()),
            message: "relation does not exist".to_string(),
        };
        assert!(err.is_undefined_table());
        assert!(!SupabaseError::NotFound("x".to_string()).is_undefined_table());
    }
}
