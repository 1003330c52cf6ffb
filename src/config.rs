use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::services::{GenerationConfig, SupabaseTables};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl From<&GenerationSettings> for GenerationConfig {
    fn from(value: &GenerationSettings) -> Self {
        Self {
            temperature: value.temperature,
            top_p: value.top_p,
            top_k: value.top_k,
            max_output_tokens: value.max_output_tokens,
        }
    }
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String { "gemini-2.0-flash".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_temperature() -> f32 { 0.1 }
fn default_top_p() -> f32 { 0.8 }
fn default_top_k() -> u32 { 40 }
fn default_max_output_tokens() -> u32 { 2048 }

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub tables: TableSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
    #[serde(default = "default_doctor_profiles_table")]
    pub doctor_profiles: String,
    #[serde(default = "default_symptoms_table")]
    pub symptoms: String,
    #[serde(default = "default_appointments_table")]
    pub appointments: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            profiles: default_profiles_table(),
            doctor_profiles: default_doctor_profiles_table(),
            symptoms: default_symptoms_table(),
            appointments: default_appointments_table(),
        }
    }
}

impl From<TableSettings> for SupabaseTables {
    fn from(value: TableSettings) -> Self {
        Self {
            profiles: value.profiles,
            doctor_profiles: value.doctor_profiles,
            symptoms: value.symptoms,
            appointments: value.appointments,
        }
    }
}

fn default_profiles_table() -> String { "profiles".to_string() }
fn default_doctor_profiles_table() -> String { "doctor_profiles".to_string() }
fn default_symptoms_table() -> String { "symptoms".to_string() }
fn default_appointments_table() -> String { "appointments".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Let LOG_LEVEL / LOG_FORMAT take precedence over the configured values
    pub fn with_env_overrides<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, fallback: &str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            level: pick("LOG_LEVEL", &self.level),
            format: pick("LOG_FORMAT", &self.format),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SYMPTOM__)
    /// 4. Well-known variables: GEMINI_API_KEY, SUPABASE_URL, SUPABASE_ANON_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., SYMPTOM__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SYMPTOM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SYMPTOM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the unprefixed variables used by the web frontend's deployment
fn apply_env_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const OVERRIDES: &[(&str, &str)] = &[
        ("GEMINI_API_KEY", "gemini.api_key"),
        ("SUPABASE_URL", "supabase.url"),
        ("SUPABASE_ANON_KEY", "supabase.anon_key"),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in OVERRIDES {
        if let Some(value) = lookup(*var).filter(|v| !v.is_empty()) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8080

        [gemini]
        api_key = "file-key"

        [supabase]
        url = "https://project.supabase.co"
        anon_key = "anon"
    "#;

    fn from_str(toml: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings: Settings = from_str(MINIMAL).try_deserialize().unwrap();

        assert_eq!(settings.gemini.model, "gemini-2.0-flash");
        assert_eq!(settings.gemini.generation.top_k, 40);
        assert_eq!(settings.gemini.generation.max_output_tokens, 2048);
        assert_eq!(settings.supabase.tables.symptoms, "symptoms");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "compact");
    }

    #[test]
    fn test_env_overrides_win() {
        let config = apply_env_overrides(from_str(MINIMAL), |name| match name {
            "GEMINI_API_KEY" => Some("env-key".to_string()),
            "SUPABASE_ANON_KEY" => Some(String::new()),
            _ => None,
        })
        .unwrap();
        let settings: Settings = config.try_deserialize().unwrap();

        assert_eq!(settings.gemini.api_key, "env-key");
        // Empty values leave the file setting in place
        assert_eq!(settings.supabase.anon_key, "anon");
    }

    #[test]
    fn test_shipped_default_file_loads() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.supabase.tables.doctor_profiles, "doctor_profiles");
        assert_eq!(settings.logging.format, "compact");
    }

    #[test]
    fn test_log_env_overrides_configured_logging() {
        let configured = LoggingSettings {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        };

        let resolved = configured.with_env_overrides(|name| match name {
            "LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });

        assert_eq!(resolved.level, "debug");
        assert_eq!(resolved.format, "pretty");
    }

    #[test]
    fn test_generation_config_conversion() {
        let config = GenerationConfig::from(&GenerationSettings::default());
        assert_eq!(config, GenerationConfig::default());
    }
}
