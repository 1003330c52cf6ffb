use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use symptom_checker::config::Settings;
use symptom_checker::core::SymptomAnalyzer;
use symptom_checker::routes::{self, AppState};
use symptom_checker::services::{GeminiClient, GenerationConfig, SupabaseClient};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, format!("Failed to load configuration: {}", e))
    })?;

    // Initialize logging
    let logging = settings.logging.with_env_overrides(|name| std::env::var(name).ok());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)))
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting symptom checker service...");
    info!("Configuration loaded successfully");

    if settings.gemini.api_key.is_empty() {
        // Analysis requests will fail until a key is configured
        error!("Gemini API key is missing; symptom analysis is unavailable");
    }

    let gemini = GeminiClient::new(
        settings.gemini.endpoint.clone(),
        settings.gemini.model.clone(),
        settings.gemini.api_key.clone(),
        GenerationConfig::from(&settings.gemini.generation),
        settings.gemini.timeout_secs,
    )
    .map_err(|e| startup_error("Failed to create Gemini client", e))?;

    info!("Gemini client initialized (model: {})", settings.gemini.model);

    let supabase = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.anon_key.clone(),
        settings.supabase.tables.clone().into(),
        settings.supabase.timeout_secs,
    )
    .map_err(|e| startup_error("Failed to create Supabase client", e))?;

    info!("Supabase client initialized");

    // Build application state
    let app_state = AppState {
        analyzer: Arc::new(SymptomAnalyzer::new(Arc::new(gemini))),
        supabase: Arc::new(supabase),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
