//! Configuration management: defaults, validation, loading from the environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}
