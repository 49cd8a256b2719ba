//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use pixgen_core::SIGNUP_CREDITS;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/pixgen").
    pub data_dir: String,

    /// Secret used to sign and verify access tokens.
    pub jwt_secret: String,

    /// Access token lifetime in hours (default: 24).
    pub token_ttl_hours: i64,

    /// Credits granted to a new account (default: 5).
    pub signup_credits: i64,

    /// Razorpay API key id (optional).
    pub razorpay_key_id: Option<String>,

    /// Razorpay API key secret (optional).
    pub razorpay_key_secret: Option<String>,

    /// Razorpay webhook signing secret (optional).
    pub razorpay_webhook_secret: Option<String>,

    /// Razorpay API URL (default: `<https://api.razorpay.com>`).
    pub razorpay_base_url: String,

    /// Clipdrop API key (optional).
    pub clipdrop_api_key: Option<String>,

    /// Clipdrop API URL (default: `<https://clipdrop-api.co>`).
    pub clipdrop_base_url: String,

    /// Currency for gateway orders (default: "INR").
    pub currency: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds. Must exceed the image generation
    /// timeout so slow renders are not cut off mid-request.
    pub request_timeout_seconds: u64,
}

/// Razorpay secrets file structure.
#[derive(Debug, Deserialize)]
struct RazorpaySecrets {
    key_id: String,
    key_secret: String,
    #[serde(default)]
    webhook_secret: Option<String>,
}

/// Clipdrop secrets file structure.
#[derive(Debug, Deserialize)]
struct ClipdropSecrets {
    api_key: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load gateway secrets from file first, then fall back to env vars
        let (razorpay_key_id, razorpay_key_secret, razorpay_webhook_secret) =
            load_razorpay_secrets();
        let clipdrop_api_key = load_clipdrop_secrets();

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set - using development default");
            "dev-secret-change-me".into()
        });

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/pixgen".into()),
            jwt_secret,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            signup_credits: std::env::var("SIGNUP_CREDITS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SIGNUP_CREDITS),
            razorpay_key_id,
            razorpay_key_secret,
            razorpay_webhook_secret,
            razorpay_base_url: std::env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),
            clipdrop_api_key,
            clipdrop_base_url: std::env::var("CLIPDROP_BASE_URL")
                .unwrap_or_else(|_| "https://clipdrop-api.co".into()),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "INR".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(90),
        }
    }
}

/// Load Razorpay secrets from file or environment.
fn load_razorpay_secrets() -> (Option<String>, Option<String>, Option<String>) {
    // Try multiple paths for the secrets file
    let secret_paths = [
        ".secrets/razorpay.json",
        "pixgen/.secrets/razorpay.json",
        "../.secrets/razorpay.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<RazorpaySecrets>(path) {
            tracing::info!(path = %path, "Loaded Razorpay secrets from file");
            return (
                Some(secrets.key_id),
                Some(secrets.key_secret),
                secrets.webhook_secret,
            );
        }
    }

    // Fall back to environment variables
    tracing::debug!("Razorpay secrets file not found, using environment variables");
    (
        std::env::var("RAZORPAY_KEY_ID").ok(),
        std::env::var("RAZORPAY_KEY_SECRET").ok(),
        std::env::var("RAZORPAY_WEBHOOK_SECRET").ok(),
    )
}

/// Load the Clipdrop API key from file or environment.
fn load_clipdrop_secrets() -> Option<String> {
    let secret_paths = [
        ".secrets/clipdrop.json",
        "pixgen/.secrets/clipdrop.json",
        "../.secrets/clipdrop.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<ClipdropSecrets>(path) {
            tracing::info!(path = %path, "Loaded Clipdrop secrets from file");
            return Some(secrets.api_key);
        }
    }

    // Fall back to environment variables
    tracing::debug!("Clipdrop secrets file not found, using environment variables");
    std::env::var("CLIPDROP_API_KEY").ok()
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/pixgen".into(),
            jwt_secret: "dev-secret-change-me".into(),
            token_ttl_hours: 24,
            signup_credits: SIGNUP_CREDITS,
            razorpay_key_id: None,
            razorpay_key_secret: None,
            razorpay_webhook_secret: None,
            razorpay_base_url: "https://api.razorpay.com".into(),
            clipdrop_api_key: None,
            clipdrop_base_url: "https://clipdrop-api.co".into(),
            currency: "INR".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 90,
        }
    }
}
