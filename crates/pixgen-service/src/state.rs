//! Application state.

use std::sync::Arc;

use pixgen_store::RocksStore;

use crate::clipdrop::ClipdropClient;
use crate::config::ServiceConfig;
use crate::razorpay::RazorpayClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Razorpay client for payments (optional).
    pub gateway: Option<Arc<RazorpayClient>>,

    /// Clipdrop client for image generation (optional).
    pub imagegen: Option<Arc<ClipdropClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        // Create Razorpay client if configured
        let gateway = config
            .razorpay_key_id
            .as_ref()
            .zip(config.razorpay_key_secret.as_ref())
            .and_then(|(key_id, key_secret)| {
                match RazorpayClient::new(
                    &config.razorpay_base_url,
                    key_id,
                    key_secret,
                    config.razorpay_webhook_secret.clone(),
                ) {
                    Ok(client) => {
                        tracing::info!(gateway_url = %config.razorpay_base_url, "Razorpay integration enabled");
                        Some(Arc::new(client))
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to create Razorpay client");
                        None
                    }
                }
            });

        if gateway.is_none() {
            tracing::warn!("Razorpay not configured - credit purchases will not be available");
        }

        // Create Clipdrop client if configured
        let imagegen = config.clipdrop_api_key.as_ref().and_then(|key| {
            match ClipdropClient::new(&config.clipdrop_base_url, key) {
                Ok(client) => {
                    tracing::info!(imagegen_url = %config.clipdrop_base_url, "Clipdrop integration enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Clipdrop client");
                    None
                }
            }
        });

        if imagegen.is_none() {
            tracing::warn!("Clipdrop not configured - image generation will not be available");
        }

        Self {
            store,
            config,
            gateway,
            imagegen,
        }
    }
}
