//! Pixgen HTTP API Service.
//!
//! This crate provides the HTTP API for the pixgen service, including:
//!
//! - Registration and login
//! - Credit balance, purchase, and settlement
//! - Text-to-image generation
//! - Razorpay webhooks
//!
//! # Authentication
//!
//! Requests authenticate with a bearer JWT issued at registration or
//! login, signed with the service secret.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Webhook handlers need async for consistency

pub mod auth;
pub mod clipdrop;
pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod razorpay;
pub mod routes;
pub mod state;

pub use clipdrop::{ClipdropClient, ClipdropError};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use razorpay::{RazorpayClient, RazorpayError};
pub use routes::create_router;
pub use state::AppState;
