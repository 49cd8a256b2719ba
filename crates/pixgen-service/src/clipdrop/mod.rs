//! Clipdrop integration for text-to-image generation.
//!
//! Clipdrop takes a text prompt and returns the rendered image as raw
//! PNG bytes. The service wraps those bytes in a data URL for clients.

pub mod client;

pub use client::{ClipdropClient, ClipdropError};
