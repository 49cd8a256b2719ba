//! Razorpay integration for credit purchases.
//!
//! Razorpay handles:
//! - Order creation when a purchase is initiated
//! - Payment capture on the client side
//! - Webhook notifications when payments complete

pub mod client;
pub mod types;

pub use client::{RazorpayClient, RazorpayError};
pub use types::Order;
