//! Core types for pixgen.
//!
//! This crate defines the domain model shared by the store and the HTTP
//! service:
//!
//! - Typed identifiers ([`UserId`], [`TransactionId`])
//! - The [`User`] record and its credit balance
//! - The [`Purchase`] record linking a plan to a gateway order
//! - The static [`Plan`] catalog
//!
//! It performs no I/O; persistence and transport live in `pixgen-store`
//! and `pixgen-service`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod plan;
pub mod purchase;
pub mod user;

pub use ids::{IdError, TransactionId, UserId};
pub use plan::{Plan, UnknownPlan};
pub use purchase::Purchase;
pub use user::{User, GENERATION_COST_CREDITS, SIGNUP_CREDITS};
