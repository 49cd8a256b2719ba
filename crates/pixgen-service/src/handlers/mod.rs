//! API handlers.

pub mod credits;
pub mod health;
pub mod images;
pub mod users;
pub mod webhooks;
