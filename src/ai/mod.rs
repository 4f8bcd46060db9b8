//! AI backend integration
//!
//! The backend is an external service; this module only speaks its JSON API.

pub mod client;
pub mod types;

pub use client::AiClient;
pub use types::{AiInsight, CategorySuggestion, HealthStatus};
