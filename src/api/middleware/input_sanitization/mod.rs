//! Request-wide injection guard
//!
//! Inspects the query string of every request and the body of JSON
//! requests with the domain injection detector, before routing.

pub mod config;
pub mod middleware;

pub use config::InputSanitizationConfig;
pub use middleware::{InputSanitizationError, InputSanitizationLayer};
