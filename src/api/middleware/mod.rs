pub mod input_sanitization;
pub mod request_logging;

pub use input_sanitization::{InputSanitizationConfig, InputSanitizationLayer};
pub use request_logging::request_logging_middleware;
