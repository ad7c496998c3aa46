//! # QueryShield - Injection-Safe Customer Query Service
//!
//! An HTTP service that lists and edits customers stored in a document
//! database, turning untrusted query parameters into filters that can only
//! contain an allow-listed set of operators.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Entities, value objects and the filtering primitives
//!   (injection detection, safe regex, operator allow-list)
//! - **Application**: Parameter validation, filter composition, pagination and use cases
//! - **Infrastructure**: MongoDB and in-memory persistence adapters
//! - **API**: HTTP handlers, the request guard middleware and OpenAPI docs
//!
//! ## Example Usage
//!
//! ```no_run
//! use query_shield::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let state = ApplicationBuilder::new(Config::in_memory())
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
