//! # Recover Core
//!
//! Shared building blocks for the Recover backend crates: the common error
//! type and telemetry initialization.

pub mod error;
pub mod telemetry;

pub use error::{RecoverError, Result};
pub use telemetry::init_telemetry;
