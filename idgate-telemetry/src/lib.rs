//! # idgate-telemetry
//!
//! Structured logging for idgate using `tracing`.
//!
//! ## Usage
//!
//! ```rust
//! use idgate_telemetry::{init_telemetry, info, LogFormat};
//!
//! init_telemetry("idgate", LogFormat::Pretty).expect("Failed to initialize telemetry");
//! info!("ready");
//! ```

pub mod init;

// Re-export tracing macros for convenience
pub use tracing::{Span, debug, error, info, instrument, trace, warn};

pub use init::{LogFormat, init_telemetry};
