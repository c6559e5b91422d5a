//! # idgate-core
//!
//! Provider contract and shared types for idgate.
//!
//! - [`Provider`] - Resolves a verified email for an authenticated [`Session`]
//! - [`ProviderSettings`] / [`ProviderConfig`] - Partial and finalized provider configuration
//! - [`Scope`] - De-duplicated OAuth scope
//! - [`HttpTransport`] - Injected HTTP client seam
//! - [`IdgateError`] / [`Result`] - Unified error handling

pub mod config;
pub mod error;
pub mod provider;
pub mod scope;
pub mod session;
pub mod transport;

pub use config::{ProviderConfig, ProviderDefaults, ProviderSettings};
pub use error::{IdgateError, Result, TransportError};
pub use provider::Provider;
pub use scope::Scope;
pub use session::Session;
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
