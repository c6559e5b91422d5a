//! # idgate-auth
//!
//! Identity providers that turn an OAuth access token into a verified email
//! address, optionally gated on organization or team membership.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idgate_auth::{GitHubProvider, Provider, ProviderSettings, ReqwestTransport, Session};
//! use std::sync::Arc;
//!
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let provider = GitHubProvider::new(ProviderSettings::new("client-id"), transport)?
//!     .with_org_team("acme", "infra")?;
//!
//! let email = provider.resolve_verified_email(&Session::new(token)).await?;
//! ```

pub mod providers;
mod transport;

pub use idgate_core::{
    HttpRequest, HttpResponse, HttpTransport, IdgateError, Provider, ProviderConfig,
    ProviderSettings, Result, Scope, Session,
};
pub use providers::{GITHUB_DEFAULTS, GitHubProvider};
pub use transport::{ReqwestTransport, ReqwestTransportBuilder};
