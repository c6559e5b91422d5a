use crate::config::ProviderConfig;
use crate::error::Result;
use crate::session::Session;
use async_trait::async_trait;

/// An external identity service that can vouch for a user's email address.
///
/// Each service gets its own implementation; callers hold a
/// `Arc<dyn Provider>` and never branch on which one they have.
///
/// Implementations are configured once and then shared read-only across
/// concurrent resolutions.
#[async_trait]
pub trait Provider: Send + Sync {
    fn config(&self) -> &ProviderConfig;

    /// Human-readable provider name.
    fn name(&self) -> &str {
        self.config().name()
    }

    /// Resolve the verified email for `session`, enforcing any membership
    /// constraints first.
    ///
    /// A policy denial is reported as [`IdgateError::Unauthorized`](crate::IdgateError::Unauthorized),
    /// never as an empty address.
    async fn resolve_verified_email(&self, session: &Session) -> Result<String>;

    /// Ask the provider whether the session's token is still accepted.
    async fn validate_session(&self, session: &Session) -> Result<bool>;
}
