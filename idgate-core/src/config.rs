//! Provider configuration.
//!
//! [`ProviderSettings`] is the partially-populated form read from a config
//! file or built in code. Finalizing it against a provider's
//! [`ProviderDefaults`] yields a [`ProviderConfig`] in which every endpoint is
//! an absolute URL.

use crate::error::{IdgateError, Result};
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Well-known endpoints and scope a provider falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub name: &'static str,
    pub authorize_url: &'static str,
    pub token_url: &'static str,
    pub profile_url: &'static str,
    pub validate_url: &'static str,
    pub scope: &'static str,
}

/// Provider settings where anything may be left unset.
///
/// Empty strings count as unset.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("profile_url", &self.profile_url)
            .field("validate_url", &self.validate_url)
            .field("scope", &self.scope)
            .finish()
    }
}

impl ProviderSettings {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), ..Default::default() }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = secret.into();
        self
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = Some(url.into());
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    pub fn with_validate_url(mut self, url: impl Into<String>) -> Self {
        self.validate_url = Some(url.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Fill every unset field from `defaults` and parse the endpoints.
    ///
    /// Finalizing settings that already carry every value leaves them unchanged.
    pub fn finalize(self, defaults: &ProviderDefaults) -> Result<ProviderConfig> {
        let scope = match non_empty(self.scope) {
            Some(raw) => Scope::parse(&raw),
            None => Scope::parse(defaults.scope),
        };

        Ok(ProviderConfig {
            name: non_empty(self.name).unwrap_or_else(|| defaults.name.to_string()),
            client_id: self.client_id,
            client_secret: self.client_secret,
            authorize_url: endpoint("authorize_url", self.authorize_url, defaults.authorize_url)?,
            token_url: endpoint("token_url", self.token_url, defaults.token_url)?,
            profile_url: endpoint("profile_url", self.profile_url, defaults.profile_url)?,
            validate_url: endpoint("validate_url", self.validate_url, defaults.validate_url)?,
            scope,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn endpoint(field: &str, value: Option<String>, default: &str) -> Result<Url> {
    let raw = non_empty(value).unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim())
        .map_err(|e| IdgateError::Config(format!("{field} {raw:?} is not an absolute URL: {e}")))
}

/// Finalized provider configuration.
///
/// Endpoints are fixed once constructed. Only the scope can still be widened,
/// through [`ProviderConfig::add_scope`].
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    name: String,
    client_id: String,
    client_secret: String,
    authorize_url: Url,
    token_url: Url,
    profile_url: Url,
    validate_url: Url,
    scope: Scope,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("authorize_url", &self.authorize_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("profile_url", &self.profile_url.as_str())
            .field("validate_url", &self.validate_url.as_str())
            .field("scope", &self.scope.to_string())
            .finish()
    }
}

impl ProviderConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn profile_url(&self) -> &Url {
        &self.profile_url
    }

    pub fn validate_url(&self) -> &Url {
        &self.validate_url
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Widen the scope. Returns `false` if the token was already requested.
    pub fn add_scope(&mut self, token: &str) -> bool {
        self.scope.insert(token)
    }

    /// Authorization URL the user agent is redirected to at the start of the OAuth flow.
    pub fn login_url(&self, redirect_uri: &str, state: &str) -> Url {
        let mut url = self.authorize_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", &self.scope.to_string());
            if !state.is_empty() {
                query.append_pair("state", state);
            }
        }
        url
    }

    /// Back to the settings form, with every field populated.
    pub fn to_settings(&self) -> ProviderSettings {
        ProviderSettings {
            name: Some(self.name.clone()),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            authorize_url: Some(self.authorize_url.to_string()),
            token_url: Some(self.token_url.to_string()),
            profile_url: Some(self.profile_url.to_string()),
            validate_url: Some(self.validate_url.to_string()),
            scope: Some(self.scope.to_string()),
        }
    }
}
