//! GitHub provider.
//!
//! Resolution order:
//!
//! 1. With an organization configured, check membership first: the team list
//!    when a team is also configured, the organization list otherwise.
//! 2. List the user's email addresses and return the one GitHub marks primary.
//!
//! A user who fails the membership check never triggers the email call.

use async_trait::async_trait;
use idgate_core::{
    HttpRequest, HttpTransport, IdgateError, Provider, ProviderConfig, ProviderDefaults,
    ProviderSettings, Result, Session,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

/// Well-known GitHub endpoints.
pub const GITHUB_DEFAULTS: ProviderDefaults = ProviderDefaults {
    name: "GitHub",
    authorize_url: "https://github.com/login/oauth/authorize",
    token_url: "https://github.com/login/oauth/access_token",
    profile_url: "https://api.github.com/user",
    validate_url: "https://api.github.com/user/emails",
    scope: "user:email",
};

/// Scope needed to read organization and team membership.
const READ_ORG_SCOPE: &str = "read:org";

/// Media type for the membership endpoints.
const MEMBERSHIP_ACCEPT: &str = "application/vnd.github.moondragon+json";

/// Only the first page of organizations or teams is inspected.
const PAGE_LIMIT: &str = "100";

const EMAILS_PATH: &str = "/user/emails";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Organization {
    login: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Team {
    #[allow(dead_code)]
    name: String,
    slug: String,
    organization: Organization,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Email {
    email: String,
    primary: bool,
}

/// GitHub identity provider with optional organization and team gates.
///
/// # Example
///
/// ```rust,ignore
/// let provider = GitHubProvider::new(ProviderSettings::new("client-id"), transport)?
///     .with_org_team("acme", "")?;
/// assert_eq!(provider.config().scope().to_string(), "user:email read:org");
/// ```
pub struct GitHubProvider {
    config: ProviderConfig,
    transport: Arc<dyn HttpTransport>,
    org: String,
    team: String,
}

impl std::fmt::Debug for GitHubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubProvider")
            .field("config", &self.config)
            .field("org", &self.org)
            .field("team", &self.team)
            .finish_non_exhaustive()
    }
}

impl GitHubProvider {
    /// Finalize `settings` against the GitHub defaults.
    pub fn new(settings: ProviderSettings, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        Ok(Self::from_config(settings.finalize(&GITHUB_DEFAULTS)?, transport))
    }

    pub fn from_config(config: ProviderConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport, org: String::new(), team: String::new() }
    }

    /// Record the membership constraint and widen the scope to `read:org`
    /// when an organization is set.
    ///
    /// Safe to call repeatedly; the scope token is only added once. A team
    /// without an organization is rejected.
    pub fn set_org_team(&mut self, org: impl Into<String>, team: impl Into<String>) -> Result<()> {
        let org = org.into().trim().to_string();
        let team = team.into().trim().to_string();

        if org.is_empty() && !team.is_empty() {
            return Err(IdgateError::Config(format!(
                "team {team:?} is set without an organization"
            )));
        }

        if !org.is_empty() {
            self.config.add_scope(READ_ORG_SCOPE);
        }
        self.org = org;
        self.team = team;
        Ok(())
    }

    pub fn with_org_team(mut self, org: impl Into<String>, team: impl Into<String>) -> Result<Self> {
        self.set_org_team(org, team)?;
        Ok(self)
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    /// Whether the token's user belongs to the configured organization.
    pub async fn has_organization(&self, access_token: &str) -> Result<bool> {
        let request = self.membership_request("/user/orgs", access_token);
        let orgs: Vec<Organization> = self.get_json(request).await?;
        Ok(org_matches(&orgs, &self.org))
    }

    /// Whether the token's user is on a team in the configured organization,
    /// and on the configured team if there is one.
    pub async fn has_organization_and_team(&self, access_token: &str) -> Result<bool> {
        let request = self.membership_request("/user/teams", access_token);
        let teams: Vec<Team> = self.get_json(request).await?;
        Ok(team_matches(&teams, &self.org, &self.team))
    }

    async fn authorize(&self, access_token: &str) -> Result<()> {
        if self.org.is_empty() {
            return Ok(());
        }

        let (member, team) = if self.team.is_empty() {
            (self.has_organization(access_token).await?, None)
        } else {
            (self.has_organization_and_team(access_token).await?, Some(self.team.clone()))
        };

        if member {
            return Ok(());
        }

        info!(
            provider = self.name(),
            org = %self.org,
            team = team.as_deref().unwrap_or(""),
            "membership check denied access"
        );
        Err(IdgateError::Unauthorized { org: self.org.clone(), team })
    }

    fn membership_request(&self, path: &str, access_token: &str) -> HttpRequest {
        let url = self.api_url(path, &[("access_token", access_token), ("limit", PAGE_LIMIT)]);
        HttpRequest::get(url).header("Accept", MEMBERSHIP_ACCEPT)
    }

    /// API endpoints live next to the validate URL, so pointing it at a
    /// GitHub Enterprise host moves every call there.
    fn api_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let validate = self.config.validate_url();
        let base = validate.path().trim_end_matches('/');
        let base = base.strip_suffix(EMAILS_PATH).unwrap_or(base);

        let mut url = validate.clone();
        url.set_path(&format!("{base}{path}"));
        url.set_query(None);
        url.set_fragment(None);
        url.query_pairs_mut().extend_pairs(params);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let endpoint = request.endpoint();
        debug!(provider = self.name(), endpoint = %endpoint, "calling GitHub API");

        let response = self.transport.execute(request).await.map_err(IdgateError::Transport)?;
        if !response.is_ok() {
            return Err(IdgateError::Status { status: response.status, endpoint, body: response.body });
        }

        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(value),
            Err(source) => Err(IdgateError::Decode { endpoint, source, body: response.body }),
        }
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[instrument(skip_all, fields(provider = %self.config.name()))]
    async fn resolve_verified_email(&self, session: &Session) -> Result<String> {
        let access_token = session.access_token();
        self.authorize(access_token).await?;

        let url = self.api_url(EMAILS_PATH, &[("access_token", access_token)]);
        let emails: Vec<Email> = self.get_json(HttpRequest::get(url)).await?;
        debug!(count = emails.len(), "listed email addresses");

        primary_email(&emails).map(str::to_string).ok_or(IdgateError::NoEmail)
    }

    #[instrument(skip_all, fields(provider = %self.config.name()))]
    async fn validate_session(&self, session: &Session) -> Result<bool> {
        let mut url = self.config.validate_url().clone();
        url.query_pairs_mut().append_pair("access_token", session.access_token());
        let request = HttpRequest::get(url);
        let endpoint = request.endpoint();

        let response = self.transport.execute(request).await.map_err(IdgateError::Transport)?;
        match response.status {
            200 => Ok(true),
            401 | 403 => {
                debug!(status = response.status, "token rejected");
                Ok(false)
            }
            status => Err(IdgateError::Status { status, endpoint, body: response.body }),
        }
    }
}

/// Case-sensitive match on the organization login.
fn org_matches(orgs: &[Organization], org: &str) -> bool {
    orgs.iter().any(|o| o.login == org)
}

/// The team's organization must match, and the slug too unless `team` is empty.
/// The display name is never consulted.
fn team_matches(teams: &[Team], org: &str, team: &str) -> bool {
    teams
        .iter()
        .any(|t| t.organization.login == org && (team.is_empty() || t.slug == team))
}

/// First address flagged primary, in the order GitHub returned them.
fn primary_email(emails: &[Email]) -> Option<&str> {
    emails.iter().find(|e| e.primary).map(|e| e.email.as_str())
}
