use anyhow::{Context, Result};
use idgate_auth::{GitHubProvider, ProviderSettings, ReqwestTransport};
use idgate_telemetry::LogFormat;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Contents of the `idgate` TOML file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderSettings,
    pub github: GitHubSection,
    pub http: HttpSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubSection {
    pub org: String,
    pub team: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSection {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub format: LogFormat,
}

impl Config {
    /// Read `path`, or start from defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `IDGATE_*` overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(client_id) = lookup("IDGATE_CLIENT_ID") {
            self.provider.client_id = client_id;
        }
        if let Some(secret) = lookup("IDGATE_CLIENT_SECRET") {
            self.provider.client_secret = secret;
        }
        if let Some(org) = lookup("IDGATE_GITHUB_ORG") {
            self.github.org = org;
        }
        if let Some(team) = lookup("IDGATE_GITHUB_TEAM") {
            self.github.team = team;
        }
        self
    }

    pub fn build_provider(&self) -> Result<GitHubProvider> {
        let mut transport = ReqwestTransport::builder();
        if let Some(secs) = self.http.timeout_secs {
            transport = transport.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.http.user_agent {
            transport = transport.user_agent(user_agent.clone());
        }

        let provider = GitHubProvider::new(self.provider.clone(), Arc::new(transport.build()?))?
            .with_org_team(self.github.org.clone(), self.github.team.clone())?;
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idgate_auth::Provider;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.provider, ProviderSettings::default());
        assert!(config.github.org.is_empty());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
            [provider]
            client_id = "abc"
            client_secret = "shh"
            validate_url = "https://ghe.example.com/api/v3/user/emails"

            [github]
            org = "acme"
            team = "infra"

            [http]
            timeout_secs = 10

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.client_id, "abc");
        assert_eq!(config.provider.client_secret, "shh");
        assert_eq!(config.github.team, "infra");
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.logging.format, LogFormat::Json);

        let provider = config.build_provider().unwrap();
        assert_eq!(provider.config().scope().to_string(), "user:email read:org");
        assert_eq!(
            provider.config().validate_url().as_str(),
            "https://ghe.example.com/api/v3/user/emails"
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_toml("[github]\norganisation = \"acme\"\n").is_err());
    }

    #[test]
    fn test_misspelled_provider_key_is_rejected() {
        let err = Config::from_toml(
            "[provider]\nvaldiate_url = \"https://ghe.example.com/api/v3/user/emails\"\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("valdiate_url"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("IDGATE_CLIENT_ID", "from-env"), ("IDGATE_GITHUB_ORG", "acme")]);
        let config = Config::from_toml("[provider]\nclient_id = \"from-file\"\n")
            .unwrap()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.provider.client_id, "from-env");
        assert_eq!(config.github.org, "acme");
        assert!(config.github.team.is_empty());
    }

    #[test]
    fn test_team_without_org_fails_to_build() {
        let config = Config::from_toml("[github]\nteam = \"infra\"\n").unwrap();
        assert!(config.build_provider().is_err());
    }
}
