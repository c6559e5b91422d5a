/// Boxed error produced by an [`HttpTransport`](crate::HttpTransport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum IdgateError {
    /// The transport could not complete the request. Passed through untouched.
    #[error(transparent)]
    Transport(TransportError),

    /// The provider answered with something other than 200.
    #[error("got {status} from {endpoint:?} {body}")]
    Status { status: u16, endpoint: String, body: String },

    /// The response body did not match the expected structure.
    #[error("{source} unmarshaling {body} from {endpoint:?}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The membership check completed and the user is not in the required org or team.
    #[error("user is not a member of {}", membership_target(.org, .team.as_deref()))]
    Unauthorized { org: String, team: Option<String> },

    #[error("no email address found")]
    NoEmail,

    #[error("Configuration error: {0}")]
    Config(String),
}

fn membership_target(org: &str, team: Option<&str>) -> String {
    match team {
        Some(team) => format!("team {team:?} in organization {org:?}"),
        None => format!("organization {org:?}"),
    }
}

impl IdgateError {
    /// True when the user was turned away by membership policy rather than
    /// by a failure. A missing primary email is a failure, not a denial.
    pub fn is_denial(&self) -> bool {
        matches!(self, IdgateError::Unauthorized { .. })
    }

    /// Message safe to show an end user. Details stay in operator logs.
    pub fn user_message(&self) -> &'static str {
        if self.is_denial() { "access denied" } else { "authentication failed" }
    }
}

pub type Result<T> = std::result::Result<T, IdgateError>;
