//! Identity provider implementations.

mod github;

pub use github::{GITHUB_DEFAULTS, GitHubProvider};
