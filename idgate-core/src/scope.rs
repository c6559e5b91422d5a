//! OAuth scope handling.
//!
//! A [`Scope`] is an ordered set of permission tokens. Adding a token that is
//! already present is a no-op, so configuration steps that widen a scope can
//! run more than once without duplicating tokens.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered, de-duplicated set of OAuth scope tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    tokens: Vec<String>,
}

impl Scope {
    /// Parse a space-separated scope string.
    pub fn parse(raw: &str) -> Self {
        let mut scope = Self::default();
        for token in raw.split_whitespace() {
            scope.insert(token);
        }
        scope
    }

    /// Add a token. Returns `false` if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token.is_empty() || self.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl From<&str> for Scope {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
