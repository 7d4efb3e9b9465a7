//! Mailbox model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::plan::Value;

/// A mailbox as confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Local part of the address
    pub username: String,
    pub domain: String,
    /// `username@domain`
    pub email: String,
    pub active: bool,
    /// Display name
    pub name: String,
    /// Quota in MB
    pub quota: i64,
}

/// Composite key of a mailbox
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailboxKey {
    pub username: String,
    pub domain: String,
}

impl MailboxKey {
    pub fn new(username: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            domain: domain.into(),
        }
    }

    /// Parse `username@domain`, splitting at the last `@`
    pub fn parse(email: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidImportKey {
            key: email.to_string(),
            reason: reason.to_string(),
        };
        let (username, domain) = email
            .rsplit_once('@')
            .ok_or_else(|| invalid("expected username@domain"))?;
        if username.is_empty() || domain.is_empty() {
            return Err(invalid("username and domain must not be empty"));
        }
        Ok(Self::new(username, domain))
    }

    pub fn email(&self) -> String {
        format!("{}@{}", self.username, self.domain)
    }
}

impl fmt::Display for MailboxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}

/// Desired configuration of a mailbox
///
/// `password` is write-only: required on create, sent on update only when
/// known, and never part of the state snapshot.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MailboxConfig {
    pub username: Value<String>,
    pub domain: Value<String>,
    pub name: Value<String>,
    pub active: Value<bool>,
    pub quota: Value<i64>,
    pub password: Value<String>,
}

impl fmt::Debug for MailboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailboxConfig")
            .field("username", &self.username)
            .field("domain", &self.domain)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("quota", &self.quota)
            .field("password", &self.password.as_known().map(|_| "<redacted>"))
            .finish()
    }
}
