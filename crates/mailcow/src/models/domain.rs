//! Domain model

use serde::{Deserialize, Serialize};

use crate::plan::Value;

/// A mail domain as confirmed by the server
///
/// Sizes are in megabytes; Mailcow stores them in bytes and the conversion
/// truncates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Primary key; changing it means delete and recreate
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Total quota for the domain (MB)
    pub quota: i64,
    pub max_mailboxes: i64,
    /// Quota given to new mailboxes (MB)
    pub mailbox_default_size: i64,
    /// Largest quota a mailbox may have (MB)
    pub mailbox_max_size: i64,
    pub max_aliases: i64,
}

/// Desired configuration of a domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainConfig {
    pub name: Value<String>,
    pub description: Value<String>,
    pub active: Value<bool>,
    pub quota: Value<i64>,
    pub max_mailboxes: Value<i64>,
    pub mailbox_default_size: Value<i64>,
    pub mailbox_max_size: Value<i64>,
    pub max_aliases: Value<i64>,
}

impl From<&Domain> for DomainConfig {
    fn from(domain: &Domain) -> Self {
        Self {
            name: Value::Known(domain.name.clone()),
            description: Value::Known(domain.description.clone()),
            active: Value::Known(domain.active),
            quota: Value::Known(domain.quota),
            max_mailboxes: Value::Known(domain.max_mailboxes),
            mailbox_default_size: Value::Known(domain.mailbox_default_size),
            mailbox_max_size: Value::Known(domain.mailbox_max_size),
            max_aliases: Value::Known(domain.max_aliases),
        }
    }
}
