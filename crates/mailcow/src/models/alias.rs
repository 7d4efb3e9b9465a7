//! Alias model

use serde::{Deserialize, Serialize};

use crate::plan::Value;

/// A forwarding alias as confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Assigned by Mailcow on creation, immutable afterwards
    pub id: i64,
    /// The alias address itself
    pub address: String,
    /// Where mail is forwarded to, in order. Addresses must not contain commas.
    pub destinations: Vec<String>,
    pub active: bool,
}

/// Desired configuration of an alias
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasConfig {
    pub address: Value<String>,
    pub destinations: Value<Vec<String>>,
    pub active: Value<bool>,
}

impl AliasConfig {
    /// Configuration with address and destinations set and `active` left null
    pub fn new(address: impl Into<String>, destinations: Vec<String>) -> Self {
        Self {
            address: Value::Known(address.into()),
            destinations: Value::Known(destinations),
            active: Value::Null,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Value::Known(active);
        self
    }
}
