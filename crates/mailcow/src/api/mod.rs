//! Mailcow admin API integration
//!
//! This module provides:
//! - Wire shapes for requests and responses
//! - The outcome envelope codec
//! - The HTTP transport seam and the API client
//! - Normalization of responses to domain models

mod client;
pub mod envelope;
mod normalize;
mod transport;

pub use client::MailcowClient;
pub use envelope::{Classification, Envelope, Outcome, OutcomeKind, decode_envelope};
pub use normalize::{
    BYTES_PER_MB, bytes_to_mb, encode_flag, flag, join_destinations, normalize_alias,
    normalize_domain, normalize_mailbox, split_destinations,
};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

/// Mailcow API wire types
///
/// Mailcow is loosely typed on the way in: every attribute of an add/edit
/// request is sent as a string, booleans as `"1"`/`"0"`.
pub mod wire {
    use serde::{Deserialize, Serialize};

    /// Alias as returned by `get/alias`
    #[derive(Debug, Clone, Deserialize)]
    pub struct AliasResponse {
        pub id: i64,
        #[serde(default)]
        pub domain: String,
        pub goto: String,
        pub address: String,
        pub active: i64,
    }

    /// Domain as returned by `get/domain`
    #[derive(Debug, Clone, Deserialize)]
    pub struct DomainResponse {
        #[serde(rename = "domain_name")]
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub active: i64,
        #[serde(rename = "max_quota_for_domain")]
        pub quota_bytes: i64,
        #[serde(rename = "max_num_mboxes_for_domain")]
        pub max_mailboxes: i64,
        #[serde(rename = "def_new_mailbox_quota")]
        pub mailbox_default_size_bytes: i64,
        #[serde(rename = "max_quota_for_mbox")]
        pub mailbox_max_size_bytes: i64,
        #[serde(rename = "max_num_aliases_for_domain")]
        pub max_aliases: i64,
    }

    /// Mailbox as returned by `get/mailbox`
    #[derive(Debug, Clone, Deserialize)]
    pub struct MailboxResponse {
        #[serde(rename = "local_part")]
        pub username: String,
        pub domain: String,
        #[serde(rename = "username")]
        pub email: String,
        pub active: i64,
        #[serde(default)]
        pub name: String,
        pub quota: i64,
    }

    /// Mutable alias attributes, used by both add and edit
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct AliasAttributes {
        pub active: String,
        pub address: String,
        pub goto: String,
    }

    /// Mutable domain attributes (everything but the domain name)
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct DomainAttributes {
        pub active: String,
        pub aliases: String,
        pub defquota: String,
        pub description: String,
        pub mailboxes: String,
        pub maxquota: String,
        pub quota: String,
    }

    /// Body of `add/domain`
    #[derive(Debug, Clone, Serialize)]
    pub struct AddDomain {
        pub domain: String,
        #[serde(flatten)]
        pub attr: DomainAttributes,
    }

    /// Body of `add/mailbox`
    #[derive(Debug, Clone, Serialize)]
    pub struct AddMailbox {
        pub active: String,
        pub domain: String,
        pub local_part: String,
        pub name: String,
        pub password: String,
        pub password2: String,
        pub quota: String,
    }

    /// Mutable mailbox attributes; the password is only sent when changing it
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct MailboxAttributes {
        pub active: String,
        pub name: String,
        pub quota: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub password: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub password2: Option<String>,
    }

    /// Body of every `edit/*` call: the new attributes plus the items to apply them to
    #[derive(Debug, Clone, Serialize)]
    pub struct EditRequest<'a, A> {
        pub attr: &'a A,
        pub items: [&'a str; 1],
    }
}
