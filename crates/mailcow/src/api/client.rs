//! Mailcow API HTTP client
//!
//! One client holds the base URL, the API key and the transport, and is
//! shared by every resource. It keeps no per-call state. Every call is a
//! single attempt: no retries, no backoff, no timeout beyond the transport
//! default.

use log::debug;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

use super::envelope::{self, Envelope};
use super::transport::{HttpRequest, Method, Transport, UreqTransport};
use super::wire::{
    AddDomain, AddMailbox, AliasAttributes, AliasResponse, DomainAttributes, DomainResponse,
    EditRequest, MailboxAttributes, MailboxResponse,
};
use crate::error::{Error, Result};

/// Mailcow admin API client
#[derive(Clone)]
pub struct MailcowClient {
    host_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for MailcowClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailcowClient")
            .field("host_url", &self.host_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl MailcowClient {
    const CONTENT_TYPE: &'static str = "application/json; charset=UTF-8";
    const API_KEY_HEADER: &'static str = "X-API-Key";

    /// Create a client using the default HTTP transport
    pub fn new(host_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_transport(host_url, api_key, Arc::new(UreqTransport::new()))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(
        host_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let host_url = host_url.into().trim_end_matches('/').to_string();
        Self {
            host_url,
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    /// Both host and API key are non-empty
    pub fn is_configured(&self) -> bool {
        !self.host_url.is_empty() && !self.api_key.is_empty()
    }

    /// Issue one request and return the body of a 200 response
    ///
    /// # Errors
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Status`] for any status other than 200
    pub fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.host_url, path),
            headers: vec![
                ("Content-Type".to_string(), Self::CONTENT_TYPE.to_string()),
                (Self::API_KEY_HEADER.to_string(), self.api_key.clone()),
            ],
            body,
        };

        debug!("{} {}", request.method, path);
        let response = self.transport.execute(&request)?;
        debug!("{} {} -> {}", request.method, path, response.status);

        if response.status != 200 {
            return Err(Error::Status {
                code: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response.body)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::Get, path, None)?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::Decode(format!("unexpected response from {path}: {e}")))
    }

    /// POST and classify the returned envelope
    fn post_checked(&self, path: &str, body: Vec<u8>) -> Result<Envelope> {
        let response = self.send(Method::Post, path, Some(body))?;
        let envelope = envelope::decode_envelope(&response)?;
        envelope.check()?;
        Ok(envelope)
    }

    fn delete_item(&self, path: &str, item: &str) -> Result<()> {
        self.post_checked(path, envelope::encode_batch(item)?)?;
        Ok(())
    }

    fn edit_item<A: serde::Serialize>(&self, path: &str, item: &str, attr: &A) -> Result<Vec<u8>> {
        let body = envelope::encode(&EditRequest { attr, items: [item] })?;
        self.send(Method::Post, path, Some(body))
    }

    // === Aliases ===

    pub fn get_alias(&self, id: i64) -> Result<AliasResponse> {
        self.get_json(&format!("/api/v1/get/alias/{id}"))
    }

    pub fn get_all_aliases(&self) -> Result<Vec<AliasResponse>> {
        self.get_json("/api/v1/get/alias/all")
    }

    pub fn delete_alias(&self, id: i64) -> Result<()> {
        self.delete_item("/api/v1/delete/alias", &id.to_string())
    }

    /// Create an alias; the returned envelope carries the assigned id
    pub fn add_alias(&self, attr: &AliasAttributes) -> Result<Envelope> {
        self.post_checked("/api/v1/add/alias", envelope::encode(attr)?)
    }

    /// Edit an alias and return the raw outcome envelope unclassified
    pub fn edit_alias(&self, id: i64, attr: &AliasAttributes) -> Result<Vec<u8>> {
        self.edit_item("/api/v1/edit/alias", &id.to_string(), attr)
    }

    // === Domains ===

    pub fn get_domain(&self, name: &str) -> Result<DomainResponse> {
        self.get_json(&format!("/api/v1/get/domain/{}", path_segment(name)))
    }

    pub fn get_all_domains(&self) -> Result<Vec<DomainResponse>> {
        self.get_json("/api/v1/get/domain/all")
    }

    pub fn delete_domain(&self, name: &str) -> Result<()> {
        self.delete_item("/api/v1/delete/domain", name)
    }

    pub fn add_domain(&self, domain: &AddDomain) -> Result<Envelope> {
        self.post_checked("/api/v1/add/domain", envelope::encode(domain)?)
    }

    /// Edit a domain and return the raw outcome envelope unclassified
    pub fn edit_domain(&self, name: &str, attr: &DomainAttributes) -> Result<Vec<u8>> {
        self.edit_item("/api/v1/edit/domain", name, attr)
    }

    // === Mailboxes ===

    pub fn get_mailbox(&self, email: &str) -> Result<MailboxResponse> {
        self.get_json(&format!("/api/v1/get/mailbox/{}", path_segment(email)))
    }

    pub fn get_all_mailboxes(&self) -> Result<Vec<MailboxResponse>> {
        self.get_json("/api/v1/get/mailbox/all")
    }

    pub fn delete_mailbox(&self, email: &str) -> Result<()> {
        self.delete_item("/api/v1/delete/mailbox", email)
    }

    pub fn add_mailbox(&self, mailbox: &AddMailbox) -> Result<Envelope> {
        self.post_checked("/api/v1/add/mailbox", envelope::encode(mailbox)?)
    }

    /// Edit a mailbox and return the raw outcome envelope unclassified
    pub fn edit_mailbox(&self, email: &str, attr: &MailboxAttributes) -> Result<Vec<u8>> {
        self.edit_item("/api/v1/edit/mailbox", email, attr)
    }
}

/// Percent-encode a path segment; `@` is a valid path character and stays literal
fn path_segment(segment: &str) -> String {
    urlencoding::encode(segment).replace("%40", "@")
}
