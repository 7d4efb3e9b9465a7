//! Provider context shared by every resource operation

use log::info;
use std::sync::Arc;

use crate::api::MailcowClient;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Explicit configuration context, built once and passed to every
/// lifecycle call.
///
/// Cloning is cheap; clones share the same client. The client is never
/// mutated after configuration, so contexts can be used from several threads
/// for unrelated resource instances.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    client: Option<Arc<MailcowClient>>,
}

impl ProviderContext {
    /// A context that has not been configured yet
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Resolve the provider configuration (explicit values, then environment)
    /// and build the shared client
    pub fn configure(config: &ProviderConfig) -> Result<Self> {
        let resolved = config.resolve()?;
        info!("Configured Mailcow provider for {}", resolved.host);
        Ok(Self::with_client(MailcowClient::new(resolved.host, resolved.api_key)))
    }

    pub fn with_client(client: MailcowClient) -> Self {
        Self {
            client: Some(Arc::new(client)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The shared client
    ///
    /// # Errors
    /// [`Error::Precondition`] if the context was never configured
    pub fn client(&self) -> Result<&MailcowClient> {
        self.client.as_deref().ok_or_else(|| {
            Error::Precondition(
                "the provider has not been configured; configure it before managing resources"
                    .to_string(),
            )
        })
    }

    /// The shared client, additionally requiring a non-empty host and API key
    pub fn configured_client(&self) -> Result<&MailcowClient> {
        let client = self.client()?;
        if !client.is_configured() {
            return Err(Error::Configuration(
                "host and apikey must be set before creating resources".to_string(),
            ));
        }
        Ok(client)
    }
}
