//! Resource lifecycle controllers
//!
//! One controller per entity kind maps desired configuration to
//! Create/Read/Update/Delete/Import against the Mailcow API. The server is
//! the source of truth: Read fully replaces the local snapshot, and a failed
//! operation never touches it.

mod alias;
mod context;
mod domain;
mod lifecycle;
mod mailbox;

pub use alias::AliasResource;
pub use context::ProviderContext;
pub use domain::DomainResource;
pub use lifecycle::{Lifecycle, PlanAction, PlannedChange};
pub use mailbox::MailboxResource;

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

use crate::api::envelope::{Classification, decode_envelope};
use crate::error::{Operation, OperationError, Result};
use crate::models::{Alias, Domain, Mailbox};

/// How Update treats the outcome envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Commit the planned state without classifying the envelope; a rejection
    /// is only logged
    #[default]
    Lenient,
    /// Classify the envelope like Create and Delete do
    Strict,
}

impl UpdatePolicy {
    /// Handle the raw response of an edit call for the entity `key` of
    /// `resource`
    ///
    /// # Errors
    /// Only under [`UpdatePolicy::Strict`]: [`crate::Error::Decode`] for an
    /// unreadable envelope and [`crate::Error::Rejected`] for a rejection.
    pub fn check_response(
        &self,
        resource: &str,
        key: &dyn fmt::Display,
        response: &[u8],
    ) -> Result<()> {
        match self {
            UpdatePolicy::Strict => decode_envelope(response)?.check(),
            UpdatePolicy::Lenient => {
                match decode_envelope(response).map(|envelope| envelope.classify()) {
                    Ok(Classification::Ok) => {}
                    Ok(Classification::Rejected(message)) => {
                        warn!("Update of {resource} {key} was rejected: {message}");
                    }
                    Err(e) => debug!("Ignoring unreadable {resource} {key} update response: {e}"),
                }
                Ok(())
            }
        }
    }
}

/// Shared shape of the lifecycle controllers
pub trait Resource {
    /// External type name, e.g. `mailcow_alias`
    const TYPE_NAME: &'static str;

    /// Desired configuration (tri-state attributes)
    type Config: Clone + fmt::Debug;
    /// Server-confirmed snapshot
    type State: Clone + fmt::Debug + PartialEq;
    /// Identity used for read and delete
    type Key: Clone + fmt::Display;

    /// Validate the configuration and apply registered defaults, producing
    /// the effective plan. No network access.
    fn plan(&self, config: &Self::Config) -> Result<Self::Config>;

    /// Attributes whose planned change cannot be applied in place
    fn requires_replace(&self, state: &Self::State, plan: &Self::Config) -> Vec<&'static str>;

    fn key(&self, state: &Self::State) -> Self::Key;

    /// Parse an externally supplied import identifier
    fn parse_import_key(&self, external_key: &str) -> Result<Self::Key>;

    fn create(&self, ctx: &ProviderContext, plan: &Self::Config) -> Result<Self::State>;

    fn read(&self, ctx: &ProviderContext, key: &Self::Key) -> Result<Self::State>;

    fn update(
        &self,
        ctx: &ProviderContext,
        state: &Self::State,
        plan: &Self::Config,
    ) -> Result<Self::State>;

    fn delete(&self, ctx: &ProviderContext, key: &Self::Key) -> Result<()>;

    /// Seed the key from an external identifier and hydrate through Read
    fn import(&self, ctx: &ProviderContext, external_key: &str) -> Result<Self::State> {
        let key = self.parse_import_key(external_key)?;
        self.read(ctx, &key)
    }
}

/// The closed set of managed resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Alias,
    Domain,
    Mailbox,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Alias,
        ResourceKind::Domain,
        ResourceKind::Mailbox,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceKind::Alias => AliasResource::TYPE_NAME,
            ResourceKind::Domain => DomainResource::TYPE_NAME,
            ResourceKind::Mailbox => MailboxResource::TYPE_NAME,
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == type_name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Read-only lookups exposed next to the managed resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataSourceKind {
    AllAliases,
    AllDomains,
    AllMailboxes,
    Domain,
    Mailbox,
}

impl DataSourceKind {
    pub const ALL: [DataSourceKind; 5] = [
        DataSourceKind::AllAliases,
        DataSourceKind::AllDomains,
        DataSourceKind::AllMailboxes,
        DataSourceKind::Domain,
        DataSourceKind::Mailbox,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            DataSourceKind::AllAliases => "mailcow_all_aliases",
            DataSourceKind::AllDomains => "mailcow_all_domains",
            DataSourceKind::AllMailboxes => "mailcow_all_mailboxes",
            DataSourceKind::Domain => "mailcow_domain",
            DataSourceKind::Mailbox => "mailcow_mailbox",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == type_name)
    }
}

/// Any server-confirmed snapshot, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    Alias(Alias),
    Domain(Domain),
    Mailbox(Mailbox),
}

impl ResourceState {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceState::Alias(_) => ResourceKind::Alias,
            ResourceState::Domain(_) => ResourceKind::Domain,
            ResourceState::Mailbox(_) => ResourceKind::Mailbox,
        }
    }
}

/// A controller of any kind, for hosts that dispatch on the type name
#[derive(Debug, Clone)]
pub enum ResourceController {
    Alias(AliasResource),
    Domain(DomainResource),
    Mailbox(MailboxResource),
}

impl ResourceController {
    pub fn new(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Alias => ResourceController::Alias(AliasResource::new()),
            ResourceKind::Domain => ResourceController::Domain(DomainResource::new()),
            ResourceKind::Mailbox => ResourceController::Mailbox(MailboxResource::new()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceController::Alias(_) => ResourceKind::Alias,
            ResourceController::Domain(_) => ResourceKind::Domain,
            ResourceController::Mailbox(_) => ResourceKind::Mailbox,
        }
    }

    /// Import by external identifier
    pub fn import(
        &self,
        ctx: &ProviderContext,
        external_key: &str,
    ) -> Result<ResourceState, OperationError> {
        let tag = |e| OperationError::new(self.kind().type_name(), Operation::Import, e);
        match self {
            ResourceController::Alias(r) => r.import(ctx, external_key).map(ResourceState::Alias),
            ResourceController::Domain(r) => r.import(ctx, external_key).map(ResourceState::Domain),
            ResourceController::Mailbox(r) => {
                r.import(ctx, external_key).map(ResourceState::Mailbox)
            }
        }
        .map_err(tag)
    }

    /// Re-read a snapshot from the server
    pub fn refresh(
        &self,
        ctx: &ProviderContext,
        state: &ResourceState,
    ) -> Result<ResourceState, OperationError> {
        let tag = |e| OperationError::new(self.kind().type_name(), Operation::Read, e);
        match (self, state) {
            (ResourceController::Alias(r), ResourceState::Alias(s)) => {
                r.read(ctx, &r.key(s)).map(ResourceState::Alias)
            }
            (ResourceController::Domain(r), ResourceState::Domain(s)) => {
                r.read(ctx, &r.key(s)).map(ResourceState::Domain)
            }
            (ResourceController::Mailbox(r), ResourceState::Mailbox(s)) => {
                r.read(ctx, &r.key(s)).map(ResourceState::Mailbox)
            }
            _ => Err(mismatch(self.kind(), state.kind())),
        }
        .map_err(tag)
    }

    /// Delete the remote entity behind a snapshot
    pub fn delete(
        &self,
        ctx: &ProviderContext,
        state: &ResourceState,
    ) -> Result<(), OperationError> {
        let tag = |e| OperationError::new(self.kind().type_name(), Operation::Delete, e);
        match (self, state) {
            (ResourceController::Alias(r), ResourceState::Alias(s)) => r.delete(ctx, &r.key(s)),
            (ResourceController::Domain(r), ResourceState::Domain(s)) => r.delete(ctx, &r.key(s)),
            (ResourceController::Mailbox(r), ResourceState::Mailbox(s)) => r.delete(ctx, &r.key(s)),
            _ => Err(mismatch(self.kind(), state.kind())),
        }
        .map_err(tag)
    }
}

fn mismatch(controller: ResourceKind, state: ResourceKind) -> crate::error::Error {
    crate::error::Error::Precondition(format!("{controller} cannot handle {state} state"))
}

/// Constructor registered for a type name
pub type ControllerConstructor = fn() -> ResourceController;

/// Map of external type names to controller constructors
pub fn registry() -> BTreeMap<&'static str, ControllerConstructor> {
    let mut registry: BTreeMap<&'static str, ControllerConstructor> = BTreeMap::new();
    registry.insert(AliasResource::TYPE_NAME, || ResourceController::new(ResourceKind::Alias));
    registry.insert(DomainResource::TYPE_NAME, || ResourceController::new(ResourceKind::Domain));
    registry.insert(MailboxResource::TYPE_NAME, || ResourceController::new(ResourceKind::Mailbox));
    registry
}

/// Construct the controller registered for a type name
pub fn controller(type_name: &str) -> Option<ResourceController> {
    registry().get(type_name).map(|construct| construct())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_type_name(kind.type_name()), Some(kind));
        }
        for kind in DataSourceKind::ALL {
            assert_eq!(DataSourceKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(ResourceKind::from_type_name("mailcow_forwarding_host"), None);
    }

    #[test]
    fn test_registry_constructs_matching_controllers() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        for (type_name, construct) in registry {
            assert_eq!(construct().kind().type_name(), type_name);
        }
        assert_eq!(controller("mailcow_domain").map(|c| c.kind()), Some(ResourceKind::Domain));
        assert!(controller("mailcow_unknown").is_none());
    }

    #[test]
    fn test_update_policy_response_handling() {
        let rejected = br#"[{"type":"danger","msg":"goto_invalid"}]"#;
        let success = br#"[{"type":"success","msg":["alias_modified","12"]}]"#;

        for policy in [UpdatePolicy::Lenient, UpdatePolicy::Strict] {
            assert!(policy.check_response("mailcow_alias", &12, success).is_ok());
        }

        let lenient = UpdatePolicy::default();
        assert!(lenient.check_response("mailcow_alias", &12, rejected).is_ok());
        assert!(lenient.check_response("mailcow_domain", &"example.com", b"<html>").is_ok());

        let strict = UpdatePolicy::Strict;
        assert_eq!(
            strict.check_response("mailcow_alias", &12, rejected),
            Err(crate::error::Error::Rejected("goto_invalid".into()))
        );
        assert!(matches!(
            strict.check_response("mailcow_domain", &"example.com", b"<html>"),
            Err(crate::error::Error::Decode(_))
        ));
    }

    #[test]
    fn test_mismatched_state_is_rejected() {
        let ctx = ProviderContext::unconfigured();
        let alias = ResourceController::new(ResourceKind::Alias);
        let state = ResourceState::Domain(Domain {
            name: "example.com".into(),
            description: String::new(),
            active: true,
            quota: 1,
            max_mailboxes: 1,
            mailbox_default_size: 1,
            mailbox_max_size: 1,
            max_aliases: 1,
        });

        let err = alias.delete(&ctx, &state).unwrap_err();
        assert_eq!(err.operation, Operation::Delete);
        assert!(matches!(err.kind(), crate::error::Error::Precondition(_)));
    }
}
