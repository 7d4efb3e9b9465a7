//! Mailcow crate - Reconciliation engine for Mailcow mail hosting
//!
//! This crate provides:
//! - Domain models (Alias, Domain, Mailbox) and their desired configuration
//! - Mailcow admin API client with the outcome envelope codec
//! - Plan-time default resolution and validation
//! - Lifecycle controllers implementing Create/Read/Update/Delete/Import
//! - Read-only data sources
//!
//! The orchestration host owns persistence: it hands in desired
//! configuration, receives state snapshots back and stores them between
//! invocations.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod plan;
pub mod resources;
pub mod sources;

pub use api::{Envelope, MailcowClient, OutcomeKind, Transport, UreqTransport};
pub use config::{ProviderConfig, ResolvedConfig};
pub use error::{Error, Operation, OperationError, Result};
pub use models::{Alias, AliasConfig, Domain, DomainConfig, Mailbox, MailboxConfig, MailboxKey};
pub use plan::{DefaultValue, ListNotEmpty, Value};
pub use resources::{
    AliasResource, DataSourceKind, DomainResource, Lifecycle, MailboxResource, PlanAction,
    PlannedChange, ProviderContext, Resource, ResourceController, ResourceKind, ResourceState,
    UpdatePolicy, controller, registry,
};
