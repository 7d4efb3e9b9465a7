//! Read-only data sources
//!
//! Lookups for entities that are not managed here, decoded through the same
//! conversions as the controllers' Read.

use log::debug;

use crate::api::{normalize_alias, normalize_domain, normalize_mailbox};
use crate::error::Result;
use crate::models::{Alias, Domain, Mailbox};
use crate::resources::ProviderContext;

/// `mailcow_all_aliases`
pub fn all_aliases(ctx: &ProviderContext) -> Result<Vec<Alias>> {
    let aliases = ctx.client()?.get_all_aliases()?;
    debug!("Listed {} aliases", aliases.len());
    Ok(aliases.into_iter().map(normalize_alias).collect())
}

/// `mailcow_all_domains`
pub fn all_domains(ctx: &ProviderContext) -> Result<Vec<Domain>> {
    let domains = ctx.client()?.get_all_domains()?;
    debug!("Listed {} domains", domains.len());
    Ok(domains.into_iter().map(normalize_domain).collect())
}

/// `mailcow_all_mailboxes`
pub fn all_mailboxes(ctx: &ProviderContext) -> Result<Vec<Mailbox>> {
    let mailboxes = ctx.client()?.get_all_mailboxes()?;
    debug!("Listed {} mailboxes", mailboxes.len());
    Ok(mailboxes.into_iter().map(normalize_mailbox).collect())
}

/// `mailcow_domain`
pub fn domain(ctx: &ProviderContext, name: &str) -> Result<Domain> {
    Ok(normalize_domain(ctx.client()?.get_domain(name)?))
}

/// `mailcow_mailbox`
pub fn mailbox(ctx: &ProviderContext, email: &str) -> Result<Mailbox> {
    Ok(normalize_mailbox(ctx.client()?.get_mailbox(email)?))
}
