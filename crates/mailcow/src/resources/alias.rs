//! `mailcow_alias` controller

use super::{ProviderContext, Resource, UpdatePolicy};
use crate::api::wire::AliasAttributes;
use crate::api::{encode_flag, join_destinations, normalize_alias};
use crate::error::{Error, Result};
use crate::models::{Alias, AliasConfig};
use crate::plan::{DefaultValue, ListNotEmpty, require};

/// Position of the assigned id in the `alias_added` success message
const ALIAS_ID_TOKEN: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct AliasResource {
    update_policy: UpdatePolicy,
}

impl AliasResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    fn active_default() -> DefaultValue<bool> {
        DefaultValue::bool(true)
    }

    /// Build the full attribute payload from an effective plan
    fn attributes(plan: &AliasConfig) -> Result<(AliasAttributes, bool)> {
        let address = require("address", &plan.address)?;
        let destinations = require("destinations", &plan.destinations)?;
        let active = *require("active", &plan.active)?;
        let attr = AliasAttributes {
            active: encode_flag(active),
            address: address.clone(),
            goto: join_destinations(destinations),
        };
        Ok((attr, active))
    }
}

impl Resource for AliasResource {
    const TYPE_NAME: &'static str = "mailcow_alias";

    type Config = AliasConfig;
    type State = Alias;
    type Key = i64;

    fn plan(&self, config: &AliasConfig) -> Result<AliasConfig> {
        ListNotEmpty.validate("destinations", &config.destinations)?;
        Ok(AliasConfig {
            active: Self::active_default().resolve(&config.active),
            ..config.clone()
        })
    }

    fn requires_replace(&self, _state: &Alias, _plan: &AliasConfig) -> Vec<&'static str> {
        Vec::new()
    }

    fn key(&self, state: &Alias) -> i64 {
        state.id
    }

    fn parse_import_key(&self, external_key: &str) -> Result<i64> {
        external_key
            .trim()
            .parse()
            .map_err(|e| Error::InvalidImportKey {
                key: external_key.to_string(),
                reason: format!("alias id must be an integer: {e}"),
            })
    }

    fn create(&self, ctx: &ProviderContext, plan: &AliasConfig) -> Result<Alias> {
        let client = ctx.configured_client()?;
        let plan = self.plan(plan)?;
        let (attr, active) = Self::attributes(&plan)?;

        let envelope = client.add_alias(&attr)?;
        let token = envelope.success_token(ALIAS_ID_TOKEN).ok_or_else(|| {
            Error::Decode("alias creation succeeded but no id was returned".to_string())
        })?;
        let id = token
            .parse()
            .map_err(|_| Error::Decode(format!("alias id {token:?} is not an integer")))?;

        Ok(Alias {
            id,
            address: attr.address,
            destinations: require("destinations", &plan.destinations)?.clone(),
            active,
        })
    }

    fn read(&self, ctx: &ProviderContext, id: &i64) -> Result<Alias> {
        let alias = ctx.client()?.get_alias(*id)?;
        Ok(normalize_alias(alias))
    }

    fn update(&self, ctx: &ProviderContext, state: &Alias, plan: &AliasConfig) -> Result<Alias> {
        let client = ctx.client()?;
        let plan = self.plan(plan)?;
        let (attr, active) = Self::attributes(&plan)?;

        let response = client.edit_alias(state.id, &attr)?;
        self.update_policy
            .check_response(Self::TYPE_NAME, &state.id, &response)?;

        Ok(Alias {
            id: state.id,
            address: attr.address,
            destinations: require("destinations", &plan.destinations)?.clone(),
            active,
        })
    }

    fn delete(&self, ctx: &ProviderContext, id: &i64) -> Result<()> {
        ctx.client()?.delete_alias(*id)
    }
}
