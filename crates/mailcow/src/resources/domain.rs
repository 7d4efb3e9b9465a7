//! `mailcow_domain` controller
//!
//! The domain name is the primary key; everything else can be edited in
//! place. Sizes are planned in megabytes and sent to Mailcow as-is, which
//! converts them to bytes on its side.

use super::{ProviderContext, Resource, UpdatePolicy};
use crate::api::wire::{AddDomain, DomainAttributes};
use crate::api::{encode_flag, normalize_domain};
use crate::error::{Error, Result};
use crate::models::{Domain, DomainConfig};
use crate::plan::{self, DefaultValue, Value, require};

#[derive(Debug, Clone, Default)]
pub struct DomainResource {
    update_policy: UpdatePolicy,
}

impl DomainResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    /// Resolve every attribute of an effective plan into a snapshot
    fn planned_state(plan: &DomainConfig) -> Result<Domain> {
        Ok(Domain {
            name: require("name", &plan.name)?.clone(),
            description: require("description", &plan.description)?.clone(),
            active: *require("active", &plan.active)?,
            quota: *require("quota", &plan.quota)?,
            max_mailboxes: *require("max_mailboxes", &plan.max_mailboxes)?,
            mailbox_default_size: *require("mailbox_default_size", &plan.mailbox_default_size)?,
            mailbox_max_size: *require("mailbox_max_size", &plan.mailbox_max_size)?,
            max_aliases: *require("max_aliases", &plan.max_aliases)?,
        })
    }

    fn attributes(domain: &Domain) -> DomainAttributes {
        DomainAttributes {
            active: encode_flag(domain.active),
            aliases: domain.max_aliases.to_string(),
            defquota: domain.mailbox_default_size.to_string(),
            description: domain.description.clone(),
            mailboxes: domain.max_mailboxes.to_string(),
            maxquota: domain.mailbox_max_size.to_string(),
            quota: domain.quota.to_string(),
        }
    }
}

impl Resource for DomainResource {
    const TYPE_NAME: &'static str = "mailcow_domain";

    type Config = DomainConfig;
    type State = Domain;
    type Key = String;

    fn plan(&self, config: &DomainConfig) -> Result<DomainConfig> {
        Ok(DomainConfig {
            active: DefaultValue::bool(true).resolve(&config.active),
            ..config.clone()
        })
    }

    fn requires_replace(&self, state: &Domain, plan: &DomainConfig) -> Vec<&'static str> {
        if plan::differs(&state.name, &plan.name) {
            vec!["name"]
        } else {
            Vec::new()
        }
    }

    fn key(&self, state: &Domain) -> String {
        state.name.clone()
    }

    fn parse_import_key(&self, external_key: &str) -> Result<String> {
        let name = external_key.trim();
        if name.is_empty() {
            return Err(Error::InvalidImportKey {
                key: external_key.to_string(),
                reason: "domain name must not be empty".to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn create(&self, ctx: &ProviderContext, plan: &DomainConfig) -> Result<Domain> {
        let client = ctx.configured_client()?;
        let domain = Self::planned_state(&self.plan(plan)?)?;

        client.add_domain(&AddDomain {
            domain: domain.name.clone(),
            attr: Self::attributes(&domain),
        })?;
        Ok(domain)
    }

    fn read(&self, ctx: &ProviderContext, name: &String) -> Result<Domain> {
        let domain = ctx.client()?.get_domain(name)?;
        Ok(normalize_domain(domain))
    }

    fn update(&self, ctx: &ProviderContext, state: &Domain, plan: &DomainConfig) -> Result<Domain> {
        let client = ctx.client()?;
        let plan = self.plan(plan)?;
        let replace = self.requires_replace(state, &plan);
        if !replace.is_empty() {
            return Err(Error::Precondition(format!(
                "changing {} of domain {} requires replacing it",
                replace.join(", "),
                state.name
            )));
        }

        // The name may be left unresolved in an in-place update
        let domain = Self::planned_state(&DomainConfig {
            name: Value::Known(state.name.clone()),
            ..plan
        })?;
        let response = client.edit_domain(&state.name, &Self::attributes(&domain))?;
        self.update_policy
            .check_response(Self::TYPE_NAME, &state.name, &response)?;
        Ok(domain)
    }

    fn delete(&self, ctx: &ProviderContext, name: &String) -> Result<()> {
        ctx.client()?.delete_domain(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain {
            name: "example.com".into(),
            description: "Example".into(),
            active: true,
            quota: 10240,
            max_mailboxes: 10,
            mailbox_default_size: 1024,
            mailbox_max_size: 2048,
            max_aliases: 400,
        }
    }

    #[test]
    fn test_plan_defaults_active_only() {
        let config = DomainConfig {
            active: Value::Null,
            ..DomainConfig::from(&domain())
        };
        let plan = DomainResource::new().plan(&config).unwrap();
        assert_eq!(plan.active, Value::Known(true));
        assert_eq!(plan.quota, Value::Known(10240));
    }

    #[test]
    fn test_missing_required_attribute() {
        let config = DomainConfig {
            quota: Value::Null,
            ..DomainConfig::from(&domain())
        };
        let plan = DomainResource::new().plan(&config).unwrap();
        assert_eq!(
            DomainResource::planned_state(&plan).unwrap_err(),
            Error::MissingAttribute("quota")
        );
    }

    #[test]
    fn test_requires_replace_on_rename() {
        let resource = DomainResource::new();
        let state = domain();
        let mut plan = DomainConfig::from(&state);
        assert!(resource.requires_replace(&state, &plan).is_empty());

        plan.description = Value::Known("Changed".into());
        assert!(resource.requires_replace(&state, &plan).is_empty());

        plan.name = Value::Known("example.org".into());
        assert_eq!(resource.requires_replace(&state, &plan), vec!["name"]);
    }

    #[test]
    fn test_attributes_are_strings() {
        let attr = DomainResource::attributes(&domain());
        assert_eq!(attr.active, "1");
        assert_eq!(attr.quota, "10240");
        assert_eq!(attr.defquota, "1024");
        assert_eq!(attr.maxquota, "2048");
        assert_eq!(attr.mailboxes, "10");
        assert_eq!(attr.aliases, "400");
    }

    #[test]
    fn test_parse_import_key() {
        let resource = DomainResource::new();
        assert_eq!(resource.parse_import_key("example.com").unwrap(), "example.com");
        assert!(resource.parse_import_key("  ").is_err());
    }
}
