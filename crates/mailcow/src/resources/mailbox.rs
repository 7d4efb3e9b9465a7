//! `mailcow_mailbox` controller

use super::{ProviderContext, Resource, UpdatePolicy};
use crate::api::wire::{AddMailbox, MailboxAttributes};
use crate::api::{encode_flag, normalize_mailbox};
use crate::error::{Error, Result};
use crate::models::{Mailbox, MailboxConfig, MailboxKey};
use crate::plan::{self, DefaultValue, Value, require};

#[derive(Debug, Clone, Default)]
pub struct MailboxResource {
    update_policy: UpdatePolicy,
}

impl MailboxResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    fn planned_state(plan: &MailboxConfig) -> Result<Mailbox> {
        let key = MailboxKey::new(
            require("username", &plan.username)?.as_str(),
            require("domain", &plan.domain)?.as_str(),
        );
        Ok(Mailbox {
            email: key.email(),
            username: key.username,
            domain: key.domain,
            active: *require("active", &plan.active)?,
            name: require("name", &plan.name)?.clone(),
            quota: *require("quota", &plan.quota)?,
        })
    }
}

impl Resource for MailboxResource {
    const TYPE_NAME: &'static str = "mailcow_mailbox";

    type Config = MailboxConfig;
    type State = Mailbox;
    type Key = MailboxKey;

    fn plan(&self, config: &MailboxConfig) -> Result<MailboxConfig> {
        Ok(MailboxConfig {
            active: DefaultValue::bool(true).resolve(&config.active),
            name: DefaultValue::new(String::new()).resolve(&config.name),
            ..config.clone()
        })
    }

    fn requires_replace(&self, state: &Mailbox, plan: &MailboxConfig) -> Vec<&'static str> {
        let mut replace = Vec::new();
        if plan::differs(&state.username, &plan.username) {
            replace.push("username");
        }
        if plan::differs(&state.domain, &plan.domain) {
            replace.push("domain");
        }
        replace
    }

    fn key(&self, state: &Mailbox) -> MailboxKey {
        MailboxKey::new(state.username.as_str(), state.domain.as_str())
    }

    fn parse_import_key(&self, external_key: &str) -> Result<MailboxKey> {
        MailboxKey::parse(external_key.trim())
    }

    fn create(&self, ctx: &ProviderContext, plan: &MailboxConfig) -> Result<Mailbox> {
        let client = ctx.configured_client()?;
        let plan = self.plan(plan)?;
        let mailbox = Self::planned_state(&plan)?;
        let password = require("password", &plan.password)?;

        client.add_mailbox(&AddMailbox {
            active: encode_flag(mailbox.active),
            domain: mailbox.domain.clone(),
            local_part: mailbox.username.clone(),
            name: mailbox.name.clone(),
            password: password.clone(),
            password2: password.clone(),
            quota: mailbox.quota.to_string(),
        })?;
        Ok(mailbox)
    }

    fn read(&self, ctx: &ProviderContext, key: &MailboxKey) -> Result<Mailbox> {
        let mailbox = ctx.client()?.get_mailbox(&key.email())?;
        Ok(normalize_mailbox(mailbox))
    }

    fn update(
        &self,
        ctx: &ProviderContext,
        state: &Mailbox,
        plan: &MailboxConfig,
    ) -> Result<Mailbox> {
        let client = ctx.client()?;
        let plan = self.plan(plan)?;
        let replace = self.requires_replace(state, &plan);
        if !replace.is_empty() {
            return Err(Error::Precondition(format!(
                "changing {} of mailbox {} requires replacing it",
                replace.join(", "),
                state.email
            )));
        }

        let password = plan.password.as_known().cloned();
        let mailbox = Self::planned_state(&MailboxConfig {
            username: Value::Known(state.username.clone()),
            domain: Value::Known(state.domain.clone()),
            ..plan
        })?;
        let attr = MailboxAttributes {
            active: encode_flag(mailbox.active),
            name: mailbox.name.clone(),
            quota: mailbox.quota.to_string(),
            password2: password.clone(),
            password,
        };

        let response = client.edit_mailbox(&state.email, &attr)?;
        self.update_policy
            .check_response(Self::TYPE_NAME, &state.email, &response)?;
        Ok(mailbox)
    }

    fn delete(&self, ctx: &ProviderContext, key: &MailboxKey) -> Result<()> {
        ctx.client()?.delete_mailbox(&key.email())
    }
}
