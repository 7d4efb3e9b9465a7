//! Per-instance lifecycle state machine
//!
//! ```text
//! Unmanaged --create--> Managed --read/update--> Managed --delete--> Unmanaged
//! Unmanaged --import (then read)--> Managed
//! ```
//!
//! The held snapshot is only replaced after the server confirmed the
//! operation, so a failed call leaves it exactly as it was.

use log::info;

use super::{ProviderContext, Resource};
use crate::error::{Error, Operation, OperationError, Result};

/// What applying a plan to the current instance amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Update,
    /// Delete then recreate, because these attributes cannot change in place
    Replace(Vec<&'static str>),
}

/// Effective plan plus the action it implies
#[derive(Debug, Clone)]
pub struct PlannedChange<C> {
    pub effective: C,
    pub action: PlanAction,
}

/// One managed resource instance
#[derive(Debug, Clone)]
pub struct Lifecycle<R: Resource> {
    resource: R,
    state: Option<R::State>,
}

impl<R: Resource> Lifecycle<R> {
    pub fn unmanaged(resource: R) -> Self {
        Self {
            resource,
            state: None,
        }
    }

    /// Resume management from a snapshot persisted by the host
    pub fn managed(resource: R, state: R::State) -> Self {
        Self {
            resource,
            state: Some(state),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn state(&self) -> Option<&R::State> {
        self.state.as_ref()
    }

    pub fn is_managed(&self) -> bool {
        self.state.is_some()
    }

    pub fn into_state(self) -> Option<R::State> {
        self.state
    }

    fn tag(operation: Operation) -> impl Fn(Error) -> OperationError {
        move |e| OperationError::new(R::TYPE_NAME, operation, e)
    }

    fn require_state(&self, operation: Operation) -> Result<&R::State, OperationError> {
        self.state.as_ref().ok_or_else(|| {
            Self::tag(operation)(Error::Precondition(format!(
                "no {} is managed by this instance",
                R::TYPE_NAME
            )))
        })
    }

    /// Compute the effective plan and decide between create, update and replace
    pub fn plan(&self, config: &R::Config) -> Result<PlannedChange<R::Config>, OperationError> {
        let effective = self.resource.plan(config).map_err(Self::tag(Operation::Plan))?;
        let action = match &self.state {
            None => PlanAction::Create,
            Some(state) => {
                let replace = self.resource.requires_replace(state, &effective);
                if replace.is_empty() {
                    PlanAction::Update
                } else {
                    PlanAction::Replace(replace)
                }
            }
        };
        Ok(PlannedChange { effective, action })
    }

    pub fn create(
        &mut self,
        ctx: &ProviderContext,
        plan: &R::Config,
    ) -> Result<&R::State, OperationError> {
        let tag = Self::tag(Operation::Create);
        if self.state.is_some() {
            return Err(tag(Error::Precondition(format!(
                "{} is already managed; update or replace it instead",
                R::TYPE_NAME
            ))));
        }
        let state = self.resource.create(ctx, plan).map_err(&tag)?;
        info!("Created {} {}", R::TYPE_NAME, self.resource.key(&state));
        Ok(self.state.insert(state))
    }

    /// Full overwrite of the held snapshot from the server
    pub fn refresh(&mut self, ctx: &ProviderContext) -> Result<&R::State, OperationError> {
        let key = self.resource.key(self.require_state(Operation::Read)?);
        let state = self
            .resource
            .read(ctx, &key)
            .map_err(Self::tag(Operation::Read))?;
        Ok(self.state.insert(state))
    }

    pub fn update(
        &mut self,
        ctx: &ProviderContext,
        plan: &R::Config,
    ) -> Result<&R::State, OperationError> {
        let current = self.require_state(Operation::Update)?;
        let state = self
            .resource
            .update(ctx, current, plan)
            .map_err(Self::tag(Operation::Update))?;
        info!("Updated {} {}", R::TYPE_NAME, self.resource.key(&state));
        Ok(self.state.insert(state))
    }

    /// Delete the remote entity; the snapshot is discarded only on success
    pub fn delete(&mut self, ctx: &ProviderContext) -> Result<(), OperationError> {
        let key = self.resource.key(self.require_state(Operation::Delete)?);
        self.resource
            .delete(ctx, &key)
            .map_err(Self::tag(Operation::Delete))?;
        info!("Deleted {} {}", R::TYPE_NAME, key);
        self.state = None;
        Ok(())
    }

    pub fn import(
        &mut self,
        ctx: &ProviderContext,
        external_key: &str,
    ) -> Result<&R::State, OperationError> {
        let tag = Self::tag(Operation::Import);
        if self.state.is_some() {
            return Err(tag(Error::Precondition(format!(
                "{} is already managed",
                R::TYPE_NAME
            ))));
        }
        let state = self.resource.import(ctx, external_key).map_err(&tag)?;
        info!("Imported {} {}", R::TYPE_NAME, self.resource.key(&state));
        Ok(self.state.insert(state))
    }
}
