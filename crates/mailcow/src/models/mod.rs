//! Domain models for Mailcow entities
//!
//! Each entity comes in two shapes: the state snapshot confirmed by the
//! server (`Alias`, `Domain`, `Mailbox`) and the desired configuration handed
//! over by the orchestration host (`AliasConfig`, ...), where every attribute
//! is a tri-state [`Value`](crate::plan::Value).

mod alias;
mod domain;
mod mailbox;

pub use alias::{Alias, AliasConfig};
pub use domain::{Domain, DomainConfig};
pub use mailbox::{Mailbox, MailboxConfig, MailboxKey};
