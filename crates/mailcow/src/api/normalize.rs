//! Mailcow API response normalization
//!
//! Converts loosely typed wire shapes to domain models and back:
//! booleans travel as `1`/`0`, destination lists as comma-joined strings and
//! quotas as bytes (exposed locally in megabytes).

use super::wire::{AliasResponse, DomainResponse, MailboxResponse};
use crate::models::{Alias, Domain, Mailbox};

/// Bytes per megabyte as Mailcow counts them
pub const BYTES_PER_MB: i64 = 1024 * 1024;

/// Remote active flag to bool; only `1` counts as active
pub fn flag(active: i64) -> bool {
    active == 1
}

/// Bool to the string form Mailcow expects in add/edit bodies
pub fn encode_flag(active: bool) -> String {
    if active { "1" } else { "0" }.to_string()
}

/// Byte quota to megabytes, truncating any remainder
pub fn bytes_to_mb(bytes: i64) -> i64 {
    bytes / BYTES_PER_MB
}

/// Join destinations into Mailcow's `goto` string
pub fn join_destinations(destinations: &[String]) -> String {
    destinations.join(",")
}

/// Split a `goto` string back into ordered destinations
///
/// Inverse of [`join_destinations`] for every list whose entries contain no
/// comma, including `[""]`.
pub fn split_destinations(goto: &str) -> Vec<String> {
    goto.split(',').map(str::to_string).collect()
}

pub fn normalize_alias(alias: AliasResponse) -> Alias {
    Alias {
        id: alias.id,
        address: alias.address,
        destinations: split_destinations(&alias.goto),
        active: flag(alias.active),
    }
}

pub fn normalize_domain(domain: DomainResponse) -> Domain {
    Domain {
        name: domain.name,
        description: domain.description,
        active: flag(domain.active),
        quota: bytes_to_mb(domain.quota_bytes),
        max_mailboxes: domain.max_mailboxes,
        mailbox_default_size: bytes_to_mb(domain.mailbox_default_size_bytes),
        mailbox_max_size: bytes_to_mb(domain.mailbox_max_size_bytes),
        max_aliases: domain.max_aliases,
    }
}

pub fn normalize_mailbox(mailbox: MailboxResponse) -> Mailbox {
    Mailbox {
        username: mailbox.username,
        domain: mailbox.domain,
        email: mailbox.email,
        active: flag(mailbox.active),
        name: mailbox.name,
        quota: bytes_to_mb(mailbox.quota),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        assert!(flag(1));
        assert!(!flag(0));
        assert!(!flag(2));
        assert!(!flag(-1));
        assert_eq!(encode_flag(true), "1");
        assert_eq!(encode_flag(false), "0");
    }

    #[test]
    fn test_bytes_to_mb_truncates() {
        assert_eq!(bytes_to_mb(1_048_576), 1);
        assert_eq!(bytes_to_mb(1_048_575), 0);
        assert_eq!(bytes_to_mb(3 * 1_048_576 + 17), 3);
        assert_eq!(bytes_to_mb(10_737_418_240), 10_240);
    }

    #[test]
    fn test_destinations_round_trip() {
        let lists: Vec<Vec<String>> = vec![
            vec!["a@d.com".into()],
            vec!["a@d.com".into(), "b@d.com".into()],
            vec!["z@d.com".into(), "a@d.com".into(), "m@e.org".into()],
            vec![String::new()],
        ];
        for list in lists {
            assert_eq!(split_destinations(&join_destinations(&list)), list);
        }
    }

    #[test]
    fn test_split_preserves_order() {
        assert_eq!(
            split_destinations("b@d.com,a@d.com"),
            vec!["b@d.com".to_string(), "a@d.com".to_string()]
        );
    }

    #[test]
    fn test_empty_goto_is_single_empty_destination() {
        assert_eq!(split_destinations(""), vec![String::new()]);
        assert_eq!(join_destinations(&[String::new()]), "");
    }

    #[test]
    fn test_normalize_domain_converts_quotas() {
        let domain = normalize_domain(DomainResponse {
            name: "example.com".into(),
            description: "Example".into(),
            active: 1,
            quota_bytes: 1_048_576,
            max_mailboxes: 10,
            mailbox_default_size_bytes: 2 * 1_048_576,
            mailbox_max_size_bytes: 5 * 1_048_576 + 1,
            max_aliases: 400,
        });
        assert_eq!(domain.quota, 1);
        assert_eq!(domain.mailbox_default_size, 2);
        assert_eq!(domain.mailbox_max_size, 5);
        assert_eq!(domain.max_mailboxes, 10);
        assert_eq!(domain.max_aliases, 400);
        assert!(domain.active);
    }

    #[test]
    fn test_normalize_mailbox() {
        let mailbox = normalize_mailbox(MailboxResponse {
            username: "jane".into(),
            domain: "example.com".into(),
            email: "jane@example.com".into(),
            active: 0,
            name: "Jane Doe".into(),
            quota: 3 * 1_048_576,
        });
        assert_eq!(mailbox.email, "jane@example.com");
        assert_eq!(mailbox.quota, 3);
        assert!(!mailbox.active);
    }
}
