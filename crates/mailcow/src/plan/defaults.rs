//! Default-value resolution
//!
//! Mailcow silently applies its own default to several optional attributes
//! (`active` in particular). Resolving the default locally at plan time keeps
//! "attribute omitted" and "attribute confirmed as default" from showing up as
//! a difference on every reconciliation pass.

use super::Value;

/// A default registered for one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue<T> {
    value: T,
}

impl DefaultValue<bool> {
    pub fn bool(value: bool) -> Self {
        Self { value }
    }
}

impl DefaultValue<i64> {
    pub fn int64(value: i64) -> Self {
        Self { value }
    }
}

impl<T: Clone> DefaultValue<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// The registered default
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Compute the effective plan value from the raw configuration value.
    ///
    /// Only a null configuration picks up the default. Unknown values and
    /// every explicit value, including `false` and empty containers, pass
    /// through unchanged.
    pub fn resolve(&self, config: &Value<T>) -> Value<T> {
        match config {
            Value::Null => Value::Known(self.value.clone()),
            other => other.clone(),
        }
    }
}

impl<T: std::fmt::Debug> DefaultValue<T> {
    /// Human readable description for schema output
    pub fn description(&self) -> String {
        format!("defaults to {:?} when not set", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_null_bool_takes_default() {
        let default = DefaultValue::bool(true);
        assert_eq!(default.resolve(&Value::Null), Value::Known(true));
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let default = DefaultValue::bool(true);
        assert_eq!(default.resolve(&Value::Known(false)), Value::Known(false));
    }

    #[test]
    fn test_unknown_is_kept() {
        let default = DefaultValue::int64(10);
        assert_eq!(default.resolve(&Value::Unknown), Value::Unknown);
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let default = DefaultValue::int64(10);
        assert_eq!(default.resolve(&Value::Known(0)), Value::Known(0));
    }

    #[test]
    fn test_null_list_takes_default_but_empty_list_does_not() {
        let default = DefaultValue::new(vec!["postmaster@example.com".to_string()]);
        assert_eq!(
            default.resolve(&Value::Null),
            Value::Known(vec!["postmaster@example.com".to_string()])
        );
        assert_eq!(default.resolve(&Value::Known(Vec::new())), Value::Known(Vec::new()));
    }

    #[test]
    fn test_map_and_set_follow_the_same_rule() {
        let map_default = DefaultValue::new(BTreeMap::from([("a".to_string(), 1i64)]));
        assert_eq!(map_default.resolve(&Value::Null), Value::Known(map_default.value().clone()));
        assert_eq!(
            map_default.resolve(&Value::Known(BTreeMap::new())),
            Value::Known(BTreeMap::new())
        );

        let set_default = DefaultValue::new(BTreeSet::from(["x".to_string()]));
        assert_eq!(set_default.resolve(&Value::Null), Value::Known(set_default.value().clone()));
        assert_eq!(
            set_default.resolve(&Value::Known(BTreeSet::new())),
            Value::Known(BTreeSet::new())
        );
    }

    #[test]
    fn test_description_mentions_default() {
        assert_eq!(DefaultValue::bool(true).description(), "defaults to true when not set");
    }
}
