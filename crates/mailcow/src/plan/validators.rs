//! Structural checks on desired configuration

use super::Value;
use crate::error::{Error, Result};

/// Rejects a known list that has no elements
#[derive(Debug, Clone, Copy, Default)]
pub struct ListNotEmpty;

impl ListNotEmpty {
    pub fn description(&self) -> &'static str {
        "list length must be greater than 0"
    }

    /// Null and unknown lists are left to the required check.
    pub fn validate<T>(&self, attribute: &'static str, value: &Value<Vec<T>>) -> Result<()> {
        match value {
            Value::Known(list) if list.is_empty() => Err(Error::InvalidListLength {
                attribute,
                count: list.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Borrow a required attribute's value at apply time.
pub fn require<'a, T>(attribute: &'static str, value: &'a Value<T>) -> Result<&'a T> {
    match value {
        Value::Known(v) => Ok(v),
        Value::Null => Err(Error::MissingAttribute(attribute)),
        Value::Unknown => Err(Error::UnresolvedAttribute(attribute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_reports_count() {
        let err = ListNotEmpty
            .validate::<String>("destinations", &Value::Known(Vec::new()))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidListLength {
                attribute: "destinations",
                count: 0
            }
        );
        assert!(err.to_string().contains("got: 0"));
    }

    #[test]
    fn test_null_and_unknown_lists_are_deferred() {
        assert!(ListNotEmpty.validate::<String>("destinations", &Value::Null).is_ok());
        assert!(ListNotEmpty.validate::<String>("destinations", &Value::Unknown).is_ok());
    }

    #[test]
    fn test_non_empty_list_passes() {
        let value = Value::Known(vec!["a@example.com".to_string()]);
        assert!(ListNotEmpty.validate("destinations", &value).is_ok());
    }

    #[test]
    fn test_require() {
        assert_eq!(require("name", &Value::Known(1)).unwrap(), &1);
        assert_eq!(
            require::<i32>("name", &Value::Null).unwrap_err(),
            Error::MissingAttribute("name")
        );
        assert_eq!(
            require::<i32>("name", &Value::Unknown).unwrap_err(),
            Error::UnresolvedAttribute("name")
        );
    }
}
