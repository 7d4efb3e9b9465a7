//! Plan-time passes over desired configuration
//!
//! Everything in here runs before any network call:
//! - [`Value`] models an attribute that may be null, unknown or known
//! - [`DefaultValue`] fills in registered defaults for null attributes
//! - [`ListNotEmpty`] and [`require`] reject structurally invalid input

mod defaults;
mod validators;
mod value;

pub use defaults::DefaultValue;
pub use validators::{ListNotEmpty, require};
pub use value::Value;

/// Whether a planned value differs from the value held in state.
///
/// Null and unknown plan values never count as a change; the caller decides
/// separately what an unresolved value means.
pub fn differs<T: PartialEq>(state: &T, plan: &Value<T>) -> bool {
    plan.as_known().is_some_and(|planned| planned != state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differs_only_on_known_values() {
        let state = "example.com".to_string();
        assert!(!differs(&state, &Value::Known("example.com".to_string())));
        assert!(differs(&state, &Value::Known("example.org".to_string())));
        assert!(!differs(&state, &Value::Null));
        assert!(!differs(&state, &Value::Unknown));
    }
}
