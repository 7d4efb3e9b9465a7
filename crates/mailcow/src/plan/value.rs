//! Tri-state attribute values

/// A configurable attribute as handed over by the orchestration host.
///
/// The same wrapper is used for scalars, lists, maps and sets, so the
/// resolver and validators never need type-specific null inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value<T> {
    /// Not set in the configuration
    #[default]
    Null,
    /// Set, but depends on something not resolved yet
    Unknown,
    /// Set to an explicit value (which may itself be empty)
    Known(T),
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn known(self) -> Option<T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Value<U> {
        match self {
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
            Value::Known(v) => Value::Known(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Value::Known)
    }
}
