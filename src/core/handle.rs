//! The logging handle contract
//!
//! A [`Handle`] is what a [`HandleProvider`](super::HandleProvider) hands out
//! for a key: something that can be called with formatted arguments and that
//! exposes an `enabled` flag and a `namespace`. Everything beyond those two is
//! reached through the named-property surface.

use super::error::{DebugError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property that is never forwarded on read.
///
/// Generic adapters that turn arbitrary values into awaitables probe for a
/// `then` member; a proxy answering that probe would be treated as a pending
/// value instead of a logging handle.
pub const RESERVED_PROBE_PROPERTY: &str = "then";

/// Value of a named handle property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PropertyValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract a boolean for a write to `property`, or report the mismatch
    pub fn expect_bool(&self, property: &str) -> Result<bool> {
        self.as_bool()
            .ok_or_else(|| DebugError::invalid_type(property, "boolean"))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

/// A real logging handle.
///
/// `enabled` may be computed on every call from process-wide state; callers
/// must not assume it is stable between reads.
pub trait Handle: Send + Sync {
    /// Emit one formatted line
    fn log(&self, args: fmt::Arguments<'_>) -> Result<()>;

    fn enabled(&self) -> bool;

    /// Force this handle on or off, overriding ambient configuration
    fn set_enabled(&self, enabled: bool);

    fn namespace(&self) -> &str;

    /// Read a named property.
    ///
    /// The default exposes `enabled` and `namespace`; implementations with
    /// more state override this and fall back to it.
    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "enabled" => Some(PropertyValue::Bool(self.enabled())),
            "namespace" => Some(PropertyValue::Text(self.namespace().to_string())),
            _ => None,
        }
    }

    /// Write a named property
    fn set_property(&self, name: &str, value: PropertyValue) -> Result<()> {
        match name {
            "enabled" => {
                self.set_enabled(value.expect_bool(name)?);
                Ok(())
            }
            "namespace" => Err(DebugError::read_only(self.namespace(), name)),
            _ => Err(DebugError::unknown_property(self.namespace(), name)),
        }
    }
}
