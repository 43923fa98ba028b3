//! Composite `namespace:environment` keys

use super::error::{DebugError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Separator between the namespace and environment halves of a key
pub const KEY_DELIMITER: char = ':';

/// Identifier of one (namespace, environment) pair.
///
/// The composite string is what gets handed to a [`HandleProvider`] and
/// what a `DEBUG`-style filter pattern is matched against. Equality, hashing
/// and ordering use the composite string only: `("a:b", "c")` and
/// `("a", "b:c")` are the same key.
///
/// [`HandleProvider`]: crate::core::HandleProvider
#[derive(Debug, Clone)]
pub struct HandleKey {
    composite: String,
    split: usize,
}

impl HandleKey {
    pub fn new(namespace: &str, environment: &str) -> Self {
        let mut composite = String::with_capacity(namespace.len() + environment.len() + 1);
        composite.push_str(namespace);
        composite.push(KEY_DELIMITER);
        composite.push_str(environment);

        Self {
            composite,
            split: namespace.len(),
        }
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.composite[..self.split]
    }

    #[inline]
    pub fn environment(&self) -> &str {
        &self.composite[self.split + KEY_DELIMITER.len_utf8()..]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.composite
    }
}

impl PartialEq for HandleKey {
    fn eq(&self, other: &Self) -> bool {
        self.composite == other.composite
    }
}

impl Eq for HandleKey {}

impl Hash for HandleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.composite.hash(state);
    }
}

impl PartialOrd for HandleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.composite.cmp(&other.composite)
    }
}

impl fmt::Display for HandleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite)
    }
}

impl AsRef<str> for HandleKey {
    fn as_ref(&self) -> &str {
        &self.composite
    }
}

impl FromStr for HandleKey {
    type Err = DebugError;

    /// Namespaces may themselves contain `:`, so the last delimiter wins.
    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once(KEY_DELIMITER) {
            Some((namespace, environment)) => Ok(Self::new(namespace, environment)),
            None => Err(DebugError::InvalidKey(s.to_string())),
        }
    }
}
