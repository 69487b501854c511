use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a valid `namespace:path` id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid resource id: {0:?}")]
pub struct InvalidId(pub String);

/// Namespaced identifier for creature kinds and status effects.
///
/// Written as `namespace:path`. A bare `path` gets [`ResourceId::DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    pub const DEFAULT_NAMESPACE: &'static str = "base";

    /// Builds an id in the default namespace. Returns `None` if `path` is not valid.
    pub fn base(path: &str) -> Option<Self> {
        Self::new(Self::DEFAULT_NAMESPACE, path)
    }

    pub fn new(namespace: &str, path: &str) -> Option<Self> {
        if !is_valid_namespace(namespace) || !is_valid_path(path) {
            return None;
        }
        Some(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Lenient parse used for config values: surrounding whitespace is
    /// ignored and anything unparsable is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::base(raw),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_valid_namespace(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-'))
}

fn is_valid_path(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-' | b'/')
        })
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidId(s.to_string()))
    }
}

impl TryFrom<String> for ResourceId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}
