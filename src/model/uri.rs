//! URI identifiers for properties, datatypes, metaclasses and subjects.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute URI, kept as its textual form.
///
/// No validation is performed: the mapping engine only ever compares URIs
/// textually, and the scheme heuristic in the codec works on raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text before the first `:`, if there is one.
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once(':').map(|(scheme, _)| scheme)
    }

    /// Text following `base`, when this URI lives in that namespace.
    pub fn strip_namespace(&self, base: &str) -> Option<&str> {
        self.0.strip_prefix(base)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Uri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Uri { fn from(v: &str) -> Self { Uri(v.to_owned()) } }
impl From<String> for Uri { fn from(v: String) -> Self { Uri(v) } }
impl From<&Uri> for Uri { fn from(v: &Uri) -> Self { v.clone() } }
