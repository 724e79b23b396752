//! Alternate descriptor prefixes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of alternate descriptor prefixes, highest precedence first.
///
/// Parsed from a comma-separated value such as `"test"` or `"test, dev"`.
/// The value is passed explicitly to every resolution call so that
/// concurrent passes with different prefixes never observe each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AltPrefix {
    prefixes: Vec<String>,
}

impl AltPrefix {
    /// Parse a comma-separated prefix list.
    ///
    /// Returns `None` when no non-blank prefix remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let prefixes: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        if prefixes.is_empty() {
            None
        } else {
            Some(Self { prefixes })
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Alternate file names for `canonical_name`, in precedence order.
    pub fn candidates(&self, canonical_name: &str) -> Vec<String> {
        self.prefixes
            .iter()
            .map(|prefix| join(prefix, canonical_name))
            .collect()
    }
}

/// `test` + `ejb-jar.xml` -> `test-ejb-jar.xml`; a prefix already ending in
/// `-` or `.` is used verbatim.
fn join(prefix: &str, canonical_name: &str) -> String {
    if prefix.ends_with('-') || prefix.ends_with('.') {
        format!("{}{}", prefix, canonical_name)
    } else {
        format!("{}-{}", prefix, canonical_name)
    }
}

impl fmt::Display for AltPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefixes.join(","))
    }
}

impl TryFrom<String> for AltPrefix {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AltPrefix::parse(&value).ok_or_else(|| "alt prefix must not be blank".to_string())
    }
}

impl From<AltPrefix> for String {
    fn from(value: AltPrefix) -> Self {
        value.to_string()
    }
}
