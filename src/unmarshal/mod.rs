//! Typed Unmarshaller
//!
//! Converts descriptor bytes into a strongly-typed [`ConfigTree`]. A logical
//! descriptor may have been published under several schema versions over the
//! years; callers pass the accepted [`SchemaContext`]s in preference order and
//! the first one that parses the whole document wins. The winning context id is
//! kept on the tree so later stages can tell versions apart without inspecting
//! the typed value.

mod sniff;

use crate::error::{AttemptError, UnmarshalError};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// One accepted schema version: the root element plus its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaContext {
    pub id: &'static str,
    pub root: &'static str,
    /// `None` for documents without a default namespace (DTD era)
    pub namespace: Option<&'static str>,
}

impl SchemaContext {
    pub const fn new(
        id: &'static str,
        root: &'static str,
        namespace: Option<&'static str>,
    ) -> Self {
        Self {
            id,
            root,
            namespace,
        }
    }
}

/// A typed configuration model that can be unmarshalled.
pub trait Schema: DeserializeOwned {
    /// Accepted schema contexts, most preferred first.
    const CONTEXTS: &'static [SchemaContext];

    /// Value for an empty document, if the schema allows one.
    fn empty() -> Option<Self> {
        None
    }
}

/// Product of unmarshalling: the typed root tagged with the context that parsed it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree<T> {
    pub context: &'static str,
    pub root: T,
}

impl<T> ConfigTree<T> {
    pub fn new(context: &'static str, root: T) -> Self {
        Self { context, root }
    }
}

/// Unmarshal `bytes` against `contexts`, in order.
pub fn unmarshal<T: Schema>(
    contexts: &[SchemaContext],
    bytes: &[u8],
) -> Result<ConfigTree<T>, UnmarshalError> {
    let first = contexts.first().ok_or(UnmarshalError::NoContexts)?;
    let all_attempted = || contexts.iter().map(|c| c.id.to_string()).collect::<Vec<_>>();

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}'),
        Err(e) => {
            return Err(UnmarshalError::NoMatchingContext {
                attempted: all_attempted(),
                source: e.into(),
            })
        }
    };

    if text.trim().is_empty() {
        return match T::empty() {
            Some(root) => {
                debug!(context = first.id, "Empty document accepted");
                Ok(ConfigTree::new(first.id, root))
            }
            None => Err(UnmarshalError::NoMatchingContext {
                attempted: all_attempted(),
                source: AttemptError::Empty,
            }),
        };
    }

    let root = match sniff::root_element(text) {
        Ok(root) => root,
        Err(source) => {
            return Err(UnmarshalError::NoMatchingContext {
                attempted: all_attempted(),
                source,
            })
        }
    };

    let mut attempted = Vec::with_capacity(contexts.len());
    let mut last_failure = AttemptError::NoRootElement;

    for context in contexts {
        attempted.push(context.id.to_string());
        match attempt::<T>(context, &root, text) {
            Ok(value) => {
                debug!(context = context.id, root = context.root, "Document unmarshalled");
                return Ok(ConfigTree::new(context.id, value));
            }
            Err(e) => {
                debug!(context = context.id, error = %e, "Schema context rejected document");
                last_failure = e;
            }
        }
    }

    Err(UnmarshalError::NoMatchingContext {
        attempted,
        source: last_failure,
    })
}

/// Unmarshal using the schema's own context list.
pub fn unmarshal_default<T: Schema>(bytes: &[u8]) -> Result<ConfigTree<T>, UnmarshalError> {
    unmarshal(T::CONTEXTS, bytes)
}

/// Read `path` once and unmarshal it with the schema's context list.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn unmarshal_file<T: Schema>(path: &Path) -> Result<ConfigTree<T>, UnmarshalError> {
    let bytes = std::fs::read(path).map_err(|e| UnmarshalError::read(path, e))?;
    unmarshal_default(&bytes)
}

/// Drain `reader` once and unmarshal the content with `contexts`.
pub fn unmarshal_reader<T: Schema, R: Read>(
    contexts: &[SchemaContext],
    mut reader: R,
) -> Result<ConfigTree<T>, UnmarshalError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| UnmarshalError::read("<stream>", e))?;
    unmarshal(contexts, &bytes)
}

fn attempt<T: Schema>(
    context: &SchemaContext,
    root: &sniff::RootElement,
    text: &str,
) -> Result<T, AttemptError> {
    if root.local_name != context.root {
        return Err(AttemptError::RootMismatch {
            expected: context.root.to_string(),
            found: root.local_name.clone(),
        });
    }
    if root.namespace.as_deref() != context.namespace {
        return Err(AttemptError::NamespaceMismatch {
            expected: context.namespace.map(str::to_string),
            found: root.namespace.clone(),
        });
    }
    Ok(quick_xml::de::from_str::<T>(text)?)
}
