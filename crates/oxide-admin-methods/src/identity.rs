//! Identity and label binding for produced units.
//!
//! Every unit carries two names. The identity is the key the admin host uses
//! in its registries and dispatch tables, so it must be a plain ASCII
//! identifier. The label is what users read in column headers and action
//! menus, and may contain anything, including translated text.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::error::{Result, UnitError};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// A validated machine identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Validates a name as an identity.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(invalid(name, "identity is empty"));
        }
        if !name.is_ascii() {
            return Err(invalid(name, "identity must be ASCII"));
        }
        if !IDENTIFIER.is_match(name) {
            return Err(invalid(
                name,
                "identity must start with a letter or underscore and contain only letters, digits and underscores",
            ));
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identity {
    type Error = UnitError;

    fn try_from(name: &str) -> Result<Self> {
        Self::parse(name)
    }
}

fn invalid(name: &str, reason: &str) -> UnitError {
    UnitError::InvalidIdentity {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// How to derive a label when none is supplied.
#[derive(Clone)]
pub enum LabelRule {
    /// `some_field` becomes `Some field`.
    Humanize,
    /// Replaces every `{}` with the identity.
    Template(String),
    /// Arbitrary function of the identity.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl LabelRule {
    /// Applies the rule to an identity.
    pub fn apply(&self, identity: &str) -> String {
        match self {
            Self::Humanize => humanize(identity),
            Self::Template(t) => t.replace("{}", identity),
            Self::Custom(f) => f(identity),
        }
    }
}

impl fmt::Debug for LabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Humanize => f.write_str("Humanize"),
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// An identity paired with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub identity: Identity,
    pub label: String,
}

/// Assigns an identity and a label to a unit.
///
/// An empty `name` falls back to `fallback_name`. An empty `label` falls back
/// to `rule` applied to the identity, or to the identity itself when there is
/// no rule. Only the identity is validated.
pub fn bind(name: &str, label: &str, fallback_name: &str, rule: Option<&LabelRule>) -> Result<Binding> {
    let raw = if name.is_empty() { fallback_name } else { name };
    let identity = Identity::parse(raw)?;

    let label = if !label.is_empty() {
        label.to_string()
    } else if let Some(rule) = rule {
        rule.apply(identity.as_str())
    } else {
        identity.as_str().to_string()
    };

    Ok(Binding { identity, label })
}

/// Turns a snake_case identity into a sentence-case label.
pub fn humanize(identity: &str) -> String {
    let spaced = identity.replace("__", " ").replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives a default identity from a dotted attribute path.
pub(crate) fn path_identity(path: &str) -> String {
    path.replace('.', "__")
}
