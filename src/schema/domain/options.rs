//! Validator options and per-call field scopes.

use super::OptionsError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema-level options.
///
/// # Examples
///
/// ```
/// use fieldguard::schema::domain::ValidatorOptions;
///
/// let options = ValidatorOptions::from_json(
///     r#"{"messages": {"required": "Missing."}, "exclude": ["notes"]}"#,
/// )
/// .expect("valid options");
/// assert_eq!(options.messages.get("required").map(String::as_str), Some("Missing."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Message overrides keyed by `"<key>"` or `"<field>.<key>"`.
    pub messages: IndexMap<String, String>,
    /// Fields to validate; all others are skipped.
    pub only: Option<Vec<String>>,
    /// Fields to skip.
    pub exclude: Option<Vec<String>>,
}

impl ValidatorOptions {
    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Malformed`] when the document does not match
    /// the options shape.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the options' default field scope.
    #[must_use]
    pub fn scope(&self) -> FieldScope {
        FieldScope {
            only: self.only.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Restriction of the processed field set for a single call.
///
/// An empty list counts as not given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldScope {
    /// Fields to validate; all others are skipped.
    pub only: Option<Vec<String>>,
    /// Fields to skip.
    pub exclude: Option<Vec<String>>,
}

impl FieldScope {
    /// Scope covering every declared field.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            only: None,
            exclude: None,
        }
    }

    /// Scope limited to the named fields.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(names.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    /// Scope skipping the named fields.
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: None,
            exclude: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns `true` when neither list is given.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        non_empty(self.only.as_deref()).is_none() && non_empty(self.exclude.as_deref()).is_none()
    }

    /// Returns this scope, or `fallback` when this scope restricts nothing.
    ///
    /// A scope that sets either list replaces `fallback` entirely.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        if self.is_unrestricted() {
            fallback.clone()
        } else {
            self
        }
    }

    /// Applies the scope to the declared field names, keeping their order.
    ///
    /// A field is kept when it is listed in `only` (if given) and not listed
    /// in `exclude`.
    pub fn apply<'a, I>(&self, declared: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let only = non_empty(self.only.as_deref());
        let exclude = non_empty(self.exclude.as_deref());
        declared
            .into_iter()
            .filter(|name| only.is_none_or(|listed| contains(listed, name)))
            .filter(|name| !exclude.is_some_and(|listed| contains(listed, name)))
            .collect()
    }
}

fn non_empty(names: Option<&[String]>) -> Option<&[String]> {
    names.filter(|list| !list.is_empty())
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate == name)
}
