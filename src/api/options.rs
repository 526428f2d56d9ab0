//
//  gitlab-api
//  api/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Endpoint option validation.
//!
//! Listing and filtering endpoints accept a bag of optional parameters.
//! Each such endpoint declares an [`OptionsResolver`] — the schema of
//! option names it recognizes, with per-option type constraints, allowed
//! value sets or predicates, and normalizers that produce the wire form.
//! Validation happens before any network call; a bad option is an
//! [`ApiError::Configuration`], never an HTTP request.
//!
//! Every listing endpoint shares the base schema from
//! [`OptionsResolver::base`]: `page` (positive integer) and `per_page`
//! (integer in `[1, 100]`).
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_api::{GitlabClient, Options};
//!
//! # async fn example(client: GitlabClient) -> Result<(), gitlab_api::ApiError> {
//! let projects = client
//!     .projects()
//!     .all(Options::new().set("visibility", "private").set("per_page", 50))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::api::common::ApiError;

/// A typed option value, prior to normalization.
///
/// Carries enough type information for schema validation; the resolver
/// turns it into a wire-format [`Value`] afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Str(String),
    /// A point in time; normalized to ISO-8601 (or date-only, where an
    /// endpoint's schema says so).
    DateTime(DateTime<Utc>),
    /// A sequence, encoded with `key[]` notation.
    List(Vec<OptionValue>),
    /// A nested map, encoded with `key[child]` notation.
    Map(IndexMap<String, OptionValue>),
    /// An explicit null; dropped from the wire form entirely.
    Null,
}

/// The type of an [`OptionValue`], for schema constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// String.
    Str,
    /// Date-time.
    DateTime,
    /// Sequence.
    List,
    /// Nested map.
    Map,
    /// Null.
    Null,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Str => "string",
            Self::DateTime => "datetime",
            Self::List => "list",
            Self::Map => "map",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

impl OptionValue {
    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Str(_) => ValueKind::Str,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Null => ValueKind::Null,
        }
    }

    /// The default wire form: booleans and numbers keep their JSON type
    /// (the query encoder spells booleans `true`/`false`), date-times
    /// become full ISO-8601 strings, containers recurse.
    pub(crate) fn to_wire(&self) -> Value {
        match self {
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Int(number) => Value::from(*number),
            Self::Str(text) => Value::String(text.clone()),
            Self::DateTime(moment) => {
                Value::String(moment.to_rfc3339_opts(SecondsFormat::Secs, false))
            }
            Self::List(items) => Value::Array(items.iter().map(OptionValue::to_wire).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_wire()))
                    .collect(),
            ),
            Self::Null => Value::Null,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<DateTime<Utc>> for OptionValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// An insertion-ordered bag of endpoint options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: IndexMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, replacing any previous value for the name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// True when no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    /// Converts to wire form without a schema, using the default
    /// normalization. Used by create/update endpoints whose bodies are
    /// free-form.
    pub(crate) fn to_wire(&self) -> IndexMap<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_wire()))
            .collect()
    }
}

type Predicate = fn(&OptionValue) -> bool;
type Normalizer = fn(&OptionValue) -> Value;

struct OptionSpec {
    required: bool,
    kind: Option<ValueKind>,
    allowed: Option<Vec<OptionValue>>,
    predicate: Option<Predicate>,
    normalizer: Option<Normalizer>,
}

impl OptionSpec {
    fn bare() -> Self {
        Self {
            required: false,
            kind: None,
            allowed: None,
            predicate: None,
            normalizer: None,
        }
    }
}

/// A per-endpoint option schema.
///
/// Built fluently at the call site; stateless and constructed fresh per
/// call, so schemas never share mutable state across requests.
pub struct OptionsResolver {
    specs: IndexMap<String, OptionSpec>,
}

impl OptionsResolver {
    /// An empty schema recognizing no options.
    pub fn new() -> Self {
        Self {
            specs: IndexMap::new(),
        }
    }

    /// The shared listing schema: `page` (positive integer) and
    /// `per_page` (integer in `[1, 100]`).
    pub fn base() -> Self {
        Self::new()
            .constrained("page", ValueKind::Int, |value| {
                matches!(value, OptionValue::Int(page) if *page > 0)
            })
            .constrained("per_page", ValueKind::Int, |value| {
                matches!(value, OptionValue::Int(count) if *count > 0 && *count <= 100)
            })
    }

    /// Declares an option with no constraints.
    pub fn defined(mut self, name: &str) -> Self {
        self.specs.insert(name.to_string(), OptionSpec::bare());
        self
    }

    /// Declares a required string option.
    pub fn required(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.required = true;
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares a boolean option, normalized to the literal strings
    /// `"true"` / `"false"` on the wire.
    pub fn boolean(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(ValueKind::Bool);
        spec.normalizer = Some(|value| match value {
            OptionValue::Bool(true) => Value::String("true".to_string()),
            _ => Value::String("false".to_string()),
        });
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares an integer option.
    pub fn integer(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(ValueKind::Int);
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares a string option.
    pub fn string(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(ValueKind::Str);
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares a string option restricted to a fixed value set.
    pub fn values(mut self, name: &str, allowed: &[&str]) -> Self {
        let mut spec = OptionSpec::bare();
        spec.allowed = Some(allowed.iter().map(|v| OptionValue::from(*v)).collect());
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares an integer option restricted to a fixed value set.
    pub fn int_values(mut self, name: &str, allowed: &[i64]) -> Self {
        let mut spec = OptionSpec::bare();
        spec.allowed = Some(allowed.iter().map(|v| OptionValue::from(*v)).collect());
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares a date-time option, normalized to full ISO-8601.
    pub fn datetime(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(ValueKind::DateTime);
        spec.normalizer = Some(|value| match value {
            OptionValue::DateTime(moment) => {
                Value::String(moment.to_rfc3339_opts(SecondsFormat::Secs, false))
            }
            other => other.to_wire(),
        });
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares a date-time option normalized to a date-only
    /// (`YYYY-MM-DD`) string, for endpoints that take calendar dates.
    pub fn date(mut self, name: &str) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(ValueKind::DateTime);
        spec.normalizer = Some(|value| match value {
            OptionValue::DateTime(moment) => {
                Value::String(moment.format("%Y-%m-%d").to_string())
            }
            other => other.to_wire(),
        });
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Declares an option of the given type constrained by a predicate.
    pub fn constrained(mut self, name: &str, kind: ValueKind, predicate: Predicate) -> Self {
        let mut spec = OptionSpec::bare();
        spec.kind = Some(kind);
        spec.predicate = Some(predicate);
        self.specs.insert(name.to_string(), spec);
        self
    }

    /// Validates and normalizes an option bag against this schema.
    ///
    /// # Errors
    ///
    /// [`ApiError::Configuration`] for an unrecognized option name, a
    /// value of the wrong type, a value outside the allowed set or
    /// failing the predicate, or a missing required option.
    pub fn resolve(&self, options: Options) -> Result<IndexMap<String, Value>, ApiError> {
        for name in options.iter().map(|(name, _)| name) {
            if !self.specs.contains_key(name) {
                let defined = self
                    .specs
                    .keys()
                    .map(|known| format!("\"{known}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ApiError::Configuration(format!(
                    "the option \"{name}\" does not exist, defined options are: {defined}"
                )));
            }
        }

        for (name, spec) in &self.specs {
            if spec.required && !options.iter().any(|(set, _)| set == name) {
                return Err(ApiError::Configuration(format!(
                    "the required option \"{name}\" is missing"
                )));
            }
        }

        let mut resolved = IndexMap::new();
        for (name, value) in options.iter() {
            let spec = &self.specs[name.as_str()];

            if let Some(expected) = spec.kind {
                if value.kind() != expected {
                    return Err(ApiError::Configuration(format!(
                        "the option \"{name}\" is expected to be of type {expected}, got {}",
                        value.kind()
                    )));
                }
            }
            if let Some(allowed) = &spec.allowed {
                if !allowed.contains(value) {
                    return Err(ApiError::Configuration(format!(
                        "the value of option \"{name}\" is not in the allowed set"
                    )));
                }
            }
            if let Some(predicate) = spec.predicate {
                if !predicate(value) {
                    return Err(ApiError::Configuration(format!(
                        "the value of option \"{name}\" is invalid"
                    )));
                }
            }

            let wire = match spec.normalizer {
                Some(normalize) => normalize(value),
                None => value.to_wire(),
            };
            resolved.insert(name.clone(), wire);
        }

        Ok(resolved)
    }
}

impl Default for OptionsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_configuration_error(result: Result<IndexMap<String, Value>, ApiError>) -> String {
        match result {
            Err(ApiError::Configuration(message)) => message,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let resolver = OptionsResolver::base().defined("search");
        let message =
            assert_configuration_error(resolver.resolve(Options::new().set("serach", "x")));
        assert!(message.contains("\"serach\" does not exist"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let resolver = OptionsResolver::new().boolean("archived");
        let message =
            assert_configuration_error(resolver.resolve(Options::new().set("archived", "yes")));
        assert!(message.contains("expected to be of type bool"));
    }

    #[test]
    fn test_value_outside_allowed_set_is_rejected() {
        let resolver =
            OptionsResolver::new().values("visibility", &["public", "internal", "private"]);
        assert_configuration_error(resolver.resolve(Options::new().set("visibility", "hidden")));
    }

    #[test]
    fn test_page_must_be_positive() {
        let resolver = OptionsResolver::base();
        assert_configuration_error(resolver.resolve(Options::new().set("page", 0)));
        assert!(OptionsResolver::base()
            .resolve(Options::new().set("page", 3))
            .is_ok());
    }

    #[test]
    fn test_per_page_bounds() {
        assert_configuration_error(
            OptionsResolver::base().resolve(Options::new().set("per_page", 101)),
        );
        assert_configuration_error(
            OptionsResolver::base().resolve(Options::new().set("per_page", 0)),
        );
        let resolved = OptionsResolver::base()
            .resolve(Options::new().set("per_page", 100))
            .unwrap();
        assert_eq!(resolved["per_page"], Value::from(100));
    }

    #[test]
    fn test_boolean_normalizes_to_words() {
        let resolver = OptionsResolver::new().boolean("archived").boolean("simple");
        let resolved = resolver
            .resolve(Options::new().set("archived", true).set("simple", false))
            .unwrap();

        assert_eq!(resolved["archived"], Value::String("true".to_string()));
        assert_eq!(resolved["simple"], Value::String("false".to_string()));
    }

    #[test]
    fn test_datetime_normalizes_to_iso8601() {
        let moment = Utc.with_ymd_and_hms(2026, 3, 18, 9, 30, 0).unwrap();
        let resolver = OptionsResolver::new().datetime("created_after");
        let resolved = resolver
            .resolve(Options::new().set("created_after", moment))
            .unwrap();

        assert_eq!(
            resolved["created_after"],
            Value::String("2026-03-18T09:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_date_normalizes_to_day_precision() {
        let moment = Utc.with_ymd_and_hms(2026, 3, 18, 9, 30, 0).unwrap();
        let resolver = OptionsResolver::new().date("due_date");
        let resolved = resolver.resolve(Options::new().set("due_date", moment)).unwrap();

        assert_eq!(resolved["due_date"], Value::String("2026-03-18".to_string()));
    }

    #[test]
    fn test_required_option_must_be_present() {
        let resolver = OptionsResolver::new().required("branch").defined("content");
        let message =
            assert_configuration_error(resolver.resolve(Options::new().set("content", "x")));
        assert!(message.contains("required option \"branch\""));
    }

    #[test]
    fn test_resolution_preserves_insertion_order() {
        let resolver = OptionsResolver::base().defined("search").boolean("owned");
        let resolved = resolver
            .resolve(
                Options::new()
                    .set("search", "api")
                    .set("owned", true)
                    .set("page", 2),
            )
            .unwrap();

        let names: Vec<&String> = resolved.keys().collect();
        assert_eq!(names, ["search", "owned", "page"]);
    }
}
