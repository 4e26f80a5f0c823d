//! Path-tracking primitives used by the schema definitions.
//!
//! A [`Checker`] walks an untyped document, remembering the key path it is
//! currently under, and records one message per violation in the form
//! `<dotted.path>: <reason>`. Every check returns `None` exactly when it
//! recorded at least one violation, so a parent can assemble its typed value
//! with `?` after all of its fields have been visited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::types::NamedEnum;

/// Path label used for violations on the document root itself.
pub const ROOT_PATH: &str = "(root)";

/// Constraints on a string field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StringRule {
    min_len: usize,
    pattern: Option<(&'static LazyLock<Regex>, &'static str)>,
}

impl StringRule {
    /// Any string, including the empty one.
    pub(crate) const fn any() -> Self {
        Self {
            min_len: 0,
            pattern: None,
        }
    }

    pub(crate) const fn non_empty() -> Self {
        Self {
            min_len: 1,
            pattern: None,
        }
    }

    /// A string matching `regex`; `message` is reported on mismatch.
    pub(crate) const fn matching(regex: &'static LazyLock<Regex>, message: &'static str) -> Self {
        Self {
            min_len: 0,
            pattern: Some((regex, message)),
        }
    }
}

/// Constraints on a numeric field. Bounds are inclusive.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberRule {
    integer: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberRule {
    pub(crate) const fn any() -> Self {
        Self {
            integer: false,
            min: None,
            max: None,
        }
    }

    pub(crate) const fn integer() -> Self {
        Self {
            integer: true,
            min: None,
            max: None,
        }
    }

    pub(crate) const fn at_least(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub(crate) const fn between(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// The keys of one mapping, plus the ones the schema has looked at so far.
pub(crate) struct Fields<'v> {
    map: &'v Map<String, Value>,
    visited: Vec<&'static str>,
}

/// Collects violations while walking a document.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    path: Vec<String>,
    errors: Vec<String>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn location(&self) -> String {
        if self.path.is_empty() {
            ROOT_PATH.to_string()
        } else {
            self.path.join(".")
        }
    }

    fn report(&mut self, message: impl fmt::Display) {
        let entry = format!("{}: {message}", self.location());
        debug!(violation = %entry, "schema violation");
        self.errors.push(entry);
    }

    fn nested<T>(&mut self, segment: impl Into<String>, check: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment.into());
        let out = check(self);
        self.path.pop();
        out
    }

    /// Opens a mapping for field access.
    pub(crate) fn object<'v>(&mut self, value: &'v Value) -> Option<Fields<'v>> {
        match value {
            Value::Object(map) => Some(Fields {
                map,
                visited: Vec::new(),
            }),
            other => {
                self.report(format_args!("Expected object, received {}", type_name(other)));
                None
            }
        }
    }

    /// Checks a field that must be present.
    pub(crate) fn required<'v, T>(
        &mut self,
        fields: &mut Fields<'v>,
        key: &'static str,
        check: impl FnOnce(&mut Self, &'v Value) -> Option<T>,
    ) -> Option<T> {
        fields.visited.push(key);
        let map = fields.map;
        self.nested(key, |checker| match map.get(key) {
            Some(value) => check(checker, value),
            None => {
                checker.report("Required");
                None
            }
        })
    }

    /// Checks a field that may be absent.
    ///
    /// Returns `Some(None)` when absent, `Some(Some(_))` when present and
    /// valid, and `None` when present but invalid. An explicit `null` counts
    /// as present.
    pub(crate) fn optional<'v, T>(
        &mut self,
        fields: &mut Fields<'v>,
        key: &'static str,
        check: impl FnOnce(&mut Self, &'v Value) -> Option<T>,
    ) -> Option<Option<T>> {
        fields.visited.push(key);
        let map = fields.map;
        match map.get(key) {
            None => Some(None),
            Some(value) => self.nested(key, |checker| check(checker, value)).map(Some),
        }
    }

    /// Closes a mapping. Keys the schema never asked for are dropped.
    pub(crate) fn finish(&self, fields: Fields<'_>) {
        for key in fields.map.keys() {
            if !fields.visited.contains(&key.as_str()) {
                let at = if self.path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{key}", self.path.join("."))
                };
                debug!(field = %at, "ignoring unknown key");
            }
        }
    }

    pub(crate) fn string(&mut self, value: &Value, rule: &StringRule) -> Option<String> {
        let Value::String(s) = value else {
            self.report(format_args!("Expected string, received {}", type_name(value)));
            return None;
        };

        let mut ok = true;
        if s.chars().count() < rule.min_len {
            self.report(format_args!(
                "String must contain at least {} character(s)",
                rule.min_len
            ));
            ok = false;
        }
        if let Some((regex, message)) = rule.pattern {
            if !regex.is_match(s) {
                self.report(message);
                ok = false;
            }
        }

        ok.then(|| s.clone())
    }

    pub(crate) fn number(&mut self, value: &Value, rule: &NumberRule) -> Option<f64> {
        let Some(n) = value.as_f64() else {
            self.report(format_args!("Expected number, received {}", type_name(value)));
            return None;
        };

        let mut ok = true;
        if rule.integer && n.fract() != 0.0 {
            self.report("Expected integer, received float");
            ok = false;
        }
        if let Some(min) = rule.min {
            if n < min {
                self.report(format_args!("Number must be greater than or equal to {min}"));
                ok = false;
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                self.report(format_args!("Number must be less than or equal to {max}"));
                ok = false;
            }
        }

        ok.then_some(n)
    }

    /// Like [`number`](Self::number) but yields the exact integer value.
    pub(crate) fn integer(&mut self, value: &Value, rule: &NumberRule) -> Option<i64> {
        let n = self.number(value, &NumberRule { integer: true, ..*rule })?;
        Some(value.as_i64().unwrap_or(n as i64))
    }

    pub(crate) fn boolean(&mut self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            other => {
                self.report(format_args!("Expected boolean, received {}", type_name(other)));
                None
            }
        }
    }

    pub(crate) fn literal(&mut self, value: &Value, expected: &str) -> Option<String> {
        if value.as_str() == Some(expected) {
            Some(expected.to_string())
        } else {
            self.report(format_args!("Invalid literal value, expected \"{expected}\""));
            None
        }
    }

    pub(crate) fn one_of<E: NamedEnum>(&mut self, value: &Value) -> Option<E> {
        let expected = E::ALL
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect::<Vec<_>>()
            .join(" | ");

        match value {
            Value::String(s) => {
                let found = E::from_name(s);
                if found.is_none() {
                    self.report(format_args!(
                        "Invalid enum value. Expected {expected}, received '{s}'"
                    ));
                }
                found
            }
            other => {
                self.report(format_args!("Expected {expected}, received {}", type_name(other)));
                None
            }
        }
    }

    pub(crate) fn string_list(&mut self, value: &Value) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            self.report(format_args!("Expected array, received {}", type_name(value)));
            return None;
        };

        let checked: Vec<Option<String>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.nested(index.to_string(), |checker| {
                    checker.string(item, &StringRule::any())
                })
            })
            .collect();
        checked.into_iter().collect()
    }

    pub(crate) fn string_map(&mut self, value: &Value) -> Option<BTreeMap<String, String>> {
        let Value::Object(map) = value else {
            self.report(format_args!("Expected object, received {}", type_name(value)));
            return None;
        };

        let checked: Vec<Option<(String, String)>> = map
            .iter()
            .map(|(key, item)| {
                self.nested(key.clone(), |checker| {
                    checker
                        .string(item, &StringRule::any())
                        .map(|s| (key.clone(), s))
                })
            })
            .collect();
        checked.into_iter().collect()
    }
}

/// Name of a value's type as it appears in violation messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
