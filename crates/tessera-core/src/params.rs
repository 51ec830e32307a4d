//! Typed, name-keyed parameter bags for kernel construction.
//!
//! A [`ParameterSet`] is the already-resolved configuration handed to a
//! kernel constructor. Tessera never parses configuration itself; the
//! surrounding orchestration resolves names and types and passes the
//! finished bag in.

use indexmap::IndexMap;
use std::fmt;

/// A single typed parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// A floating-point value (coefficients, rates, tolerances).
    Real(f64),
    /// An integer value (counts, orders).
    Int(i64),
    /// A boolean flag.
    Bool(bool),
    /// A free-form string (variable names, labels).
    Text(String),
    /// A list of floating-point values.
    RealVec(Vec<f64>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::RealVec(v) => write!(f, "{v:?}"),
        }
    }
}

/// A name-keyed bag of typed parameters.
///
/// Keys iterate in insertion order, so a defaults provider produces the
/// same canonical listing on every call. Setting an existing key
/// replaces its value without changing its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.entries.insert(name.into(), value);
    }

    /// Builder-style insert, for defaults providers and tests.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// Look up a `Real` parameter, returning `None` on absence or type
    /// mismatch.
    pub fn real(&self, name: &str) -> Option<f64> {
        match self.entries.get(name) {
            Some(ParamValue::Real(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up an `Int` parameter.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.entries.get(name) {
            Some(ParamValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a `Bool` parameter.
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.entries.get(name) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a `Text` parameter.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(ParamValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether the set contains a parameter with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of parameters in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill any missing keys from `defaults`, leaving present keys
    /// untouched. Used to overlay caller-resolved values on a type's
    /// canonical defaults before construction.
    pub fn apply_defaults(&mut self, defaults: &ParameterSet) {
        for (name, value) in &defaults.entries {
            if !self.entries.contains_key(name) {
                self.entries.insert(name.clone(), value.clone());
            }
        }
    }
}
