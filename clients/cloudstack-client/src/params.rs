// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request parameter bag
//!
//! Every API call is a flat set of named parameters. Values come in three
//! shapes, all of which flatten into plain `name=value` pairs before
//! signing:
//!
//! - scalars: `name=value`
//! - string lists: `name=a,b,c`
//! - string maps: `name[0].key=k0&name[0].value=v0&name[1].key=...`
//!   (entries in key order, so the output is deterministic)

use std::collections::BTreeMap;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Scalar(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        Self::Scalar(v.clone())
    }
}

macro_rules! scalar_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    Self::Scalar(v.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(bool, i32, i64, u32, u64, usize);

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(v: &[&str]) -> Self {
        Self::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeMap<String, String>> for ParamValue {
    fn from(v: BTreeMap<String, String>) -> Self {
        Self::Map(v)
    }
}

/// Named request parameters for one API call
///
/// Names are case-sensitive and unique; setting a name twice replaces the
/// earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any earlier value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builder-style [`Params::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<V: Into<ParamValue>>(
        &mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.set(name, v);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Scalar value of a parameter, if it is a scalar
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten into the wire-level `name -> value` pairs
    ///
    /// Empty lists and maps are dropped rather than sent as empty strings.
    pub fn to_values(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (name, value) in &self.values {
            match value {
                ParamValue::Scalar(s) => {
                    out.insert(name.clone(), s.clone());
                }
                ParamValue::List(items) => {
                    if !items.is_empty() {
                        out.insert(name.clone(), items.join(","));
                    }
                }
                ParamValue::Map(entries) => {
                    for (i, (k, v)) in entries.iter().enumerate() {
                        out.insert(format!("{name}[{i}].key"), k.clone());
                        out.insert(format!("{name}[{i}].value"), v.clone());
                    }
                }
            }
        }
        out
    }
}
