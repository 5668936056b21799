// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Response envelope handling
//!
//! Every response arrives wrapped in a single-key object whose key depends
//! on the command (`listaccountsresponse`, `virtualmachine`, ...). The key
//! is not known ahead of time, so unwrapping only checks that there is
//! exactly one.

use serde_json::{Map, Value};

use crate::error::Error;

/// Unwrap a raw response body
pub fn unwrap_body(body: &[u8]) -> Result<Value, Error> {
    let map: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| Error::decode("response envelope", e))?;
    single_entry(map).map_err(|_| Error::NoPayload {
        payload: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Unwrap an already decoded value (e.g. an async job result)
pub fn unwrap_value(value: Value) -> Result<Value, Error> {
    match value {
        Value::Object(map) => single_entry(map).map_err(|map| Error::NoPayload {
            payload: Value::Object(map).to_string(),
        }),
        other => Err(Error::NoPayload {
            payload: other.to_string(),
        }),
    }
}

/// The only value of a one-entry map, or the map back
fn single_entry(map: Map<String, Value>) -> Result<Value, Map<String, Value>> {
    if map.len() != 1 {
        return Err(map);
    }
    let mut entries = map.into_iter();
    match entries.next() {
        Some((_, inner)) => Ok(inner),
        None => Err(Map::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_single_key() {
        let value = unwrap_body(br#"{"fooresponse": {"a": 1}}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_empty_object_fails() {
        let err = unwrap_body(b"{}").unwrap_err();
        assert!(err.is_decode());
        assert!(matches!(err, Error::NoPayload { .. }));
    }

    #[test]
    fn test_multiple_keys_fail() {
        let err = unwrap_body(br#"{"a": 1, "b": 2}"#).unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains(r#""b": 2"#));
    }

    #[test]
    fn test_non_object_fails_as_decode() {
        let err = unwrap_body(b"[1, 2]").unwrap_err();
        assert!(err.is_decode());
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_garbage_fails_as_decode() {
        let err = unwrap_body(b"<html>").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_unwrap_value() {
        let inner = unwrap_value(json!({"virtualmachine": {"id": "vm-1"}})).unwrap();
        assert_eq!(inner, json!({"id": "vm-1"}));

        assert!(unwrap_value(json!({"success": true, "displaytext": "ok"})).is_err());
        assert!(unwrap_value(json!("text")).is_err());
    }

    #[test]
    fn test_inner_value_may_be_scalar() {
        assert_eq!(unwrap_value(json!({"success": true})).unwrap(), json!(true));
    }
}
