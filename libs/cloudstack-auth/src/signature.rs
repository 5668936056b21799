// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request signature generation
//!
//! Implements the query-signing scheme used by CloudStack-style APIs:
//!
//! ```text
//! signature = base64(hmac_sha1(secret, lower(sorted_query)).replace("+", "%20"))
//! ```
//!
//! where `sorted_query` is every request parameter (including `apiKey`,
//! `command` and `response`) sorted by name and joined as
//! `name=percent_encoded_value&...`. Parameter names are not encoded.

use std::collections::BTreeMap;

use base64::Engine;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;

/// Name of the query/form parameter that carries the signature
pub const SIGNATURE_PARAM: &str = "signature";

/// Percent-encode a single parameter value
///
/// Everything outside the RFC 3986 unreserved set is escaped, which is the
/// same set the server uses when it rebuilds the canonical string.
pub fn encode_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the `name=value&...` query string with sorted names
///
/// Values are percent-encoded, names are emitted verbatim and the case of
/// both is preserved. This is the string placed on the wire for GET
/// requests; [`signing_string`] derives the signed form from it.
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (name, value) in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(name);
        out.push('=');
        out.push_str(&encode_value(value));
    }
    out
}

/// Build the exact byte string that gets fed into the HMAC
///
/// Lowercases the canonical query and replaces any literal `+` with `%20`.
pub fn signing_string(params: &BTreeMap<String, String>) -> String {
    canonical_query(params).to_lowercase().replace('+', "%20")
}

/// Sign a parameter set with a shared secret
///
/// Returns the base64-encoded HMAC-SHA1 digest of [`signing_string`].
/// The result only depends on the parameter set and the secret, never on
/// insertion order.
pub fn sign(secret: &str, params: &BTreeMap<String, String>) -> Result<String, AuthError> {
    let signing_string = signing_string(params);
    tracing::trace!(%signing_string, "computing request signature");
    let mut mac = <HmacSha1 as KeyInit>::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
    mac.update(signing_string.as_bytes());
    Ok(encode_signature(&mac.finalize().into_bytes()))
}

/// Encode raw signature bytes as base64
pub fn encode_signature(sig_bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(sig_bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_query_sorts_names() {
        let p = params(&[("zoneid", "z1"), ("apiKey", "KEY"), ("command", "listZones")]);
        assert_eq!(
            canonical_query(&p),
            "apiKey=KEY&command=listZones&zoneid=z1"
        );
    }

    #[test]
    fn test_canonical_query_encodes_values_only() {
        let p = params(&[("tags[0].key", "a b"), ("name", "x/y=z")]);
        assert_eq!(
            canonical_query(&p),
            "name=x%2Fy%3Dz&tags[0].key=a%20b"
        );
    }

    #[test]
    fn test_signing_string_lowercases() {
        let p = params(&[("apiKey", "KEY"), ("command", "listZones")]);
        assert_eq!(signing_string(&p), "apikey=key&command=listzones");
    }

    #[test]
    fn test_signing_string_keeps_encoded_plus() {
        // A literal '+' in a value is escaped before lowercasing, so only
        // the escape survives.
        let p = params(&[("userdata", "a+b")]);
        assert_eq!(signing_string(&p), "userdata=a%2bb");
    }

    #[test]
    fn test_canonical_query_empty() {
        assert_eq!(canonical_query(&BTreeMap::new()), "");
    }

    #[test]
    fn test_sign_is_base64_sha1_length() {
        let p = params(&[("apiKey", "key"), ("command", "listAccounts")]);
        let sig = sign("secret", &p).unwrap();
        // 20-byte digest -> 28 base64 characters with one pad
        assert_eq!(sig.len(), 28);
        assert!(sig.ends_with('='));
    }

    #[test]
    fn test_sign_depends_on_secret() {
        let p = params(&[("apiKey", "key"), ("command", "listAccounts")]);
        assert_ne!(sign("secret", &p).unwrap(), sign("other", &p).unwrap());
    }

    #[test]
    fn test_sign_accepts_any_key_length() {
        let p = params(&[("apiKey", "key"), ("command", "listAccounts")]);
        let long_secret = "s".repeat(200);
        for secret in ["", "x", long_secret.as_str()] {
            let sig = sign(secret, &p).unwrap();
            assert_eq!(sig.len(), 28);
        }
    }
}
