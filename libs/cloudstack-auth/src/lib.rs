// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CloudStack Request Signing Library
//!
//! This library provides the shared-secret request signing used by
//! CloudStack-style control-plane APIs. Every API call is a flat set of
//! query (or form) parameters; the client proves possession of the secret
//! key by attaching an HMAC-SHA1 signature computed over a canonical form
//! of those parameters.
//!
//! # Signing Flow
//!
//! 1. Create [`Credentials`] with the API key and secret key
//! 2. For each request:
//!    a. Add `apiKey`, `command` and `response=json` to the parameters
//!    b. Sort the parameters by name and percent-encode the values
//!    c. Lowercase the resulting string and replace `+` with `%20`
//!    d. HMAC-SHA1 it with the secret key and base64 the digest
//!    e. Send the digest as the `signature` parameter
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use cloudstack_auth::Credentials;
//!
//! # fn main() -> Result<(), cloudstack_auth::AuthError> {
//! let creds = Credentials::new("my-api-key", "my-secret-key");
//!
//! let mut params = BTreeMap::new();
//! params.insert("apiKey".to_string(), creds.api_key().to_string());
//! params.insert("command".to_string(), "listZones".to_string());
//! params.insert("response".to_string(), "json".to_string());
//!
//! let signature = creds.sign(&params)?;
//! assert_eq!(signature, creds.sign(&params)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod signature;

use std::collections::BTreeMap;
use std::fmt;

pub use error::AuthError;
pub use signature::{
    SIGNATURE_PARAM, canonical_query, encode_signature, encode_value, sign, signing_string,
};

/// API key / secret key pair for a single control-plane account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The public API key, sent as the `apiKey` parameter
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Check that both halves of the pair are present
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.api_key.is_empty() {
            return Err(AuthError::MissingApiKey);
        }
        if self.secret_key.is_empty() {
            return Err(AuthError::MissingSecretKey);
        }
        Ok(())
    }

    /// Sign a complete parameter set with this pair's secret key
    pub fn sign(&self, params: &BTreeMap<String, String>) -> Result<String, AuthError> {
        sign(&self.secret_key, params)
    }
}

// The secret never ends up in logs or panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
