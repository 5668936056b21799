// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for cloudstack-auth

use thiserror::Error;

/// Errors that can occur while preparing credentials for signing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The API key is empty
    #[error("API key must not be empty")]
    MissingApiKey,

    /// The secret key is empty
    #[error("Secret key must not be empty")]
    MissingSecretKey,

    /// The MAC rejected the secret key
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}
