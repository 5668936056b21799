// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for cloudstack-client

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use cloudstack_auth::AuthError;

/// Errors returned by every client operation
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS or timeout failure from the HTTP client, unmodified
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-200 status and a structured error
    #[error("CloudStack API error {errorcode} (CSExceptionErrorCode: {cserrorcode}): {errortext}")]
    Api {
        errorcode: i64,
        cserrorcode: i64,
        errortext: String,
    },

    /// A payload did not have the JSON shape we expected
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response envelope did not hold exactly one entry
    #[error("Unable to extract the raw value from:\n\n{payload}")]
    NoPayload { payload: String },

    /// The async job was still pending when the poll timeout expired
    ///
    /// `pending` carries the initial response of the call that started the
    /// job (when known) so the job id is not lost.
    #[error("Timeout waiting for async job result (job {jobid})")]
    AsyncTimeout {
        jobid: String,
        pending: Option<Value>,
    },

    /// The async job finished with a failure status
    #[error("{0}")]
    JobFailed(String),

    /// A name lookup found nothing
    #[error("No match found for {kind} '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// A name lookup found several candidates and none matched exactly
    #[error("Could not find an exact match for {kind} '{name}' ({count} candidates)")]
    Ambiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed credentials
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// True for payload-shape failures (including envelope unwrapping)
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::NoPayload { .. })
    }

    /// True for the async poll timeout sentinel
    pub fn is_async_timeout(&self) -> bool {
        matches!(self, Self::AsyncTimeout { .. })
    }

    /// Job id of a timed-out async job
    pub fn timed_out_job_id(&self) -> Option<&str> {
        match self {
            Self::AsyncTimeout { jobid, .. } => Some(jobid),
            _ => None,
        }
    }

    /// Decode the pending response attached to an async timeout
    ///
    /// Returns `None` for every other error, or when the pending payload
    /// does not fit `T`.
    pub fn pending_response<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::AsyncTimeout {
                pending: Some(value),
                ..
            } => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}
