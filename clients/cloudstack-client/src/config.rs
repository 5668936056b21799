// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use cloudstack_auth::Credentials;

use crate::error::Error;

/// Default async job poll budget in seconds
pub const DEFAULT_ASYNC_TIMEOUT_SECS: u64 = 300;

/// TLS settings for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Verify the server certificate chain and host name
    pub verify: bool,
    /// Extra PEM-encoded CA certificate(s) to trust
    pub ca_cert: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ca_cert: None,
        }
    }
}

/// Everything the client needs to talk to one API endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint, e.g. `https://cloud.example.com/client/api`
    pub base_url: String,
    /// API key / secret key pair
    pub credentials: Credentials,
    /// Wait for async jobs to finish before returning
    pub async_mode: bool,
    /// How long to poll an async job before giving up
    pub async_timeout: Duration,
    /// Never use POST, even for large-payload commands
    pub http_get_only: bool,
    pub tls: TlsConfig,
    /// Per-request HTTP timeout; `None` leaves the HTTP client default
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a synchronous-mode configuration with defaults
    ///
    /// # Arguments
    /// * `base_url` - API endpoint URL
    /// * `credentials` - API key / secret key pair
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            async_mode: false,
            async_timeout: Duration::from_secs(DEFAULT_ASYNC_TIMEOUT_SECS),
            http_get_only: false,
            tls: TlsConfig::default(),
            request_timeout: None,
        }
    }

    /// Wait for async jobs (or not)
    pub fn with_async(mut self, async_mode: bool) -> Self {
        self.async_mode = async_mode;
        self
    }

    /// Set the async job poll budget
    pub fn with_async_timeout(mut self, timeout: Duration) -> Self {
        self.async_timeout = timeout;
        self
    }

    /// Force every command onto HTTP GET
    pub fn with_http_get_only(mut self, http_get_only: bool) -> Self {
        self.http_get_only = http_get_only;
        self
    }

    /// Enable or disable certificate verification
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.tls.verify = verify;
        self
    }

    /// Trust an additional CA bundle
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls.ca_cert = Some(path.into());
        self
    }

    /// Set a per-request HTTP timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.base_url.contains('?') {
            return Err(Error::Config(format!(
                "base URL must not carry a query string, got '{}'",
                self.base_url
            )));
        }
        self.credentials.validate()?;
        Ok(())
    }
}
