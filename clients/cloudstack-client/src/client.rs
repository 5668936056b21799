// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client facade
//!
//! [`CloudStackClient`] owns the configuration and the HTTP sender and ties
//! the engine together: signed dispatch, envelope unwrapping, async job
//! waiting and list pagination.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use cloudstack_pagination::{Page, PageRequest, collect_all};

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::Error;
use crate::params::Params;
use crate::transport::{self, HttpSend, ReqwestSender};

/// How an async job's `jobresult` is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPayload {
    /// Result object nested under a single key, e.g. `{"virtualmachine": {...}}`
    Wrapped,
    /// Result is the object itself, e.g. `{"success": true, "displaytext": "..."}`
    Bare,
}

struct Inner<S> {
    config: ClientConfig,
    sender: S,
}

/// Shared, immutable handle to one API endpoint
///
/// Cloning is cheap; clones share the configuration and the HTTP connection
/// pool, so one client can serve many concurrent tasks.
pub struct CloudStackClient<S = ReqwestSender> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for CloudStackClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for CloudStackClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudStackClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl CloudStackClient<ReqwestSender> {
    /// Create a client backed by reqwest
    ///
    /// # Arguments
    /// * `config` - Endpoint, credentials and behaviour flags
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;
        let sender = ReqwestSender::from_config(&config)?;
        Self::with_sender(config, sender)
    }

    /// Client that returns async job handles without waiting
    pub fn new_sync(config: ClientConfig) -> Result<Self, Error> {
        Self::new(config.with_async(false))
    }

    /// Client that waits for async jobs to finish
    pub fn new_async(config: ClientConfig) -> Result<Self, Error> {
        Self::new(config.with_async(true))
    }
}

impl<S: HttpSend> CloudStackClient<S> {
    /// Create a client with a custom HTTP sender
    pub fn with_sender(config: ClientConfig, sender: S) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner { config, sender }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn is_async(&self) -> bool {
        self.inner.config.async_mode
    }

    /// Invoke a command and return its unwrapped payload
    pub async fn request(&self, command: &str, params: &Params) -> Result<Value, Error> {
        let body = transport::send(&self.inner.sender, &self.inner.config, command, params).await?;
        envelope::unwrap_body(&body)
    }

    /// Invoke a command and decode its unwrapped payload into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &Params,
    ) -> Result<T, Error> {
        let value = self.request(command, params).await?;
        serde_json::from_value(value).map_err(|e| Error::decode(format!("{command} response"), e))
    }

    /// Invoke an async-capable command
    ///
    /// In sync mode the initial response (carrying the `jobid`) is decoded
    /// into `T`. In async mode the job is awaited and its result, unwrapped
    /// according to `payload`, is decoded into `T` instead; the job id is
    /// copied into the result object when the server leaves it out. A
    /// response without a `jobid` is decoded as-is.
    ///
    /// A poll timeout surfaces as [`Error::AsyncTimeout`] carrying the
    /// initial response; see [`Error::pending_response`].
    pub async fn request_async<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &Params,
        payload: JobPayload,
    ) -> Result<T, Error> {
        let initial = self.request(command, params).await?;

        let jobid = match (self.is_async(), initial.get("jobid")) {
            (true, Some(Value::String(jobid))) => jobid.clone(),
            _ => return decode_as(command, initial),
        };

        tracing::debug!(command, %jobid, "waiting for async job");

        let timeout = self.inner.config.async_timeout;
        let result = match self.get_async_job_result(&jobid, timeout).await {
            Ok(result) => result,
            Err(Error::AsyncTimeout { jobid, .. }) => {
                return Err(Error::AsyncTimeout {
                    jobid,
                    pending: Some(initial),
                });
            }
            Err(e) => return Err(e),
        };

        let mut result = match payload {
            JobPayload::Wrapped => envelope::unwrap_value(result)?,
            JobPayload::Bare => result,
        };

        if let Value::Object(map) = &mut result {
            map.entry("jobid").or_insert(Value::String(jobid));
        }

        decode_as(command, result)
    }

    /// Drain every page of a list command
    ///
    /// # Arguments
    /// * `command` - List command, e.g. `listVirtualMachines`
    /// * `params` - Filters; `page`/`pagesize` are overridden after the
    ///   first page
    /// * `items_key` - Name of the item array in the payload, e.g.
    ///   `virtualmachine`
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &Params,
        items_key: &str,
    ) -> Result<Vec<T>, Error> {
        collect_all(|request: Option<PageRequest>| {
            let mut params = params.clone();
            if let Some(request) = request {
                params.set("page", request.page);
                params.set("pagesize", request.page_size);
            }
            async move {
                let value = self.request(command, &params).await?;
                decode_page(command, value, items_key)
            }
        })
        .await
    }
}

fn decode_as<T: DeserializeOwned>(command: &str, value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::decode(format!("{command} response"), e))
}

/// Split a list payload into its reported `count` and its items
///
/// Empty listings come back as `{}`, so both fields are optional.
fn decode_page<T: DeserializeOwned>(
    command: &str,
    mut value: Value,
    items_key: &str,
) -> Result<Page<T>, Error> {
    let count = value.get("count").and_then(Value::as_u64).unwrap_or(0);
    let items = match value.as_object_mut().and_then(|map| map.remove(items_key)) {
        Some(raw) => serde_json::from_value(raw)
            .map_err(|e| Error::decode(format!("{command} {items_key} list"), e))?,
        None => Vec::new(),
    };
    Ok(Page::new(usize::try_from(count).unwrap_or(usize::MAX), items))
}
