// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Async job polling
//!
//! Commands that take a while (deploying a VM, deleting an account, ...)
//! answer immediately with a `jobid`. The job is then polled with
//! `queryAsyncJobResult` until it reports success or failure, or until the
//! caller's timeout runs out.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{Instant, sleep};

use crate::client::CloudStackClient;
use crate::error::Error;
use crate::params::Params;
use crate::transport::HttpSend;

/// Upper bound of the poll delay, in seconds
pub const MAX_POLL_DELAY_SECS: u64 = 15;

/// Job state as reported by `jobstatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

impl TryFrom<i64> for JobStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Succeeded),
            2 => Ok(Self::Failed),
            other => Err(format!("unknown job status {other}")),
        }
    }
}

impl From<JobStatus> for i64 {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Pending => 0,
            JobStatus::Succeeded => 1,
            JobStatus::Failed => 2,
        }
    }
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Response of `queryAsyncJobResult`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AsyncJobResult {
    #[serde(default)]
    pub jobid: Option<String>,
    pub jobstatus: JobStatus,
    #[serde(default)]
    pub jobresulttype: Option<String>,
    #[serde(default)]
    pub jobresult: Option<Value>,
    #[serde(default)]
    pub jobresultcode: Option<i64>,
    #[serde(default)]
    pub jobprocstatus: Option<i64>,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub jobinstancetype: Option<String>,
    #[serde(default)]
    pub jobinstanceid: Option<String>,
    #[serde(default)]
    pub accountid: Option<String>,
    #[serde(default)]
    pub userid: Option<String>,
}

impl AsyncJobResult {
    /// Human-readable reason of a failed job
    ///
    /// Text results are returned verbatim; object results contribute their
    /// `errortext`; anything else is reported as undefined.
    pub fn failure_message(&self) -> String {
        match (&self.jobresulttype, &self.jobresult) {
            (Some(kind), Some(Value::String(text))) if kind == "text" => text.clone(),
            (_, Some(Value::Object(map))) => match map.get("errortext") {
                Some(Value::String(text)) => text.clone(),
                _ => format!("Undefined error: {}", Value::Object(map.clone())),
            },
            (_, Some(other)) => format!("Undefined error: {other}"),
            (_, None) => "Undefined error".to_string(),
        }
    }
}

/// Delay schedule between job polls
///
/// Historically described as "extremely simple exponential backoff", but
/// the delay actually grows LINEARLY: 0s, 1s, 2s, ... up to
/// [`MAX_POLL_DELAY_SECS`], then holds.
#[derive(Debug, Clone, Default)]
pub struct Backoff {
    next_secs: u64,
}

impl Backoff {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next_secs;
        if self.next_secs < MAX_POLL_DELAY_SECS {
            self.next_secs += 1;
        }
        Some(Duration::from_secs(current))
    }
}

impl<S: HttpSend> CloudStackClient<S> {
    /// Query the current state of an async job
    pub async fn query_async_job_result(&self, jobid: &str) -> Result<AsyncJobResult, Error> {
        let params = Params::new().with("jobid", jobid);
        self.request_as("queryAsyncJobResult", &params).await
    }

    /// Poll an async job until it finishes
    ///
    /// Returns the raw `jobresult` of a successful job (still wrapped in its
    /// own envelope). A failed job yields [`Error::JobFailed`]; a job still
    /// pending after `timeout` yields [`Error::AsyncTimeout`] without a
    /// pending payload, which [`CloudStackClient::request_async`] fills in.
    pub async fn get_async_job_result(
        &self,
        jobid: &str,
        timeout: Duration,
    ) -> Result<Value, Error> {
        let started = Instant::now();
        let mut backoff = Backoff::new();

        loop {
            let job = self.query_async_job_result(jobid).await?;

            match job.jobstatus {
                JobStatus::Succeeded => {
                    tracing::debug!(jobid, "async job succeeded");
                    return Ok(job.jobresult.unwrap_or(Value::Null));
                }
                JobStatus::Failed => {
                    let message = job.failure_message();
                    tracing::debug!(jobid, %message, "async job failed");
                    return Err(Error::JobFailed(message));
                }
                JobStatus::Pending => {}
            }

            if started.elapsed() > timeout {
                tracing::warn!(jobid, ?timeout, "gave up waiting for async job");
                return Err(Error::AsyncTimeout {
                    jobid: jobid.to_string(),
                    pending: None,
                });
            }

            let delay = backoff.next().unwrap_or(Duration::from_secs(MAX_POLL_DELAY_SECS));
            tracing::debug!(jobid, ?delay, "async job pending");
            sleep(delay).await;
        }
    }
}
