// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CloudStack Client Library
//!
//! This client talks to CloudStack-style control-plane APIs: every call is
//! a named command plus flat parameters, signed with the account's secret
//! key and answered with a single-key JSON envelope.
//!
//! ## Usage
//!
//! ### Generic invocation
//!
//! ```ignore
//! use cloudstack_client::{ClientConfig, CloudStackClient, Credentials, Params};
//!
//! let config = ClientConfig::new(
//!     "https://cloud.example.com/client/api",
//!     Credentials::new("api-key", "secret-key"),
//! );
//! let client = CloudStackClient::new_async(config)?;
//!
//! let payload = client
//!     .request("listCapabilities", &Params::new())
//!     .await?;
//! ```
//!
//! ### Lists
//!
//! List commands are drained page by page until the reported `count` is
//! reached:
//!
//! ```ignore
//! let vms: Vec<serde_json::Value> = client
//!     .list_all("listVirtualMachines", &Params::new(), "virtualmachine")
//!     .await?;
//! ```
//!
//! ### Async jobs
//!
//! In async mode, async-capable commands wait for their job; in sync mode
//! they return the job handle immediately.
//!
//! ```ignore
//! use cloudstack_client::DeployVirtualMachineParams;
//!
//! let deploy = DeployVirtualMachineParams::new(offering, template, zone)
//!     .with_name("web01");
//! match client.virtual_machine().deploy_virtual_machine(&deploy).await {
//!     Ok(vm) => println!("deployed {}", vm.id),
//!     Err(e) if e.is_async_timeout() => {
//!         println!("still running as job {:?}", e.timed_out_job_id());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod async_job;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod params;
pub mod services;
pub mod transport;

pub use async_job::{AsyncJobResult, Backoff, JobStatus};
pub use client::{CloudStackClient, JobPayload};
pub use config::{ClientConfig, DEFAULT_ASYNC_TIMEOUT_SECS, TlsConfig};
pub use error::Error;
pub use params::{ParamValue, Params};
pub use services::{
    Account, DeployVirtualMachineParams, ListOption, Named, SuccessResponse, VirtualMachine,
    Zone,
};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpSend, ReqwestSender};

// Re-export signing types for convenience
pub use cloudstack_auth::{AuthError, Credentials};
