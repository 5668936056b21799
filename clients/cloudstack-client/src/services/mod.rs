// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Typed endpoints
//!
//! Thin wrappers over [`CloudStackClient`] for a handful of commands. Each
//! service borrows the client; get one through the accessor methods:
//!
//! ```ignore
//! let zones = client.zone().list_zones(&Params::new()).await?;
//! let id = client.account().get_account_id("admin", &[]).await?;
//! ```
//!
//! Anything not covered here is reachable through
//! [`CloudStackClient::request`] and friends.

pub mod account;
pub mod virtual_machine;
pub mod zone;

use crate::client::CloudStackClient;
use crate::error::Error;
use crate::params::Params;
use crate::transport::HttpSend;

pub use account::{Account, AccountService, SuccessResponse};
pub use virtual_machine::{
    DeployVirtualMachineParams, Nic, Tag, VirtualMachine, VirtualMachineService,
};
pub use zone::{Zone, ZoneService};

/// Scope narrowing for the courtesy lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOption {
    /// Search within a project (`projectid`)
    Project(String),
    /// Search within a domain (`domainid`)
    Domain(String),
    /// Search within a zone (`zoneid`)
    Zone(String),
}

impl ListOption {
    pub fn apply(&self, params: &mut Params) {
        match self {
            Self::Project(id) => params.set("projectid", id),
            Self::Domain(id) => params.set("domainid", id),
            Self::Zone(id) => params.set("zoneid", id),
        };
    }
}

pub(crate) fn apply_options(params: &mut Params, options: &[ListOption]) {
    for option in options {
        option.apply(params);
    }
}

/// Resources that can be looked up by name
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Pick the single resource called `name` from a filtered listing
///
/// The server's `name` filter is a substring match, so several candidates
/// are narrowed down to the exact match.
pub(crate) fn pick_by_name<T: Named>(
    kind: &'static str,
    name: &str,
    mut candidates: Vec<T>,
) -> Result<T, Error> {
    match candidates.len() {
        0 => Err(Error::NotFound {
            kind,
            name: name.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        count => candidates
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or(Error::Ambiguous {
                kind,
                name: name.to_string(),
                count,
            }),
    }
}

impl<S: HttpSend> CloudStackClient<S> {
    pub fn account(&self) -> AccountService<'_, S> {
        AccountService::new(self)
    }

    pub fn zone(&self) -> ZoneService<'_, S> {
        ZoneService::new(self)
    }

    pub fn virtual_machine(&self) -> VirtualMachineService<'_, S> {
        VirtualMachineService::new(self)
    }
}
