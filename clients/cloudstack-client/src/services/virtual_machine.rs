// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Virtual machines

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{CloudStackClient, JobPayload};
use crate::error::Error;
use crate::params::Params;
use crate::transport::HttpSend;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Nic {
    pub id: String,
    pub networkid: Option<String>,
    pub networkname: Option<String>,
    pub ipaddress: Option<String>,
    pub macaddress: Option<String>,
    pub isdefault: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tag {
    pub key: String,
    pub value: String,
    pub resourcetype: Option<String>,
}

/// A virtual machine as returned by list, deploy and destroy
///
/// `jobid` is only present on responses of async commands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VirtualMachine {
    pub id: String,
    pub name: Option<String>,
    pub displayname: Option<String>,
    pub state: Option<String>,
    pub account: Option<String>,
    pub domainid: Option<String>,
    pub zoneid: Option<String>,
    pub zonename: Option<String>,
    pub templateid: Option<String>,
    pub templatename: Option<String>,
    pub serviceofferingid: Option<String>,
    pub serviceofferingname: Option<String>,
    pub created: Option<String>,
    pub password: Option<String>,
    pub nic: Vec<Nic>,
    pub tags: Vec<Tag>,
    pub jobid: Option<String>,
}

/// Parameters of `deployVirtualMachine`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployVirtualMachineParams {
    pub serviceofferingid: String,
    pub templateid: String,
    pub zoneid: String,
    pub name: Option<String>,
    pub displayname: Option<String>,
    /// Base64-encoded user data
    pub userdata: Option<String>,
    pub networkids: Vec<String>,
    /// Free-form `details` map
    pub details: BTreeMap<String, String>,
    pub keypair: Option<String>,
    pub startvm: Option<bool>,
}

impl DeployVirtualMachineParams {
    pub fn new(
        serviceofferingid: impl Into<String>,
        templateid: impl Into<String>,
        zoneid: impl Into<String>,
    ) -> Self {
        Self {
            serviceofferingid: serviceofferingid.into(),
            templateid: templateid.into(),
            zoneid: zoneid.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_displayname(mut self, displayname: impl Into<String>) -> Self {
        self.displayname = Some(displayname.into());
        self
    }

    pub fn with_userdata(mut self, userdata: impl Into<String>) -> Self {
        self.userdata = Some(userdata.into());
        self
    }

    pub fn with_network(mut self, networkid: impl Into<String>) -> Self {
        self.networkids.push(networkid.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_keypair(mut self, keypair: impl Into<String>) -> Self {
        self.keypair = Some(keypair.into());
        self
    }

    pub fn with_startvm(mut self, startvm: bool) -> Self {
        self.startvm = Some(startvm);
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("serviceofferingid", &self.serviceofferingid)
            .with("templateid", &self.templateid)
            .with("zoneid", &self.zoneid)
            .with("networkids", self.networkids.clone())
            .with("details", self.details.clone());
        params
            .set_opt("name", self.name.as_ref())
            .set_opt("displayname", self.displayname.as_ref())
            .set_opt("userdata", self.userdata.as_ref())
            .set_opt("keypair", self.keypair.as_ref())
            .set_opt("startvm", self.startvm);
        params
    }
}

pub struct VirtualMachineService<'a, S> {
    client: &'a CloudStackClient<S>,
}

impl<'a, S: HttpSend> VirtualMachineService<'a, S> {
    pub(crate) fn new(client: &'a CloudStackClient<S>) -> Self {
        Self { client }
    }

    /// `listVirtualMachines`, every page
    pub async fn list_virtual_machines(
        &self,
        params: &Params,
    ) -> Result<Vec<VirtualMachine>, Error> {
        self.client
            .list_all("listVirtualMachines", params, "virtualmachine")
            .await
    }

    /// `deployVirtualMachine` (async, sent as POST)
    pub async fn deploy_virtual_machine(
        &self,
        p: &DeployVirtualMachineParams,
    ) -> Result<VirtualMachine, Error> {
        self.client
            .request_async("deployVirtualMachine", &p.to_params(), JobPayload::Wrapped)
            .await
    }

    /// `destroyVirtualMachine` (async)
    pub async fn destroy_virtual_machine(
        &self,
        id: &str,
        expunge: bool,
    ) -> Result<VirtualMachine, Error> {
        let mut params = Params::new().with("id", id);
        if expunge {
            params.set("expunge", true);
        }
        self.client
            .request_async("destroyVirtualMachine", &params, JobPayload::Wrapped)
            .await
    }
}
