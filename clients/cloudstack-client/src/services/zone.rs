// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Zones

use serde::{Deserialize, Serialize};

use super::{ListOption, Named, apply_options, pick_by_name};
use crate::client::CloudStackClient;
use crate::error::Error;
use crate::params::Params;
use crate::transport::HttpSend;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub allocationstate: Option<String>,
    pub networktype: Option<String>,
    pub localstorageenabled: Option<bool>,
    pub securitygroupsenabled: Option<bool>,
    pub dns1: Option<String>,
    pub dns2: Option<String>,
    pub internaldns1: Option<String>,
    pub domainid: Option<String>,
}

impl Named for Zone {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

pub struct ZoneService<'a, S> {
    client: &'a CloudStackClient<S>,
}

impl<'a, S: HttpSend> ZoneService<'a, S> {
    pub(crate) fn new(client: &'a CloudStackClient<S>) -> Self {
        Self { client }
    }

    /// `listZones`, every page
    pub async fn list_zones(&self, params: &Params) -> Result<Vec<Zone>, Error> {
        self.client.list_all("listZones", params, "zone").await
    }

    pub async fn get_zone_by_name(
        &self,
        name: &str,
        options: &[ListOption],
    ) -> Result<Zone, Error> {
        let mut params = Params::new().with("name", name);
        apply_options(&mut params, options);

        let candidates = self.list_zones(&params).await?;
        pick_by_name("zone", name, candidates)
    }

    /// Id of the zone called `name`
    pub async fn get_zone_id(&self, name: &str, options: &[ListOption]) -> Result<String, Error> {
        self.get_zone_by_name(name, options).await.map(|zone| zone.id)
    }
}
