// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Accounts

use serde::{Deserialize, Deserializer, Serialize};

use super::{ListOption, Named, apply_options, pick_by_name};
use crate::client::{CloudStackClient, JobPayload};
use crate::error::Error;
use crate::params::Params;
use crate::transport::HttpSend;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub accounttype: Option<i64>,
    pub domain: Option<String>,
    pub domainid: Option<String>,
    pub roleid: Option<String>,
    pub rolename: Option<String>,
    pub roletype: Option<String>,
    pub state: Option<String>,
    pub isdefault: Option<bool>,
    pub vmtotal: Option<i64>,
    pub vmrunning: Option<i64>,
    pub vmstopped: Option<i64>,
}

impl Named for Account {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Result of commands that only report success
///
/// In sync mode only `jobid` is set; once the job finishes `success` and
/// `displaytext` are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuccessResponse {
    pub jobid: Option<String>,
    #[serde(deserialize_with = "bool_or_string")]
    pub success: bool,
    pub displaytext: Option<String>,
}

/// Some commands report `success` as `"true"`/`"false"`.
fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(t) => t
            .parse::<bool>()
            .map_err(|_| serde::de::Error::custom(format!("invalid success flag '{}'", t))),
    }
}

pub struct AccountService<'a, S> {
    client: &'a CloudStackClient<S>,
}

impl<'a, S: HttpSend> AccountService<'a, S> {
    pub(crate) fn new(client: &'a CloudStackClient<S>) -> Self {
        Self { client }
    }

    /// `listAccounts`, every page
    pub async fn list_accounts(&self, params: &Params) -> Result<Vec<Account>, Error> {
        self.client
            .list_all("listAccounts", params, "account")
            .await
    }

    /// Find the account called `name`
    pub async fn get_account_by_name(
        &self,
        name: &str,
        options: &[ListOption],
    ) -> Result<Account, Error> {
        let mut params = Params::new().with("name", name).with("listall", true);
        apply_options(&mut params, options);

        let candidates = self.list_accounts(&params).await?;
        pick_by_name("account", name, candidates)
    }

    /// Id of the account called `name`
    pub async fn get_account_id(
        &self,
        name: &str,
        options: &[ListOption],
    ) -> Result<String, Error> {
        self.get_account_by_name(name, options)
            .await
            .map(|account| account.id)
    }

    /// `deleteAccount` (async)
    pub async fn delete_account(&self, id: &str) -> Result<SuccessResponse, Error> {
        let params = Params::new().with("id", id);
        self.client
            .request_async("deleteAccount", &params, JobPayload::Bare)
            .await
    }
}
