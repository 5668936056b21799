// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Raw API invocation
//!
//! `cloudstack api <command> [KEY=VALUE ...]` signs and sends any command
//! and prints the unwrapped payload as JSON.
//!
//! Parameter syntax:
//! - `name=value` sets a scalar
//! - repeating `name=a name=b` builds the list `a,b`
//! - `name[key]=value` adds an entry to the map parameter `name`

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use cloudstack_client::{CloudStackClient, ParamValue, Params};
use serde_json::Value;

use crate::output;

#[derive(Args, Clone)]
pub struct ApiArgs {
    /// API command name, e.g. listVirtualMachines
    pub command: String,

    /// Parameters in KEY=VALUE format
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Wait for the job if the response carries a job id
    #[arg(short, long)]
    pub wait: bool,
}

pub async fn run(args: ApiArgs, client: &CloudStackClient) -> Result<()> {
    let params = parse_params(&args.params)?;
    let response = client
        .request(&args.command, &params)
        .await
        .with_context(|| format!("{} failed", args.command))?;

    let jobid = response.get("jobid").and_then(Value::as_str);
    match (args.wait || client.is_async(), jobid) {
        (true, Some(jobid)) => {
            match client
                .get_async_job_result(jobid, client.config().async_timeout)
                .await
            {
                Ok(result) => output::print_json(&result),
                Err(err) if err.is_async_timeout() => {
                    // The job may still finish; keep its handle visible.
                    output::print_json(&response)?;
                    Err(err.into())
                }
                Err(err) => Err(err.into()),
            }
        }
        _ => output::print_json(&response),
    }
}

enum Collected {
    Scalars(Vec<String>),
    Map(BTreeMap<String, String>),
}

/// Build request parameters from `KEY=VALUE` arguments
pub fn parse_params(args: &[String]) -> Result<Params> {
    let mut collected: BTreeMap<String, Collected> = BTreeMap::new();

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid parameter '{}': expected KEY=VALUE", arg))?;

        match split_map_key(key)? {
            Some((name, entry)) => {
                let slot = collected
                    .entry(name.to_string())
                    .or_insert_with(|| Collected::Map(BTreeMap::new()));
                match slot {
                    Collected::Map(map) => {
                        map.insert(entry.to_string(), value.to_string());
                    }
                    Collected::Scalars(_) => {
                        return Err(anyhow::anyhow!(
                            "Parameter '{}' is used both as a map and a value",
                            name
                        ));
                    }
                }
            }
            None => {
                if key.is_empty() {
                    return Err(anyhow::anyhow!("Invalid parameter '{}': empty key", arg));
                }
                let slot = collected
                    .entry(key.to_string())
                    .or_insert_with(|| Collected::Scalars(Vec::new()));
                match slot {
                    Collected::Scalars(values) => values.push(value.to_string()),
                    Collected::Map(_) => {
                        return Err(anyhow::anyhow!(
                            "Parameter '{}' is used both as a map and a value",
                            key
                        ));
                    }
                }
            }
        }
    }

    let mut params = Params::new();
    for (name, value) in collected {
        let value = match value {
            Collected::Scalars(mut values) if values.len() == 1 => {
                ParamValue::Scalar(values.remove(0))
            }
            Collected::Scalars(values) => ParamValue::List(values),
            Collected::Map(map) => ParamValue::Map(map),
        };
        params.set(name, value);
    }
    Ok(params)
}

/// Split `name[entry]` into its parts; `None` for a plain key
fn split_map_key(key: &str) -> Result<Option<(&str, &str)>> {
    let Some((name, rest)) = key.split_once('[') else {
        return Ok(None);
    };
    match rest.strip_suffix(']') {
        Some(entry) if !name.is_empty() && !entry.is_empty() => Ok(Some((name, entry))),
        _ => Err(anyhow::anyhow!("Invalid map parameter '{}'", key)),
    }
}
