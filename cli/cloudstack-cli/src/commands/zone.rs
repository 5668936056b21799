// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Zone commands

use anyhow::Result;
use clap::Subcommand;
use cloudstack_client::{CloudStackClient, Params};

use crate::output;

#[derive(Subcommand, Clone)]
pub enum ZoneCommand {
    /// List zones
    #[command(alias = "ls")]
    List {
        /// Filter by (partial) name
        #[arg(long)]
        name: Option<String>,
        /// Only zones that are enabled
        #[arg(long)]
        available: bool,
    },
}

impl ZoneCommand {
    pub async fn run(self, client: &CloudStackClient, use_json: bool) -> Result<()> {
        match self {
            Self::List { name, available } => {
                let mut params = Params::new();
                params.set_opt("name", name);
                if available {
                    params.set("available", true);
                }
                let zones = client.zone().list_zones(&params).await?;
                output::print_list(
                    &zones,
                    use_json,
                    &["ID", "NAME", "NETWORK", "ALLOCATION"],
                    |z| {
                        vec![
                            z.id.clone(),
                            z.name.clone(),
                            output::or_dash(z.networktype.as_deref()),
                            output::or_dash(z.allocationstate.as_deref()),
                        ]
                    },
                )
            }
        }
    }
}
