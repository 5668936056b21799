// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Account commands

use anyhow::Result;
use clap::Subcommand;
use cloudstack_client::{Account, CloudStackClient, ListOption, Params};

use crate::output;

#[derive(Subcommand, Clone)]
pub enum AccountCommand {
    /// List accounts
    #[command(alias = "ls")]
    List {
        /// Filter by (partial) name
        #[arg(long)]
        name: Option<String>,
        /// Restrict to a domain
        #[arg(long)]
        domain_id: Option<String>,
    },
    /// Show one account by exact name
    Get {
        /// Account name
        name: String,
        /// Restrict the lookup to a domain
        #[arg(long)]
        domain_id: Option<String>,
    },
}

impl AccountCommand {
    pub async fn run(self, client: &CloudStackClient, use_json: bool) -> Result<()> {
        match self {
            Self::List { name, domain_id } => {
                let mut params = Params::new().with("listall", true);
                params.set_opt("name", name).set_opt("domainid", domain_id);
                let accounts = client.account().list_accounts(&params).await?;
                print_accounts(&accounts, use_json)
            }
            Self::Get { name, domain_id } => {
                let options: Vec<ListOption> =
                    domain_id.into_iter().map(ListOption::Domain).collect();
                let account = client
                    .account()
                    .get_account_by_name(&name, &options)
                    .await?;
                if use_json {
                    output::print_json(&account)
                } else {
                    println!("ID:       {}", account.id);
                    println!("Name:     {}", account.name);
                    println!("Domain:   {}", output::or_dash(account.domain.as_deref()));
                    println!("Role:     {}", output::or_dash(account.rolename.as_deref()));
                    println!("State:    {}", output::or_dash(account.state.as_deref()));
                    Ok(())
                }
            }
        }
    }
}

fn print_accounts(accounts: &[Account], use_json: bool) -> Result<()> {
    output::print_list(
        accounts,
        use_json,
        &["ID", "NAME", "DOMAIN", "ROLE", "STATE"],
        |a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                output::or_dash(a.domain.as_deref()),
                output::or_dash(a.rolename.as_deref()),
                output::or_dash(a.state.as_deref()),
            ]
        },
    )
}
