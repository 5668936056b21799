// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Virtual machine commands

use anyhow::Result;
use clap::{ArgGroup, Args, Subcommand};
use cloudstack_client::{CloudStackClient, DeployVirtualMachineParams, Params, VirtualMachine};

use crate::output;

#[derive(Subcommand, Clone)]
pub enum VmCommand {
    /// List virtual machines
    #[command(alias = "ls")]
    List(ListArgs),
    /// Deploy a virtual machine
    Deploy(DeployArgs),
    /// Destroy a virtual machine
    #[command(alias = "rm")]
    Destroy {
        /// Virtual machine id
        id: String,
        /// Expunge immediately instead of keeping it recoverable
        #[arg(long)]
        expunge: bool,
    },
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Filter by (partial) name
    #[arg(long)]
    pub name: Option<String>,
    /// Filter by state, e.g. Running
    #[arg(long)]
    pub state: Option<String>,
    /// Restrict to a zone
    #[arg(long)]
    pub zone_id: Option<String>,
}

#[derive(Args, Clone)]
#[command(group(ArgGroup::new("zone_choice").required(true).args(["zone_id", "zone"])))]
pub struct DeployArgs {
    /// Service offering id
    #[arg(long)]
    pub service_offering: String,
    /// Template id
    #[arg(long)]
    pub template: String,
    /// Zone id
    #[arg(long)]
    pub zone_id: Option<String>,
    /// Zone name (looked up)
    #[arg(long)]
    pub zone: Option<String>,
    /// Host name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub display_name: Option<String>,
    /// Base64-encoded user data
    #[arg(long)]
    pub user_data: Option<String>,
    /// Network id (repeatable)
    #[arg(long = "network")]
    pub networks: Vec<String>,
    /// Detail in KEY=VALUE format (repeatable)
    #[arg(long = "detail", value_name = "KEY=VALUE")]
    pub details: Vec<String>,
    /// SSH key pair name
    #[arg(long)]
    pub keypair: Option<String>,
    /// Create the VM without starting it
    #[arg(long)]
    pub no_start: bool,
}

impl VmCommand {
    pub async fn run(self, client: &CloudStackClient, use_json: bool) -> Result<()> {
        match self {
            Self::List(args) => list(args, client, use_json).await,
            Self::Deploy(args) => deploy(args, client, use_json).await,
            Self::Destroy { id, expunge } => {
                let vm = client
                    .virtual_machine()
                    .destroy_virtual_machine(&id, expunge)
                    .await?;
                report(&vm, use_json, "Destroy")
            }
        }
    }
}

async fn list(args: ListArgs, client: &CloudStackClient, use_json: bool) -> Result<()> {
    let mut params = Params::new();
    params
        .set_opt("name", args.name)
        .set_opt("state", args.state)
        .set_opt("zoneid", args.zone_id);
    let vms = client
        .virtual_machine()
        .list_virtual_machines(&params)
        .await?;

    output::print_list(
        &vms,
        use_json,
        &["ID", "NAME", "STATE", "ZONE", "IP"],
        |vm| {
            let ip = vm
                .nic
                .iter()
                .find(|n| n.isdefault.unwrap_or(false))
                .or_else(|| vm.nic.first())
                .and_then(|n| n.ipaddress.as_deref());
            vec![
                vm.id.clone(),
                output::or_dash(vm.name.as_deref()),
                output::or_dash(vm.state.as_deref()),
                output::or_dash(vm.zonename.as_deref()),
                output::or_dash(ip),
            ]
        },
    )
}

async fn deploy(args: DeployArgs, client: &CloudStackClient, use_json: bool) -> Result<()> {
    let zoneid = match (args.zone_id, args.zone) {
        (Some(id), _) => id,
        (None, Some(name)) => client.zone().get_zone_id(&name, &[]).await?,
        (None, None) => return Err(anyhow::anyhow!("--zone or --zone-id is required")),
    };

    let mut p = DeployVirtualMachineParams::new(args.service_offering, args.template, zoneid);
    p.name = args.name;
    p.displayname = args.display_name;
    p.userdata = args.user_data;
    p.keypair = args.keypair;
    p.networkids = args.networks;
    if args.no_start {
        p.startvm = Some(false);
    }
    for detail in &args.details {
        let (key, value) = detail
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid detail '{}': expected KEY=VALUE", detail))?;
        p = p.with_detail(key, value);
    }

    let vm = client.virtual_machine().deploy_virtual_machine(&p).await?;
    report(&vm, use_json, "Deploy")
}

/// Print the outcome of an async VM command
fn report(vm: &VirtualMachine, use_json: bool, action: &str) -> Result<()> {
    if use_json {
        return output::print_json(vm);
    }
    match (&vm.state, &vm.jobid) {
        (Some(state), _) => println!("{} {}: {}", action, vm.id, state),
        (None, Some(jobid)) => println!("{} started as job {}", action, jobid),
        (None, None) => println!("{} {}", action, vm.id),
    }
    Ok(())
}
