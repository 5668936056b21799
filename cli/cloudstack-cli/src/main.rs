// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CloudStack CLI - command-line interface for CloudStack control-plane APIs

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudstack_client::CloudStackClient;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{AccountCommand, ApiArgs, JobCommand, ProfileCommand, VmCommand, ZoneCommand};
use config::{Overrides, resolve_profile};

/// Log targets enabled by --verbose
const VERBOSE_FILTER: &str =
    "cloudstack=debug,cloudstack_client=debug,cloudstack_pagination=debug,cloudstack_auth=debug";

#[derive(Parser)]
#[command(
    name = "cloudstack",
    version,
    about = "CloudStack cloud management CLI",
    long_about = "Command-line interface for CloudStack-style control-plane APIs"
)]
struct Cli {
    /// Profile to use
    #[arg(short, long, global = true, env = "CLOUDSTACK_PROFILE")]
    profile: Option<String>,

    /// API endpoint URL override
    #[arg(short = 'U', long, global = true, env = "CLOUDSTACK_URL")]
    url: Option<String>,

    /// API key override
    #[arg(long, global = true, env = "CLOUDSTACK_API_KEY")]
    api_key: Option<String>,

    /// Secret key override
    #[arg(long, global = true, env = "CLOUDSTACK_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Wait for async jobs to finish
    #[arg(long = "async", global = true)]
    async_mode: bool,

    /// Async job timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Send every command as HTTP GET
    #[arg(long, global = true)]
    get_only: bool,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Invoke any API command
    Api(ApiArgs),

    /// Manage accounts
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },

    /// Manage zones
    Zone {
        #[command(subcommand)]
        command: ZoneCommand,
    },

    /// Manage virtual machines
    #[command(alias = "vms")]
    Vm {
        #[command(subcommand)]
        command: VmCommand,
    },

    /// Inspect async jobs
    Job {
        #[command(subcommand)]
        command: JobCommand,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            secret_key: self.secret_key.clone(),
            async_mode: self.async_mode,
            timeout: self.timeout,
            get_only: self.get_only,
            insecure: self.insecure,
        }
    }

    /// Build a client from the resolved profile and CLI overrides
    fn build_client(&self) -> Result<CloudStackClient> {
        let profile = resolve_profile(self.profile.as_deref(), &self.overrides())?;
        tracing::debug!(profile = %profile.name, url = %profile.url, "using profile");
        Ok(CloudStackClient::new(profile.to_client_config())?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(VERBOSE_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Profile { command } => command.clone().run(&cli.overrides(), cli.json),
        Commands::Api(args) => {
            let client = cli.build_client()?;
            commands::api::run(args.clone(), &client).await
        }
        Commands::Account { command } => {
            let client = cli.build_client()?;
            command.clone().run(&client, cli.json).await
        }
        Commands::Zone { command } => {
            let client = cli.build_client()?;
            command.clone().run(&client, cli.json).await
        }
        Commands::Vm { command } => {
            let client = cli.build_client()?;
            command.clone().run(&client, cli.json).await
        }
        Commands::Job { command } => {
            let client = cli.build_client()?;
            command.clone().run(&client).await
        }
    }
}
