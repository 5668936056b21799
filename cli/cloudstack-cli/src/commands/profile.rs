// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management commands
//!
//! Connection settings for `create` come from the global flags
//! (`--url`, `--api-key`, `--secret-key`, `--async`, ...).

use anyhow::Result;
use clap::Subcommand;

use crate::config::{Config, Overrides, Profile, resolve_profile};
use crate::output;

#[derive(Subcommand, Clone)]
pub enum ProfileCommand {
    /// List all profiles
    #[command(alias = "ls")]
    List,

    /// Show a profile (defaults to the current one)
    Get {
        /// Profile name
        name: Option<String>,
    },

    /// Create a profile from --url, --api-key and --secret-key
    Create {
        /// Profile name
        name: String,
        /// Make it the current profile
        #[arg(long)]
        current: bool,
    },

    /// Delete profiles
    #[command(alias = "rm")]
    Delete {
        /// Profile name(s)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Set the current profile
    SetCurrent {
        /// Profile name (use '-' for previous)
        name: String,
    },
}

impl ProfileCommand {
    pub fn run(self, overrides: &Overrides, use_json: bool) -> Result<()> {
        match self {
            Self::List => list_profiles(use_json),
            Self::Get { name } => get_profile(name.as_deref(), overrides, use_json),
            Self::Create { name, current } => create_profile(name, overrides, current),
            Self::Delete { names } => delete_profiles(&names),
            Self::SetCurrent { name } => set_current_profile(&name),
        }
    }
}

fn list_profiles(use_json: bool) -> Result<()> {
    let current = Config::load()?.profile;
    let profiles: Vec<Profile> = Profile::list_all()?
        .iter()
        .filter_map(|name| Profile::load(name).ok())
        .collect();

    output::print_list(&profiles, use_json, &["NAME", "CURR", "URL", "ASYNC"], |p| {
        let marker = if current.as_deref() == Some(p.name.as_str()) {
            "*"
        } else {
            ""
        };
        vec![
            p.name.clone(),
            marker.to_string(),
            p.url.clone(),
            p.async_mode.to_string(),
        ]
    })
}

fn get_profile(name: Option<&str>, overrides: &Overrides, use_json: bool) -> Result<()> {
    let profile = match name {
        Some("env") => resolve_profile(Some("env"), overrides)?,
        Some(n) => Profile::load(n)?,
        None => {
            let config = Config::load()?;
            let current = config
                .current_profile()
                .ok_or_else(|| anyhow::anyhow!("No current profile set"))?;
            Profile::load(current)?
        }
    };

    if use_json {
        output::print_json(&profile)?;
    } else {
        println!("Name:      {}", profile.name);
        println!("URL:       {}", profile.url);
        println!("API key:   {}", profile.api_key);
        println!("Async:     {}", profile.async_mode);
        if let Some(timeout) = profile.timeout {
            println!("Timeout:   {}s", timeout);
        }
        println!("GET only:  {}", profile.get_only);
        println!("Insecure:  {}", profile.insecure);
    }
    Ok(())
}

fn create_profile(name: String, overrides: &Overrides, current: bool) -> Result<()> {
    if name == "env" {
        return Err(anyhow::anyhow!("'env' is reserved for environment settings"));
    }
    if Profile::list_all()?.contains(&name) {
        return Err(anyhow::anyhow!("Profile '{}' already exists", name));
    }

    let missing = |flag: &str| anyhow::anyhow!("{} is required to create a profile", flag);
    let url = overrides.url.clone().ok_or_else(|| missing("--url"))?;
    let api_key = overrides.api_key.clone().ok_or_else(|| missing("--api-key"))?;
    let secret_key = overrides
        .secret_key
        .clone()
        .ok_or_else(|| missing("--secret-key"))?;

    let profile = overrides.apply(Profile::new(name.clone(), url, api_key, secret_key));
    profile.to_client_config().validate()?;
    profile.save()?;
    println!("Created profile '{}'", name);

    let mut config = Config::load()?;
    if current || config.current_profile().is_none() {
        config.set_current_profile(&name);
        config.save()?;
        println!("Set '{}' as current profile", name);
    }
    Ok(())
}

fn delete_profiles(names: &[String]) -> Result<()> {
    let mut config = Config::load()?;
    for name in names {
        Profile::delete(name)?;
        config.forget_profile(name);
        println!("Deleted profile '{}'", name);
    }
    config.save()
}

fn set_current_profile(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    let name = if name == "-" {
        config
            .old_profile
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No previous profile"))?
    } else {
        Profile::load(name)?;
        name.to_string()
    };

    config.set_current_profile(&name);
    config.save()?;
    println!("Current profile: {}", name);
    Ok(())
}
