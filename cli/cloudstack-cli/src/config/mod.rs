// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod paths;
pub mod profile;

pub use profile::{Config, Profile};

use anyhow::Result;

/// Connection settings given on the command line (or through the
/// environment variables clap maps onto them)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub async_mode: bool,
    pub timeout: Option<u64>,
    pub get_only: bool,
    pub insecure: bool,
}

impl Overrides {
    /// Layer these settings over a stored profile
    pub fn apply(&self, mut profile: Profile) -> Profile {
        if let Some(url) = &self.url {
            profile.url = url.clone();
        }
        if let Some(api_key) = &self.api_key {
            profile.api_key = api_key.clone();
        }
        if let Some(secret_key) = &self.secret_key {
            profile.secret_key = secret_key.clone();
        }
        if self.timeout.is_some() {
            profile.timeout = self.timeout;
        }
        profile.async_mode |= self.async_mode;
        profile.get_only |= self.get_only;
        profile.insecure |= self.insecure;
        profile
    }

    /// An "env" profile when URL and both keys are given
    pub fn env_profile(&self) -> Option<Profile> {
        match (&self.url, &self.api_key, &self.secret_key) {
            (Some(url), Some(api_key), Some(secret_key)) => Some(self.apply(Profile::new(
                "env".to_string(),
                url.clone(),
                api_key.clone(),
                secret_key.clone(),
            ))),
            _ => None,
        }
    }
}

/// Resolve which profile to use
///
/// Priority:
/// 1. `--profile` (or CLOUDSTACK_PROFILE); the name "env" means overrides only
/// 2. "env" if URL, API key and secret key are all given
/// 3. Current profile from config.json
///
/// Overrides are layered on top of whichever profile is picked.
pub fn resolve_profile(name: Option<&str>, overrides: &Overrides) -> Result<Profile> {
    if let Some(name) = name {
        if name == "env" {
            return overrides.env_profile().ok_or_else(|| {
                anyhow::anyhow!(
                    "Profile 'env' needs CLOUDSTACK_URL, CLOUDSTACK_API_KEY and CLOUDSTACK_SECRET_KEY"
                )
            });
        }
        return Ok(overrides.apply(Profile::load(name)?));
    }

    if let Some(profile) = overrides.env_profile() {
        return Ok(profile);
    }

    let config = Config::load()?;
    if let Some(name) = config.current_profile() {
        return Ok(overrides.apply(Profile::load(name)?));
    }

    Err(anyhow::anyhow!(
        "No profile configured. Use 'cloudstack profile create' or set CLOUDSTACK_URL, CLOUDSTACK_API_KEY and CLOUDSTACK_SECRET_KEY"
    ))
}
