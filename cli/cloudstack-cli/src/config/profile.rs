// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management types

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cloudstack_client::{ClientConfig, Credentials, DEFAULT_ASYNC_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

/// A connection profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name
    pub name: String,

    /// API endpoint URL
    pub url: String,

    #[serde(rename = "apiKey")]
    pub api_key: String,

    #[serde(rename = "secretKey")]
    pub secret_key: String,

    /// Wait for async jobs to finish
    #[serde(rename = "async", default)]
    pub async_mode: bool,

    /// Async job poll budget in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Never use POST
    #[serde(rename = "getOnly", default)]
    pub get_only: bool,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// Extra CA bundle to trust
    #[serde(rename = "caCert", skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Profile {
    /// Create a new profile
    pub fn new(name: String, url: String, api_key: String, secret_key: String) -> Self {
        Self {
            name,
            url,
            api_key,
            secret_key,
            async_mode: false,
            timeout: None,
            get_only: false,
            insecure: false,
            ca_cert: None,
        }
    }

    /// Load a profile from a file
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let path = super::paths::profile_path(name);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile '{}'", name))?;
        let profile: Profile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile '{}'", name))?;
        Ok(profile)
    }

    /// Save the profile to a file
    pub fn save(&self) -> anyhow::Result<()> {
        super::paths::ensure_config_dirs()?;
        let path = super::paths::profile_path(&self.name);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Delete the profile file
    pub fn delete(name: &str) -> anyhow::Result<()> {
        let path = super::paths::profile_path(name);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete profile '{}'", name))?;
        Ok(())
    }

    /// List all available profiles
    pub fn list_all() -> anyhow::Result<Vec<String>> {
        let profiles_dir = super::paths::profiles_dir();
        if !profiles_dir.exists() {
            return Ok(vec![]);
        }

        let mut profiles = vec![];
        for entry in std::fs::read_dir(&profiles_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem()
            {
                profiles.push(stem.to_string_lossy().to_string());
            }
        }
        profiles.sort();
        Ok(profiles)
    }

    /// Client configuration for this profile
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(
            self.url.clone(),
            Credentials::new(self.api_key.clone(), self.secret_key.clone()),
        )
        .with_async(self.async_mode)
        .with_async_timeout(Duration::from_secs(
            self.timeout.unwrap_or(DEFAULT_ASYNC_TIMEOUT_SECS),
        ))
        .with_http_get_only(self.get_only)
        .with_verify_ssl(!self.insecure);

        if let Some(ca_cert) = &self.ca_cert {
            config = config.with_ca_cert(ca_cert);
        }
        config
    }
}

/// Main configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Current active profile name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Previous profile (for `profile set-current -`)
    #[serde(rename = "oldProfile", skip_serializing_if = "Option::is_none")]
    pub old_profile: Option<String>,
}

impl Config {
    /// Load the main config file
    pub fn load() -> anyhow::Result<Self> {
        let path = super::paths::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save the main config file
    pub fn save(&self) -> anyhow::Result<()> {
        super::paths::ensure_config_dirs()?;
        let path = super::paths::config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn current_profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Set the current profile, remembering the previous one
    pub fn set_current_profile(&mut self, name: &str) {
        self.old_profile = self.profile.take();
        self.profile = Some(name.to_string());
    }

    /// Forget a deleted profile
    pub fn forget_profile(&mut self, name: &str) {
        if self.profile.as_deref() == Some(name) {
            self.profile = None;
        }
        if self.old_profile.as_deref() == Some(name) {
            self.old_profile = None;
        }
    }
}
