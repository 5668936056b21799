// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

#![allow(dead_code, clippy::unwrap_used)]

//! Shared test infrastructure: a scripted in-process HTTP sender.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cloudstack_client::{
    ClientConfig, CloudStackClient, Credentials, HttpRequest, HttpResponse, HttpSend,
};
use serde_json::Value;
use tokio::time::Instant;

pub const BASE_URL: &str = "https://cloud.example.com/client/api";

#[derive(Default)]
struct Script {
    responses: VecDeque<HttpResponse>,
    fallback: Option<HttpResponse>,
    requests: Vec<(HttpRequest, Instant)>,
}

/// Answers requests from a fixed queue and records when each one arrived
#[derive(Clone, Default)]
pub struct ScriptedSender {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body
    pub fn respond(&self, body: Value) -> &Self {
        self.respond_with(200, body.to_string())
    }

    pub fn respond_with(&self, status: u16, body: impl Into<String>) -> &Self {
        self.script.lock().unwrap().responses.push_back(HttpResponse {
            status,
            body: body.into().into_bytes(),
        });
        self
    }

    /// Response used once the queue runs dry
    pub fn always(&self, body: Value) -> &Self {
        self.script.lock().unwrap().fallback = Some(HttpResponse {
            status: 200,
            body: body.to_string().into_bytes(),
        });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        let script = self.script.lock().unwrap();
        script.requests.iter().map(|(r, _)| r.clone()).collect()
    }

    /// Arrival times of requests whose URL contains `needle`
    pub fn times_of(&self, needle: &str) -> Vec<Instant> {
        let script = self.script.lock().unwrap();
        script
            .requests
            .iter()
            .filter(|(r, _)| r.url.contains(needle))
            .map(|(_, at)| *at)
            .collect()
    }
}

impl HttpSend for ScriptedSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut script = self.script.lock().unwrap();
        script.requests.push((request.clone(), Instant::now()));
        let response = match script.responses.pop_front() {
            Some(response) => response,
            None => script
                .fallback
                .clone()
                .unwrap_or_else(|| panic!("unexpected request: {}", request.url)),
        };
        Ok(response)
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::new(BASE_URL, Credentials::new("key", "secret"))
}

pub fn client(config: ClientConfig, sender: &ScriptedSender) -> CloudStackClient<ScriptedSender> {
    CloudStackClient::with_sender(config, sender.clone()).unwrap()
}

/// Gaps between consecutive instants
pub fn gaps(times: &[Instant]) -> Vec<std::time::Duration> {
    times.windows(2).map(|w| w[1] - w[0]).collect()
}
