// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Signed request dispatch
//!
//! Builds the signed GET or POST for one command and performs exactly one
//! HTTP round trip. The HTTP layer sits behind [`HttpSend`] so the rest of
//! the engine (envelopes, job polling, paging) can run against a scripted
//! sender in tests.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

use cloudstack_auth::{Credentials, SIGNATURE_PARAM, canonical_query, encode_value};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::params::Params;

/// Commands whose payload (user data) can overflow GET URL limits
pub const POST_COMMANDS: &[&str] = &["deployVirtualMachine", "login", "updateVirtualMachine"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully signed request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// `application/x-www-form-urlencoded` body for POST
    pub body: Option<String>,
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// One HTTP round trip
pub trait HttpSend: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, reqwest::Error>> + Send;
}

/// [`HttpSend`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    /// Wrap an already configured `reqwest::Client`
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a `reqwest::Client` from the TLS and timeout settings
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        // Only one provider is compiled in; a second install is a no-op error.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(!config.tls.verify);

        if let Some(path) = &config.tls.ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                Error::Config(format!(
                    "Failed to read CA certificate {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem)?;
            builder = builder.add_root_certificate(cert);
        }

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?))
    }
}

impl HttpSend for ReqwestSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.as_str()),
            HttpMethod::Post => self
                .client
                .post(request.url.as_str())
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(request.body.unwrap_or_default()),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Whether `command` goes out as a form POST
pub fn uses_post(command: &str, http_get_only: bool) -> bool {
    !http_get_only && POST_COMMANDS.contains(&command)
}

/// Build the signed request for one command
///
/// Injects `apiKey`, `command` and `response=json`, signs the full set and
/// places the signature in the query string (GET) or the form body (POST).
pub fn build_request(
    base_url: &str,
    credentials: &Credentials,
    command: &str,
    params: &Params,
    http_get_only: bool,
) -> Result<HttpRequest, Error> {
    let mut values: BTreeMap<String, String> = params.to_values();
    values.insert("apiKey".to_string(), credentials.api_key().to_string());
    values.insert("command".to_string(), command.to_string());
    values.insert("response".to_string(), "json".to_string());

    let signature = credentials.sign(&values)?;

    let request = if uses_post(command, http_get_only) {
        values.insert(SIGNATURE_PARAM.to_string(), signature);
        HttpRequest {
            method: HttpMethod::Post,
            url: base_url.to_string(),
            body: Some(canonical_query(&values)),
        }
    } else {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}?{}&{}={}",
                base_url,
                canonical_query(&values),
                SIGNATURE_PARAM,
                encode_value(&signature)
            ),
            body: None,
        }
    };
    Ok(request)
}

/// Structured error body of a non-200 response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errorcode: Option<i64>,
    #[serde(default)]
    cserrorcode: Option<i64>,
    #[serde(default)]
    errortext: Option<String>,
}

/// Turn a non-200 response into [`Error::Api`]
///
/// Accepts the error object bare or inside its single-key envelope. When
/// the body is not a recognizable error object, the HTTP status stands in
/// for the error code and the raw body for the text.
pub fn decode_api_error(status: u16, body: &[u8]) -> Error {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let candidate = match parsed {
        Some(Value::Object(map)) if map.contains_key("errorcode") => Some(Value::Object(map)),
        Some(Value::Object(map)) if map.len() == 1 => map.into_iter().next().map(|(_, v)| v),
        _ => None,
    };

    let decoded = candidate.and_then(|v| serde_json::from_value::<ErrorBody>(v).ok());

    match decoded {
        Some(ErrorBody {
            errorcode,
            cserrorcode,
            errortext: Some(errortext),
        }) => Error::Api {
            errorcode: errorcode.unwrap_or(i64::from(status)),
            cserrorcode: cserrorcode.unwrap_or(0),
            errortext,
        },
        _ => Error::Api {
            errorcode: i64::from(status),
            cserrorcode: 0,
            errortext: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

/// Sign, send and status-check one command
///
/// Returns the raw (still enveloped) response body.
pub async fn send<S: HttpSend>(
    sender: &S,
    config: &ClientConfig,
    command: &str,
    params: &Params,
) -> Result<Vec<u8>, Error> {
    let request = build_request(
        &config.base_url,
        &config.credentials,
        command,
        params,
        config.http_get_only,
    )?;

    tracing::debug!(command, method = ?request.method, "sending API request");

    let response = sender.send(request).await?;

    tracing::debug!(
        command,
        status = response.status,
        bytes = response.body.len(),
        "received API response"
    );

    if response.status != 200 {
        return Err(decode_api_error(response.status, &response.body));
    }

    Ok(response.body)
}
