// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! List draining through the client facade.

use cloudstack_client::{ClientConfig, CloudStackClient, Credentials, Error, Params};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudStackClient {
    let config = ClientConfig::new(
        format!("{}/client/api", server.uri()),
        Credentials::new("key", "secret"),
    );
    CloudStackClient::new(config).unwrap()
}

fn vms(ids: std::ops::Range<u32>, count: u32) -> ResponseTemplate {
    let items: Vec<Value> = ids.map(|i| json!({"id": format!("vm-{i}")})).collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "listvirtualmachinesresponse": {"count": count, "virtualmachine": items}
    }))
}

async fn ids(client: &CloudStackClient, params: &Params) -> Result<Vec<String>, Error> {
    let items: Vec<Value> = client
        .list_all("listVirtualMachines", params, "virtualmachine")
        .await?;
    Ok(items
        .into_iter()
        .map(|v| v["id"].as_str().unwrap_or_default().to_string())
        .collect())
}

#[tokio::test]
async fn test_collects_all_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param_is_missing("page"))
        .respond_with(vms(0..3, 7))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .and(query_param("pagesize", "3"))
        .respond_with(vms(3..6, 7))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .and(query_param("pagesize", "3"))
        .respond_with(vms(6..7, 7))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ids = ids(&client, &Params::new().with("state", "Running"))
        .await
        .unwrap();

    let expected: Vec<String> = (0..7).map(|i| format!("vm-{i}")).collect();
    assert_eq!(ids, expected);

    // Filters are kept on every page
    for request in server.received_requests().await.unwrap() {
        let query = request.url.query().unwrap_or_default().to_string();
        assert!(query.contains("state=Running"), "{query}");
    }
}

#[tokio::test]
async fn test_single_page_listing_stops_early() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param_is_missing("page"))
        .respond_with(vms(0..2, 2))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(vms(0..0, 2))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ids = ids(&client, &Params::new()).await.unwrap();

    assert_eq!(ids, vec!["vm-0".to_string(), "vm-1".to_string()]);
}

#[tokio::test]
async fn test_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"listvirtualmachinesresponse": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(ids(&client, &Params::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_mid_listing_discards_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param_is_missing("page"))
        .respond_with(vms(0..2, 5))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(530).set_body_json(json!({
            "listvirtualmachinesresponse": {
                "errorcode": 530,
                "cserrorcode": 9999,
                "errortext": "internal error"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = ids(&client, &Params::new()).await.unwrap_err();

    assert!(matches!(err, Error::Api { errorcode: 530, .. }));
}
