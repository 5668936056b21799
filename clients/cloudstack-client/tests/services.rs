// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Typed endpoint helpers against a scripted sender.

mod common;

use cloudstack_client::{Error, HttpMethod, ListOption, Params};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{ScriptedSender, client, config};

#[tokio::test]
async fn test_get_account_id_single_match() {
    let sender = ScriptedSender::new();
    sender.respond(json!({
        "listaccountsresponse": {"count": 1, "account": [{"id": "acc-1", "name": "admin"}]}
    }));
    let client = client(config(), &sender);

    let id = client
        .account()
        .get_account_id("admin", &[ListOption::Domain("dom-1".into())])
        .await
        .unwrap();

    assert_eq!(id, "acc-1");
    let url = &sender.requests()[0].url;
    assert!(url.contains("name=admin"));
    assert!(url.contains("listall=true"));
    assert!(url.contains("domainid=dom-1"));
}

#[tokio::test]
async fn test_get_zone_id_picks_exact_match() {
    let sender = ScriptedSender::new();
    sender.respond(json!({
        "listzonesresponse": {"count": 2, "zone": [
            {"id": "z-2", "name": "zone-1-backup"},
            {"id": "z-1", "name": "zone-1"}
        ]}
    }));
    let client = client(config(), &sender);

    let id = client.zone().get_zone_id("zone-1", &[]).await.unwrap();

    assert_eq!(id, "z-1");
}

#[tokio::test]
async fn test_get_zone_id_not_found() {
    let sender = ScriptedSender::new();
    sender.respond(json!({"listzonesresponse": {}}));
    let client = client(config(), &sender);

    let err = client.zone().get_zone_id("nowhere", &[]).await.unwrap_err();

    assert!(matches!(err, Error::NotFound { kind: "zone", .. }));
    assert_eq!(err.to_string(), "No match found for zone 'nowhere'");
}

#[tokio::test]
async fn test_get_account_ambiguous() {
    let sender = ScriptedSender::new();
    sender.respond(json!({
        "listaccountsresponse": {"count": 2, "account": [
            {"id": "a-1", "name": "ops-eu"},
            {"id": "a-2", "name": "ops-us"}
        ]}
    }));
    let client = client(config(), &sender);

    let err = client
        .account()
        .get_account_by_name("ops", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Ambiguous { count: 2, .. }));
}

#[tokio::test]
async fn test_list_virtual_machines_decodes_nested_fields() {
    let sender = ScriptedSender::new();
    sender.respond(json!({
        "listvirtualmachinesresponse": {"count": 1, "virtualmachine": [{
            "id": "vm-1",
            "name": "web01",
            "state": "Running",
            "nic": [{"id": "nic-1", "ipaddress": "10.0.0.5", "isdefault": true}],
            "tags": [{"key": "role", "value": "web", "resourcetype": "UserVm"}]
        }]}
    }));
    let client = client(config(), &sender);

    let vms = client
        .virtual_machine()
        .list_virtual_machines(&Params::new())
        .await
        .unwrap();

    assert_eq!(vms.len(), 1);
    assert_eq!(vms[0].nic[0].ipaddress.as_deref(), Some("10.0.0.5"));
    assert_eq!(vms[0].tags[0].key, "role");
    assert_eq!(sender.requests()[0].method, HttpMethod::Get);
}

#[tokio::test]
async fn test_destroy_virtual_machine_sync() {
    let sender = ScriptedSender::new();
    sender.respond(json!({"destroyvirtualmachineresponse": {"jobid": "job-9"}}));
    let client = client(config(), &sender);

    let vm = client
        .virtual_machine()
        .destroy_virtual_machine("vm-1", true)
        .await
        .unwrap();

    assert_eq!(vm.jobid.as_deref(), Some("job-9"));
    let url = &sender.requests()[0].url;
    assert!(url.contains("command=destroyVirtualMachine"));
    assert!(url.contains("expunge=true"));
    assert!(url.contains("id=vm-1"));
}
