//! Adapter lifecycle behavior against a mock API, driven through the
//! registry-facing traits.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zoneeu_client::Client;
use zoneeu_core::traits::{DataSourceOps, ResourceOps};
use zoneeu_core::types::RecordKind;
use zoneeu_core::{Credentials, Error};
use zoneeu_resources::datasource::{DomainDataSource, ZoneDataSource};
use zoneeu_resources::domain::DomainResource;
use zoneeu_resources::nameserver::NameserverResource;
use zoneeu_resources::record::RecordResource;

fn test_client(server: &MockServer) -> Arc<Client> {
    let creds = Credentials::new("testuser", "testapikey").unwrap();
    Arc::new(Client::with_base_url(creds, server.uri()).unwrap())
}

#[tokio::test]
async fn a_record_create_assigns_composite_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dns/example.com/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "123", "name": "www.example.com", "destination": "192.0.2.1"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resource = RecordResource::new(test_client(&server), RecordKind::A);
    let state = resource
        .create(json!({
            "zone": "example.com",
            "name": "www.example.com",
            "destination": "192.0.2.1"
        }))
        .await
        .unwrap();

    assert_eq!(state["id"], "example.com/123");
    assert_eq!(state["record_id"], "123");
}

#[tokio::test]
async fn record_read_refreshes_remote_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns/example.com/mx/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "7", "name": "example.com",
             "destination": "mail2.example.com", "priority": 20}
        ])))
        .mount(&server)
        .await;

    let resource = RecordResource::new(test_client(&server), RecordKind::Mx);
    let refreshed = resource
        .read(json!({
            "id": "example.com/7",
            "record_id": "7",
            "zone": "example.com",
            "name": "example.com",
            "destination": "mail.example.com",
            "priority": 10
        }))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(refreshed["destination"], "mail2.example.com");
    assert_eq!(refreshed["priority"], 20);
}

#[tokio::test]
async fn record_read_of_deleted_record_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns/example.com/a/123"))
        .respond_with(ResponseTemplate::new(404).set_body_string("record not found"))
        .mount(&server)
        .await;

    let resource = RecordResource::new(test_client(&server), RecordKind::A);
    let refreshed = resource
        .read(json!({
            "id": "example.com/123",
            "record_id": "123",
            "zone": "example.com",
            "name": "www",
            "destination": "192.0.2.1"
        }))
        .await
        .unwrap();

    assert!(refreshed.is_none());
}

#[tokio::test]
async fn record_validation_fails_before_any_api_call() {
    let server = MockServer::start().await;

    let resource = RecordResource::new(test_client(&server), RecordKind::Aaaa);
    let err = resource
        .create(json!({
            "zone": "example.com",
            "name": "www",
            "destination": "192.0.2.1"
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn record_import_resolves_external_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns/example.com/sshfp/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "42", "name": "host", "destination": "abcdef012345",
             "algorithm": 4, "type": 2}
        ])))
        .mount(&server)
        .await;

    let resource = RecordResource::new(test_client(&server), RecordKind::Sshfp);
    let state = resource.import("example.com/42").await.unwrap();

    assert_eq!(state["zone"], "example.com");
    assert_eq!(state["algorithm"], 4);
    assert_eq!(state["fingerprint_type"], 2);

    let err = resource.import("example.com").await.unwrap_err();
    assert!(matches!(err, Error::InvalidImportId(_)));
}

#[tokio::test]
async fn domain_create_requires_existing_domain() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain/new.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let resource = DomainResource::new(test_client(&server));
    let err = resource
        .create(json!({"name": "new.example", "autorenew": true}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("does not register new ones"));
}

#[tokio::test]
async fn domain_delete_resets_settings_best_effort() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/domain/example.com"))
        .and(body_json(json!({"autorenew": false, "dnssec": false})))
        .respond_with(ResponseTemplate::new(500).set_body_string("registry outage"))
        .expect(1)
        .mount(&server)
        .await;

    let resource = DomainResource::new(test_client(&server));
    // Reset failure must not block removal.
    resource
        .delete(json!({"name": "example.com", "autorenew": true, "dnssec": true}))
        .await
        .unwrap();
}

#[tokio::test]
async fn nameserver_create_refuses_duplicate_before_writing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain/example.com/nameserver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"hostname": "ns1.example.net"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/domain/example.com/nameserver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let resource = NameserverResource::new(test_client(&server));
    let err = resource
        .create(json!({"domain": "example.com", "hostname": "ns1.example.net"}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn nameserver_create_extends_existing_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain/example.com/nameserver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"hostname": "ns1.example.net"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/domain/example.com/nameserver"))
        .and(body_json(json!([
            {"hostname": "ns1.example.net"},
            {"hostname": "ns2.example.net", "ip": ["192.0.2.53"]}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"hostname": "ns1.example.net"},
            {"hostname": "ns2.example.net", "ip": ["192.0.2.53"]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resource = NameserverResource::new(test_client(&server));
    let state = resource
        .create(json!({
            "domain": "example.com",
            "hostname": "ns2.example.net",
            "ip": ["192.0.2.53"]
        }))
        .await
        .unwrap();

    assert_eq!(state["id"], "example.com/ns2.example.net");
}

#[tokio::test]
async fn zone_data_source_reads_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "example.com", "active": true, "ipv6": true}
        ])))
        .mount(&server)
        .await;

    let source = ZoneDataSource::new(test_client(&server));
    let zone = source.read(json!({"name": "example.com"})).await.unwrap();

    assert_eq!(zone["name"], "example.com");
    assert_eq!(zone["active"], true);
    assert_eq!(zone["ipv6"], true);
}

#[tokio::test]
async fn domain_data_source_takes_notifications_from_preferences() {
    let server = MockServer::start().await;

    // The domain object carries a stale notifications flag; the
    // preferences sub-resource is authoritative.
    Mock::given(method("GET"))
        .and(path("/domain/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "example.com", "dnssec": true, "autorenew": true,
             "renewal_notifications": false, "nameservers_custom": false,
             "expires": "2027-01-01"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain/example.com/preferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"renewal_notifications": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = DomainDataSource::new(test_client(&server));
    let domain = source.read(json!({"name": "example.com"})).await.unwrap();

    assert_eq!(domain["name"], "example.com");
    assert_eq!(domain["renewal_notifications"], true);
    assert_eq!(domain["autorenew"], true);
}
