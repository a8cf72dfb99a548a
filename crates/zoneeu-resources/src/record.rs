//! Generic DNS record adapter
//!
//! One adapter type serves all record kinds; the kind decides which state
//! fields are meaningful, how they are validated, and which API path the
//! client targets. The adapter's external identifier is `{zone}/{record_id}`.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use zoneeu_client::Client;
use zoneeu_core::error::{Error, Result};
use zoneeu_core::traits::ResourceOps;
use zoneeu_core::types::{Record, RecordKind};

/// Declarative state of one DNS record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordState {
    /// Composite identifier `{zone}/{record_id}`
    #[serde(default)]
    pub id: String,

    /// Remote record identifier
    #[serde(default)]
    pub record_id: String,

    pub zone: String,
    pub name: String,
    pub destination: String,

    /// Resolve name conflicts by overwriting or recreating
    #[serde(default)]
    pub force_recreate: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_usage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<u32>,
}

/// Parse a `{zone}/{record_id}` identifier
pub(crate) fn parse_record_id(id: &str) -> Result<(&str, &str)> {
    match id.split_once('/') {
        Some((zone, record_id)) if !zone.is_empty() && !record_id.is_empty() => {
            Ok((zone, record_id))
        }
        _ => Err(Error::InvalidImportId(format!(
            "expected format 'zone/record_id', got: {id}"
        ))),
    }
}

fn require(field: &'static str, value: Option<u32>) -> Result<u32> {
    value.ok_or_else(|| Error::invalid_input(format!("{field} is required")))
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::invalid_input(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Adapter instance for one record kind
pub struct RecordResource {
    client: Arc<Client>,
    kind: RecordKind,
}

impl RecordResource {
    pub fn new(client: Arc<Client>, kind: RecordKind) -> Self {
        Self { client, kind }
    }

    /// Kind-specific field validation, applied before any API call
    fn validate_state(&self, state: &RecordState) -> Result<()> {
        if state.zone.is_empty() {
            return Err(Error::invalid_input("zone is required"));
        }
        if state.name.is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        if state.destination.is_empty() {
            return Err(Error::invalid_input("destination is required"));
        }

        match self.kind {
            RecordKind::A => {
                state.destination.parse::<Ipv4Addr>().map_err(|_| {
                    Error::invalid_input(format!(
                        "destination {:?} is not a valid IPv4 address",
                        state.destination
                    ))
                })?;
            }
            RecordKind::Aaaa => {
                let addr = state.destination.parse::<Ipv6Addr>().map_err(|_| {
                    Error::invalid_input(format!(
                        "destination {:?} is not a valid IPv6 address",
                        state.destination
                    ))
                })?;
                if addr.to_ipv4_mapped().is_some() {
                    return Err(Error::invalid_input(format!(
                        "destination {:?} is not a valid IPv6 address",
                        state.destination
                    )));
                }
            }
            RecordKind::Cname | RecordKind::Txt | RecordKind::Ns => {}
            RecordKind::Mx => {
                let priority = require("priority", state.priority)?;
                check_range("priority", priority, 0, 65535)?;
            }
            RecordKind::Srv => {
                let priority = require("priority", state.priority)?;
                check_range("priority", priority, 0, 65535)?;
                let weight = require("weight", state.weight)?;
                check_range("weight", weight, 0, 65535)?;
                let port = require("port", state.port)?;
                check_range("port", port, 1, 65535)?;
            }
            RecordKind::Caa => {
                let flag = require("flag", state.flag)?;
                check_range("flag", flag, 0, 255)?;
                if state.tag.as_deref().unwrap_or_default().is_empty() {
                    return Err(Error::invalid_input("tag is required"));
                }
            }
            RecordKind::Tlsa => {
                let usage = require("certificate_usage", state.certificate_usage)?;
                check_range("certificate_usage", usage, 0, 3)?;
                let selector = require("selector", state.selector)?;
                check_range("selector", selector, 0, 1)?;
                let matching = require("matching_type", state.matching_type)?;
                check_range("matching_type", matching, 0, 2)?;
            }
            RecordKind::Sshfp => {
                let algorithm = require("algorithm", state.algorithm)?;
                check_range("algorithm", algorithm, 1, 4)?;
                let fingerprint = require("fingerprint_type", state.fingerprint_type)?;
                check_range("fingerprint_type", fingerprint, 1, 2)?;
            }
            RecordKind::Url => {
                let redirect = require("redirect_type", state.redirect_type)?;
                if redirect != 301 && redirect != 302 {
                    return Err(Error::invalid_input(format!(
                        "redirect_type must be 301 or 302, got {redirect}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the wire record for this kind from declarative state
    fn to_record(&self, state: &RecordState) -> Record {
        let mut record = Record {
            name: state.name.clone(),
            destination: state.destination.clone(),
            ..Default::default()
        };
        match self.kind {
            RecordKind::Mx => {
                record.priority = state.priority;
            }
            RecordKind::Srv => {
                record.priority = state.priority;
                record.weight = state.weight;
                record.port = state.port;
            }
            RecordKind::Caa => {
                record.flag = state.flag;
                record.tag = state.tag.clone();
            }
            RecordKind::Tlsa => {
                record.certificate_usage = state.certificate_usage;
                record.selector = state.selector;
                record.matching_type = state.matching_type;
            }
            RecordKind::Sshfp => {
                record.algorithm = state.algorithm;
                record.type_code = state.fingerprint_type;
            }
            RecordKind::Url => {
                record.type_code = state.redirect_type;
            }
            _ => {}
        }
        record
    }

    /// Fold a wire record back into declarative state
    fn absorb_record(&self, state: &mut RecordState, record: &Record) {
        state.name = record.name.clone();
        state.destination = record.destination.clone();
        match self.kind {
            RecordKind::Mx => {
                state.priority = record.priority;
            }
            RecordKind::Srv => {
                state.priority = record.priority;
                state.weight = record.weight;
                state.port = record.port;
            }
            RecordKind::Caa => {
                state.flag = record.flag;
                state.tag = record.tag.clone();
            }
            RecordKind::Tlsa => {
                state.certificate_usage = record.certificate_usage;
                state.selector = record.selector;
                state.matching_type = record.matching_type;
            }
            RecordKind::Sshfp => {
                state.algorithm = record.algorithm;
                state.fingerprint_type = record.type_code;
            }
            RecordKind::Url => {
                state.redirect_type = record.type_code;
            }
            _ => {}
        }
    }

    fn set_identity(&self, state: &mut RecordState, record_id: &str) {
        state.record_id = record_id.to_string();
        state.id = format!("{}/{}", state.zone, record_id);
    }

    fn parse_state(&self, value: Value) -> Result<RecordState> {
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl ResourceOps for RecordResource {
    fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    fn validate(&self, desired: &Value) -> Result<()> {
        let state: RecordState = serde_json::from_value(desired.clone())?;
        self.validate_state(&state)
    }

    async fn create(&self, desired: Value) -> Result<Value> {
        let mut state = self.parse_state(desired)?;
        self.validate_state(&state)?;

        let record = self.to_record(&state);
        let created = self
            .client
            .ensure_record_created(self.kind, &state.zone, &record, state.force_recreate)
            .await?;

        debug!(kind = %self.kind, zone = %state.zone, id = %created.id, "record created");
        self.set_identity(&mut state, &created.id);
        Ok(serde_json::to_value(state)?)
    }

    async fn read(&self, recorded: Value) -> Result<Option<Value>> {
        let mut state = self.parse_state(recorded)?;
        let (zone, record_id) = parse_record_id(&state.id)?;
        let (zone, record_id) = (zone.to_string(), record_id.to_string());

        let record = match self.client.get_record(self.kind, &zone, &record_id).await {
            Ok(record) => record,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

        state.zone = zone;
        self.absorb_record(&mut state, &record);
        state.record_id = record.id.clone();
        Ok(Some(serde_json::to_value(state)?))
    }

    async fn update(&self, desired: Value, recorded: Value) -> Result<Value> {
        let mut state = self.parse_state(desired)?;
        let prior: RecordState = serde_json::from_value(recorded)?;
        self.validate_state(&state)?;

        let (zone, record_id) = parse_record_id(&prior.id)?;
        let (zone, record_id) = (zone.to_string(), record_id.to_string());

        let record = self.to_record(&state);
        let updated = self
            .client
            .ensure_record_updated(self.kind, &zone, &record_id, &record, state.force_recreate)
            .await?;

        state.zone = zone;
        self.set_identity(&mut state, &updated.id);
        Ok(serde_json::to_value(state)?)
    }

    async fn delete(&self, recorded: Value) -> Result<()> {
        let state = self.parse_state(recorded)?;
        let (zone, record_id) = parse_record_id(&state.id)?;
        self.client
            .delete_record_idempotent(self.kind, zone, record_id)
            .await
    }

    async fn import(&self, id: &str) -> Result<Value> {
        let (zone, record_id) = parse_record_id(id)?;
        let record = self.client.get_record(self.kind, zone, record_id).await?;

        let mut state = RecordState {
            id: id.to_string(),
            zone: zone.to_string(),
            ..Default::default()
        };
        self.absorb_record(&mut state, &record);
        state.record_id = record.id.clone();
        Ok(serde_json::to_value(state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(zone: &str, name: &str, destination: &str) -> RecordState {
        RecordState {
            zone: zone.into(),
            name: name.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    fn resource(kind: RecordKind) -> RecordResource {
        let creds = zoneeu_core::Credentials::new("testuser", "testapikey").unwrap();
        let client = Client::with_base_url(creds, "http://localhost:1").unwrap();
        RecordResource::new(Arc::new(client), kind)
    }

    #[test]
    fn record_id_parses_zone_and_identifier() {
        assert_eq!(
            parse_record_id("example.com/123").unwrap(),
            ("example.com", "123")
        );
        assert!(parse_record_id("example.com").is_err());
        assert!(parse_record_id("/123").is_err());
        assert!(parse_record_id("example.com/").is_err());
    }

    #[test]
    fn a_record_rejects_non_ipv4() {
        let r = resource(RecordKind::A);
        assert!(r.validate_state(&state("example.com", "www", "192.0.2.1")).is_ok());
        assert!(r.validate_state(&state("example.com", "www", "2001:db8::1")).is_err());
        assert!(r.validate_state(&state("example.com", "www", "not-an-ip")).is_err());
    }

    #[test]
    fn aaaa_record_rejects_ipv4_and_mapped_forms() {
        let r = resource(RecordKind::Aaaa);
        assert!(r.validate_state(&state("example.com", "www", "2001:db8::1")).is_ok());
        assert!(r.validate_state(&state("example.com", "www", "192.0.2.1")).is_err());
        assert!(r.validate_state(&state("example.com", "www", "::ffff:192.0.2.1")).is_err());
    }

    #[test]
    fn mx_record_requires_priority_in_range() {
        let r = resource(RecordKind::Mx);
        let mut s = state("example.com", "example.com", "mail.example.com");
        assert!(r.validate_state(&s).is_err());
        s.priority = Some(10);
        assert!(r.validate_state(&s).is_ok());
        s.priority = Some(70000);
        assert!(r.validate_state(&s).is_err());
    }

    #[test]
    fn srv_record_rejects_port_zero() {
        let r = resource(RecordKind::Srv);
        let mut s = state("example.com", "_sip._tcp", "sip.example.com");
        s.priority = Some(10);
        s.weight = Some(5);
        s.port = Some(0);
        assert!(r.validate_state(&s).is_err());
        s.port = Some(5060);
        assert!(r.validate_state(&s).is_ok());
    }

    #[test]
    fn tlsa_record_bounds_each_parameter() {
        let r = resource(RecordKind::Tlsa);
        let mut s = state("example.com", "_443._tcp.www", "abc123");
        s.certificate_usage = Some(3);
        s.selector = Some(1);
        s.matching_type = Some(1);
        assert!(r.validate_state(&s).is_ok());
        s.selector = Some(2);
        assert!(r.validate_state(&s).is_err());
    }

    #[test]
    fn sshfp_record_maps_fingerprint_type_to_wire_type() {
        let r = resource(RecordKind::Sshfp);
        let mut s = state("example.com", "host", "abcdef0123456789");
        s.algorithm = Some(4);
        s.fingerprint_type = Some(2);
        assert!(r.validate_state(&s).is_ok());
        let record = r.to_record(&s);
        assert_eq!(record.algorithm, Some(4));
        assert_eq!(record.type_code, Some(2));
    }

    #[test]
    fn url_record_accepts_only_http_redirect_codes() {
        let r = resource(RecordKind::Url);
        let mut s = state("example.com", "old.example.com", "https://new.example.com");
        assert!(r.validate_state(&s).is_err());
        s.redirect_type = Some(301);
        assert!(r.validate_state(&s).is_ok());
        s.redirect_type = Some(307);
        assert!(r.validate_state(&s).is_err());
    }

    #[test]
    fn caa_record_requires_tag() {
        let r = resource(RecordKind::Caa);
        let mut s = state("example.com", "example.com", "letsencrypt.org");
        s.flag = Some(0);
        assert!(r.validate_state(&s).is_err());
        s.tag = Some("issue".into());
        assert!(r.validate_state(&s).is_ok());
        s.flag = Some(300);
        assert!(r.validate_state(&s).is_err());
    }
}
