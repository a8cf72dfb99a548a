//! Wire types for the Zone.EU API
//!
//! The API models every DNS record kind with one generic shape; kind-specific
//! fields are simply absent for kinds that do not use them. All list and
//! singleton endpoints return JSON arrays, even for single objects.

use serde::{Deserialize, Serialize};

/// The eleven DNS record kinds managed through `/dns/{zone}/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    Tlsa,
    Sshfp,
    Url,
}

impl RecordKind {
    /// Every supported kind, in API path order
    pub const ALL: [RecordKind; 11] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Cname,
        RecordKind::Mx,
        RecordKind::Txt,
        RecordKind::Ns,
        RecordKind::Srv,
        RecordKind::Caa,
        RecordKind::Tlsa,
        RecordKind::Sshfp,
        RecordKind::Url,
    ];

    /// Path segment under `/dns/{zone}/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            RecordKind::A => "a",
            RecordKind::Aaaa => "aaaa",
            RecordKind::Cname => "cname",
            RecordKind::Mx => "mx",
            RecordKind::Txt => "txt",
            RecordKind::Ns => "ns",
            RecordKind::Srv => "srv",
            RecordKind::Caa => "caa",
            RecordKind::Tlsa => "tlsa",
            RecordKind::Sshfp => "sshfp",
            RecordKind::Url => "url",
        }
    }

    /// Declarative resource type name for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            RecordKind::A => "zoneeu_dns_a_record",
            RecordKind::Aaaa => "zoneeu_dns_aaaa_record",
            RecordKind::Cname => "zoneeu_dns_cname_record",
            RecordKind::Mx => "zoneeu_dns_mx_record",
            RecordKind::Txt => "zoneeu_dns_txt_record",
            RecordKind::Ns => "zoneeu_dns_ns_record",
            RecordKind::Srv => "zoneeu_dns_srv_record",
            RecordKind::Caa => "zoneeu_dns_caa_record",
            RecordKind::Tlsa => "zoneeu_dns_tlsa_record",
            RecordKind::Sshfp => "zoneeu_dns_sshfp_record",
            RecordKind::Url => "zoneeu_dns_url_record",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A generic DNS resource record as the API represents it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque remote identifier, empty until created
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Hostname; the API may return either the fully-qualified or the
    /// zone-relative form regardless of which was sent
    pub name: String,

    /// Record payload: IP, hostname, text, URL or hash depending on kind
    pub destination: String,

    /// MX/SRV priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,

    /// SRV weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    /// SRV port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,

    /// CAA flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<u32>,

    /// CAA tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// TLSA certificate usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_usage: Option<u32>,

    /// TLSA selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<u32>,

    /// TLSA matching type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_type: Option<u32>,

    /// SSHFP algorithm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<u32>,

    /// Shared wire field: SSHFP fingerprint type, or URL redirect code
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<u32>,
}

/// A DNS zone (read-only, fetched on demand)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub ipv6: bool,
}

/// A registered domain and its settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub delegated: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expires: String,
    #[serde(default)]
    pub dnssec: bool,
    #[serde(default)]
    pub autorenew: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub renew_order: String,
    #[serde(default)]
    pub renewal_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pending_trade: Option<i64>,
    #[serde(default)]
    pub has_pending_dnssec: bool,
    #[serde(default)]
    pub reactivate: bool,
    #[serde(default)]
    pub auth_key_enabled: bool,
    #[serde(default)]
    pub signing_required: bool,
    #[serde(default)]
    pub nameservers_custom: bool,
}

/// Updatable subset of a domain's settings; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorenew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers_custom: Option<bool>,
}

/// Domain preferences, fetched and updated independently of the domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainPreferences {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_url: String,
    #[serde(default)]
    pub renewal_notifications: bool,
}

/// A custom nameserver for a domain, with optional glue addresses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainNameserver {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_url: String,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<String>,
}
