//! DNS record and zone operations
//!
//! One generic CRUD surface covers all record kinds; the kind only selects
//! the path segment under `/dns/{zone}/`. Name lookups accept either the
//! zone-relative or the fully-qualified form and match records stored in
//! either form.

use reqwest::Method;
use tracing::debug;

use zoneeu_core::error::Result;
use zoneeu_core::types::{Record, RecordKind, Zone};

use crate::transport::{Client, first_of};

/// Strip the trailing `.{zone}` suffix from a record name, if present
fn strip_zone_suffix<'a>(name: &'a str, zone: &str) -> &'a str {
    let suffix = format!(".{zone}");
    name.strip_suffix(suffix.as_str()).unwrap_or(name)
}

/// Whether a stored record name refers to the same host as a queried name
///
/// Equivalent after zone-suffix normalization, or exactly equal as given.
fn names_match(record_name: &str, query: &str, zone: &str) -> bool {
    strip_zone_suffix(record_name, zone) == strip_zone_suffix(query, zone) || record_name == query
}

impl Client {
    /// Fetch zone metadata
    pub async fn get_zone(&self, zone: &str) -> Result<Zone> {
        let resp = self
            .request::<()>(Method::GET, &format!("/dns/{zone}"), None)
            .await?;
        first_of(&resp)
    }

    /// List all records of one kind in a zone
    pub async fn list_records(&self, kind: RecordKind, zone: &str) -> Result<Vec<Record>> {
        let resp = self
            .request::<()>(
                Method::GET,
                &format!("/dns/{zone}/{}", kind.path_segment()),
                None,
            )
            .await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    /// Fetch one record by its remote identifier
    pub async fn get_record(&self, kind: RecordKind, zone: &str, id: &str) -> Result<Record> {
        let resp = self
            .request::<()>(
                Method::GET,
                &format!("/dns/{zone}/{}/{id}", kind.path_segment()),
                None,
            )
            .await?;
        first_of(&resp)
    }

    /// Create a record and return it with its assigned identifier
    pub async fn create_record(
        &self,
        kind: RecordKind,
        zone: &str,
        record: &Record,
    ) -> Result<Record> {
        let resp = self
            .request(
                Method::POST,
                &format!("/dns/{zone}/{}", kind.path_segment()),
                Some(record),
            )
            .await?;
        first_of(&resp)
    }

    /// Replace a record in place
    pub async fn update_record(
        &self,
        kind: RecordKind,
        zone: &str,
        id: &str,
        record: &Record,
    ) -> Result<Record> {
        let resp = self
            .request(
                Method::PUT,
                &format!("/dns/{zone}/{}/{id}", kind.path_segment()),
                Some(record),
            )
            .await?;
        first_of(&resp)
    }

    /// Delete a record by identifier
    pub async fn delete_record(&self, kind: RecordKind, zone: &str, id: &str) -> Result<()> {
        self.request::<()>(
            Method::DELETE,
            &format!("/dns/{zone}/{}/{id}", kind.path_segment()),
            None,
        )
        .await?;
        Ok(())
    }

    /// Find the first record of a kind whose name matches, in either form
    ///
    /// Returns `Ok(None)` when no record matches; a failed list is an error.
    pub async fn find_record_by_name(
        &self,
        kind: RecordKind,
        zone: &str,
        name: &str,
    ) -> Result<Option<Record>> {
        let records = self.list_records(kind, zone).await?;
        Ok(records.into_iter().find(|r| names_match(&r.name, name, zone)))
    }

    /// Find every record of a kind whose name matches, in either form
    pub async fn find_all_records_by_name(
        &self,
        kind: RecordKind,
        zone: &str,
        name: &str,
    ) -> Result<Vec<Record>> {
        let records = self.list_records(kind, zone).await?;
        let matches: Vec<Record> = records
            .into_iter()
            .filter(|r| names_match(&r.name, name, zone))
            .collect();
        debug!(kind = %kind, zone, name, count = matches.len(), "name lookup");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_suffix_stripped_only_when_present() {
        assert_eq!(strip_zone_suffix("www.example.com", "example.com"), "www");
        assert_eq!(strip_zone_suffix("www", "example.com"), "www");
        assert_eq!(strip_zone_suffix("example.com", "example.com"), "example.com");
    }

    #[test]
    fn names_match_across_forms() {
        assert!(names_match("www", "www.example.com", "example.com"));
        assert!(names_match("www.example.com", "www", "example.com"));
        assert!(names_match("www", "www", "example.com"));
        assert!(!names_match("mail", "www", "example.com"));
    }

    #[test]
    fn apex_name_matches_itself() {
        assert!(names_match("example.com", "example.com", "example.com"));
    }
}
