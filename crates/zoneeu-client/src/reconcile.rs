//! Name-conflict reconciliation for record writes
//!
//! The API enforces name uniqueness per kind and zone and rejects violations
//! with a `zone_conflict` error body. These helpers resolve such conflicts
//! deterministically instead of surfacing them:
//!
//! - On create, an existing record with the desired name is adopted (its
//!   identifier is taken over) rather than duplicated. With forced
//!   recreation the existing record is found up front and overwritten.
//! - On update, a conflict under forced recreation deletes every record
//!   bearing the name and creates one fresh record, collapsing duplicates.
//! - Deletes treat an already-absent record as success.
//!
//! Adoption never invents data: when a conflicting record cannot be found
//! after the signal, the original conflict error is returned untouched.

use tracing::{info, warn};

use zoneeu_core::error::Result;
use zoneeu_core::types::{Record, RecordKind};

use crate::transport::Client;

impl Client {
    /// Create a record, resolving name conflicts by adoption
    ///
    /// With `force_recreate`, a record already bearing the name is updated
    /// in place before any create is attempted.
    pub async fn ensure_record_created(
        &self,
        kind: RecordKind,
        zone: &str,
        desired: &Record,
        force_recreate: bool,
    ) -> Result<Record> {
        if force_recreate {
            if let Some(existing) = self.find_record_by_name(kind, zone, &desired.name).await? {
                info!(
                    kind = %kind,
                    zone,
                    name = %desired.name,
                    id = %existing.id,
                    "overwriting existing record instead of creating"
                );
                return self.update_record(kind, zone, &existing.id, desired).await;
            }
        }

        match self.create_record(kind, zone, desired).await {
            Ok(created) => Ok(created),
            Err(err) if err.is_conflict() => {
                info!(
                    kind = %kind,
                    zone,
                    name = %desired.name,
                    "record already exists, adopting"
                );
                match self.find_record_by_name(kind, zone, &desired.name).await {
                    Ok(Some(existing)) => Ok(existing),
                    // Adoption failed; the conflict error is the truth
                    Ok(None) | Err(_) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Update a record, collapsing name duplicates under forced recreation
    ///
    /// A conflict without `force_recreate` propagates unchanged. With it,
    /// every record bearing the desired name is deleted (absence during
    /// cleanup is ignored, other delete failures are logged and skipped)
    /// and exactly one fresh record is created.
    pub async fn ensure_record_updated(
        &self,
        kind: RecordKind,
        zone: &str,
        id: &str,
        desired: &Record,
        force_recreate: bool,
    ) -> Result<Record> {
        match self.update_record(kind, zone, id, desired).await {
            Ok(updated) => Ok(updated),
            Err(err) if err.is_conflict() && force_recreate => {
                info!(
                    kind = %kind,
                    zone,
                    name = %desired.name,
                    "name conflict on update, deleting duplicates and recreating"
                );
                let duplicates = self
                    .find_all_records_by_name(kind, zone, &desired.name)
                    .await?;
                for duplicate in &duplicates {
                    if let Err(delete_err) =
                        self.delete_record(kind, zone, &duplicate.id).await
                    {
                        if !delete_err.is_not_found() {
                            warn!(
                                kind = %kind,
                                zone,
                                id = %duplicate.id,
                                error = %delete_err,
                                "failed to delete duplicate record"
                            );
                        }
                    }
                }
                self.create_record(kind, zone, desired).await
            }
            Err(err) => Err(err),
        }
    }

    /// Delete a record, treating absence as success
    pub async fn delete_record_idempotent(
        &self,
        kind: RecordKind,
        zone: &str,
        id: &str,
    ) -> Result<()> {
        match self.delete_record(kind, zone, id).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }
}
