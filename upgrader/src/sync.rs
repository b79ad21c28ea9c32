/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Correlates outstanding component records with region events.

use chrono::Utc;
use common::types::*;
use region::{Outcome, RegionApi, RegionTarget};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::error::UpgradeError;
use crate::status::{aggregate, event_status};
use crate::store::StoreTx;

/// Refreshes the component records of `record` from their events and
/// derives the record status again. Failing to reach the region leaves
/// every record outstanding for the next sync.
#[instrument(skip_all, fields(record = %record.id))]
pub async fn sync_record<T: StoreTx, R: RegionApi + ?Sized>(
    tx: &mut T,
    region: &R,
    target: &RegionTarget,
    mut record: MUpgradeRecord,
) -> Result<(MUpgradeRecord, Vec<MComponentUpgradeRecord>), UpgradeError> {
    let mut components = tx.component_records(record.id).await?;
    let now = Utc::now().naive_utc();

    let event_ids: Vec<String> = components
        .iter()
        .filter(|c| !c.is_finished())
        .filter_map(|c| c.event_id.clone())
        .collect();

    if !event_ids.is_empty() {
        let events = match region.get_events_by_ids(target, &event_ids).await {
            Ok(Outcome::Success(events)) => events,
            Ok(Outcome::Failure(reason)) => {
                warn!(%reason, "Region rejected event query");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to query events");
                Vec::new()
            }
        };

        let outcomes: HashMap<&str, _> = events
            .iter()
            .map(|event| (event.event_id.as_str(), event))
            .collect();

        let mut changed = Vec::new();
        for component in components.iter_mut().filter(|c| !c.is_finished()) {
            let Some(event) = component.event_id.as_deref().and_then(|id| outcomes.get(id)) else {
                continue;
            };

            match event_status(component.status, event.outcome()) {
                Some(status) => {
                    debug!(component = %component.component, ?status, "Event finished");
                    component.status = status;
                    component.updated_at = now;
                    changed.push(component.clone());
                }
                None if event.status.is_empty() => {
                    warn!(event = %event.event_id, "Event without status");
                }
                None if matches!(event.status.as_str(), "building" | "running") => {
                    debug!(event = %event.event_id, status = %event.status, "Event still running")
                }
                None => warn!(event = %event.event_id, status = %event.status, "Unknown event status"),
            }
        }

        if !changed.is_empty() {
            tx.update_component_records(&changed).await?;
        }
    }

    let status = aggregate(&record, &components);
    if status != record.status {
        debug!(from = ?record.status, to = ?status, "Record status changed");
        record.status = status;
        record.updated_at = now;
        tx.update_record(&record).await?;
    }

    Ok((record, components))
}
