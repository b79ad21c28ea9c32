/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use common::types::*;
use entity::upgrade_record::{RecordType, UpgradeStatus};
use region::events::EventOutcome;

/// Status a component record moves to when its event reports `outcome`.
///
/// A timed out event counts as success: the region stopped waiting, the
/// component is assumed to converge.
pub fn event_status(current: UpgradeStatus, outcome: EventOutcome) -> Option<UpgradeStatus> {
    match (current, outcome) {
        (UpgradeStatus::Upgrading, EventOutcome::Success | EventOutcome::Timeout) => Some(UpgradeStatus::Upgraded),
        (UpgradeStatus::Upgrading, EventOutcome::Failure) => Some(UpgradeStatus::UpgradeFailed),
        (UpgradeStatus::Rolling, EventOutcome::Success | EventOutcome::Timeout) => Some(UpgradeStatus::Rollback),
        (UpgradeStatus::Rolling, EventOutcome::Failure) => Some(UpgradeStatus::RollbackFailed),
        _ => None,
    }
}

/// Terminal success status for a record of `record_type`.
pub fn success_status(record_type: RecordType) -> UpgradeStatus {
    match record_type {
        RecordType::Upgrade => UpgradeStatus::Upgraded,
        RecordType::Rollback => UpgradeStatus::Rollback,
    }
}

pub fn failed_status(record_type: RecordType) -> UpgradeStatus {
    match record_type {
        RecordType::Upgrade => UpgradeStatus::UpgradeFailed,
        RecordType::Rollback => UpgradeStatus::RollbackFailed,
    }
}

pub fn partial_status(record_type: RecordType) -> UpgradeStatus {
    match record_type {
        RecordType::Upgrade => UpgradeStatus::PartialUpgraded,
        RecordType::Rollback => UpgradeStatus::PartialRollback,
    }
}

/// Derives the status of `record` from its component records. The record
/// keeps its status before it is submitted and while any component is
/// outstanding.
pub fn aggregate(record: &MUpgradeRecord, components: &[MComponentUpgradeRecord]) -> UpgradeStatus {
    if record.status == UpgradeStatus::Not || components.iter().any(|c| !c.is_finished()) {
        return record.status;
    }

    let failed = components.iter().filter(|c| c.status.is_failed()).count();
    if failed == 0 {
        success_status(record.record_type)
    } else if failed == components.len() {
        failed_status(record.record_type)
    } else {
        partial_status(record.record_type)
    }
}
