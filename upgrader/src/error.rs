/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::upgrade_record::UpgradeStatus;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("the last upgrade record of this component group is not finished")]
    LastRecordUnfinished,
    #[error("record in status {0:?} can not be deployed")]
    RecordCanNotDeploy(UpgradeStatus),
    #[error("record can not be rolled back")]
    RecordCanNotRollback,
    #[error("record in status {0:?} can not be upgraded")]
    RecordCanNotUpgrade(UpgradeStatus),
    #[error("upgrade record {0} not found")]
    RecordNotFound(Uuid),
    #[error("snapshot of record {0} is missing")]
    SnapshotMissing(Uuid),
    #[error("invalid template: {0}")]
    Template(String),
    #[error("can not render component {component}: {reason}")]
    Render { component: Uuid, reason: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("region submission failed: {0}")]
    Submission(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
