/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::upgrade_record::RecordType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUpgradeRecordRequest {
    pub upgrade_group: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUpgradeRequest {
    pub version: String,
    #[serde(default)]
    pub component_keys: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeComponentUpgradeRequest {
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ListRecordsQuery {
    pub record_type: Option<RecordType>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct LastRecordQuery {
    pub upgrade_group: Option<Uuid>,
    pub record_type: Option<RecordType>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChangesQuery {
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RollbackResponse {
    pub record: entity::upgrade_record::Model,
    pub group: entity::component_group::Model,
}
