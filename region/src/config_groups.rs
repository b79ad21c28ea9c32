/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncConfigGroupsBody {
    pub app_config_groups: Vec<ConfigGroupBody>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigGroupBody {
    pub config_group_name: String,
    pub deploy_type: String,
    pub enable: bool,
    pub config_items: Vec<ConfigItemBody>,
    pub config_group_services: Vec<ConfigGroupService>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigItemBody {
    pub item_key: String,
    pub item_value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigGroupService {
    pub service_id: Uuid,
}
