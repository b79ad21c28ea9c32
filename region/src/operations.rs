/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BUILD_KIND_MARKET_IMAGE: &str = "build_from_market_image";

/// One batch submitted to the region. The region accepts a single kind of
/// operation per request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum BatchOperation {
    Build { build_infos: Vec<BuildInfo> },
    Upgrade { upgrade_infos: Vec<UpgradeInfo> },
    Deploy { deploy_infos: Vec<DeployInfo> },
}

impl BatchOperation {
    pub fn name(&self) -> &'static str {
        match self {
            BatchOperation::Build { .. } => "build",
            BatchOperation::Upgrade { .. } => "upgrade",
            BatchOperation::Deploy { .. } => "deploy",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BatchOperation::Build { build_infos } => build_infos.len(),
            BatchOperation::Upgrade { upgrade_infos } => upgrade_infos.len(),
            BatchOperation::Deploy { deploy_infos } => deploy_infos.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildAction {
    /// First build of a component that did not exist before.
    Deploy,
    Upgrade,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub service_id: Uuid,
    pub action: BuildAction,
    pub kind: String,
    pub image_info: ImageInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub image_url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cmd: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpgradeInfo {
    pub service_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeployInfo {
    pub service_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchResult {
    #[serde(default)]
    pub batch_result: Vec<BatchResultItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchResultItem {
    pub service_id: Uuid,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub status: String,
}

impl BatchResultItem {
    /// Event id to correlate on, if the region accepted the item.
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref().filter(|id| !id.is_empty())
    }
}
