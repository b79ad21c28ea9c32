/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use common::types::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::UpgradeError;
use crate::graph::{ComponentAction, NewApp, OriginalApp};

fn default_action() -> ComponentAction {
    ComponentAction::Build
}

/// Installed graph of a component group as it was before an upgrade.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotData {
    pub version: String,
    pub components: Vec<SnapshotComponent>,
    /// Kept for auditing; a restore leaves config groups untouched.
    #[serde(default)]
    pub config_groups: Vec<MConfigGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotComponent {
    pub component: MComponent,
    /// Action the upgrade took on this component; a restore repeats it.
    #[serde(default = "default_action")]
    pub action: ComponentAction,
    #[serde(default)]
    pub dependencies: Vec<MComponentDependency>,
    #[serde(default)]
    pub volume_dependencies: Vec<MVolumeDependency>,
    #[serde(default)]
    pub plugins: Vec<MComponentPlugin>,
}

impl SnapshotData {
    pub fn capture(original: &OriginalApp, new: &NewApp) -> Self {
        let components = original
            .components
            .iter()
            .map(|component| SnapshotComponent {
                component: component.clone(),
                action: new
                    .components
                    .iter()
                    .find(|planned| planned.component.id == component.id)
                    .map(|planned| planned.action)
                    .unwrap_or_default(),
                dependencies: original
                    .dependencies
                    .iter()
                    .filter(|d| d.component == component.id)
                    .cloned()
                    .collect(),
                volume_dependencies: original
                    .volume_dependencies
                    .iter()
                    .filter(|d| d.component == component.id)
                    .cloned()
                    .collect(),
                plugins: original
                    .plugins
                    .iter()
                    .filter(|p| p.component == component.id)
                    .cloned()
                    .collect(),
            })
            .collect();

        SnapshotData {
            version: original.group.version.clone(),
            components,
            config_groups: original.config_groups.clone(),
        }
    }

    pub fn into_model(self, tenant_env: Uuid, upgrade_group: Uuid, now: NaiveDateTime) -> Result<MUpgradeSnapshot, UpgradeError> {
        let snapshot = serde_json::to_value(&self).map_err(|e| UpgradeError::Template(e.to_string()))?;

        Ok(MUpgradeSnapshot {
            id: Uuid::new_v4(),
            tenant_env,
            upgrade_group,
            snapshot,
            created_at: now,
        })
    }

    pub fn from_model(model: &MUpgradeSnapshot) -> Result<Self, UpgradeError> {
        serde_json::from_value(model.snapshot.clone())
            .map_err(|e| UpgradeError::Template(format!("snapshot {}: {}", model.id, e)))
    }
}
