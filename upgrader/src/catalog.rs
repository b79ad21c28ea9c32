/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use common::types::*;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::store::{Store, StoreError, StoreTx};

/// Read-only lookup of platform labels and installable plugins.
///
/// Loaded once at startup and shared by every orchestration run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    labels: HashMap<Uuid, MLabel>,
    label_names: HashMap<String, Uuid>,
    plugins: HashMap<Uuid, MPlugin>,
    plugin_origins: HashMap<String, Uuid>,
}

impl Catalog {
    pub fn new(labels: Vec<MLabel>, plugins: Vec<MPlugin>) -> Self {
        let label_names = labels.iter().map(|l| (l.name.clone(), l.id)).collect();
        let plugin_origins = plugins
            .iter()
            .filter_map(|p| p.origin_key.clone().map(|key| (key, p.id)))
            .collect();

        Catalog {
            labels: labels.into_iter().map(|l| (l.id, l)).collect(),
            label_names,
            plugins: plugins.into_iter().map(|p| (p.id, p)).collect(),
            plugin_origins,
        }
    }

    pub async fn load<S: Store>(store: &S) -> Result<Self, StoreError> {
        let mut tx = store.begin().await?;
        let labels = tx.labels().await?;
        let plugins = tx.plugins().await?;
        tx.commit().await?;

        info!(labels = labels.len(), plugins = plugins.len(), "Loaded catalog");
        Ok(Catalog::new(labels, plugins))
    }

    pub fn label(&self, id: Uuid) -> Option<&MLabel> {
        self.labels.get(&id)
    }

    pub fn label_id(&self, name: &str) -> Option<Uuid> {
        self.label_names.get(name).copied()
    }

    pub fn plugin(&self, id: Uuid) -> Option<&MPlugin> {
        self.plugins.get(&id)
    }

    pub fn plugin_by_origin(&self, origin_key: &str) -> Option<&MPlugin> {
        self.plugin_origins
            .get(origin_key)
            .and_then(|id| self.plugins.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let gpu = MLabel {
            id: Uuid::new_v4(),
            name: "gpu".to_string(),
        };
        let mesh = MPlugin {
            id: Uuid::new_v4(),
            name: "Service Mesh".to_string(),
            category: "net-plugin:up".to_string(),
            build_version: "1.2".to_string(),
            origin_key: Some("mesh".to_string()),
        };
        let local = MPlugin {
            id: Uuid::new_v4(),
            name: "Local".to_string(),
            category: "analyst-plugin:perf".to_string(),
            build_version: "1".to_string(),
            origin_key: None,
        };

        let catalog = Catalog::new(vec![gpu.clone()], vec![mesh.clone(), local.clone()]);

        assert_eq!(catalog.label(gpu.id), Some(&gpu));
        assert_eq!(catalog.label_id("gpu"), Some(gpu.id));
        assert_eq!(catalog.label_id("ssd"), None);
        assert_eq!(catalog.plugin_by_origin("mesh"), Some(&mesh));
        assert_eq!(catalog.plugin(local.id), Some(&local));
    }
}
