/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! In-process store used for seeding and scenario tests.
//!
//! A transaction holds the store lock from `begin` until it is committed or
//! dropped, so transactions run one after another. Writes go to a working
//! copy that replaces the shared data on commit.

use async_trait::async_trait;
use common::types::*;
use entity::upgrade_record::RecordType;
use sea_orm::DbErr;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{RecordFilter, Store, StoreError, StoreTx};
use crate::graph::{GraphWrite, OriginalApp};

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub applications: Vec<MApplication>,
    pub regions: Vec<MRegion>,
    pub component_groups: Vec<MComponentGroup>,
    pub components: Vec<MComponent>,
    pub dependencies: Vec<MComponentDependency>,
    pub volume_dependencies: Vec<MVolumeDependency>,
    pub plugins: Vec<MComponentPlugin>,
    pub config_groups: Vec<MConfigGroup>,
    pub labels: Vec<MLabel>,
    pub catalog_plugins: Vec<MPlugin>,
    pub templates: Vec<MAppTemplate>,
    pub records: Vec<MUpgradeRecord>,
    pub component_records: Vec<MComponentUpgradeRecord>,
    pub snapshots: Vec<MUpgradeSnapshot>,
}

impl MemoryData {
    fn unfinished_conflict(&self, record: &MUpgradeRecord) -> bool {
        !record.is_finished()
            && self.records.iter().any(|r| {
                r.id != record.id
                    && !r.is_finished()
                    && r.tenant_env == record.tenant_env
                    && r.application == record.application
                    && r.upgrade_group == record.upgrade_group
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<MemoryData>>,
    fail_graph_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new(data: MemoryData) -> Self {
        MemoryStore {
            data: Arc::new(Mutex::new(data)),
            fail_graph_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Committed state.
    pub async fn data(&self) -> MemoryData {
        self.data.lock().await.clone()
    }

    /// Makes every following `save_graph` fail.
    pub fn fail_graph_writes(&self, fail: bool) {
        self.fail_graph_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, StoreError> {
        let guard = self.data.clone().lock_owned().await;
        let work = guard.clone();
        Ok(MemoryTx {
            guard,
            work,
            fail_graph_writes: self.fail_graph_writes.load(Ordering::SeqCst),
        })
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryData>,
    work: MemoryData,
    fail_graph_writes: bool,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn commit(mut self) -> Result<(), StoreError> {
        *self.guard = self.work;
        Ok(())
    }

    async fn application(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MApplication>, StoreError> {
        Ok(self
            .work
            .applications
            .iter()
            .find(|a| a.id == id && a.tenant_env == tenant_env)
            .cloned())
    }

    async fn region(&mut self, name: &str) -> Result<Option<MRegion>, StoreError> {
        Ok(self.work.regions.iter().find(|r| r.name == name).cloned())
    }

    async fn component_group(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponentGroup>, StoreError> {
        Ok(self
            .work
            .component_groups
            .iter()
            .find(|g| g.id == id && g.application == application)
            .cloned())
    }

    async fn component(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponent>, StoreError> {
        Ok(self
            .work
            .components
            .iter()
            .find(|c| c.id == id && c.application == application)
            .cloned())
    }

    async fn template(&mut self, group_key: &str, version: &str) -> Result<Option<MAppTemplate>, StoreError> {
        Ok(self
            .work
            .templates
            .iter()
            .find(|t| t.group_key == group_key && t.version == version)
            .cloned())
    }

    async fn template_versions(&mut self, group_key: &str) -> Result<Vec<MAppTemplate>, StoreError> {
        Ok(self
            .work
            .templates
            .iter()
            .filter(|t| t.group_key == group_key)
            .cloned()
            .collect())
    }

    async fn original_app(&mut self, application: &MApplication, group: &MComponentGroup) -> Result<OriginalApp, StoreError> {
        let app_ids: HashSet<Uuid> = self
            .work
            .components
            .iter()
            .filter(|c| c.application == application.id)
            .map(|c| c.id)
            .collect();
        let components: Vec<MComponent> = self
            .work
            .components
            .iter()
            .filter(|c| c.application == application.id && c.component_group == group.id)
            .cloned()
            .collect();
        let group_ids: HashSet<Uuid> = components.iter().map(|c| c.id).collect();

        Ok(OriginalApp {
            application: application.clone(),
            group: group.clone(),
            components,
            dependencies: self
                .work
                .dependencies
                .iter()
                .filter(|d| app_ids.contains(&d.component))
                .cloned()
                .collect(),
            volume_dependencies: self
                .work
                .volume_dependencies
                .iter()
                .filter(|d| app_ids.contains(&d.component))
                .cloned()
                .collect(),
            plugins: self
                .work
                .plugins
                .iter()
                .filter(|p| group_ids.contains(&p.component))
                .cloned()
                .collect(),
            config_groups: self
                .work
                .config_groups
                .iter()
                .filter(|g| g.application == application.id)
                .cloned()
                .collect(),
        })
    }

    async fn save_graph(&mut self, graph: &GraphWrite) -> Result<(), StoreError> {
        if self.fail_graph_writes {
            return Err(DbErr::Custom("graph writes disabled".to_string()).into());
        }

        let work = &mut self.work;
        for component in &graph.components {
            match work.components.iter_mut().find(|c| c.id == component.id) {
                Some(existing) => *existing = component.clone(),
                None => work.components.push(component.clone()),
            }
        }

        let deleted: HashSet<Uuid> = graph.delete_component_ids.iter().copied().collect();
        work.components.retain(|c| !deleted.contains(&c.id));
        work.plugins.retain(|p| !deleted.contains(&p.component));

        let app_ids: HashSet<Uuid> = work
            .components
            .iter()
            .filter(|c| c.application == graph.application)
            .map(|c| c.id)
            .collect();
        work.dependencies.retain(|d| {
            !app_ids.contains(&d.component) && !deleted.contains(&d.component) && !deleted.contains(&d.dependency)
        });
        work.dependencies.extend(graph.dependencies.iter().cloned());
        work.volume_dependencies.retain(|d| {
            !app_ids.contains(&d.component) && !deleted.contains(&d.component) && !deleted.contains(&d.dependency)
        });
        work.volume_dependencies.extend(graph.volume_dependencies.iter().cloned());

        let rebound: HashSet<Uuid> = graph.plugin_components.iter().copied().collect();
        work.plugins.retain(|p| !rebound.contains(&p.component));
        work.plugins.extend(graph.plugins.iter().cloned());

        for group in &graph.config_groups {
            match work.config_groups.iter_mut().find(|g| g.id == group.id) {
                Some(existing) => *existing = group.clone(),
                None => work.config_groups.push(group.clone()),
            }
        }

        match work.component_groups.iter_mut().find(|g| g.id == graph.group.id) {
            Some(existing) => *existing = graph.group.clone(),
            None => return Err(DbErr::RecordNotFound(graph.group.id.to_string()).into()),
        }

        Ok(())
    }

    async fn insert_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError> {
        if self.work.unfinished_conflict(record) {
            return Err(StoreError::Conflict(format!(
                "unfinished record exists for group {}",
                record.upgrade_group
            )));
        }

        self.work.records.push(record.clone());
        Ok(())
    }

    async fn update_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError> {
        if self.work.unfinished_conflict(record) {
            return Err(StoreError::Conflict(format!(
                "unfinished record exists for group {}",
                record.upgrade_group
            )));
        }

        match self.work.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DbErr::RecordNotFound(record.id.to_string()).into()),
        }
    }

    async fn record(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MUpgradeRecord>, StoreError> {
        Ok(self
            .work
            .records
            .iter()
            .find(|r| r.id == id && r.tenant_env == tenant_env)
            .cloned())
    }

    async fn last_record(&mut self, tenant_env: Uuid, application: Uuid, filter: RecordFilter) -> Result<Option<MUpgradeRecord>, StoreError> {
        Ok(self
            .work
            .records
            .iter()
            .filter(|r| r.tenant_env == tenant_env && r.application == application)
            .filter(|r| filter.upgrade_group.is_none_or(|g| r.upgrade_group == g))
            .filter(|r| filter.record_type.is_none_or(|t| r.record_type == t))
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn list_records(
        &mut self,
        tenant_env: Uuid,
        application: Uuid,
        record_type: Option<RecordType>,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<MUpgradeRecord>, u64), StoreError> {
        let mut records: Vec<MUpgradeRecord> = self
            .work
            .records
            .iter()
            .filter(|r| r.tenant_env == tenant_env && r.application == application)
            .filter(|r| record_type.is_none_or(|t| r.record_type == t))
            .cloned()
            .collect();
        // Insertion order breaks ties between equal timestamps.
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = records.len() as u64;
        let page_size = page_size.max(1);
        let skip = page.saturating_sub(1).saturating_mul(page_size);
        let items = records
            .into_iter()
            .skip(skip as usize)
            .take(page_size as usize)
            .collect();

        Ok((items, total))
    }

    async fn rollback_records(&mut self, parent: Uuid) -> Result<Vec<MUpgradeRecord>, StoreError> {
        let mut records: Vec<MUpgradeRecord> = self
            .work
            .records
            .iter()
            .filter(|r| r.parent == Some(parent) && r.record_type == RecordType::Rollback)
            .cloned()
            .collect();
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn component_records(&mut self, upgrade_record: Uuid) -> Result<Vec<MComponentUpgradeRecord>, StoreError> {
        Ok(self
            .work
            .component_records
            .iter()
            .filter(|r| r.upgrade_record == upgrade_record)
            .cloned()
            .collect())
    }

    async fn insert_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError> {
        self.work.component_records.extend(records.iter().cloned());
        Ok(())
    }

    async fn update_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError> {
        for record in records {
            match self.work.component_records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => return Err(DbErr::RecordNotFound(record.id.to_string()).into()),
            }
        }
        Ok(())
    }

    async fn insert_snapshot(&mut self, snapshot: &MUpgradeSnapshot) -> Result<(), StoreError> {
        self.work.snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn snapshot(&mut self, tenant_env: Uuid, upgrade_group: Uuid, id: Uuid) -> Result<Option<MUpgradeSnapshot>, StoreError> {
        Ok(self
            .work
            .snapshots
            .iter()
            .find(|s| s.id == id && s.tenant_env == tenant_env && s.upgrade_group == upgrade_group)
            .cloned())
    }

    async fn labels(&mut self) -> Result<Vec<MLabel>, StoreError> {
        Ok(self.work.labels.clone())
    }

    async fn plugins(&mut self) -> Result<Vec<MPlugin>, StoreError> {
        Ok(self.work.catalog_plugins.clone())
    }
}
