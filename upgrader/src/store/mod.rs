/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Persistence boundary of the orchestrator.
//!
//! Every public orchestrator operation opens one [`StoreTx`] and commits it
//! once. Dropping a transaction without committing discards its writes.

pub mod memory;
pub mod sea;

pub use memory::MemoryStore;
pub use sea::SeaStore;

use async_trait::async_trait;
use common::types::*;
use entity::upgrade_record::RecordType;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::graph::{GraphWrite, OriginalApp};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("conflicting write: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Filter for the latest record of an application.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilter {
    pub upgrade_group: Option<Uuid>,
    pub record_type: Option<RecordType>,
}

#[async_trait]
pub trait Store: Send + Sync + 'static {
    type Tx: StoreTx;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;
}

#[async_trait]
pub trait StoreTx: Send {
    async fn commit(self) -> Result<(), StoreError>;

    async fn application(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MApplication>, StoreError>;
    async fn region(&mut self, name: &str) -> Result<Option<MRegion>, StoreError>;
    async fn component_group(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponentGroup>, StoreError>;
    async fn component(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponent>, StoreError>;
    async fn template(&mut self, group_key: &str, version: &str) -> Result<Option<MAppTemplate>, StoreError>;
    async fn template_versions(&mut self, group_key: &str) -> Result<Vec<MAppTemplate>, StoreError>;

    /// Installed graph of `group` together with the application wide
    /// dependency edges and config groups.
    async fn original_app(&mut self, application: &MApplication, group: &MComponentGroup) -> Result<OriginalApp, StoreError>;
    async fn save_graph(&mut self, graph: &GraphWrite) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Conflict`] when the scope already holds an
    /// unfinished record.
    async fn insert_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError>;
    async fn update_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError>;
    async fn record(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MUpgradeRecord>, StoreError>;
    async fn last_record(&mut self, tenant_env: Uuid, application: Uuid, filter: RecordFilter) -> Result<Option<MUpgradeRecord>, StoreError>;
    /// Newest first; `page` starts at 1.
    async fn list_records(
        &mut self,
        tenant_env: Uuid,
        application: Uuid,
        record_type: Option<RecordType>,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<MUpgradeRecord>, u64), StoreError>;
    async fn rollback_records(&mut self, parent: Uuid) -> Result<Vec<MUpgradeRecord>, StoreError>;

    async fn component_records(&mut self, upgrade_record: Uuid) -> Result<Vec<MComponentUpgradeRecord>, StoreError>;
    async fn insert_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError>;
    async fn update_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError>;

    async fn insert_snapshot(&mut self, snapshot: &MUpgradeSnapshot) -> Result<(), StoreError>;
    async fn snapshot(&mut self, tenant_env: Uuid, upgrade_group: Uuid, id: Uuid) -> Result<Option<MUpgradeSnapshot>, StoreError>;

    async fn labels(&mut self) -> Result<Vec<MLabel>, StoreError>;
    async fn plugins(&mut self) -> Result<Vec<MPlugin>, StoreError>;
}
