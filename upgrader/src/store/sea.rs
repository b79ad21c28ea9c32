/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use async_trait::async_trait;
use common::types::*;
use entity::upgrade_record::RecordType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::{RecordFilter, Store, StoreError, StoreTx};
use crate::graph::{GraphWrite, OriginalApp};

fn write_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => StoreError::Conflict(message),
        _ => StoreError::Database(err),
    }
}

#[derive(Debug, Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        SeaStore { db }
    }
}

#[async_trait]
impl Store for SeaStore {
    type Tx = SeaTx;

    async fn begin(&self) -> Result<SeaTx, StoreError> {
        Ok(SeaTx {
            txn: self.db.begin().await?,
        })
    }
}

pub struct SeaTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl StoreTx for SeaTx {
    async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn application(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MApplication>, StoreError> {
        Ok(EApplication::find_by_id(id)
            .filter(CApplication::TenantEnv.eq(tenant_env))
            .one(&self.txn)
            .await?)
    }

    async fn region(&mut self, name: &str) -> Result<Option<MRegion>, StoreError> {
        Ok(ERegion::find()
            .filter(CRegion::Name.eq(name))
            .one(&self.txn)
            .await?)
    }

    async fn component_group(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponentGroup>, StoreError> {
        Ok(EComponentGroup::find_by_id(id)
            .filter(CComponentGroup::Application.eq(application))
            .one(&self.txn)
            .await?)
    }

    async fn component(&mut self, application: Uuid, id: Uuid) -> Result<Option<MComponent>, StoreError> {
        Ok(EComponent::find_by_id(id)
            .filter(CComponent::Application.eq(application))
            .one(&self.txn)
            .await?)
    }

    async fn template(&mut self, group_key: &str, version: &str) -> Result<Option<MAppTemplate>, StoreError> {
        Ok(EAppTemplate::find()
            .filter(
                Condition::all()
                    .add(CAppTemplate::GroupKey.eq(group_key))
                    .add(CAppTemplate::Version.eq(version)),
            )
            .one(&self.txn)
            .await?)
    }

    async fn template_versions(&mut self, group_key: &str) -> Result<Vec<MAppTemplate>, StoreError> {
        Ok(EAppTemplate::find()
            .filter(CAppTemplate::GroupKey.eq(group_key))
            .all(&self.txn)
            .await?)
    }

    async fn original_app(&mut self, application: &MApplication, group: &MComponentGroup) -> Result<OriginalApp, StoreError> {
        let app_components = EComponent::find()
            .filter(CComponent::Application.eq(application.id))
            .order_by_asc(CComponent::CreatedAt)
            .all(&self.txn)
            .await?;
        let app_ids: Vec<Uuid> = app_components.iter().map(|c| c.id).collect();
        let components: Vec<MComponent> = app_components
            .into_iter()
            .filter(|c| c.component_group == group.id)
            .collect();
        let group_ids: Vec<Uuid> = components.iter().map(|c| c.id).collect();

        let dependencies = EComponentDependency::find()
            .filter(CComponentDependency::Component.is_in(app_ids.clone()))
            .all(&self.txn)
            .await?;
        let volume_dependencies = EVolumeDependency::find()
            .filter(CVolumeDependency::Component.is_in(app_ids))
            .all(&self.txn)
            .await?;
        let plugins = EComponentPlugin::find()
            .filter(CComponentPlugin::Component.is_in(group_ids))
            .all(&self.txn)
            .await?;
        let config_groups = EConfigGroup::find()
            .filter(CConfigGroup::Application.eq(application.id))
            .all(&self.txn)
            .await?;

        Ok(OriginalApp {
            application: application.clone(),
            group: group.clone(),
            components,
            dependencies,
            volume_dependencies,
            plugins,
            config_groups,
        })
    }

    async fn save_graph(&mut self, graph: &GraphWrite) -> Result<(), StoreError> {
        for component in &graph.components {
            let active = component.clone().into_active_model().reset_all();
            if EComponent::find_by_id(component.id).one(&self.txn).await?.is_some() {
                active.update(&self.txn).await?;
            } else {
                EComponent::insert(active).exec(&self.txn).await?;
            }
        }

        if !graph.delete_component_ids.is_empty() {
            let deleted = graph.delete_component_ids.clone();
            EComponentDependency::delete_many()
                .filter(
                    Condition::any()
                        .add(CComponentDependency::Component.is_in(deleted.clone()))
                        .add(CComponentDependency::Dependency.is_in(deleted.clone())),
                )
                .exec(&self.txn)
                .await?;
            EVolumeDependency::delete_many()
                .filter(
                    Condition::any()
                        .add(CVolumeDependency::Component.is_in(deleted.clone()))
                        .add(CVolumeDependency::Dependency.is_in(deleted.clone())),
                )
                .exec(&self.txn)
                .await?;
            EComponentPlugin::delete_many()
                .filter(CComponentPlugin::Component.is_in(deleted.clone()))
                .exec(&self.txn)
                .await?;
            EComponent::delete_many()
                .filter(CComponent::Id.is_in(deleted))
                .exec(&self.txn)
                .await?;
        }

        let app_ids: Vec<Uuid> = EComponent::find()
            .filter(CComponent::Application.eq(graph.application))
            .all(&self.txn)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        EComponentDependency::delete_many()
            .filter(CComponentDependency::Component.is_in(app_ids.clone()))
            .exec(&self.txn)
            .await?;
        if !graph.dependencies.is_empty() {
            let models: Vec<AComponentDependency> = graph
                .dependencies
                .iter()
                .map(|d| d.clone().into_active_model().reset_all())
                .collect();
            EComponentDependency::insert_many(models).exec(&self.txn).await?;
        }

        EVolumeDependency::delete_many()
            .filter(CVolumeDependency::Component.is_in(app_ids))
            .exec(&self.txn)
            .await?;
        if !graph.volume_dependencies.is_empty() {
            let models: Vec<AVolumeDependency> = graph
                .volume_dependencies
                .iter()
                .map(|d| d.clone().into_active_model().reset_all())
                .collect();
            EVolumeDependency::insert_many(models).exec(&self.txn).await?;
        }

        EComponentPlugin::delete_many()
            .filter(CComponentPlugin::Component.is_in(graph.plugin_components.clone()))
            .exec(&self.txn)
            .await?;
        if !graph.plugins.is_empty() {
            let models: Vec<AComponentPlugin> = graph
                .plugins
                .iter()
                .map(|p| p.clone().into_active_model().reset_all())
                .collect();
            EComponentPlugin::insert_many(models).exec(&self.txn).await?;
        }

        let existing_groups: HashSet<Uuid> = EConfigGroup::find()
            .filter(CConfigGroup::Application.eq(graph.application))
            .all(&self.txn)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        for group in &graph.config_groups {
            let active = group.clone().into_active_model().reset_all();
            if existing_groups.contains(&group.id) {
                active.update(&self.txn).await?;
            } else {
                EConfigGroup::insert(active).exec(&self.txn).await?;
            }
        }

        graph.group.clone().into_active_model().reset_all().update(&self.txn).await?;

        debug!(
            components = graph.components.len(),
            deleted = graph.delete_component_ids.len(),
            dependencies = graph.dependencies.len(),
            "Saved component graph"
        );
        Ok(())
    }

    async fn insert_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError> {
        EUpgradeRecord::insert(record.clone().into_active_model().reset_all())
            .exec(&self.txn)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn update_record(&mut self, record: &MUpgradeRecord) -> Result<(), StoreError> {
        record
            .clone()
            .into_active_model()
            .reset_all()
            .update(&self.txn)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn record(&mut self, tenant_env: Uuid, id: Uuid) -> Result<Option<MUpgradeRecord>, StoreError> {
        Ok(EUpgradeRecord::find_by_id(id)
            .filter(CUpgradeRecord::TenantEnv.eq(tenant_env))
            .one(&self.txn)
            .await?)
    }

    async fn last_record(&mut self, tenant_env: Uuid, application: Uuid, filter: RecordFilter) -> Result<Option<MUpgradeRecord>, StoreError> {
        let mut condition = Condition::all()
            .add(CUpgradeRecord::TenantEnv.eq(tenant_env))
            .add(CUpgradeRecord::Application.eq(application));
        if let Some(group) = filter.upgrade_group {
            condition = condition.add(CUpgradeRecord::UpgradeGroup.eq(group));
        }
        if let Some(record_type) = filter.record_type {
            condition = condition.add(CUpgradeRecord::RecordType.eq(record_type));
        }

        Ok(EUpgradeRecord::find()
            .filter(condition)
            .order_by_desc(CUpgradeRecord::CreatedAt)
            .one(&self.txn)
            .await?)
    }

    async fn list_records(
        &mut self,
        tenant_env: Uuid,
        application: Uuid,
        record_type: Option<RecordType>,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<MUpgradeRecord>, u64), StoreError> {
        let mut condition = Condition::all()
            .add(CUpgradeRecord::TenantEnv.eq(tenant_env))
            .add(CUpgradeRecord::Application.eq(application));
        if let Some(record_type) = record_type {
            condition = condition.add(CUpgradeRecord::RecordType.eq(record_type));
        }

        let paginator = EUpgradeRecord::find()
            .filter(condition)
            .order_by_desc(CUpgradeRecord::CreatedAt)
            .paginate(&self.txn, page_size.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }

    async fn rollback_records(&mut self, parent: Uuid) -> Result<Vec<MUpgradeRecord>, StoreError> {
        Ok(EUpgradeRecord::find()
            .filter(
                Condition::all()
                    .add(CUpgradeRecord::Parent.eq(parent))
                    .add(CUpgradeRecord::RecordType.eq(RecordType::Rollback)),
            )
            .order_by_desc(CUpgradeRecord::CreatedAt)
            .all(&self.txn)
            .await?)
    }

    async fn component_records(&mut self, upgrade_record: Uuid) -> Result<Vec<MComponentUpgradeRecord>, StoreError> {
        Ok(EComponentUpgradeRecord::find()
            .filter(CComponentUpgradeRecord::UpgradeRecord.eq(upgrade_record))
            .order_by_asc(CComponentUpgradeRecord::CreatedAt)
            .all(&self.txn)
            .await?)
    }

    async fn insert_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let models: Vec<AComponentUpgradeRecord> = records
            .iter()
            .map(|r| r.clone().into_active_model().reset_all())
            .collect();
        EComponentUpgradeRecord::insert_many(models).exec(&self.txn).await?;
        Ok(())
    }

    async fn update_component_records(&mut self, records: &[MComponentUpgradeRecord]) -> Result<(), StoreError> {
        for record in records {
            record.clone().into_active_model().reset_all().update(&self.txn).await?;
        }
        Ok(())
    }

    async fn insert_snapshot(&mut self, snapshot: &MUpgradeSnapshot) -> Result<(), StoreError> {
        EUpgradeSnapshot::insert(snapshot.clone().into_active_model().reset_all())
            .exec(&self.txn)
            .await?;
        Ok(())
    }

    async fn snapshot(&mut self, tenant_env: Uuid, upgrade_group: Uuid, id: Uuid) -> Result<Option<MUpgradeSnapshot>, StoreError> {
        Ok(EUpgradeSnapshot::find_by_id(id)
            .filter(
                Condition::all()
                    .add(CUpgradeSnapshot::TenantEnv.eq(tenant_env))
                    .add(CUpgradeSnapshot::UpgradeGroup.eq(upgrade_group)),
            )
            .one(&self.txn)
            .await?)
    }

    async fn labels(&mut self) -> Result<Vec<MLabel>, StoreError> {
        Ok(ELabel::find().all(&self.txn).await?)
    }

    async fn plugins(&mut self) -> Result<Vec<MPlugin>, StoreError> {
        Ok(EPlugin::find().all(&self.txn).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use entity::upgrade_record::UpgradeStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn record(status: UpgradeStatus) -> MUpgradeRecord {
        let now = Utc::now().naive_utc();
        MUpgradeRecord {
            id: Uuid::new_v4(),
            tenant_env: Uuid::new_v4(),
            application: Uuid::new_v4(),
            upgrade_group: Uuid::new_v4(),
            group_key: "wordpress".to_string(),
            group_name: "WordPress".to_string(),
            version: "1.0".to_string(),
            old_version: "1.0".to_string(),
            status,
            record_type: RecordType::Upgrade,
            snapshot: None,
            parent: None,
            is_from_cloud: false,
            market_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_record_lookup() {
        let expected = record(UpgradeStatus::Upgrading);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![expected.clone()]])
            .into_connection();

        let store = SeaStore::new(db);
        let mut tx = store.begin().await.unwrap();
        let found = tx.record(expected.tenant_env, expected.id).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn test_missing_snapshot() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<MUpgradeSnapshot>::new()])
            .into_connection();

        let store = SeaStore::new(db);
        let mut tx = store.begin().await.unwrap();
        let found = tx
            .snapshot(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_empty_component_records_skip_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let store = SeaStore::new(db);
        let mut tx = store.begin().await.unwrap();
        tx.insert_component_records(&[]).await.unwrap();
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        let err = DbErr::Custom("boom".to_string());
        assert!(matches!(write_error(err), StoreError::Database(_)));
    }
}
