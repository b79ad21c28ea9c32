/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDateTime, Utc};
use common::types::*;
use entity::component_upgrade_record::UpgradeType;
use entity::upgrade_record::{RecordType, UpgradeStatus};
use region::components::SyncComponentsBody;
use region::config_groups::SyncConfigGroupsBody;
use region::operations::{BatchOperation, BatchResultItem, DeployInfo};
use region::{Outcome, RegionApi, RegionError, RegionTarget};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::changes::ComponentChanges;
use crate::error::UpgradeError;
use crate::graph::{ComponentAction, GraphWrite, NewApp};
use crate::market::MarketApp;
use crate::plan::{RestorePlanner, UpgradePlanner};
use crate::snapshot::SnapshotData;
use crate::status::success_status;
use crate::store::{RecordFilter, Store, StoreError, StoreTx};
use crate::sync::sync_record;
use crate::template::AppTemplate;
use crate::version::{Candidate, upgradeable_versions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    #[serde(flatten)]
    pub record: MUpgradeRecord,
    pub component_records: Vec<MComponentUpgradeRecord>,
}

/// Planned change of one template component, without touching anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentPreview {
    pub component_key: String,
    pub name: String,
    pub upgrade_type: UpgradeType,
    pub current_version: Option<String>,
    pub action: ComponentAction,
    pub changes: ComponentChanges,
}

pub struct Orchestrator<S, R> {
    store: S,
    region: R,
    catalog: Arc<Catalog>,
}

fn outcome<T>(result: Result<Outcome<T>, RegionError>) -> Result<T, String> {
    result.map_err(|e| e.to_string())?.into_result()
}

fn conflict_as_unfinished(err: StoreError) -> UpgradeError {
    match err {
        StoreError::Conflict(_) => UpgradeError::LastRecordUnfinished,
        other => other.into(),
    }
}

async fn load_application<T: StoreTx>(tx: &mut T, tenant_env: Uuid, application: Uuid) -> Result<MApplication, UpgradeError> {
    tx.application(tenant_env, application)
        .await?
        .ok_or_else(|| UpgradeError::NotFound(format!("application {}", application)))
}

async fn load_group<T: StoreTx>(tx: &mut T, application: Uuid, group: Uuid) -> Result<MComponentGroup, UpgradeError> {
    tx.component_group(application, group)
        .await?
        .ok_or_else(|| UpgradeError::NotFound(format!("component group {}", group)))
}

async fn load_record<T: StoreTx>(tx: &mut T, tenant_env: Uuid, id: Uuid) -> Result<MUpgradeRecord, UpgradeError> {
    tx.record(tenant_env, id).await?.ok_or(UpgradeError::RecordNotFound(id))
}

async fn load_template<T: StoreTx>(tx: &mut T, group_key: &str, version: &str) -> Result<AppTemplate, UpgradeError> {
    let template = tx
        .template(group_key, version)
        .await?
        .ok_or_else(|| UpgradeError::NotFound(format!("version {} of template {}", version, group_key)))?;

    AppTemplate::parse(&template.template)
}

async fn region_target<T: StoreTx>(tx: &mut T, application: &MApplication) -> Result<RegionTarget, UpgradeError> {
    let region = tx
        .region(&application.region_name)
        .await?
        .ok_or_else(|| UpgradeError::NotFound(format!("region {}", application.region_name)))?;

    Ok(RegionTarget {
        region_name: region.name,
        url: region.url,
        token: region.token,
        tenant_name: application.tenant_name.clone(),
    })
}

async fn persist<T: StoreTx>(tx: &mut T, snapshot: Option<&MUpgradeSnapshot>, graph: &GraphWrite) -> Result<(), StoreError> {
    if let Some(snapshot) = snapshot {
        tx.insert_snapshot(snapshot).await?;
    }
    tx.save_graph(graph).await
}

/// One component record per planned component. Components the region did
/// not accept are recorded as failed deployments so `deploy` retries them.
/// After a rejected batch no submitted component is left outstanding, since
/// a failed record is never synced again.
fn component_records(
    record: &MUpgradeRecord,
    new: &NewApp,
    results: &[BatchResultItem],
    rejected: bool,
    now: NaiveDateTime,
) -> Vec<MComponentUpgradeRecord> {
    let events: HashMap<Uuid, &str> = results
        .iter()
        .filter_map(|item| item.event_id().map(|event| (item.service_id, event)))
        .collect();

    new.components
        .iter()
        .map(|planned| {
            let (event_id, status) = match planned.action {
                ComponentAction::Nothing => (None, success_status(record.record_type)),
                _ => match events.get(&planned.component.id) {
                    Some(event) if !rejected => (Some(event.to_string()), record.in_progress_status()),
                    event => (event.map(|e| e.to_string()), UpgradeStatus::DeployFailed),
                },
            };

            MComponentUpgradeRecord {
                id: Uuid::new_v4(),
                upgrade_record: record.id,
                component: planned.component.id,
                component_name: planned.component.name.clone(),
                upgrade_type: planned.upgrade_type,
                event_id,
                status,
                update: planned.changes.to_json(),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

impl<S: Store, R: RegionApi> Orchestrator<S, R> {
    pub fn new(store: S, region: R, catalog: Arc<Catalog>) -> Self {
        Orchestrator {
            store,
            region,
            catalog,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Opens an upgrade record for a component group. Only one unfinished
    /// record may exist per group.
    #[instrument(skip(self))]
    pub async fn create_upgrade(&self, tenant_env: Uuid, application: Uuid, upgrade_group: Uuid) -> Result<MUpgradeRecord, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let app = load_application(&mut tx, tenant_env, application).await?;
        let group = load_group(&mut tx, app.id, upgrade_group).await?;

        let filter = RecordFilter {
            upgrade_group: Some(group.id),
            record_type: None,
        };
        if let Some(last) = tx.last_record(tenant_env, app.id, filter).await? {
            if !last.is_finished() {
                return Err(UpgradeError::LastRecordUnfinished);
            }
        }

        let now = Utc::now().naive_utc();
        let record = MUpgradeRecord {
            id: Uuid::new_v4(),
            tenant_env,
            application: app.id,
            upgrade_group: group.id,
            group_key: group.group_key.clone(),
            group_name: group.group_name.clone(),
            version: group.version.clone(),
            old_version: group.version.clone(),
            status: UpgradeStatus::Not,
            record_type: RecordType::Upgrade,
            snapshot: None,
            parent: None,
            is_from_cloud: group.is_from_cloud,
            market_name: group.market_name.clone(),
            created_at: now,
            updated_at: now,
        };

        tx.insert_record(&record).await.map_err(conflict_as_unfinished)?;
        tx.commit().await?;

        info!(record = %record.id, "Created upgrade record");
        Ok(record)
    }

    /// Upgrades the group of `record_id` to `version`, optionally restricted
    /// to the template components in `component_keys`.
    #[instrument(skip(self, component_keys), fields(record = %record_id))]
    pub async fn upgrade(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        version: &str,
        record_id: Uuid,
        component_keys: Option<Vec<String>>,
    ) -> Result<MUpgradeRecord, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let mut record = load_record(&mut tx, tenant_env, record_id).await?;
        if record.application != application {
            return Err(UpgradeError::RecordNotFound(record_id));
        }
        if !record.can_upgrade() {
            return Err(UpgradeError::RecordCanNotUpgrade(record.status));
        }

        let app = load_application(&mut tx, tenant_env, application).await?;
        let group = load_group(&mut tx, app.id, record.upgrade_group).await?;
        let template = load_template(&mut tx, &group.group_key, version).await?;
        let original = tx.original_app(&app, &group).await?;
        let now = Utc::now().naive_utc();

        let new = UpgradePlanner {
            catalog: &self.catalog,
            original: &original,
            template: &template,
            version,
            component_keys: component_keys.as_deref(),
            single_component: false,
            now,
        }
        .plan()?;

        let market = MarketApp::new(&self.catalog, &original, &new);
        let components_body = market.sync_body()?;
        let groups_body = market.config_groups_body();
        let target = region_target(&mut tx, &app).await?;

        if let Err(reason) = self.sync_region(&target, &app, &components_body, &groups_body).await {
            drop(tx);
            warn!(%reason, "Region rejected the upgraded graph");
            record.status = UpgradeStatus::DeployFailed;
            record.updated_at = now;
            self.save_record(&record).await?;
            return Err(UpgradeError::Submission(reason));
        }

        let snapshot = SnapshotData::capture(&original, &new).into_model(tenant_env, group.id, now)?;
        if let Err(e) = persist(&mut tx, Some(&snapshot), &new.graph_write()).await {
            drop(tx);
            error!(error = %e, "Failed to save upgraded graph");
            self.revert_region(&target, &app, &market).await;
            record.status = UpgradeStatus::UpgradeFailed;
            record.updated_at = now;
            self.save_record(&record).await?;
            return Err(e.into());
        }

        let (results, failure) = self.submit_operations(&target, [market.builds(), market.upgrades()]).await;
        let components = component_records(&record, &new, &results, failure.is_some(), now);

        record.status = match failure {
            Some(_) => UpgradeStatus::DeployFailed,
            None => record.in_progress_status(),
        };
        record.snapshot = Some(snapshot.id);
        record.version = version.to_string();
        record.old_version = original.group.version.clone();
        record.updated_at = now;

        tx.update_record(&record).await?;
        tx.insert_component_records(&components).await?;
        tx.commit().await?;

        match failure {
            Some(reason) => Err(UpgradeError::Submission(reason)),
            None => {
                info!(components = components.len(), "Submitted upgrade");
                Ok(record)
            }
        }
    }

    /// Upgrades a single installed component to its definition in `version`
    /// without recording an upgrade.
    #[instrument(skip(self))]
    pub async fn upgrade_component(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        component: Uuid,
        version: &str,
    ) -> Result<Vec<BatchResultItem>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let app = load_application(&mut tx, tenant_env, application).await?;
        let installed = tx
            .component(app.id, component)
            .await?
            .ok_or_else(|| UpgradeError::NotFound(format!("component {}", component)))?;
        let group = load_group(&mut tx, app.id, installed.component_group).await?;
        let template = load_template(&mut tx, &group.group_key, version).await?;
        let original = tx.original_app(&app, &group).await?;
        let keys = vec![installed.component_key.clone()];

        let new = UpgradePlanner {
            catalog: &self.catalog,
            original: &original,
            template: &template,
            version,
            component_keys: Some(keys.as_slice()),
            single_component: true,
            now: Utc::now().naive_utc(),
        }
        .plan()?;

        let market = MarketApp::new(&self.catalog, &original, &new);
        let components_body = market.sync_body()?;
        let groups_body = market.config_groups_body();
        let target = region_target(&mut tx, &app).await?;

        self.sync_region(&target, &app, &components_body, &groups_body)
            .await
            .map_err(UpgradeError::Submission)?;

        if let Err(e) = persist(&mut tx, None, &new.graph_write()).await {
            drop(tx);
            error!(error = %e, "Failed to save upgraded component");
            self.revert_region(&target, &app, &market).await;
            return Err(e.into());
        }

        let (results, failure) = self.submit_operations(&target, [market.builds(), market.upgrades()]).await;
        tx.commit().await?;

        match failure {
            Some(reason) => Err(UpgradeError::Submission(reason)),
            None => Ok(results),
        }
    }

    /// Resubmits the failed components of a finished record.
    #[instrument(skip(self))]
    pub async fn deploy(&self, tenant_env: Uuid, record_id: Uuid) -> Result<MUpgradeRecord, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let mut record = load_record(&mut tx, tenant_env, record_id).await?;
        if !record.can_deploy() {
            return Err(UpgradeError::RecordCanNotDeploy(record.status));
        }

        let mut components = tx.component_records(record.id).await?;
        let failed: Vec<Uuid> = components
            .iter()
            .filter(|c| c.status.is_failed())
            .map(|c| c.component)
            .collect();
        if failed.is_empty() {
            return Err(UpgradeError::RecordCanNotDeploy(record.status));
        }

        let app = load_application(&mut tx, tenant_env, record.application).await?;
        let target = region_target(&mut tx, &app).await?;
        let operation = BatchOperation::Deploy {
            deploy_infos: failed.iter().map(|id| DeployInfo { service_id: *id }).collect(),
        };
        let now = Utc::now().naive_utc();

        let results = match outcome(self.region.batch_operation(&target, &operation).await) {
            Ok(results) => results,
            Err(reason) => {
                warn!(%reason, "Region rejected the deploy batch");
                record.status = UpgradeStatus::DeployFailed;
                record.updated_at = now;
                tx.update_record(&record).await?;
                tx.commit().await?;
                return Err(UpgradeError::Submission(reason));
            }
        };

        let events: HashMap<Uuid, &str> = results
            .iter()
            .filter_map(|item| item.event_id().map(|event| (item.service_id, event)))
            .collect();

        let in_progress = record.in_progress_status();
        let mut resubmitted = Vec::new();
        for component in components.iter_mut().filter(|c| c.status.is_failed()) {
            if let Some(event) = events.get(&component.component) {
                component.event_id = Some(event.to_string());
                component.status = in_progress;
                component.updated_at = now;
                resubmitted.push(component.clone());
            }
        }

        record.status = if resubmitted.is_empty() {
            UpgradeStatus::DeployFailed
        } else {
            in_progress
        };
        record.updated_at = now;

        tx.update_component_records(&resubmitted).await?;
        tx.update_record(&record).await?;
        tx.commit().await?;

        info!(resubmitted = resubmitted.len(), failed = failed.len(), "Deployed record");
        Ok(record)
    }

    /// Rolls the group of an upgrade record back to the snapshot taken
    /// before the upgrade. Returns the new rollback record and the group.
    #[instrument(skip(self), fields(record = %record_id))]
    pub async fn restore(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        record_id: Uuid,
    ) -> Result<(MUpgradeRecord, MComponentGroup), UpgradeError> {
        let mut tx = self.store.begin().await?;
        let parent = load_record(&mut tx, tenant_env, record_id).await?;
        if parent.application != application {
            return Err(UpgradeError::RecordNotFound(record_id));
        }
        if !parent.can_rollback() {
            return Err(UpgradeError::RecordCanNotRollback);
        }

        let snapshot_id = parent.snapshot.ok_or(UpgradeError::SnapshotMissing(parent.id))?;
        let app = load_application(&mut tx, tenant_env, application).await?;
        let group = load_group(&mut tx, app.id, parent.upgrade_group).await?;
        let snapshot = tx
            .snapshot(tenant_env, group.id, snapshot_id)
            .await?
            .ok_or(UpgradeError::SnapshotMissing(parent.id))?;
        let snapshot = SnapshotData::from_model(&snapshot)?;
        let now = Utc::now().naive_utc();

        let mut record = MUpgradeRecord {
            id: Uuid::new_v4(),
            tenant_env,
            application: app.id,
            upgrade_group: group.id,
            group_key: parent.group_key.clone(),
            group_name: parent.group_name.clone(),
            version: parent.old_version.clone(),
            old_version: parent.version.clone(),
            status: UpgradeStatus::Rolling,
            record_type: RecordType::Rollback,
            snapshot: Some(snapshot_id),
            parent: Some(parent.id),
            is_from_cloud: parent.is_from_cloud,
            market_name: parent.market_name.clone(),
            created_at: now,
            updated_at: now,
        };
        tx.insert_record(&record).await.map_err(conflict_as_unfinished)?;

        let original = tx.original_app(&app, &group).await?;
        let new = RestorePlanner {
            catalog: &self.catalog,
            original: &original,
            snapshot: &snapshot,
            now,
        }
        .plan();

        let market = MarketApp::new(&self.catalog, &original, &new);
        let components_body = market.sync_body()?;
        let groups_body = market.config_groups_body();
        let target = region_target(&mut tx, &app).await?;

        if let Err(reason) = self.sync_region(&target, &app, &components_body, &groups_body).await {
            drop(tx);
            warn!(%reason, "Region rejected the restored graph");
            record.status = UpgradeStatus::DeployFailed;
            self.insert_failed_record(&record).await?;
            return Err(UpgradeError::Submission(reason));
        }

        if let Err(e) = persist(&mut tx, None, &new.graph_write()).await {
            drop(tx);
            error!(error = %e, "Failed to save restored graph");
            self.revert_region(&target, &app, &market).await;
            record.status = UpgradeStatus::RollbackFailed;
            self.insert_failed_record(&record).await?;
            return Err(e.into());
        }

        let (results, failure) = self.submit_operations(&target, [market.builds(), market.upgrades()]).await;
        let components = component_records(&record, &new, &results, failure.is_some(), now);
        if failure.is_some() {
            record.status = UpgradeStatus::DeployFailed;
            tx.update_record(&record).await?;
        }
        tx.insert_component_records(&components).await?;
        tx.commit().await?;

        match failure {
            Some(reason) => Err(UpgradeError::Submission(reason)),
            None => {
                info!(rollback = %record.id, components = components.len(), "Submitted rollback");
                Ok((record, new.group))
            }
        }
    }

    /// Fails with `RecordNotFound` unless `record_id` belongs to `application`.
    /// Reads only, so callers can check ownership before a sync writes.
    #[instrument(skip(self))]
    pub async fn ensure_record_of(&self, tenant_env: Uuid, application: Uuid, record_id: Uuid) -> Result<(), UpgradeError> {
        let mut tx = self.store.begin().await?;
        let record = load_record(&mut tx, tenant_env, record_id).await?;
        tx.commit().await?;

        if record.application != application {
            return Err(UpgradeError::RecordNotFound(record_id));
        }
        Ok(())
    }

    /// Returns a record with its component records, refreshed from the
    /// region while it is unfinished.
    #[instrument(skip(self))]
    pub async fn get_record(&self, tenant_env: Uuid, record_id: Uuid) -> Result<RecordDetail, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let record = load_record(&mut tx, tenant_env, record_id).await?;
        let detail = self.refresh(&mut tx, record).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Newest first. Only the most recent unfinished record on the page is
    /// refreshed.
    #[instrument(skip(self))]
    pub async fn list_records(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        record_type: Option<RecordType>,
        page: u64,
        page_size: u64,
    ) -> Result<Paginated<MUpgradeRecord>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let (mut items, total) = tx
            .list_records(tenant_env, application, record_type, page, page_size)
            .await?;

        if let Some(index) = items.iter().position(|r| !r.is_finished()) {
            let detail = self.refresh(&mut tx, items[index].clone()).await?;
            items[index] = detail.record;
        }
        tx.commit().await?;

        Ok(Paginated {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Rollback records created from an upgrade record.
    #[instrument(skip(self))]
    pub async fn list_rollback_records(&self, tenant_env: Uuid, record_id: Uuid) -> Result<Vec<MUpgradeRecord>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let parent = load_record(&mut tx, tenant_env, record_id).await?;

        let mut records = Vec::new();
        for record in tx.rollback_records(parent.id).await? {
            let record = if record.is_finished() {
                record
            } else {
                self.refresh(&mut tx, record).await?.record
            };
            records.push(record);
        }
        tx.commit().await?;

        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get_latest_record(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        upgrade_group: Option<Uuid>,
        record_type: Option<RecordType>,
    ) -> Result<Option<RecordDetail>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let filter = RecordFilter {
            upgrade_group,
            record_type,
        };

        let detail = match tx.last_record(tenant_env, application, filter).await? {
            Some(record) => Some(self.refresh(&mut tx, record).await?),
            None => None,
        };
        tx.commit().await?;

        Ok(detail)
    }

    /// Template versions the group of `record_id` can be upgraded to.
    #[instrument(skip(self))]
    pub async fn upgradeable_versions(&self, tenant_env: Uuid, record_id: Uuid) -> Result<Vec<String>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let record = load_record(&mut tx, tenant_env, record_id).await?;
        let group = load_group(&mut tx, record.application, record.upgrade_group).await?;
        let templates = tx.template_versions(&record.group_key).await?;
        tx.commit().await?;

        let current = Some(group.version.as_str()).filter(|v| !v.is_empty());
        let current_updated_at = templates
            .iter()
            .find(|t| t.version == group.version)
            .map(|t| t.updated_at);
        let candidates: Vec<Candidate> = templates
            .into_iter()
            .map(|t| Candidate {
                version: t.version,
                updated_at: t.updated_at,
            })
            .collect();

        Ok(upgradeable_versions(current, current_updated_at, &candidates))
    }

    /// Previews what an upgrade of `upgrade_group` to `version` would change.
    #[instrument(skip(self))]
    pub async fn changes(
        &self,
        tenant_env: Uuid,
        application: Uuid,
        upgrade_group: Uuid,
        version: &str,
    ) -> Result<Vec<ComponentPreview>, UpgradeError> {
        let mut tx = self.store.begin().await?;
        let app = load_application(&mut tx, tenant_env, application).await?;
        let group = load_group(&mut tx, app.id, upgrade_group).await?;
        let template = load_template(&mut tx, &group.group_key, version).await?;
        let original = tx.original_app(&app, &group).await?;
        tx.commit().await?;

        let new = UpgradePlanner {
            catalog: &self.catalog,
            original: &original,
            template: &template,
            version,
            component_keys: None,
            single_component: false,
            now: Utc::now().naive_utc(),
        }
        .plan()?;

        Ok(new
            .components
            .into_iter()
            .map(|planned| ComponentPreview {
                current_version: original
                    .component_by_key(&planned.component.component_key)
                    .map(|c| c.version.clone()),
                component_key: planned.component.component_key,
                name: planned.component.name,
                upgrade_type: planned.upgrade_type,
                action: planned.action,
                changes: planned.changes,
            })
            .collect())
    }

    async fn refresh(&self, tx: &mut S::Tx, record: MUpgradeRecord) -> Result<RecordDetail, UpgradeError> {
        if record.is_finished() {
            let component_records = tx.component_records(record.id).await?;
            return Ok(RecordDetail {
                record,
                component_records,
            });
        }

        let app = load_application(tx, record.tenant_env, record.application).await?;
        let target = region_target(tx, &app).await?;
        let (record, component_records) = sync_record(tx, &self.region, &target, record).await?;

        Ok(RecordDetail {
            record,
            component_records,
        })
    }

    async fn sync_region(
        &self,
        target: &RegionTarget,
        application: &MApplication,
        components: &SyncComponentsBody,
        config_groups: &SyncConfigGroupsBody,
    ) -> Result<(), String> {
        if !components.components.is_empty() || !components.delete_component_ids.is_empty() {
            outcome(
                self.region
                    .sync_components(target, &application.region_app_id, components)
                    .await,
            )?;
        }

        if !config_groups.app_config_groups.is_empty() {
            outcome(
                self.region
                    .sync_config_groups(target, &application.region_app_id, config_groups)
                    .await,
            )?;
        }

        Ok(())
    }

    async fn revert_region(&self, target: &RegionTarget, application: &MApplication, market: &MarketApp<'_>) {
        let body = match market.revert_body() {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to render installed graph");
                return;
            }
        };

        if let Err(reason) = self
            .sync_region(target, application, &body, &market.original_config_groups_body())
            .await
        {
            error!(%reason, "Failed to restore installed graph in region");
        }
    }

    /// Submits the batches in order and stops at the first failure.
    async fn submit_operations<const N: usize>(
        &self,
        target: &RegionTarget,
        operations: [BatchOperation; N],
    ) -> (Vec<BatchResultItem>, Option<String>) {
        let mut results = Vec::new();

        for operation in operations.iter().filter(|op| !op.is_empty()) {
            match outcome(self.region.batch_operation(target, operation).await) {
                Ok(items) => results.extend(items),
                Err(reason) => {
                    warn!(operation = operation.name(), %reason, "Batch operation failed");
                    return (results, Some(reason));
                }
            }
        }

        (results, None)
    }

    async fn save_record(&self, record: &MUpgradeRecord) -> Result<(), UpgradeError> {
        let mut tx = self.store.begin().await?;
        tx.update_record(record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_failed_record(&self, record: &MUpgradeRecord) -> Result<(), UpgradeError> {
        let mut tx = self.store.begin().await?;
        tx.insert_record(record).await.map_err(conflict_as_unfinished)?;
        tx.commit().await?;
        Ok(())
    }
}
