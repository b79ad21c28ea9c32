/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Orchestration runs against the sea-orm store on an in-memory sqlite database

mod common;

use crate::common::{FakeRegion, Fixture, now, template, template_component};
use ::common::types::*;
use entity::upgrade_record::{RecordType, UpgradeStatus};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde_json::json;
use std::sync::Arc;
use upgrader::store::{RecordFilter, Store, StoreError, StoreTx};
use upgrader::{Catalog, Orchestrator, SeaStore};
use uuid::Uuid;

async fn seeded_db(fx: &Fixture) -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    for region in &fx.data.regions {
        ERegion::insert(region.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }
    for application in &fx.data.applications {
        EApplication::insert(application.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }
    for group in &fx.data.component_groups {
        EComponentGroup::insert(group.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }
    for component in &fx.data.components {
        EComponent::insert(component.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }
    for dependency in &fx.data.dependencies {
        EComponentDependency::insert(dependency.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }
    for template in &fx.data.templates {
        EAppTemplate::insert(template.clone().into_active_model().reset_all())
            .exec(&db)
            .await
            .unwrap();
    }

    db
}

fn orchestrator(db: &DatabaseConnection) -> (Orchestrator<SeaStore, Arc<FakeRegion>>, Arc<FakeRegion>) {
    let region = Arc::new(FakeRegion::default());
    let orchestrator = Orchestrator::new(SeaStore::new(db.clone()), region.clone(), Arc::new(Catalog::default()));
    (orchestrator, region)
}

fn with_dependencies(mut component: serde_json::Value, dependencies: &[&str]) -> serde_json::Value {
    component["dependencies"] = json!(dependencies);
    component
}

/// c1 and c2 installed with c2 depending on c1. Version 1.1 flips that edge
/// and adds c3 depending on c1.
fn wordpress() -> Fixture {
    let mut fx = Fixture::new(&["c1", "c2"]).with_template(
        "1.1",
        template(vec![
            with_dependencies(template_component("c1", "1.1"), &["c2"]),
            template_component("c2", "1.1"),
            with_dependencies(template_component("c3", "1.1"), &["c1"]),
        ]),
    );
    let c1 = fx.component("c1").id;
    let c2 = fx.component("c2").id;
    fx.data.dependencies.push(MComponentDependency {
        id: Uuid::new_v4(),
        component: c2,
        dependency: c1,
    });
    fx
}

async fn edges(db: &DatabaseConnection) -> Vec<(Uuid, Uuid)> {
    let mut edges: Vec<(Uuid, Uuid)> = EComponentDependency::find()
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|d| (d.component, d.dependency))
        .collect();
    edges.sort();
    edges
}

fn record(fx: &Fixture, status: UpgradeStatus) -> MUpgradeRecord {
    MUpgradeRecord {
        id: Uuid::new_v4(),
        tenant_env: fx.tenant_env,
        application: fx.application.id,
        upgrade_group: fx.group.id,
        group_key: fx.group.group_key.clone(),
        group_name: fx.group.group_name.clone(),
        version: "1.0".to_string(),
        old_version: "1.0".to_string(),
        status,
        record_type: RecordType::Upgrade,
        snapshot: None,
        parent: None,
        is_from_cloud: false,
        market_name: None,
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn test_upgrade_adds_component_and_replaces_edges() {
    let fx = wordpress();
    let db = seeded_db(&fx).await;
    let (orchestrator, region) = orchestrator(&db);
    let c1 = fx.component("c1").id;
    let c2 = fx.component("c2").id;

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let record = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();
    assert_eq!(record.status, UpgradeStatus::Upgrading);

    let components = EComponent::find().all(&db).await.unwrap();
    assert_eq!(components.len(), 3);
    assert!(components.iter().all(|c| c.image.ends_with(":1.1")));
    let c3 = components.iter().find(|c| c.component_key == "c3").unwrap().id;

    let mut expected = vec![(c1, c2), (c3, c1)];
    expected.sort();
    assert_eq!(edges(&db).await, expected);

    let group = EComponentGroup::find_by_id(fx.group.id).one(&db).await.unwrap().unwrap();
    assert_eq!(group.version, "1.1");
    assert_eq!(EUpgradeSnapshot::find().all(&db).await.unwrap().len(), 1);

    for component in &components {
        region.set_event(&region.event_of(component.id).unwrap(), "success");
    }
    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::Upgraded);
    assert_eq!(detail.component_records.len(), 3);

    let stored = EUpgradeRecord::find_by_id(record.id).one(&db).await.unwrap().unwrap();
    assert_eq!(stored.status, UpgradeStatus::Upgraded);
}

#[tokio::test]
async fn test_restore_deletes_added_component() {
    let fx = wordpress();
    let db = seeded_db(&fx).await;
    let (orchestrator, region) = orchestrator(&db);
    let c1 = fx.component("c1").id;
    let c2 = fx.component("c2").id;

    let parent = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", parent.id, None)
        .await
        .unwrap();
    for component in EComponent::find().all(&db).await.unwrap() {
        region.set_event(&region.event_of(component.id).unwrap(), "success");
    }
    orchestrator.get_record(fx.tenant_env, parent.id).await.unwrap();

    let (rollback, group) = orchestrator
        .restore(fx.tenant_env, fx.application.id, parent.id)
        .await
        .unwrap();
    assert_eq!(rollback.status, UpgradeStatus::Rolling);
    assert_eq!(group.version, "1.0");

    let components = EComponent::find().all(&db).await.unwrap();
    assert_eq!(components.len(), 2);
    assert!(components.iter().all(|c| c.image.ends_with(":1.0")));
    assert_eq!(edges(&db).await, vec![(c2, c1)]);

    let (records, total) = {
        let mut tx = orchestrator.store().begin().await.unwrap();
        let page = tx
            .list_records(fx.tenant_env, fx.application.id, None, 1, 10)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        page
    };
    assert_eq!(total, 2);
    assert_eq!(records[0].id, rollback.id);
    assert_eq!(records[1].id, parent.id);

    let latest = orchestrator
        .get_latest_record(fx.tenant_env, fx.application.id, Some(fx.group.id), Some(RecordType::Upgrade))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.record.id, parent.id);

    let rollbacks = orchestrator
        .list_rollback_records(fx.tenant_env, parent.id)
        .await
        .unwrap();
    assert_eq!(rollbacks.len(), 1);
    assert_eq!(rollbacks[0].id, rollback.id);
}

#[tokio::test]
async fn test_unfinished_record_conflict() {
    let fx = wordpress();
    let db = seeded_db(&fx).await;
    let store = SeaStore::new(db.clone());

    let mut tx = store.begin().await.unwrap();
    tx.insert_record(&record(&fx, UpgradeStatus::Not)).await.unwrap();
    tx.insert_record(&record(&fx, UpgradeStatus::Upgraded)).await.unwrap();
    let second = tx.insert_record(&record(&fx, UpgradeStatus::Upgrading)).await;
    assert!(matches!(second, Err(StoreError::Conflict(_))));
    drop(tx);

    let mut tx = store.begin().await.unwrap();
    let last = tx
        .last_record(fx.tenant_env, fx.application.id, RecordFilter::default())
        .await
        .unwrap();
    assert!(last.is_none());
}
