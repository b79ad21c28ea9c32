/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use crate::common::{Fixture, template, template_component};
use entity::component_upgrade_record::UpgradeType;
use entity::upgrade_record::UpgradeStatus;
use region::operations::{BatchOperation, DeployInfo};
use region::{MockRegionApi, RegionError};
use std::sync::Arc;
use upgrader::graph::ComponentAction;
use upgrader::{Catalog, MemoryStore, Orchestrator, UpgradeError};

fn wordpress() -> Fixture {
    Fixture::new(&["c1", "c2"])
        .with_template(
            "1.0",
            template(vec![template_component("c1", "1.0"), template_component("c2", "1.0")]),
        )
        .with_template(
            "1.1",
            template(vec![template_component("c1", "1.1"), template_component("c2", "1.1")]),
        )
}

#[tokio::test]
async fn test_partial_upgrade_and_redeploy() {
    let (fx, orchestrator, region) = wordpress().build();
    let c1 = fx.component("c1").id;
    let c2 = fx.component("c2").id;

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    assert_eq!(record.status, UpgradeStatus::Not);

    let record = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();
    assert_eq!(record.status, UpgradeStatus::Upgrading);
    assert_eq!(record.version, "1.1");
    assert_eq!(record.old_version, "1.0");
    assert!(record.snapshot.is_some());

    let e1 = region.event_of(c1).unwrap();
    let e2 = region.event_of(c2).unwrap();
    region.set_event(&e1, "success");
    region.set_event(&e2, "failure");

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::PartialUpgraded);
    assert_eq!(detail.component_records.len(), 2);

    let deployed = orchestrator.deploy(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(deployed.status, UpgradeStatus::Upgrading);
    assert_eq!(
        region.operations().last(),
        Some(&BatchOperation::Deploy {
            deploy_infos: vec![DeployInfo { service_id: c2 }],
        })
    );

    let e3 = region.event_of(c2).unwrap();
    assert_ne!(e3, e2);
    region.set_event(&e3, "success");

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::Upgraded);
    assert!(
        detail
            .component_records
            .iter()
            .all(|c| c.status == UpgradeStatus::Upgraded)
    );

    let data = orchestrator.store().data().await;
    assert_eq!(data.component_groups[0].version, "1.1");
    let images: Vec<&str> = data.components.iter().map(|c| c.image.as_str()).collect();
    assert!(images.contains(&"c1:1.1"));
    assert!(images.contains(&"c2:1.1"));
    assert_eq!(data.snapshots.len(), 1);
}

#[tokio::test]
async fn test_timed_out_event_counts_as_success() {
    let (fx, orchestrator, region) = wordpress().build();

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();

    for component in &fx.components {
        let event = region.event_of(component.id).unwrap();
        region.set_event(&event, "timeout");
    }

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::Upgraded);
}

#[tokio::test]
async fn test_running_events_keep_record_upgrading() {
    let (fx, orchestrator, region) = wordpress().build();

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::Upgrading);
    assert_eq!(region.event_queries(), 1);
}

#[tokio::test]
async fn test_one_unfinished_record_per_group() {
    let (fx, orchestrator, _region) = wordpress().build();

    let (first, second) = tokio::join!(
        orchestrator.create_upgrade(fx.tenant_env, fx.application.id, fx.group.id),
        orchestrator.create_upgrade(fx.tenant_env, fx.application.id, fx.group.id),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(UpgradeError::LastRecordUnfinished)))
    );
    assert_eq!(orchestrator.store().data().await.records.len(), 1);
}

#[tokio::test]
async fn test_submitted_record_can_not_be_upgraded_again() {
    let (fx, orchestrator, _region) = wordpress().build();

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();

    let again = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await;
    assert!(matches!(
        again,
        Err(UpgradeError::RecordCanNotUpgrade(UpgradeStatus::Upgrading))
    ));
}

#[tokio::test]
async fn test_unknown_version_is_rejected() {
    let (fx, orchestrator, region) = wordpress().build();

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "9.9", record.id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, UpgradeError::NotFound(_)));
    assert!(region.syncs().is_empty());
}

#[tokio::test]
async fn test_rejected_sync_marks_deploy_failed() {
    let (fx, orchestrator, region) = wordpress().build();
    region.reject_sync(Some("quota exceeded"));

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, UpgradeError::Submission(reason) if reason == "quota exceeded"));

    let data = orchestrator.store().data().await;
    assert_eq!(data.records[0].status, UpgradeStatus::DeployFailed);
    assert!(data.component_records.is_empty());
    assert!(data.snapshots.is_empty());
    assert_eq!(data.component_groups[0].version, "1.0");
    assert!(region.operations().is_empty());

    let deploy = orchestrator.deploy(fx.tenant_env, record.id).await;
    assert!(matches!(
        deploy,
        Err(UpgradeError::RecordCanNotDeploy(UpgradeStatus::DeployFailed))
    ));
}

#[tokio::test]
async fn test_rejected_batch_is_retried_by_deploy() {
    let (fx, orchestrator, region) = wordpress().build();
    region.reject_batches(Some("builder busy"));

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, UpgradeError::Submission(_)));

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::DeployFailed);
    assert_eq!(detail.component_records.len(), 2);
    assert!(detail.component_records.iter().all(|c| {
        c.status == UpgradeStatus::DeployFailed && c.event_id.is_none()
    }));

    region.reject_batches(None);
    let deployed = orchestrator.deploy(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(deployed.status, UpgradeStatus::Upgrading);

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert!(
        detail
            .component_records
            .iter()
            .all(|c| c.status == UpgradeStatus::Upgrading && c.event_id.is_some())
    );
}

#[tokio::test]
async fn test_rejected_upgrade_batch_leaves_nothing_outstanding() {
    let mut c2 = template_component("c2", "1.0");
    c2["cmd"] = "serve".into();
    let (fx, orchestrator, region) = Fixture::new(&["c1", "c2"])
        .with_template("1.1", template(vec![template_component("c1", "1.1"), c2]))
        .build();
    region.reject_operation("upgrade", "upgrade rejected");

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, UpgradeError::Submission(_)));

    let c1 = fx.component("c1").id;
    let c2 = fx.component("c2").id;
    let built = region.event_of(c1).unwrap();
    region.set_event(&built, "failure");

    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::DeployFailed);
    assert!(detail.component_records.iter().all(|c| c.is_finished()));
    let c1_record = detail.component_records.iter().find(|c| c.component == c1).unwrap();
    assert_eq!(c1_record.status, UpgradeStatus::DeployFailed);
    assert_eq!(c1_record.event_id.as_deref(), Some(built.as_str()));
    let c2_record = detail.component_records.iter().find(|c| c.component == c2).unwrap();
    assert_eq!(c2_record.status, UpgradeStatus::DeployFailed);
    assert_eq!(c2_record.event_id, None);

    let deployed = orchestrator.deploy(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(deployed.status, UpgradeStatus::Upgrading);
    match region.operations().last().unwrap() {
        BatchOperation::Deploy { deploy_infos } => assert_eq!(deploy_infos.len(), 2),
        other => panic!("unexpected operation {:?}", other),
    }

    region.set_event(&region.event_of(c1).unwrap(), "success");
    region.set_event(&region.event_of(c2).unwrap(), "success");
    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    assert_eq!(detail.record.status, UpgradeStatus::Upgraded);
}

#[tokio::test]
async fn test_failed_save_reverts_region() {
    let (fx, orchestrator, region) = wordpress().build();

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator.store().fail_graph_writes(true);

    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, UpgradeError::Store(_)));

    let syncs = region.syncs();
    assert_eq!(syncs.len(), 2);
    let reverted: Vec<&str> = syncs[1]
        .components
        .iter()
        .map(|c| c.component_base.image.as_str())
        .collect();
    assert_eq!(reverted.len(), 2);
    assert!(reverted.contains(&"c1:1.0"));
    assert!(reverted.contains(&"c2:1.0"));
    assert!(region.operations().is_empty());

    let data = orchestrator.store().data().await;
    assert_eq!(data.records[0].status, UpgradeStatus::UpgradeFailed);
    assert!(data.component_records.is_empty());
}

#[tokio::test]
async fn test_unreachable_region_fails_submission() {
    let fx = wordpress();
    let store = MemoryStore::new(fx.data.clone());

    let mut region = MockRegionApi::new();
    region
        .expect_sync_components()
        .times(1)
        .returning(|_, _, _| Err(RegionError::Timeout));
    region.expect_batch_operation().never();

    let orchestrator = Orchestrator::new(store, region, Arc::new(Catalog::default()));
    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    let err = orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, UpgradeError::Submission(_)));
    let data = orchestrator.store().data().await;
    assert_eq!(data.records[0].status, UpgradeStatus::DeployFailed);
}

#[tokio::test]
async fn test_selected_components_only() {
    let (fx, orchestrator, region) = wordpress().build();
    let c1 = fx.component("c1").id;

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(
            fx.tenant_env,
            fx.application.id,
            "1.1",
            record.id,
            Some(vec!["c1".to_string()]),
        )
        .await
        .unwrap();

    let syncs = region.syncs();
    assert_eq!(syncs.len(), 1);
    assert_eq!(syncs[0].components.len(), 1);
    assert_eq!(syncs[0].components[0].component_base.component_id, c1);

    let data = orchestrator.store().data().await;
    let c2 = data.components.iter().find(|c| c.component_key == "c2").unwrap();
    assert_eq!(c2.image, "c2:1.0");
    assert_eq!(data.component_records.len(), 1);
}

#[tokio::test]
async fn test_unchanged_component_is_not_submitted() {
    let (fx, orchestrator, region) = Fixture::new(&["c1", "c2"])
        .with_template(
            "1.1",
            template(vec![template_component("c1", "1.1"), template_component("c2", "1.0")]),
        )
        .build();
    let c2 = fx.component("c2").id;

    let record = orchestrator
        .create_upgrade(fx.tenant_env, fx.application.id, fx.group.id)
        .await
        .unwrap();
    orchestrator
        .upgrade(fx.tenant_env, fx.application.id, "1.1", record.id, None)
        .await
        .unwrap();

    assert!(region.event_of(c2).is_none());
    let detail = orchestrator.get_record(fx.tenant_env, record.id).await.unwrap();
    let unchanged = detail
        .component_records
        .iter()
        .find(|c| c.component == c2)
        .unwrap();
    assert_eq!(unchanged.status, UpgradeStatus::Upgraded);
    assert!(unchanged.event_id.is_none());
}

#[tokio::test]
async fn test_upgrade_single_component_keeps_group_version() {
    let (fx, orchestrator, region) = wordpress().build();
    let c2 = fx.component("c2").id;

    let results = orchestrator
        .upgrade_component(fx.tenant_env, fx.application.id, c2, "1.1")
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].service_id, c2);
    assert!(region.event_of(c2).is_some());

    let data = orchestrator.store().data().await;
    assert_eq!(data.component_groups[0].version, "1.0");
    assert!(data.records.is_empty());
    let upgraded = data.components.iter().find(|c| c.id == c2).unwrap();
    assert_eq!(upgraded.image, "c2:1.1");
}

#[tokio::test]
async fn test_changes_preview() {
    let (fx, orchestrator, region) = Fixture::new(&["c1"])
        .with_template(
            "1.1",
            template(vec![template_component("c1", "1.1"), template_component("c3", "1.1")]),
        )
        .build();

    let previews = orchestrator
        .changes(fx.tenant_env, fx.application.id, fx.group.id, "1.1")
        .await
        .unwrap();
    assert_eq!(previews.len(), 2);

    let c1 = previews.iter().find(|p| p.component_key == "c1").unwrap();
    assert_eq!(c1.upgrade_type, UpgradeType::Upgrade);
    assert_eq!(c1.current_version.as_deref(), Some("1.0"));
    assert_eq!(c1.action, ComponentAction::Build);
    assert_eq!(c1.changes.image.as_ref().map(|c| c.new.as_str()), Some("c1:1.1"));

    let c3 = previews.iter().find(|p| p.component_key == "c3").unwrap();
    assert_eq!(c3.upgrade_type, UpgradeType::Add);
    assert!(c3.current_version.is_none());

    assert!(region.syncs().is_empty());
    assert!(orchestrator.store().data().await.records.is_empty());
}
