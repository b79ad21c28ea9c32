/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for upgrade record entity

use chrono::NaiveDate;
use entity::upgrade_record::{RecordType, UpgradeStatus};
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

fn record(status: UpgradeStatus, record_type: RecordType) -> upgrade_record::Model {
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    upgrade_record::Model {
        id: Uuid::new_v4(),
        tenant_env: Uuid::new_v4(),
        application: Uuid::new_v4(),
        upgrade_group: Uuid::new_v4(),
        group_key: "wordpress".to_owned(),
        group_name: "WordPress".to_owned(),
        version: "1.2.0".to_owned(),
        old_version: "1.1.0".to_owned(),
        status,
        record_type,
        snapshot: None,
        parent: None,
        is_from_cloud: false,
        market_name: None,
        created_at: naive_date,
        updated_at: naive_date,
    }
}

#[test]
fn test_can_upgrade_only_fresh_records() {
    assert!(record(UpgradeStatus::Not, RecordType::Upgrade).can_upgrade());
    assert!(!record(UpgradeStatus::Upgrading, RecordType::Upgrade).can_upgrade());
    assert!(!record(UpgradeStatus::UpgradeFailed, RecordType::Upgrade).can_upgrade());
}

#[test]
fn test_can_rollback() {
    for status in [
        UpgradeStatus::Upgraded,
        UpgradeStatus::Rollback,
        UpgradeStatus::PartialUpgraded,
        UpgradeStatus::PartialRollback,
        UpgradeStatus::DeployFailed,
    ] {
        assert!(record(status, RecordType::Upgrade).can_rollback(), "{status:?}");
        assert!(!record(status, RecordType::Rollback).can_rollback(), "{status:?}");
    }

    assert!(!record(UpgradeStatus::Upgrading, RecordType::Upgrade).can_rollback());
    assert!(!record(UpgradeStatus::UpgradeFailed, RecordType::Upgrade).can_rollback());
}

#[test]
fn test_can_deploy() {
    for status in [
        UpgradeStatus::UpgradeFailed,
        UpgradeStatus::RollbackFailed,
        UpgradeStatus::PartialUpgraded,
        UpgradeStatus::PartialRollback,
        UpgradeStatus::DeployFailed,
    ] {
        assert!(record(status, RecordType::Upgrade).can_deploy(), "{status:?}");
    }

    assert!(!record(UpgradeStatus::Upgraded, RecordType::Upgrade).can_deploy());
    assert!(!record(UpgradeStatus::Rolling, RecordType::Rollback).can_deploy());
}

#[test]
fn test_in_progress_status() {
    assert_eq!(
        record(UpgradeStatus::Not, RecordType::Upgrade).in_progress_status(),
        UpgradeStatus::Upgrading
    );
    assert_eq!(
        record(UpgradeStatus::DeployFailed, RecordType::Rollback).in_progress_status(),
        UpgradeStatus::Rolling
    );
}

#[tokio::test]
async fn test_upgrade_record_entity_with_status() -> Result<(), DbErr> {
    let model = record(UpgradeStatus::PartialUpgraded, RecordType::Upgrade);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model.clone()]])
        .into_connection();

    let result = upgrade_record::Entity::find_by_id(model.id).one(&db).await?;

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.status, UpgradeStatus::PartialUpgraded);
    assert_eq!(found.record_type, RecordType::Upgrade);
    assert!(found.can_deploy());

    Ok(())
}
