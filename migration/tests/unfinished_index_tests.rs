/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Schema level guarantees of the upgrade record table

use migration::{Migrator, MigratorTrait};
use sea_orm_migration::sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

async fn migrated_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    // records below reference no application row
    db.execute_unprepared("PRAGMA foreign_keys = OFF").await.unwrap();
    db
}

fn insert_record(id: &str, status: i32) -> String {
    format!(
        "INSERT INTO upgrade_record (id, tenant_env, application, upgrade_group, group_key, group_name, version, old_version, status, record_type, is_from_cloud, created_at, updated_at) \
         VALUES ('{id}', 'env', 'app', 'group', 'key', 'name', '1.1', '1.0', {status}, 1, false, '2024-01-01 00:00:00', '2024-01-01 00:00:00')"
    )
}

#[tokio::test]
async fn test_second_unfinished_record_is_rejected() {
    let db = migrated_db().await;

    db.execute_unprepared(&insert_record("r1", 1)).await.unwrap();
    let duplicate = db.execute_unprepared(&insert_record("r2", 2)).await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_finished_records_do_not_conflict() {
    let db = migrated_db().await;

    db.execute_unprepared(&insert_record("r1", 3)).await.unwrap();
    db.execute_unprepared(&insert_record("r2", 8)).await.unwrap();
    db.execute_unprepared(&insert_record("r3", 4)).await.unwrap();
}

#[tokio::test]
async fn test_migrations_roll_back_cleanly() {
    let db = migrated_db().await;

    Migrator::down(&db, None).await.unwrap();
}
