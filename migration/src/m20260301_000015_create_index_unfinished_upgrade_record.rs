/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

// Status values of NOT, UPGRADING and ROLLING.
const UNFINISHED_UPGRADE_RECORD_INDEX: &str = r#"CREATE UNIQUE INDEX IF NOT EXISTS "idx-upgrade-record-unfinished" ON "upgrade_record" ("tenant_env", "application", "upgrade_group") WHERE "status" IN (1, 2, 4)"#;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(UNFINISHED_UPGRADE_RECORD_INDEX)
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-app-template-version")
                    .table(AppTemplate::Table)
                    .col(AppTemplate::GroupKey)
                    .col(AppTemplate::Version)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-app-template-version")
                    .table(AppTemplate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(r#"DROP INDEX IF EXISTS "idx-upgrade-record-unfinished""#)
            .await
            .map(|_| ())
    }
}

#[derive(DeriveIden)]
enum AppTemplate {
    Table,
    GroupKey,
    Version,
}
