/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UpgradeSnapshot::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UpgradeSnapshot::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UpgradeSnapshot::TenantEnv).uuid().not_null())
                    .col(ColumnDef::new(UpgradeSnapshot::UpgradeGroup).uuid().not_null())
                    .col(ColumnDef::new(UpgradeSnapshot::Snapshot).json().not_null())
                    .col(ColumnDef::new(UpgradeSnapshot::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UpgradeSnapshot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UpgradeSnapshot {
    Table,
    Id,
    TenantEnv,
    UpgradeGroup,
    Snapshot,
    CreatedAt,
}
