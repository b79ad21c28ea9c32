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
                    .table(UpgradeRecord::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UpgradeRecord::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UpgradeRecord::TenantEnv).uuid().not_null())
                    .col(ColumnDef::new(UpgradeRecord::Application).uuid().not_null())
                    .col(ColumnDef::new(UpgradeRecord::UpgradeGroup).uuid().not_null())
                    .col(ColumnDef::new(UpgradeRecord::GroupKey).string().not_null())
                    .col(ColumnDef::new(UpgradeRecord::GroupName).string().not_null())
                    .col(ColumnDef::new(UpgradeRecord::Version).string().not_null())
                    .col(ColumnDef::new(UpgradeRecord::OldVersion).string().not_null())
                    .col(ColumnDef::new(UpgradeRecord::Status).integer().not_null())
                    .col(ColumnDef::new(UpgradeRecord::RecordType).integer().not_null())
                    .col(ColumnDef::new(UpgradeRecord::Snapshot).uuid())
                    .col(ColumnDef::new(UpgradeRecord::Parent).uuid())
                    .col(ColumnDef::new(UpgradeRecord::IsFromCloud).boolean().not_null())
                    .col(ColumnDef::new(UpgradeRecord::MarketName).string())
                    .col(ColumnDef::new(UpgradeRecord::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(UpgradeRecord::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-upgrade-record-application")
                            .from(UpgradeRecord::Table, UpgradeRecord::Application)
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-upgrade-record-snapshot")
                            .from(UpgradeRecord::Table, UpgradeRecord::Snapshot)
                            .to(UpgradeSnapshot::Table, UpgradeSnapshot::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UpgradeRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UpgradeRecord {
    Table,
    Id,
    TenantEnv,
    Application,
    UpgradeGroup,
    GroupKey,
    GroupName,
    Version,
    OldVersion,
    Status,
    RecordType,
    Snapshot,
    Parent,
    IsFromCloud,
    MarketName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum UpgradeSnapshot {
    Table,
    Id,
}
