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
                    .table(ComponentUpgradeRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::UpgradeRecord)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComponentUpgradeRecord::Component).uuid().not_null())
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::ComponentName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::UpgradeType)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComponentUpgradeRecord::EventId).string())
                    .col(ColumnDef::new(ComponentUpgradeRecord::Status).integer().not_null())
                    .col(ColumnDef::new(ComponentUpgradeRecord::Update).json().not_null())
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComponentUpgradeRecord::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-upgrade-record-upgrade-record")
                            .from(ComponentUpgradeRecord::Table, ComponentUpgradeRecord::UpgradeRecord)
                            .to(UpgradeRecord::Table, UpgradeRecord::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComponentUpgradeRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComponentUpgradeRecord {
    Table,
    Id,
    UpgradeRecord,
    Component,
    ComponentName,
    UpgradeType,
    EventId,
    Status,
    Update,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UpgradeRecord {
    Table,
    Id,
}
