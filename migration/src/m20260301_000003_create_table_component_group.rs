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
                    .table(ComponentGroup::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ComponentGroup::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ComponentGroup::Application).uuid().not_null())
                    .col(ColumnDef::new(ComponentGroup::GroupKey).string().not_null())
                    .col(ColumnDef::new(ComponentGroup::GroupName).string().not_null())
                    .col(ColumnDef::new(ComponentGroup::Version).string().not_null())
                    .col(ColumnDef::new(ComponentGroup::IsFromCloud).boolean().not_null())
                    .col(ColumnDef::new(ComponentGroup::MarketName).string())
                    .col(ColumnDef::new(ComponentGroup::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(ComponentGroup::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-group-application")
                            .from(ComponentGroup::Table, ComponentGroup::Application)
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComponentGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComponentGroup {
    Table,
    Id,
    Application,
    GroupKey,
    GroupName,
    Version,
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
