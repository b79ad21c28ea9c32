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
                    .table(Application::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Application::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Application::TenantEnv).uuid().not_null())
                    .col(ColumnDef::new(Application::TenantName).string().not_null())
                    .col(ColumnDef::new(Application::Name).string().not_null())
                    .col(ColumnDef::new(Application::RegionName).string().not_null())
                    .col(ColumnDef::new(Application::RegionAppId).string().not_null())
                    .col(ColumnDef::new(Application::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
    TenantEnv,
    TenantName,
    Name,
    RegionName,
    RegionAppId,
    CreatedAt,
}
