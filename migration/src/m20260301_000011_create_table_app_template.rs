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
                    .table(AppTemplate::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AppTemplate::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AppTemplate::GroupKey).string().not_null())
                    .col(ColumnDef::new(AppTemplate::Version).string().not_null())
                    .col(ColumnDef::new(AppTemplate::Template).json().not_null())
                    .col(ColumnDef::new(AppTemplate::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppTemplate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppTemplate {
    Table,
    Id,
    GroupKey,
    Version,
    Template,
    UpdatedAt,
}
