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
                    .table(Plugin::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plugin::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plugin::Name).string().not_null())
                    .col(ColumnDef::new(Plugin::Category).string().not_null())
                    .col(ColumnDef::new(Plugin::BuildVersion).string().not_null())
                    .col(ColumnDef::new(Plugin::OriginKey).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plugin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Plugin {
    Table,
    Id,
    Name,
    Category,
    BuildVersion,
    OriginKey,
}
