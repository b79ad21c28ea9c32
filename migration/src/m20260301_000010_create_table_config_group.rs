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
                    .table(ConfigGroup::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ConfigGroup::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ConfigGroup::Application).uuid().not_null())
                    .col(ColumnDef::new(ConfigGroup::RegionName).string().not_null())
                    .col(ColumnDef::new(ConfigGroup::Name).string().not_null())
                    .col(ColumnDef::new(ConfigGroup::DeployType).string().not_null())
                    .col(ColumnDef::new(ConfigGroup::Enabled).boolean().not_null())
                    .col(ColumnDef::new(ConfigGroup::Items).json().not_null())
                    .col(ColumnDef::new(ConfigGroup::Components).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-config-group-application")
                            .from(ConfigGroup::Table, ConfigGroup::Application)
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfigGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConfigGroup {
    Table,
    Id,
    Application,
    RegionName,
    Name,
    DeployType,
    Enabled,
    Items,
    Components,
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
}
