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
                    .table(ComponentPlugin::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ComponentPlugin::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ComponentPlugin::Component).uuid().not_null())
                    .col(ColumnDef::new(ComponentPlugin::Plugin).uuid().not_null())
                    .col(ColumnDef::new(ComponentPlugin::BuildVersion).string().not_null())
                    .col(ColumnDef::new(ComponentPlugin::Cpu).integer().not_null())
                    .col(ColumnDef::new(ComponentPlugin::Memory).integer().not_null())
                    .col(ColumnDef::new(ComponentPlugin::Active).boolean().not_null())
                    .col(ColumnDef::new(ComponentPlugin::Configs).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-plugin-component")
                            .from(ComponentPlugin::Table, ComponentPlugin::Component)
                            .to(Component::Table, Component::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-plugin-plugin")
                            .from(ComponentPlugin::Table, ComponentPlugin::Plugin)
                            .to(Plugin::Table, Plugin::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComponentPlugin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComponentPlugin {
    Table,
    Id,
    Component,
    Plugin,
    BuildVersion,
    Cpu,
    Memory,
    Active,
    Configs,
}

#[derive(DeriveIden)]
enum Component {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Plugin {
    Table,
    Id,
}
