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
                    .table(Component::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Component::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Component::Application).uuid().not_null())
                    .col(ColumnDef::new(Component::ComponentGroup).uuid().not_null())
                    .col(ColumnDef::new(Component::ComponentKey).string().not_null())
                    .col(ColumnDef::new(Component::ShareKey).string().not_null())
                    .col(ColumnDef::new(Component::Name).string().not_null())
                    .col(ColumnDef::new(Component::Alias).string().not_null())
                    .col(ColumnDef::new(Component::Version).string().not_null())
                    .col(ColumnDef::new(Component::DeployVersion).string().not_null())
                    .col(ColumnDef::new(Component::Image).text().not_null())
                    .col(ColumnDef::new(Component::Cmd).text())
                    .col(ColumnDef::new(Component::HubUser).string())
                    .col(ColumnDef::new(Component::HubPassword).string())
                    .col(ColumnDef::new(Component::Cpu).integer().not_null())
                    .col(ColumnDef::new(Component::Memory).integer().not_null())
                    .col(ColumnDef::new(Component::Replicas).integer().not_null())
                    .col(ColumnDef::new(Component::Spec).json().not_null())
                    .col(ColumnDef::new(Component::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Component::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-component-group")
                            .from(Component::Table, Component::ComponentGroup)
                            .to(ComponentGroup::Table, ComponentGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Component::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Component {
    Table,
    Id,
    Application,
    ComponentGroup,
    ComponentKey,
    ShareKey,
    Name,
    Alias,
    Version,
    DeployVersion,
    Image,
    Cmd,
    HubUser,
    HubPassword,
    Cpu,
    Memory,
    Replicas,
    Spec,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ComponentGroup {
    Table,
    Id,
}
