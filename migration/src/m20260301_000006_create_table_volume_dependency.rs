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
                    .table(VolumeDependency::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VolumeDependency::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(VolumeDependency::Component).uuid().not_null())
                    .col(ColumnDef::new(VolumeDependency::Dependency).uuid().not_null())
                    .col(ColumnDef::new(VolumeDependency::VolumeName).string().not_null())
                    .col(ColumnDef::new(VolumeDependency::MountPath).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-volume-dependency-component")
                            .from(VolumeDependency::Table, VolumeDependency::Component)
                            .to(Component::Table, Component::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VolumeDependency::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VolumeDependency {
    Table,
    Id,
    Component,
    Dependency,
    VolumeName,
    MountPath,
}

#[derive(DeriveIden)]
enum Component {
    Table,
    Id,
}
