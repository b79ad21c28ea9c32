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
                    .table(ComponentDependency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComponentDependency::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ComponentDependency::Component).uuid().not_null())
                    .col(ColumnDef::new(ComponentDependency::Dependency).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-component-dependency-component")
                            .from(ComponentDependency::Table, ComponentDependency::Component)
                            .to(Component::Table, Component::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComponentDependency::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComponentDependency {
    Table,
    Id,
    Component,
    Dependency,
}

#[derive(DeriveIden)]
enum Component {
    Table,
    Id,
}
