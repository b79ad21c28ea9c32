/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_table_region;
mod m20260301_000002_create_table_application;
mod m20260301_000003_create_table_component_group;
mod m20260301_000004_create_table_component;
mod m20260301_000005_create_table_component_dependency;
mod m20260301_000006_create_table_volume_dependency;
mod m20260301_000007_create_table_label;
mod m20260301_000008_create_table_plugin;
mod m20260301_000009_create_table_component_plugin;
mod m20260301_000010_create_table_config_group;
mod m20260301_000011_create_table_app_template;
mod m20260301_000012_create_table_upgrade_snapshot;
mod m20260301_000013_create_table_upgrade_record;
mod m20260301_000014_create_table_component_upgrade_record;
mod m20260301_000015_create_index_unfinished_upgrade_record;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_table_region::Migration),
            Box::new(m20260301_000002_create_table_application::Migration),
            Box::new(m20260301_000003_create_table_component_group::Migration),
            Box::new(m20260301_000004_create_table_component::Migration),
            Box::new(m20260301_000005_create_table_component_dependency::Migration),
            Box::new(m20260301_000006_create_table_volume_dependency::Migration),
            Box::new(m20260301_000007_create_table_label::Migration),
            Box::new(m20260301_000008_create_table_plugin::Migration),
            Box::new(m20260301_000009_create_table_component_plugin::Migration),
            Box::new(m20260301_000010_create_table_config_group::Migration),
            Box::new(m20260301_000011_create_table_app_template::Migration),
            Box::new(m20260301_000012_create_table_upgrade_snapshot::Migration),
            Box::new(m20260301_000013_create_table_upgrade_record::Migration),
            Box::new(m20260301_000014_create_table_component_upgrade_record::Migration),
            Box::new(m20260301_000015_create_index_unfinished_upgrade_record::Migration),
        ]
    }
}
