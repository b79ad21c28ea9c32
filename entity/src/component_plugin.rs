/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-binding configuration of a plugin attached to a component.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "meta_type", rename_all = "snake_case")]
pub enum PluginConfig {
    /// Plain options; injected as environment variables when `injection` is `env`.
    Undefined {
        injection: String,
        attrs: BTreeMap<String, String>,
    },
    UpstreamPort {
        container_port: i32,
        protocol: String,
        attrs: BTreeMap<String, String>,
    },
    DownstreamPort {
        container_port: i32,
        protocol: String,
        dest_component: Uuid,
        dest_alias: String,
        attrs: BTreeMap<String, String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, FromJsonQueryResult)]
pub struct PluginConfigs(pub Vec<PluginConfig>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "component_plugin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub component: Uuid,
    pub plugin: Uuid,
    pub build_version: String,
    pub cpu: i32,
    pub memory: i32,
    pub active: bool,
    pub configs: PluginConfigs,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::component::Entity",
        from = "Column::Component",
        to = "super::component::Column::Id"
    )]
    Component,
    #[sea_orm(
        belongs_to = "super::plugin::Entity",
        from = "Column::Plugin",
        to = "super::plugin::Column::Id"
    )]
    Plugin,
}

impl ActiveModelBehavior for ActiveModel {}
