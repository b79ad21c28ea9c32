/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub attr_name: String,
    pub attr_value: String,
    #[serde(default)]
    pub container_port: i32,
    #[serde(default)]
    pub is_change: bool,
    #[serde(default = "default_env_scope")]
    pub scope: String,
}

fn default_env_scope() -> String {
    "inner".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Port {
    pub container_port: i32,
    pub protocol: String,
    pub port_alias: String,
    #[serde(default)]
    pub is_inner_service: bool,
    #[serde(default)]
    pub is_outer_service: bool,
    #[serde(default)]
    pub k8s_service_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Volume {
    pub volume_name: String,
    pub volume_path: String,
    pub volume_type: String,
    #[serde(default)]
    pub volume_capacity: i64,
    #[serde(default)]
    pub mode: Option<i32>,
    #[serde(default)]
    pub allow_expansion: bool,
    /// Content of a config-file volume.
    #[serde(default)]
    pub file_content: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Probe {
    /// `liveness` or `readiness`.
    pub mode: String,
    pub scheme: String,
    #[serde(default)]
    pub path: String,
    pub port: i32,
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub http_header: String,
    pub initial_delay_second: i32,
    pub period_second: i32,
    pub timeout_second: i32,
    pub success_threshold: i32,
    pub failure_threshold: i32,
    pub is_used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rewrite {
    pub regex: String,
    pub replacement: String,
    pub flag: String,
}

/// An ingress rule routing a domain/path to one of the component's ports.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpRule {
    pub id: Uuid,
    pub domain_name: String,
    #[serde(default)]
    pub domain_path: String,
    pub container_port: i32,
    /// `key=value` pairs separated by `;`.
    #[serde(default)]
    pub domain_cookie: String,
    /// `key=value` pairs separated by `;`.
    #[serde(default)]
    pub domain_header: String,
    #[serde(default)]
    pub path_rewrite: bool,
    #[serde(default)]
    pub rewrites: Vec<Rewrite>,
    #[serde(default)]
    pub certificate_id: Option<Uuid>,
    /// JSON encoded proxy tuning (timeouts, body size, buffers, websocket, set_headers).
    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, FromJsonQueryResult)]
pub struct ComponentSpec {
    #[serde(default)]
    pub envs: Vec<EnvVar>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub probes: Vec<Probe>,
    /// Label ids, resolved against the label catalog.
    #[serde(default)]
    pub labels: Vec<Uuid>,
    #[serde(default)]
    pub http_rules: Vec<HttpRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "component")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub application: Uuid,
    pub component_group: Uuid,
    /// Key of the component inside its template.
    pub component_key: String,
    /// Key other template components use to reference this one.
    pub share_key: String,
    pub name: String,
    pub alias: String,
    pub version: String,
    pub deploy_version: String,
    pub image: String,
    pub cmd: Option<String>,
    pub hub_user: Option<String>,
    pub hub_password: Option<String>,
    pub cpu: i32,
    pub memory: i32,
    pub replicas: i32,
    pub spec: ComponentSpec,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::component_group::Entity",
        from = "Column::ComponentGroup",
        to = "super::component_group::Column::Id"
    )]
    ComponentGroup,
}

impl Related<super::component_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.spec.volumes.iter().find(|v| v.volume_name == name)
    }
}
