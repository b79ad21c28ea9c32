/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncComponentsBody {
    pub components: Vec<ComponentBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete_component_ids: Vec<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ComponentBody {
    pub component_base: ComponentBase,
    pub envs: Vec<EnvBody>,
    pub ports: Vec<PortBody>,
    pub config_files: Vec<ConfigFileBody>,
    pub probes: Vec<ProbeBody>,
    pub volumes: Vec<VolumeBody>,
    pub labels: Vec<LabelBody>,
    pub relations: Vec<RelationBody>,
    pub volume_relations: Vec<VolumeRelationBody>,
    pub app_config_groups: Vec<ConfigGroupRef>,
    pub plugins: Vec<PluginBody>,
    pub http_rules: Vec<HttpRuleBody>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ComponentBase {
    pub component_id: Uuid,
    pub component_name: String,
    pub component_alias: String,
    pub image: String,
    pub cmd: Option<String>,
    pub container_cpu: i32,
    pub container_memory: i32,
    pub replicas: i32,
    pub deploy_version: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvBody {
    pub name: String,
    pub attr_name: String,
    pub attr_value: String,
    pub container_port: i32,
    pub scope: String,
    pub is_change: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PortBody {
    pub container_port: i32,
    pub protocol: String,
    pub port_alias: String,
    pub is_inner_service: bool,
    pub is_outer_service: bool,
    pub k8s_service_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileBody {
    pub volume_name: String,
    pub file_content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProbeBody {
    pub mode: String,
    pub scheme: String,
    pub path: String,
    pub port: i32,
    pub cmd: String,
    pub http_header: String,
    pub initial_delay_second: i32,
    pub period_second: i32,
    pub timeout_second: i32,
    pub success_threshold: i32,
    pub failure_threshold: i32,
    /// The region expects `1` or `0`.
    pub is_used: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VolumeBody {
    pub volume_name: String,
    pub volume_path: String,
    pub volume_type: String,
    pub volume_capacity: i64,
    pub mode: Option<i32>,
    pub allow_expansion: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LabelBody {
    pub label_key: String,
    pub label_value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RelationBody {
    pub service_id: Uuid,
    pub dep_service_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VolumeRelationBody {
    pub service_id: Uuid,
    pub dep_service_id: Uuid,
    pub dep_volume_name: String,
    pub mount_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigGroupRef {
    pub config_group_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PluginBody {
    pub plugin_id: Uuid,
    pub version_id: String,
    pub plugin_model: String,
    pub container_cpu: i32,
    pub container_memory: i32,
    pub switch: bool,
    pub config_envs: ConfigEnvs,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigEnvs {
    pub normal_envs: Vec<PluginEnv>,
    pub complex_envs: ComplexEnvs,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PluginEnv {
    pub env_name: String,
    pub env_value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplexEnvs {
    pub base_ports: Vec<BasePort>,
    pub base_services: Vec<BaseService>,
    pub base_normal: BaseNormal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BasePort {
    pub service_id: Uuid,
    pub options: BTreeMap<String, String>,
    pub protocol: String,
    pub port: i32,
    pub service_alias: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseService {
    pub depend_service_alias: String,
    pub protocol: String,
    pub service_alias: String,
    pub options: BTreeMap<String, String>,
    pub service_id: Uuid,
    pub depend_service_id: Uuid,
    pub port: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseNormal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RewriteBody {
    pub regex: String,
    pub replacement: String,
    pub flag: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxyConfig {
    pub proxy_connect_timeout: Option<i64>,
    pub proxy_send_timeout: Option<i64>,
    pub proxy_read_timeout: Option<i64>,
    pub proxy_body_size: Option<i64>,
    pub proxy_buffer_numbers: Option<i64>,
    pub proxy_buffer_size: Option<i64>,
    pub websocket: bool,
    pub set_headers: Vec<KeyValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HttpRuleBody {
    pub http_rule_id: Uuid,
    pub domain: String,
    pub path: String,
    pub container_port: i32,
    pub cookies: Vec<KeyValue>,
    pub headers: Vec<KeyValue>,
    pub path_rewrite: bool,
    pub rewrites: Vec<RewriteBody>,
    pub certificate_id: Option<Uuid>,
    pub proxy: ProxyConfig,
}
