/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Renders component graphs into the bodies the region understands.

use common::types::*;
use entity::component::HttpRule;
use entity::component_plugin::PluginConfig;
use entity::component_upgrade_record::UpgradeType;
use region::components::*;
use region::config_groups::{ConfigGroupBody, ConfigGroupService, ConfigItemBody, SyncConfigGroupsBody};
use region::operations::{BUILD_KIND_MARKET_IMAGE, BatchOperation, BuildAction, BuildInfo, ImageInfo, UpgradeInfo};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::UpgradeError;
use crate::graph::{ComponentAction, GraphView, NewApp, OriginalApp};

const CONFIG_FILE_VOLUME: &str = "config-file";
const NODE_SELECTOR: &str = "node-selector";

pub struct MarketApp<'a> {
    catalog: &'a Catalog,
    original: &'a OriginalApp,
    new: &'a NewApp,
}

impl<'a> MarketApp<'a> {
    pub fn new(catalog: &'a Catalog, original: &'a OriginalApp, new: &'a NewApp) -> Self {
        MarketApp {
            catalog,
            original,
            new,
        }
    }

    /// Components of the new graph the region has to act on, and the
    /// components it no longer contains.
    pub fn sync_body(&self) -> Result<SyncComponentsBody, UpgradeError> {
        let view = self.new.view();
        let components = self
            .new
            .submitted()
            .map(|planned| self.component_body(&planned.component, view))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SyncComponentsBody {
            components,
            delete_component_ids: self.new.delete_component_ids.clone(),
        })
    }

    /// Puts the installed graph back after the region accepted a new graph
    /// that could not be persisted.
    pub fn revert_body(&self) -> Result<SyncComponentsBody, UpgradeError> {
        let touched: HashSet<Uuid> = self
            .new
            .submitted()
            .map(|planned| planned.component.id)
            .chain(self.new.delete_component_ids.iter().copied())
            .collect();
        let view = self.original.view();

        let components = self
            .original
            .components
            .iter()
            .filter(|component| touched.contains(&component.id))
            .map(|component| self.component_body(component, view))
            .collect::<Result<Vec<_>, _>>()?;

        let delete_component_ids = self
            .new
            .components
            .iter()
            .filter(|planned| planned.upgrade_type == UpgradeType::Add)
            .map(|planned| planned.component.id)
            .collect();

        Ok(SyncComponentsBody {
            components,
            delete_component_ids,
        })
    }

    pub fn config_groups_body(&self) -> SyncConfigGroupsBody {
        config_groups_body(&self.new.config_groups)
    }

    pub fn original_config_groups_body(&self) -> SyncConfigGroupsBody {
        config_groups_body(&self.original.config_groups)
    }

    pub fn builds(&self) -> BatchOperation {
        let build_infos = self
            .new
            .submitted()
            .filter(|planned| planned.action == ComponentAction::Build)
            .map(|planned| {
                let component = &planned.component;
                BuildInfo {
                    service_id: component.id,
                    action: match planned.upgrade_type {
                        UpgradeType::Add => BuildAction::Deploy,
                        UpgradeType::Upgrade => BuildAction::Upgrade,
                    },
                    kind: BUILD_KIND_MARKET_IMAGE.to_string(),
                    image_info: ImageInfo {
                        image_url: component.image.clone(),
                        user: component.hub_user.clone(),
                        password: component.hub_password.clone(),
                        cmd: component.cmd.clone(),
                    },
                }
            })
            .collect();

        BatchOperation::Build { build_infos }
    }

    pub fn upgrades(&self) -> BatchOperation {
        let upgrade_infos = self
            .new
            .submitted()
            .filter(|planned| planned.action == ComponentAction::Update)
            .map(|planned| UpgradeInfo {
                service_id: planned.component.id,
            })
            .collect();

        BatchOperation::Upgrade { upgrade_infos }
    }

    fn component_body(&self, component: &MComponent, view: GraphView<'_>) -> Result<ComponentBody, UpgradeError> {
        let spec = &component.spec;

        let http_rules = spec
            .http_rules
            .iter()
            .map(|rule| {
                http_rule_body(rule).map_err(|reason| UpgradeError::Render {
                    component: component.id,
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComponentBody {
            component_base: ComponentBase {
                component_id: component.id,
                component_name: component.name.clone(),
                component_alias: component.alias.clone(),
                image: component.image.clone(),
                cmd: component.cmd.clone(),
                container_cpu: component.cpu,
                container_memory: component.memory,
                replicas: component.replicas,
                deploy_version: component.deploy_version.clone(),
                version: component.version.clone(),
            },
            envs: spec
                .envs
                .iter()
                .map(|env| EnvBody {
                    name: env.name.clone(),
                    attr_name: env.attr_name.clone(),
                    attr_value: env.attr_value.clone(),
                    container_port: env.container_port,
                    scope: env.scope.clone(),
                    is_change: env.is_change,
                })
                .collect(),
            ports: spec
                .ports
                .iter()
                .map(|port| PortBody {
                    container_port: port.container_port,
                    protocol: port.protocol.clone(),
                    port_alias: port.port_alias.clone(),
                    is_inner_service: port.is_inner_service,
                    is_outer_service: port.is_outer_service,
                    k8s_service_name: port.k8s_service_name.clone(),
                })
                .collect(),
            config_files: spec
                .volumes
                .iter()
                .filter(|volume| volume.volume_type == CONFIG_FILE_VOLUME)
                .map(|volume| ConfigFileBody {
                    volume_name: volume.volume_name.clone(),
                    file_content: volume.file_content.clone().unwrap_or_default(),
                })
                .collect(),
            probes: spec
                .probes
                .iter()
                .map(|probe| ProbeBody {
                    mode: probe.mode.clone(),
                    scheme: probe.scheme.clone(),
                    path: probe.path.clone(),
                    port: probe.port,
                    cmd: probe.cmd.clone(),
                    http_header: probe.http_header.clone(),
                    initial_delay_second: probe.initial_delay_second,
                    period_second: probe.period_second,
                    timeout_second: probe.timeout_second,
                    success_threshold: probe.success_threshold,
                    failure_threshold: probe.failure_threshold,
                    is_used: i32::from(probe.is_used),
                })
                .collect(),
            volumes: spec
                .volumes
                .iter()
                .map(|volume| VolumeBody {
                    volume_name: volume.volume_name.clone(),
                    volume_path: volume.volume_path.clone(),
                    volume_type: volume.volume_type.clone(),
                    volume_capacity: volume.volume_capacity,
                    mode: volume.mode,
                    allow_expansion: volume.allow_expansion,
                })
                .collect(),
            labels: self.labels(component),
            relations: view
                .dependencies
                .iter()
                .filter(|dep| dep.component == component.id)
                .map(|dep| RelationBody {
                    service_id: dep.component,
                    dep_service_id: dep.dependency,
                })
                .collect(),
            volume_relations: view
                .volume_dependencies
                .iter()
                .filter(|dep| dep.component == component.id)
                .map(|dep| VolumeRelationBody {
                    service_id: dep.component,
                    dep_service_id: dep.dependency,
                    dep_volume_name: dep.volume_name.clone(),
                    mount_path: dep.mount_path.clone(),
                })
                .collect(),
            app_config_groups: view
                .config_groups
                .iter()
                .filter(|group| group.components.0.contains(&component.id))
                .map(|group| ConfigGroupRef {
                    config_group_name: group.name.clone(),
                })
                .collect(),
            plugins: view
                .plugins
                .iter()
                .filter(|binding| binding.component == component.id)
                .filter_map(|binding| self.plugin_body(component, binding))
                .collect(),
            http_rules,
        })
    }

    fn labels(&self, component: &MComponent) -> Vec<LabelBody> {
        component
            .spec
            .labels
            .iter()
            .filter_map(|id| match self.catalog.label(*id) {
                Some(label) => Some(LabelBody {
                    label_key: NODE_SELECTOR.to_string(),
                    label_value: label.name.clone(),
                }),
                None => {
                    debug!(component = %component.id, label = %id, "Dropping unknown label");
                    None
                }
            })
            .collect()
    }

    fn plugin_body(&self, component: &MComponent, binding: &MComponentPlugin) -> Option<PluginBody> {
        let Some(plugin) = self.catalog.plugin(binding.plugin) else {
            warn!(component = %component.id, plugin = %binding.plugin, "Dropping binding of a plugin missing from the catalog");
            return None;
        };

        let mut config_envs = ConfigEnvs::default();
        let mut normal_options: BTreeMap<String, String> = BTreeMap::new();

        for config in &binding.configs.0 {
            match config {
                PluginConfig::Undefined { injection, attrs } if injection == "env" => {
                    config_envs.normal_envs.extend(attrs.iter().map(|(name, value)| PluginEnv {
                        env_name: name.clone(),
                        env_value: value.clone(),
                    }));
                }
                PluginConfig::Undefined { attrs, .. } => {
                    normal_options.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                PluginConfig::UpstreamPort {
                    container_port,
                    protocol,
                    attrs,
                } => config_envs.complex_envs.base_ports.push(BasePort {
                    service_id: component.id,
                    options: attrs.clone(),
                    protocol: protocol.clone(),
                    port: *container_port,
                    service_alias: component.alias.clone(),
                }),
                PluginConfig::DownstreamPort {
                    container_port,
                    protocol,
                    dest_component,
                    dest_alias,
                    attrs,
                } => config_envs.complex_envs.base_services.push(BaseService {
                    depend_service_alias: dest_alias.clone(),
                    protocol: protocol.clone(),
                    service_alias: component.alias.clone(),
                    options: attrs.clone(),
                    service_id: component.id,
                    depend_service_id: *dest_component,
                    port: *container_port,
                }),
            }
        }

        if !normal_options.is_empty() {
            config_envs.complex_envs.base_normal.options = Some(normal_options);
        }

        Some(PluginBody {
            plugin_id: plugin.id,
            version_id: binding.build_version.clone(),
            plugin_model: plugin.category.clone(),
            container_cpu: binding.cpu,
            container_memory: binding.memory,
            switch: binding.active,
            config_envs,
        })
    }
}

fn config_groups_body(groups: &[MConfigGroup]) -> SyncConfigGroupsBody {
    SyncConfigGroupsBody {
        app_config_groups: groups
            .iter()
            .map(|group| ConfigGroupBody {
                config_group_name: group.name.clone(),
                deploy_type: group.deploy_type.clone(),
                enable: group.enabled,
                config_items: group
                    .items
                    .0
                    .iter()
                    .map(|(key, value)| ConfigItemBody {
                        item_key: key.clone(),
                        item_value: value.clone(),
                    })
                    .collect(),
                config_group_services: group
                    .components
                    .0
                    .iter()
                    .map(|id| ConfigGroupService { service_id: *id })
                    .collect(),
            })
            .collect(),
    }
}

/// Parses `key=value` pairs separated by `;`. Entries without `=` or with an
/// empty key are skipped.
pub fn parse_key_values(raw: &str) -> Vec<KeyValue> {
    raw.split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| KeyValue {
                key: key.to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

fn number(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn parse_proxy_config(raw: &str) -> Result<ProxyConfig, String> {
    if raw.trim().is_empty() {
        return Ok(ProxyConfig::default());
    }

    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid rule config: {}", e))?;
    let config = value
        .as_object()
        .ok_or_else(|| "rule config is not an object".to_string())?;
    let field = |key: &str| config.get(key).and_then(number);

    let set_headers = config
        .get("set_headers")
        .and_then(|headers| headers.as_array())
        .map(|headers| {
            headers
                .iter()
                .filter_map(|header| {
                    let key = header.get("item_key")?.as_str()?;
                    let value = header.get("item_value").and_then(|v| v.as_str()).unwrap_or_default();
                    Some(KeyValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ProxyConfig {
        proxy_connect_timeout: field("proxy_connect_timeout"),
        proxy_send_timeout: field("proxy_send_timeout"),
        proxy_read_timeout: field("proxy_read_timeout"),
        proxy_body_size: field("proxy_body_size"),
        proxy_buffer_numbers: field("proxy_buffer_numbers"),
        proxy_buffer_size: field("proxy_buffer_size"),
        websocket: config
            .get("WebSocket")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        set_headers,
    })
}

fn http_rule_body(rule: &HttpRule) -> Result<HttpRuleBody, String> {
    Ok(HttpRuleBody {
        http_rule_id: rule.id,
        domain: rule.domain_name.clone(),
        path: if rule.domain_path.is_empty() {
            "/".to_string()
        } else {
            rule.domain_path.clone()
        },
        container_port: rule.container_port,
        cookies: parse_key_values(&rule.domain_cookie),
        headers: parse_key_values(&rule.domain_header),
        path_rewrite: rule.path_rewrite,
        rewrites: rule
            .rewrites
            .iter()
            .map(|rewrite| RewriteBody {
                regex: rewrite.regex.clone(),
                replacement: rewrite.replacement.clone(),
                flag: rewrite.flag.clone(),
            })
            .collect(),
        certificate_id: rule.certificate_id,
        proxy: parse_proxy_config(rule.config.as_deref().unwrap_or_default())?,
    })
}
