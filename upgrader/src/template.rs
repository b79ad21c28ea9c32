/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Typed form of a marketplace template version.
//!
//! Templates are stored as JSON in `app_template.template`. Parsing rejects
//! unknown plugin config shapes and duplicate keys before any planning starts.

use entity::component::{EnvVar, Port, Probe, Volume};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::UpgradeError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AppTemplate {
    #[serde(default)]
    pub components: Vec<ComponentTemplate>,
    #[serde(default)]
    pub config_groups: Vec<ConfigGroupTemplate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ComponentTemplate {
    pub key: String,
    pub share_key: String,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    pub version: String,
    pub deploy_version: String,
    pub image: String,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub hub_user: Option<String>,
    #[serde(default)]
    pub hub_password: Option<String>,
    #[serde(default = "default_cpu")]
    pub cpu: i32,
    #[serde(default = "default_memory")]
    pub memory: i32,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(default)]
    pub envs: Vec<EnvVar>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub probes: Vec<Probe>,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Share keys of the components this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub volume_dependencies: Vec<VolumeDependencyTemplate>,
    #[serde(default)]
    pub plugins: Vec<PluginTemplate>,
}

fn default_cpu() -> i32 {
    250
}

fn default_memory() -> i32 {
    512
}

fn default_replicas() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VolumeDependencyTemplate {
    pub share_key: String,
    pub volume_name: String,
    pub mount_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PluginTemplate {
    /// Matched against the `origin_key` of the plugin catalog.
    pub plugin_key: String,
    #[serde(default)]
    pub cpu: i32,
    #[serde(default)]
    pub memory: i32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub configs: Vec<PluginConfigTemplate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "meta_type", rename_all = "snake_case")]
pub enum PluginConfigTemplate {
    Undefined {
        #[serde(default = "default_injection")]
        injection: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
    },
    UpstreamPort {
        container_port: i32,
        protocol: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
    },
    DownstreamPort {
        container_port: i32,
        protocol: String,
        /// Share key of the component the traffic goes to.
        dest_share_key: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
    },
}

fn default_injection() -> String {
    "env".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigGroupTemplate {
    pub name: String,
    #[serde(default = "default_injection")]
    pub injection_type: String,
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    /// Template keys of the member components.
    #[serde(default)]
    pub component_keys: Vec<String>,
}

impl AppTemplate {
    pub fn parse(value: &serde_json::Value) -> Result<Self, UpgradeError> {
        let template: AppTemplate = serde_json::from_value(value.clone())
            .map_err(|e| UpgradeError::Template(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    fn validate(&self) -> Result<(), UpgradeError> {
        let mut keys = HashSet::new();
        for component in &self.components {
            if component.key.trim().is_empty() {
                return Err(UpgradeError::Template(format!(
                    "component {} has an empty key",
                    component.name
                )));
            }

            if !keys.insert(component.key.as_str()) {
                return Err(UpgradeError::Template(format!(
                    "duplicate component key {}",
                    component.key
                )));
            }
        }

        let mut groups = HashSet::new();
        for group in &self.config_groups {
            if !groups.insert(group.name.as_str()) {
                return Err(UpgradeError::Template(format!(
                    "duplicate config group {}",
                    group.name
                )));
            }
        }

        Ok(())
    }

    pub fn component(&self, key: &str) -> Option<&ComponentTemplate> {
        self.components.iter().find(|c| c.key == key)
    }
}
