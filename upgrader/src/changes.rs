/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Property level differences between an installed component and its
//! desired state. Template properties are merged add-only: values the user
//! set on the installed component are never removed by an upgrade.

use chrono::NaiveDateTime;
use common::types::*;
use entity::component::{ComponentSpec, EnvVar, Port, Probe, Volume};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::graph::ComponentAction;
use crate::template::ComponentTemplate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub old: String,
    pub new: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct ListChanges<T> {
    #[serde(default)]
    pub add: Vec<T>,
    #[serde(default)]
    pub update: Vec<T>,
}

impl<T> Default for ListChanges<T> {
    fn default() -> Self {
        ListChanges {
            add: Vec::new(),
            update: Vec::new(),
        }
    }
}

impl<T> ListChanges<T> {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.update.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_version: Option<ValueChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ValueChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<ValueChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "ListChanges::is_empty")]
    pub ports: ListChanges<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(default, skip_serializing_if = "ListChanges::is_empty")]
    pub probes: ListChanges<Probe>,
    /// Names of added labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Catalog keys of added plugins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    /// Share keys of added dependencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_dependencies: Vec<String>,
}

impl ComponentChanges {
    /// Differences from `current` to `target`, counting only what `target` adds or alters.
    pub fn between(current: &MComponent, target: &MComponent, catalog: &Catalog) -> Self {
        let mut changes = ComponentChanges {
            deploy_version: value_change(&current.deploy_version, &target.deploy_version),
            image: value_change(&current.image, &target.image),
            cmd: value_change(
                current.cmd.as_deref().unwrap_or_default(),
                target.cmd.as_deref().unwrap_or_default(),
            ),
            ..Default::default()
        };

        let (current, target) = (&current.spec, &target.spec);

        changes.envs = target
            .envs
            .iter()
            .filter(|env| !current.envs.iter().any(|e| e.attr_name == env.attr_name))
            .cloned()
            .collect();

        for port in &target.ports {
            match current.ports.iter().find(|p| p.container_port == port.container_port) {
                None => changes.ports.add.push(port.clone()),
                Some(existing) if existing != port => changes.ports.update.push(port.clone()),
                Some(_) => {}
            }
        }

        changes.volumes = target
            .volumes
            .iter()
            .filter(|volume| current.volumes.iter().all(|v| v.volume_name != volume.volume_name))
            .cloned()
            .collect();

        for probe in &target.probes {
            match current.probes.iter().find(|p| p.mode == probe.mode) {
                None => changes.probes.add.push(probe.clone()),
                Some(existing) if existing != probe => changes.probes.update.push(probe.clone()),
                Some(_) => {}
            }
        }

        changes.labels = target
            .labels
            .iter()
            .filter(|id| !current.labels.contains(id))
            .filter_map(|id| catalog.label(*id).map(|l| l.name.clone()))
            .collect();

        changes
    }

    pub fn is_empty(&self) -> bool {
        *self == ComponentChanges::default()
    }

    /// A new artifact has to be pulled.
    pub fn requires_build(&self) -> bool {
        self.deploy_version.is_some() || self.image.is_some()
    }

    pub fn action(&self) -> ComponentAction {
        if self.requires_build() {
            ComponentAction::Build
        } else if !self.is_empty() {
            ComponentAction::Update
        } else {
            ComponentAction::Nothing
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

fn value_change(old: &str, new: &str) -> Option<ValueChange> {
    (old != new).then(|| ValueChange {
        old: old.to_string(),
        new: new.to_string(),
    })
}

fn resolve_labels(names: &[String], catalog: &Catalog) -> Vec<Uuid> {
    names
        .iter()
        .filter_map(|name| {
            let id = catalog.label_id(name);
            if id.is_none() {
                debug!(label = %name, "Dropping label unknown to the catalog");
            }
            id
        })
        .collect()
}

/// Applies a template to an installed component.
pub fn merge_template(
    existing: &MComponent,
    template: &ComponentTemplate,
    catalog: &Catalog,
    now: NaiveDateTime,
) -> MComponent {
    let mut component = existing.clone();
    component.version = template.version.clone();
    component.deploy_version = template.deploy_version.clone();
    component.image = template.image.clone();
    if template.cmd.is_some() {
        component.cmd = template.cmd.clone();
    }
    if template.hub_user.is_some() {
        component.hub_user = template.hub_user.clone();
        component.hub_password = template.hub_password.clone();
    }
    component.updated_at = now;

    let spec = &mut component.spec;

    for env in &template.envs {
        if !spec.envs.iter().any(|e| e.attr_name == env.attr_name) {
            spec.envs.push(env.clone());
        }
    }

    for port in &template.ports {
        match spec.ports.iter_mut().find(|p| p.container_port == port.container_port) {
            Some(existing) => {
                existing.protocol = port.protocol.clone();
                existing.port_alias = port.port_alias.clone();
            }
            None => spec.ports.push(port.clone()),
        }
    }

    for volume in &template.volumes {
        if spec.volumes.iter().all(|v| v.volume_name != volume.volume_name) {
            spec.volumes.push(volume.clone());
        }
    }

    for probe in &template.probes {
        match spec.probes.iter_mut().find(|p| p.mode == probe.mode) {
            Some(existing) => *existing = probe.clone(),
            None => spec.probes.push(probe.clone()),
        }
    }

    for label in resolve_labels(&template.labels, catalog) {
        if !spec.labels.contains(&label) {
            spec.labels.push(label);
        }
    }

    component
}

/// Renders a component the installed graph does not have yet.
pub fn new_component(
    template: &ComponentTemplate,
    application: Uuid,
    group: Uuid,
    catalog: &Catalog,
    now: NaiveDateTime,
) -> MComponent {
    MComponent {
        id: Uuid::new_v4(),
        application,
        component_group: group,
        component_key: template.key.clone(),
        share_key: template.share_key.clone(),
        name: template.name.clone(),
        alias: if template.alias.is_empty() {
            template.name.clone()
        } else {
            template.alias.clone()
        },
        version: template.version.clone(),
        deploy_version: template.deploy_version.clone(),
        image: template.image.clone(),
        cmd: template.cmd.clone(),
        hub_user: template.hub_user.clone(),
        hub_password: template.hub_password.clone(),
        cpu: template.cpu,
        memory: template.memory,
        replicas: template.replicas,
        spec: ComponentSpec {
            envs: template.envs.clone(),
            ports: template.ports.clone(),
            volumes: template.volumes.clone(),
            probes: template.probes.clone(),
            labels: resolve_labels(&template.labels, catalog),
            http_rules: Vec::new(),
        },
        created_at: now,
        updated_at: now,
    }
}
