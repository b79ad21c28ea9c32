/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Builds the desired graph of a component group, from a template version
//! for upgrades and from a snapshot for restores.

use chrono::NaiveDateTime;
use common::types::*;
use entity::component_plugin::{PluginConfig, PluginConfigs};
use entity::component_upgrade_record::UpgradeType;
use entity::config_group::{ComponentIds, ConfigItems};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::changes::{ComponentChanges, merge_template, new_component};
use crate::deps::{ReconcileScope, reconcile};
use crate::error::UpgradeError;
use crate::graph::{ComponentAction, NewApp, OriginalApp, PlannedComponent};
use crate::snapshot::SnapshotData;
use crate::template::{AppTemplate, ComponentTemplate, PluginConfigTemplate, PluginTemplate};

pub struct UpgradePlanner<'a> {
    pub catalog: &'a Catalog,
    pub original: &'a OriginalApp,
    pub template: &'a AppTemplate,
    pub version: &'a str,
    /// Restricts the upgrade to these template components.
    pub component_keys: Option<&'a [String]>,
    /// Only the listed components change; sibling edges and the group version stay.
    pub single_component: bool,
    pub now: NaiveDateTime,
}

impl UpgradePlanner<'_> {
    pub fn plan(&self) -> Result<NewApp, UpgradeError> {
        let templates = self.selected_templates()?;

        let mut components: Vec<PlannedComponent> = templates
            .iter()
            .map(|template| self.plan_component(template))
            .collect();

        let (edges, volume_edges) = self.dependency_edges(&templates, &mut components);
        let plugins = self.plugin_bindings(&templates, &mut components);

        for planned in components.iter_mut() {
            let action = match planned.upgrade_type {
                UpgradeType::Add => ComponentAction::Build,
                UpgradeType::Upgrade => planned.changes.action(),
            };
            planned.action.raise(action);
        }

        let batch_ids: HashSet<Uuid> = components.iter().map(|c| c.component.id).collect();
        let scope = match self.component_keys {
            Some(_) => ReconcileScope {
                component_ids: self
                    .original
                    .component_ids()
                    .intersection(&batch_ids)
                    .copied()
                    .collect(),
                template_component_ids: Some(batch_ids.clone()),
                single_component: self.single_component,
            },
            None => ReconcileScope {
                component_ids: self.original.component_ids(),
                template_component_ids: None,
                single_component: self.single_component,
            },
        };

        let config_groups = self.config_groups(&components);

        let mut group = self.original.group.clone();
        if !self.single_component {
            group.version = self.version.to_string();
        }
        group.updated_at = self.now;

        Ok(NewApp {
            application: self.original.application.clone(),
            group,
            dependencies: reconcile(&edges, &self.original.dependencies, &scope),
            volume_dependencies: reconcile(&volume_edges, &self.original.volume_dependencies, &scope),
            components,
            plugins,
            config_groups,
            delete_component_ids: Vec::new(),
        })
    }

    fn selected_templates(&self) -> Result<Vec<&ComponentTemplate>, UpgradeError> {
        let Some(keys) = self.component_keys else {
            return Ok(self.template.components.iter().collect());
        };

        keys.iter()
            .map(|key| {
                self.template.component(key).ok_or_else(|| {
                    UpgradeError::Template(format!("component {} is not part of version {}", key, self.version))
                })
            })
            .collect()
    }

    fn plan_component(&self, template: &ComponentTemplate) -> PlannedComponent {
        match self.original.component_by_key(&template.key) {
            Some(existing) => {
                let component = merge_template(existing, template, self.catalog, self.now);
                let changes = ComponentChanges::between(existing, &component, self.catalog);
                PlannedComponent {
                    component,
                    action: ComponentAction::Nothing,
                    upgrade_type: UpgradeType::Upgrade,
                    changes,
                }
            }
            None => PlannedComponent {
                component: new_component(
                    template,
                    self.original.application.id,
                    self.original.group.id,
                    self.catalog,
                    self.now,
                ),
                action: ComponentAction::Build,
                upgrade_type: UpgradeType::Add,
                changes: ComponentChanges::default(),
            },
        }
    }

    fn dependency_edges(
        &self,
        templates: &[&ComponentTemplate],
        components: &mut [PlannedComponent],
    ) -> (Vec<MComponentDependency>, Vec<MVolumeDependency>) {
        let mut edges = Vec::new();
        let mut volume_edges = Vec::new();
        let mut added: Vec<(usize, String, bool)> = Vec::new();

        for (index, template) in templates.iter().enumerate() {
            let component = &components[index].component;

            for share_key in &template.dependencies {
                let Some(dependency) = resolve(components, self.original, share_key) else {
                    info!(component = %component.name, share_key, "Skipping unresolved dependency");
                    continue;
                };

                let known = self
                    .original
                    .dependencies
                    .iter()
                    .any(|d| d.component == component.id && d.dependency == dependency.id);
                if !known {
                    added.push((index, share_key.clone(), false));
                }

                edges.push(MComponentDependency {
                    id: Uuid::new_v4(),
                    component: component.id,
                    dependency: dependency.id,
                });
            }

            for volume in &template.volume_dependencies {
                let Some(dependency) = resolve(components, self.original, &volume.share_key) else {
                    info!(component = %component.name, share_key = %volume.share_key, "Skipping unresolved volume dependency");
                    continue;
                };

                if dependency.volume(&volume.volume_name).is_none() {
                    info!(
                        component = %component.name,
                        volume = %volume.volume_name,
                        "Skipping volume dependency on a missing volume"
                    );
                    continue;
                }

                let known = self.original.volume_dependencies.iter().any(|d| {
                    d.component == component.id
                        && d.dependency == dependency.id
                        && d.volume_name == volume.volume_name
                });
                if !known {
                    added.push((index, format!("{}:{}", volume.share_key, volume.volume_name), true));
                }

                volume_edges.push(MVolumeDependency {
                    id: Uuid::new_v4(),
                    component: component.id,
                    dependency: dependency.id,
                    volume_name: volume.volume_name.clone(),
                    mount_path: volume.mount_path.clone(),
                });
            }
        }

        for (index, key, volume) in added {
            let changes = &mut components[index].changes;
            if volume {
                changes.volume_dependencies.push(key);
            } else {
                changes.dependencies.push(key);
            }
        }

        (edges, volume_edges)
    }

    fn plugin_bindings(
        &self,
        templates: &[&ComponentTemplate],
        components: &mut [PlannedComponent],
    ) -> Vec<MComponentPlugin> {
        let batch_ids: HashSet<Uuid> = components.iter().map(|c| c.component.id).collect();
        let mut bindings: Vec<MComponentPlugin> = self
            .original
            .plugins
            .iter()
            .filter(|binding| batch_ids.contains(&binding.component))
            .cloned()
            .collect();
        let mut added: Vec<(usize, String)> = Vec::new();

        for (index, template) in templates.iter().enumerate() {
            let component = &components[index].component;

            for plugin_template in &template.plugins {
                let Some(plugin) = self.catalog.plugin_by_origin(&plugin_template.plugin_key) else {
                    info!(plugin_key = %plugin_template.plugin_key, "Skipping plugin missing from the catalog");
                    continue;
                };

                if bindings
                    .iter()
                    .any(|b| b.component == component.id && b.plugin == plugin.id)
                {
                    continue;
                }

                let Some(configs) = plugin_configs(plugin_template, components, self.original) else {
                    warn!(
                        component = %component.name,
                        plugin_key = %plugin_template.plugin_key,
                        "Dropping plugin binding with an unresolvable downstream component"
                    );
                    continue;
                };

                bindings.push(MComponentPlugin {
                    id: Uuid::new_v4(),
                    component: component.id,
                    plugin: plugin.id,
                    build_version: plugin.build_version.clone(),
                    cpu: plugin_template.cpu,
                    memory: plugin_template.memory,
                    active: plugin_template.active,
                    configs: PluginConfigs(configs),
                });
                added.push((index, plugin_template.plugin_key.clone()));
            }
        }

        for (index, key) in added {
            components[index].changes.plugins.push(key);
        }

        bindings
    }

    fn config_groups(&self, components: &[PlannedComponent]) -> Vec<MConfigGroup> {
        let mut groups = self.original.config_groups.clone();

        for template in &self.template.config_groups {
            let members: Vec<Uuid> = template
                .component_keys
                .iter()
                .filter_map(|key| {
                    components
                        .iter()
                        .find(|c| c.component.component_key == *key)
                        .map(|c| c.component.id)
                })
                .collect();

            match groups.iter_mut().find(|g| g.name == template.name) {
                Some(group) => {
                    for (key, value) in &template.items {
                        group.items.0.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                    for member in members {
                        if !group.components.0.contains(&member) {
                            group.components.0.push(member);
                        }
                    }
                }
                None => groups.push(MConfigGroup {
                    id: Uuid::new_v4(),
                    application: self.original.application.id,
                    region_name: self.original.application.region_name.clone(),
                    name: template.name.clone(),
                    deploy_type: template.injection_type.clone(),
                    enabled: true,
                    items: ConfigItems(template.items.clone()),
                    components: ComponentIds(members),
                }),
            }
        }

        groups
    }
}

/// Finds a dependency by share key, preferring the components of the batch.
fn resolve<'a>(
    components: &'a [PlannedComponent],
    original: &'a OriginalApp,
    share_key: &str,
) -> Option<&'a MComponent> {
    components
        .iter()
        .map(|c| &c.component)
        .find(|c| c.share_key == share_key)
        .or_else(|| original.component_by_share_key(share_key))
}

fn plugin_configs(
    template: &PluginTemplate,
    components: &[PlannedComponent],
    original: &OriginalApp,
) -> Option<Vec<PluginConfig>> {
    template
        .configs
        .iter()
        .map(|config| match config {
            PluginConfigTemplate::Undefined { injection, attrs } => Some(PluginConfig::Undefined {
                injection: injection.clone(),
                attrs: attrs.clone(),
            }),
            PluginConfigTemplate::UpstreamPort {
                container_port,
                protocol,
                attrs,
            } => Some(PluginConfig::UpstreamPort {
                container_port: *container_port,
                protocol: protocol.clone(),
                attrs: attrs.clone(),
            }),
            PluginConfigTemplate::DownstreamPort {
                container_port,
                protocol,
                dest_share_key,
                attrs,
            } => resolve(components, original, dest_share_key).map(|dest| PluginConfig::DownstreamPort {
                container_port: *container_port,
                protocol: protocol.clone(),
                dest_component: dest.id,
                dest_alias: dest.alias.clone(),
                attrs: attrs.clone(),
            }),
        })
        .collect()
}

pub struct RestorePlanner<'a> {
    pub catalog: &'a Catalog,
    pub original: &'a OriginalApp,
    pub snapshot: &'a SnapshotData,
    pub now: NaiveDateTime,
}

impl RestorePlanner<'_> {
    pub fn plan(&self) -> NewApp {
        let installed = self.original.component_ids();
        let snapshot_ids: HashSet<Uuid> = self.snapshot.components.iter().map(|c| c.component.id).collect();
        let restored: Vec<_> = self
            .snapshot
            .components
            .iter()
            .filter(|c| installed.contains(&c.component.id))
            .collect();
        let restored_ids: HashSet<Uuid> = restored.iter().map(|c| c.component.id).collect();

        let delete_component_ids: Vec<Uuid> = self
            .original
            .components
            .iter()
            .map(|c| c.id)
            .filter(|id| !snapshot_ids.contains(id))
            .collect();
        let deleted: HashSet<Uuid> = delete_component_ids.iter().copied().collect();

        let components = restored
            .iter()
            .map(|snapshot| {
                let mut component = snapshot.component.clone();
                component.updated_at = self.now;
                let changes = self
                    .original
                    .components
                    .iter()
                    .find(|c| c.id == component.id)
                    .map(|current| ComponentChanges::between(current, &component, self.catalog))
                    .unwrap_or_default();

                PlannedComponent {
                    component,
                    action: snapshot.action,
                    upgrade_type: UpgradeType::Upgrade,
                    changes,
                }
            })
            .collect();

        let edges: Vec<MComponentDependency> = restored
            .iter()
            .flat_map(|c| c.dependencies.iter())
            .filter(|d| restored_ids.contains(&d.dependency))
            .cloned()
            .collect();
        let volume_edges: Vec<MVolumeDependency> = restored
            .iter()
            .flat_map(|c| c.volume_dependencies.iter())
            .filter(|d| restored_ids.contains(&d.dependency))
            .cloned()
            .collect();
        let scope = ReconcileScope {
            component_ids: installed,
            template_component_ids: None,
            single_component: false,
        };
        let untouched = |source: Uuid, target: Uuid| !deleted.contains(&source) && !deleted.contains(&target);

        let mut config_groups = self.original.config_groups.clone();
        for group in config_groups.iter_mut() {
            group.components.0.retain(|id| !deleted.contains(id));
        }

        let mut group = self.original.group.clone();
        group.version = self.snapshot.version.clone();
        group.updated_at = self.now;

        NewApp {
            application: self.original.application.clone(),
            group,
            components,
            dependencies: reconcile(&edges, &self.original.dependencies, &scope)
                .into_iter()
                .filter(|d| untouched(d.component, d.dependency))
                .collect(),
            volume_dependencies: reconcile(&volume_edges, &self.original.volume_dependencies, &scope)
                .into_iter()
                .filter(|d| untouched(d.component, d.dependency))
                .collect(),
            plugins: restored.iter().flat_map(|c| c.plugins.iter().cloned()).collect(),
            config_groups,
            delete_component_ids,
        }
    }
}
