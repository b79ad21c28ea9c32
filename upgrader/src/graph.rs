/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! In-memory component graphs an orchestration run works on.

use common::types::*;
use entity::component_upgrade_record::UpgradeType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::changes::ComponentChanges;

/// What the region has to do with a component. Ordered by weight.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComponentAction {
    #[default]
    Nothing,
    Update,
    Build,
}

impl ComponentAction {
    pub fn raise(&mut self, to: ComponentAction) {
        *self = (*self).max(to);
    }
}

/// The graph currently installed for a component group.
#[derive(Debug, Clone)]
pub struct OriginalApp {
    pub application: MApplication,
    pub group: MComponentGroup,
    pub components: Vec<MComponent>,
    /// Every dependency edge of the application, not only the group's.
    pub dependencies: Vec<MComponentDependency>,
    pub volume_dependencies: Vec<MVolumeDependency>,
    /// Plugin bindings of the group's components.
    pub plugins: Vec<MComponentPlugin>,
    pub config_groups: Vec<MConfigGroup>,
}

impl OriginalApp {
    pub fn component_ids(&self) -> HashSet<Uuid> {
        self.components.iter().map(|c| c.id).collect()
    }

    pub fn component_by_key(&self, key: &str) -> Option<&MComponent> {
        self.components.iter().find(|c| c.component_key == key)
    }

    pub fn component_by_share_key(&self, share_key: &str) -> Option<&MComponent> {
        self.components.iter().find(|c| c.share_key == share_key)
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView {
            dependencies: &self.dependencies,
            volume_dependencies: &self.volume_dependencies,
            plugins: &self.plugins,
            config_groups: &self.config_groups,
        }
    }
}

/// A component of the desired graph and how it differs from the installed one.
#[derive(Debug, Clone)]
pub struct PlannedComponent {
    pub component: MComponent,
    pub action: ComponentAction,
    pub upgrade_type: UpgradeType,
    pub changes: ComponentChanges,
}

/// The desired graph produced from a template or a snapshot.
#[derive(Debug, Clone)]
pub struct NewApp {
    pub application: MApplication,
    pub group: MComponentGroup,
    pub components: Vec<PlannedComponent>,
    /// Every dependency edge of the application after reconciliation.
    pub dependencies: Vec<MComponentDependency>,
    pub volume_dependencies: Vec<MVolumeDependency>,
    /// Plugin bindings of the planned components.
    pub plugins: Vec<MComponentPlugin>,
    pub config_groups: Vec<MConfigGroup>,
    pub delete_component_ids: Vec<Uuid>,
}

impl NewApp {
    /// Components the region has to act on.
    pub fn submitted(&self) -> impl Iterator<Item = &PlannedComponent> {
        self.components
            .iter()
            .filter(|c| c.action != ComponentAction::Nothing)
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView {
            dependencies: &self.dependencies,
            volume_dependencies: &self.volume_dependencies,
            plugins: &self.plugins,
            config_groups: &self.config_groups,
        }
    }

    pub fn graph_write(&self) -> GraphWrite {
        GraphWrite {
            application: self.application.id,
            group: self.group.clone(),
            components: self.components.iter().map(|c| c.component.clone()).collect(),
            delete_component_ids: self.delete_component_ids.clone(),
            dependencies: self.dependencies.clone(),
            volume_dependencies: self.volume_dependencies.clone(),
            plugin_components: self.components.iter().map(|c| c.component.id).collect(),
            plugins: self.plugins.clone(),
            config_groups: self.config_groups.clone(),
        }
    }
}

/// Relations the differ needs to render a component body.
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    pub dependencies: &'a [MComponentDependency],
    pub volume_dependencies: &'a [MVolumeDependency],
    pub plugins: &'a [MComponentPlugin],
    pub config_groups: &'a [MConfigGroup],
}

/// Everything persisted after the region accepted a new graph.
#[derive(Debug, Clone)]
pub struct GraphWrite {
    pub application: Uuid,
    /// Written back with its new version.
    pub group: MComponentGroup,
    /// Upserted by id.
    pub components: Vec<MComponent>,
    /// Removed together with their edges and plugin bindings.
    pub delete_component_ids: Vec<Uuid>,
    /// Replaces every dependency edge of the application.
    pub dependencies: Vec<MComponentDependency>,
    pub volume_dependencies: Vec<MVolumeDependency>,
    /// Components whose plugin bindings are replaced by `plugins`.
    pub plugin_components: Vec<Uuid>,
    pub plugins: Vec<MComponentPlugin>,
    /// Upserted by id.
    pub config_groups: Vec<MConfigGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_only_raises() {
        let mut action = ComponentAction::Nothing;
        action.raise(ComponentAction::Build);
        action.raise(ComponentAction::Update);
        assert_eq!(action, ComponentAction::Build);
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(
            serde_json::to_string(&ComponentAction::Update).unwrap(),
            "\"update\""
        );
        assert!(ComponentAction::Nothing < ComponentAction::Update);
    }
}
