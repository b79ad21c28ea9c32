/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use common::types::*;
use std::collections::HashSet;
use uuid::Uuid;

/// A directed edge from a component to something it depends on.
pub trait DependencyEdge {
    fn source(&self) -> Uuid;
    fn target(&self) -> Uuid;

    fn identity(&self) -> (Uuid, Uuid) {
        (self.source(), self.target())
    }
}

impl DependencyEdge for MComponentDependency {
    fn source(&self) -> Uuid {
        self.component
    }

    fn target(&self) -> Uuid {
        self.dependency
    }
}

impl DependencyEdge for MVolumeDependency {
    fn source(&self) -> Uuid {
        self.component
    }

    fn target(&self) -> Uuid {
        self.dependency
    }
}

/// Which part of the existing edge set an upgrade is allowed to replace.
#[derive(Debug, Clone, Default)]
pub struct ReconcileScope {
    /// Components of the upgraded group.
    pub component_ids: HashSet<Uuid>,
    /// Set when only a subset of the template is applied.
    pub template_component_ids: Option<HashSet<Uuid>>,
    pub single_component: bool,
}

/// Merges `new_edges` into `existing`, dropping the existing edges the
/// upgrade is responsible for. Duplicates keep their first occurrence.
pub fn reconcile<E: DependencyEdge + Clone>(
    new_edges: &[E],
    existing: &[E],
    scope: &ReconcileScope,
) -> Vec<E> {
    let kept = existing.iter().filter(|edge| {
        if scope.single_component || !scope.component_ids.contains(&edge.target()) {
            return true;
        }

        scope
            .template_component_ids
            .as_ref()
            .is_some_and(|template| !template.contains(&edge.source()))
    });

    let mut seen = HashSet::new();
    kept.chain(new_edges.iter())
        .filter(|edge| seen.insert(edge.identity()))
        .cloned()
        .collect()
}
