/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Upgrade and rollback of marketplace applications.
//!
//! An upgrade renders a template version into a new component graph, diffs it
//! against the installed graph, submits the difference to the region and
//! tracks the asynchronous outcome through upgrade records. A rollback replays
//! the snapshot taken before the upgrade through the same path.

pub mod catalog;
pub mod changes;
pub mod deps;
pub mod error;
pub mod graph;
pub mod market;
pub mod orchestrator;
pub mod plan;
pub mod snapshot;
pub mod status;
pub mod store;
pub mod sync;
pub mod template;
pub mod version;

#[cfg(test)]
mod fixtures;

pub use catalog::Catalog;
pub use error::UpgradeError;
pub use orchestrator::{ComponentPreview, Orchestrator, RecordDetail};
pub use store::{MemoryStore, SeaStore, Store, StoreError, StoreTx};
