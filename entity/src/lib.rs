/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod app_template;
pub mod application;
pub mod component;
pub mod component_dependency;
pub mod component_group;
pub mod component_plugin;
pub mod component_upgrade_record;
pub mod config_group;
pub mod label;
pub mod plugin;
pub mod region;
pub mod upgrade_record;
pub mod upgrade_snapshot;
pub mod volume_dependency;
