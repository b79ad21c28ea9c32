/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "Keel", display_name = "Keel", bin_name = "keel", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "KEEL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "KEEL_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "KEEL_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(long, env = "KEEL_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "KEEL_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    /// Seconds before a request to a region is abandoned.
    #[arg(long, env = "KEEL_REGION_TIMEOUT", value_parser = greater_than_zero::<u64>, default_value = "10")]
    pub region_timeout: u64,
    #[arg(long, env = "KEEL_REGION_CONNECT_TIMEOUT", value_parser = greater_than_zero::<u64>, default_value = "5")]
    pub region_connect_timeout: u64,
    #[arg(long, env = "KEEL_RECORDS_PAGE_SIZE", value_parser = greater_than_zero::<u64>, default_value = "10")]
    pub records_page_size: u64,
    #[arg(long, env = "KEEL_STATE_FILE")]
    pub state_file: Option<String>,
    #[arg(long, env = "KEEL_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
    #[arg(long, env = "KEEL_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

pub type EAppTemplate = app_template::Entity;
pub type EApplication = application::Entity;
pub type EComponent = component::Entity;
pub type EComponentDependency = component_dependency::Entity;
pub type EComponentGroup = component_group::Entity;
pub type EComponentPlugin = component_plugin::Entity;
pub type EComponentUpgradeRecord = component_upgrade_record::Entity;
pub type EConfigGroup = config_group::Entity;
pub type ELabel = label::Entity;
pub type EPlugin = plugin::Entity;
pub type ERegion = region::Entity;
pub type EUpgradeRecord = upgrade_record::Entity;
pub type EUpgradeSnapshot = upgrade_snapshot::Entity;
pub type EVolumeDependency = volume_dependency::Entity;

pub type MAppTemplate = app_template::Model;
pub type MApplication = application::Model;
pub type MComponent = component::Model;
pub type MComponentDependency = component_dependency::Model;
pub type MComponentGroup = component_group::Model;
pub type MComponentPlugin = component_plugin::Model;
pub type MComponentUpgradeRecord = component_upgrade_record::Model;
pub type MConfigGroup = config_group::Model;
pub type MLabel = label::Model;
pub type MPlugin = plugin::Model;
pub type MRegion = region::Model;
pub type MUpgradeRecord = upgrade_record::Model;
pub type MUpgradeSnapshot = upgrade_snapshot::Model;
pub type MVolumeDependency = volume_dependency::Model;

pub type AAppTemplate = app_template::ActiveModel;
pub type AApplication = application::ActiveModel;
pub type AComponent = component::ActiveModel;
pub type AComponentDependency = component_dependency::ActiveModel;
pub type AComponentGroup = component_group::ActiveModel;
pub type AComponentPlugin = component_plugin::ActiveModel;
pub type AComponentUpgradeRecord = component_upgrade_record::ActiveModel;
pub type AConfigGroup = config_group::ActiveModel;
pub type ALabel = label::ActiveModel;
pub type APlugin = plugin::ActiveModel;
pub type ARegion = region::ActiveModel;
pub type AUpgradeRecord = upgrade_record::ActiveModel;
pub type AUpgradeSnapshot = upgrade_snapshot::ActiveModel;
pub type AVolumeDependency = volume_dependency::ActiveModel;

pub type CAppTemplate = app_template::Column;
pub type CApplication = application::Column;
pub type CComponent = component::Column;
pub type CComponentDependency = component_dependency::Column;
pub type CComponentGroup = component_group::Column;
pub type CComponentPlugin = component_plugin::Column;
pub type CComponentUpgradeRecord = component_upgrade_record::Column;
pub type CConfigGroup = config_group::Column;
pub type CLabel = label::Column;
pub type CPlugin = plugin::Column;
pub type CRegion = region::Column;
pub type CUpgradeRecord = upgrade_record::Column;
pub type CUpgradeSnapshot = upgrade_snapshot::Column;
pub type CVolumeDependency = volume_dependency::Column;
