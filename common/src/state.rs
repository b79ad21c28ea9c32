/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Declarative catalog of regions, labels and plugins applied at startup.

use crate::input::load_secret;
use crate::types::*;
use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRegion {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub token_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateLabel {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePlugin {
    pub name: String,
    pub category: String,
    pub build_version: String,
    #[serde(default)]
    pub origin_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfiguration {
    #[serde(default)]
    pub regions: Vec<StateRegion>,
    #[serde(default)]
    pub labels: Vec<StateLabel>,
    #[serde(default)]
    pub plugins: Vec<StatePlugin>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl StateConfiguration {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path))?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(&region.name) {
                errors.push(ValidationError {
                    field: format!("regions.{}.name", region.name),
                    message: "Duplicate region name found".to_string(),
                });
            }

            if !region.url.starts_with("http://") && !region.url.starts_with("https://") {
                errors.push(ValidationError {
                    field: format!("regions.{}.url", region.name),
                    message: "Region url must start with http:// or https://".to_string(),
                });
            }
        }

        let mut seen = HashSet::new();
        for label in &self.labels {
            if !seen.insert(&label.name) {
                errors.push(ValidationError {
                    field: format!("labels.{}.name", label.name),
                    message: "Duplicate label name found".to_string(),
                });
            }
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            let Some(key) = &plugin.origin_key else {
                continue;
            };

            if !seen.insert(key) {
                errors.push(ValidationError {
                    field: format!("plugins.{}.origin_key", plugin.name),
                    message: format!("Duplicate origin key '{}'", key),
                });
            }
        }

        errors
    }
}

pub async fn load_and_apply_state(db: &DatabaseConnection, state_file_path: Option<&str>) -> Result<()> {
    let Some(path) = state_file_path else {
        tracing::info!("No state file configured, skipping state management");
        return Ok(());
    };

    tracing::info!("Loading state configuration from: {}", path);
    let config = StateConfiguration::from_file(path)?;

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("State configuration validation failed:\n{}", messages.join("\n"));
    }

    apply_regions(db, &config.regions).await?;
    apply_labels(db, &config.labels).await?;
    apply_plugins(db, &config.plugins).await?;

    tracing::info!("State applied successfully");
    Ok(())
}

async fn apply_regions(db: &DatabaseConnection, regions: &[StateRegion]) -> Result<()> {
    for state_region in regions {
        let token = state_region.token_file.as_deref().map(load_secret);
        let existing = ERegion::find()
            .filter(CRegion::Name.eq(&state_region.name))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut region: ARegion = existing.into();
            region.url = Set(state_region.url.clone());
            region.token = Set(token);
            region.update(db).await?;
            tracing::info!("Updated region: {}", state_region.name);
        } else {
            ARegion {
                id: Set(Uuid::new_v4()),
                name: Set(state_region.name.clone()),
                url: Set(state_region.url.clone()),
                token: Set(token),
            }
            .insert(db)
            .await?;
            tracing::info!("Created region: {}", state_region.name);
        }
    }

    Ok(())
}

async fn apply_labels(db: &DatabaseConnection, labels: &[StateLabel]) -> Result<()> {
    for state_label in labels {
        let existing = ELabel::find()
            .filter(CLabel::Name.eq(&state_label.name))
            .one(db)
            .await?;

        if existing.is_none() {
            ALabel {
                id: Set(Uuid::new_v4()),
                name: Set(state_label.name.clone()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created label: {}", state_label.name);
        }
    }

    Ok(())
}

async fn apply_plugins(db: &DatabaseConnection, plugins: &[StatePlugin]) -> Result<()> {
    for state_plugin in plugins {
        let existing = EPlugin::find()
            .filter(CPlugin::Name.eq(&state_plugin.name))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut plugin: APlugin = existing.into();
            plugin.category = Set(state_plugin.category.clone());
            plugin.build_version = Set(state_plugin.build_version.clone());
            plugin.origin_key = Set(state_plugin.origin_key.clone());
            plugin.update(db).await?;
            tracing::info!("Updated plugin: {}", state_plugin.name);
        } else {
            APlugin {
                id: Set(Uuid::new_v4()),
                name: Set(state_plugin.name.clone()),
                category: Set(state_plugin.category.clone()),
                build_version: Set(state_plugin.build_version.clone()),
                origin_key: Set(state_plugin.origin_key.clone()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created plugin: {}", state_plugin.name);
        }
    }

    Ok(())
}
