/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDate, NaiveDateTime};
use common::types::*;
use entity::component::{ComponentSpec, Volume};
use entity::config_group::{ComponentIds, ConfigItems};
use serde_json::json;
use uuid::Uuid;

use crate::graph::OriginalApp;

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn original_app(keys: &[&str]) -> OriginalApp {
    let application = MApplication {
        id: Uuid::new_v4(),
        tenant_env: Uuid::new_v4(),
        tenant_name: "team".to_string(),
        name: "blog".to_string(),
        region_name: "rainbond".to_string(),
        region_app_id: "app-1".to_string(),
        created_at: now(),
    };
    let group = MComponentGroup {
        id: Uuid::new_v4(),
        application: application.id,
        group_key: "wordpress".to_string(),
        group_name: "WordPress".to_string(),
        version: "1.0".to_string(),
        is_from_cloud: false,
        market_name: None,
        created_at: now(),
        updated_at: now(),
    };

    let mut original = OriginalApp {
        application,
        group,
        components: vec![],
        dependencies: vec![],
        volume_dependencies: vec![],
        plugins: vec![],
        config_groups: vec![],
    };
    original.components = keys.iter().map(|key| component(&original, key)).collect();
    original
}

pub fn component(original: &OriginalApp, key: &str) -> MComponent {
    MComponent {
        id: Uuid::new_v4(),
        application: original.application.id,
        component_group: original.group.id,
        component_key: key.to_string(),
        share_key: key.to_string(),
        name: key.to_string(),
        alias: format!("gr-{key}"),
        version: "1.0".to_string(),
        deploy_version: "1".to_string(),
        image: format!("{key}:1.0"),
        cmd: None,
        hub_user: None,
        hub_password: None,
        cpu: 250,
        memory: 512,
        replicas: 1,
        spec: ComponentSpec::default(),
        created_at: now(),
        updated_at: now(),
    }
}

pub fn component_template(key: &str, image: &str, dependencies: &[&str]) -> serde_json::Value {
    json!({
        "key": key,
        "share_key": key,
        "name": key,
        "version": "1.1",
        "deploy_version": "1",
        "image": image,
        "dependencies": dependencies,
    })
}

pub fn volume(name: &str) -> Volume {
    Volume {
        volume_name: name.to_string(),
        volume_path: format!("/{name}"),
        volume_type: "share-file".to_string(),
        volume_capacity: 0,
        mode: None,
        allow_expansion: false,
        file_content: None,
    }
}

pub fn plugin(origin_key: &str) -> MPlugin {
    MPlugin {
        id: Uuid::new_v4(),
        name: origin_key.to_string(),
        category: "net-plugin:up".to_string(),
        build_version: "20260301".to_string(),
        origin_key: Some(origin_key.to_string()),
    }
}

pub fn dependency(component: Uuid, dependency: Uuid) -> MComponentDependency {
    MComponentDependency {
        id: Uuid::new_v4(),
        component,
        dependency,
    }
}

pub fn config_group(original: &OriginalApp, name: &str, items: &[(&str, &str)], members: &[Uuid]) -> MConfigGroup {
    MConfigGroup {
        id: Uuid::new_v4(),
        application: original.application.id,
        region_name: original.application.region_name.clone(),
        name: name.to_string(),
        deploy_type: "env".to_string(),
        enabled: true,
        items: ConfigItems(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ),
        components: ComponentIds(members.to_vec()),
    }
}
