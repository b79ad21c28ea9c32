/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use common::types::*;
use entity::component::ComponentSpec;
use region::MockRegionApi;
use serde_json::json;
use std::sync::Arc;
use upgrader::store::memory::MemoryData;
use upgrader::{Catalog, MemoryStore, Orchestrator};
use uuid::Uuid;
use web::{WebState, create_router};

pub fn create_mock_cli() -> Cli {
    Cli {
        log_level: "debug".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 3000,
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        region_timeout: 10,
        region_connect_timeout: 5,
        records_page_size: 10,
        state_file: None,
        report_errors: false,
        sentry_dsn: None,
    }
}

pub struct Seed {
    pub tenant_env: Uuid,
    pub application: Uuid,
    pub group: Uuid,
    pub component: Uuid,
    pub data: MemoryData,
}

pub fn seed() -> Seed {
    let now = Utc::now().naive_utc();
    let tenant_env = Uuid::new_v4();
    let application = MApplication {
        id: Uuid::new_v4(),
        tenant_env,
        tenant_name: "team".to_string(),
        name: "blog".to_string(),
        region_name: "rainbond".to_string(),
        region_app_id: "app-1".to_string(),
        created_at: now,
    };
    let group = MComponentGroup {
        id: Uuid::new_v4(),
        application: application.id,
        group_key: "wordpress".to_string(),
        group_name: "WordPress".to_string(),
        version: "1.0".to_string(),
        is_from_cloud: false,
        market_name: None,
        created_at: now,
        updated_at: now,
    };
    let component = MComponent {
        id: Uuid::new_v4(),
        application: application.id,
        component_group: group.id,
        component_key: "web".to_string(),
        share_key: "web".to_string(),
        name: "web".to_string(),
        alias: "web".to_string(),
        version: "1.0".to_string(),
        deploy_version: "1".to_string(),
        image: "web:1.0".to_string(),
        cmd: None,
        hub_user: None,
        hub_password: None,
        cpu: 250,
        memory: 512,
        replicas: 1,
        spec: ComponentSpec::default(),
        created_at: now,
        updated_at: now,
    };
    let templates = ["1.0", "1.1"]
        .iter()
        .map(|version| MAppTemplate {
            id: Uuid::new_v4(),
            group_key: "wordpress".to_string(),
            version: version.to_string(),
            template: json!({
                "components": [{
                    "key": "web",
                    "share_key": "web",
                    "name": "web",
                    "version": version,
                    "deploy_version": "1",
                    "image": format!("web:{version}"),
                }],
            }),
            updated_at: now,
        })
        .collect();

    Seed {
        tenant_env,
        application: application.id,
        group: group.id,
        component: component.id,
        data: MemoryData {
            applications: vec![application],
            regions: vec![MRegion {
                id: Uuid::new_v4(),
                name: "rainbond".to_string(),
                url: "http://region.invalid".to_string(),
                token: None,
            }],
            component_groups: vec![group],
            components: vec![component],
            templates,
            ..MemoryData::default()
        },
    }
}

pub fn create_server(seed: &Seed, region: MockRegionApi) -> TestServer {
    let state = Arc::new(WebState {
        orchestrator: Orchestrator::new(
            MemoryStore::new(seed.data.clone()),
            region,
            Arc::new(Catalog::default()),
        ),
        page_size: create_mock_cli().records_page_size,
    });

    TestServer::new(create_router(state)).unwrap()
}

impl Seed {
    pub fn records_url(&self) -> String {
        format!("/api/v1/envs/{}/apps/{}/upgrade-records", self.tenant_env, self.application)
    }
}
