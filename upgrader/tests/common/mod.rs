/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use common::types::*;
use entity::component::ComponentSpec;
use region::components::SyncComponentsBody;
use region::config_groups::SyncConfigGroupsBody;
use region::events::EventStatus;
use region::operations::{BatchOperation, BatchResultItem};
use region::{Outcome, RegionApi, RegionError, RegionTarget};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use upgrader::store::memory::MemoryData;
use upgrader::{Catalog, MemoryStore, Orchestrator};
use uuid::Uuid;

/// Region double that accepts everything unless told otherwise and hands out
/// event ids `e1`, `e2`, ... in submission order.
#[derive(Debug, Default)]
pub struct FakeRegion {
    state: Mutex<FakeState>,
}

#[derive(Debug, Default)]
struct FakeState {
    next_event: usize,
    events: HashMap<String, String>,
    event_of: HashMap<Uuid, String>,
    syncs: Vec<SyncComponentsBody>,
    config_group_syncs: Vec<SyncConfigGroupsBody>,
    operations: Vec<BatchOperation>,
    event_queries: usize,
    reject_sync: Option<String>,
    reject_batches: Option<String>,
    reject_operation: Option<(&'static str, String)>,
}

impl FakeRegion {
    pub fn set_event(&self, event_id: &str, status: &str) {
        let mut state = self.state.lock().unwrap();
        state.events.insert(event_id.to_string(), status.to_string());
    }

    /// Latest event id handed out for `component`.
    pub fn event_of(&self, component: Uuid) -> Option<String> {
        self.state.lock().unwrap().event_of.get(&component).cloned()
    }

    pub fn reject_sync(&self, reason: Option<&str>) {
        self.state.lock().unwrap().reject_sync = reason.map(str::to_string);
    }

    pub fn reject_batches(&self, reason: Option<&str>) {
        self.state.lock().unwrap().reject_batches = reason.map(str::to_string);
    }

    /// Rejects only batches of operation `name`, e.g. `"upgrade"`.
    pub fn reject_operation(&self, name: &'static str, reason: &str) {
        self.state.lock().unwrap().reject_operation = Some((name, reason.to_string()));
    }

    pub fn syncs(&self) -> Vec<SyncComponentsBody> {
        self.state.lock().unwrap().syncs.clone()
    }

    pub fn config_group_syncs(&self) -> Vec<SyncConfigGroupsBody> {
        self.state.lock().unwrap().config_group_syncs.clone()
    }

    pub fn operations(&self) -> Vec<BatchOperation> {
        self.state.lock().unwrap().operations.clone()
    }

    pub fn event_queries(&self) -> usize {
        self.state.lock().unwrap().event_queries
    }
}

fn service_ids(operation: &BatchOperation) -> Vec<Uuid> {
    match operation {
        BatchOperation::Build { build_infos } => build_infos.iter().map(|i| i.service_id).collect(),
        BatchOperation::Upgrade { upgrade_infos } => upgrade_infos.iter().map(|i| i.service_id).collect(),
        BatchOperation::Deploy { deploy_infos } => deploy_infos.iter().map(|i| i.service_id).collect(),
    }
}

#[async_trait]
impl RegionApi for FakeRegion {
    async fn sync_components(
        &self,
        _target: &RegionTarget,
        _region_app_id: &str,
        body: &SyncComponentsBody,
    ) -> Result<Outcome<()>, RegionError> {
        let mut state = self.state.lock().unwrap();
        state.syncs.push(body.clone());
        Ok(match &state.reject_sync {
            Some(reason) => Outcome::Failure(reason.clone()),
            None => Outcome::Success(()),
        })
    }

    async fn sync_config_groups(
        &self,
        _target: &RegionTarget,
        _region_app_id: &str,
        body: &SyncConfigGroupsBody,
    ) -> Result<Outcome<()>, RegionError> {
        let mut state = self.state.lock().unwrap();
        state.config_group_syncs.push(body.clone());
        Ok(match &state.reject_sync {
            Some(reason) => Outcome::Failure(reason.clone()),
            None => Outcome::Success(()),
        })
    }

    async fn batch_operation(
        &self,
        _target: &RegionTarget,
        operation: &BatchOperation,
    ) -> Result<Outcome<Vec<BatchResultItem>>, RegionError> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(operation.clone());
        if let Some(reason) = &state.reject_batches {
            return Ok(Outcome::Failure(reason.clone()));
        }
        if let Some((name, reason)) = &state.reject_operation {
            if *name == operation.name() {
                return Ok(Outcome::Failure(reason.clone()));
            }
        }

        let mut items = Vec::new();
        for service_id in service_ids(operation) {
            state.next_event += 1;
            let event_id = format!("e{}", state.next_event);
            state.event_of.insert(service_id, event_id.clone());
            items.push(BatchResultItem {
                service_id,
                event_id: Some(event_id),
                status: "success".to_string(),
            });
        }

        Ok(Outcome::Success(items))
    }

    async fn get_events_by_ids(
        &self,
        _target: &RegionTarget,
        event_ids: &[String],
    ) -> Result<Outcome<Vec<EventStatus>>, RegionError> {
        let mut state = self.state.lock().unwrap();
        state.event_queries += 1;
        let events = event_ids
            .iter()
            .map(|id| EventStatus {
                event_id: id.clone(),
                status: state.events.get(id).cloned().unwrap_or_else(|| "running".to_string()),
            })
            .collect();

        Ok(Outcome::Success(events))
    }
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn template_component(key: &str, version: &str) -> Value {
    json!({
        "key": key,
        "share_key": key,
        "name": key,
        "version": version,
        "deploy_version": "1",
        "image": format!("{key}:{version}"),
    })
}

pub fn template(components: Vec<Value>) -> Value {
    json!({ "components": components })
}

/// Installed application with one marketplace group at version 1.0.
pub struct Fixture {
    pub tenant_env: Uuid,
    pub application: MApplication,
    pub group: MComponentGroup,
    pub components: Vec<MComponent>,
    pub data: MemoryData,
}

impl Fixture {
    pub fn new(keys: &[&str]) -> Self {
        let tenant_env = Uuid::new_v4();
        let application = MApplication {
            id: Uuid::new_v4(),
            tenant_env,
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
        let components: Vec<MComponent> = keys
            .iter()
            .map(|key| MComponent {
                id: Uuid::new_v4(),
                application: application.id,
                component_group: group.id,
                component_key: key.to_string(),
                share_key: key.to_string(),
                name: key.to_string(),
                alias: key.to_string(),
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
            })
            .collect();

        let data = MemoryData {
            applications: vec![application.clone()],
            regions: vec![MRegion {
                id: Uuid::new_v4(),
                name: "rainbond".to_string(),
                url: "http://region.invalid".to_string(),
                token: None,
            }],
            component_groups: vec![group.clone()],
            components: components.clone(),
            ..MemoryData::default()
        };

        Fixture {
            tenant_env,
            application,
            group,
            components,
            data,
        }
    }

    pub fn with_template(mut self, version: &str, template: Value) -> Self {
        self.data.templates.push(MAppTemplate {
            id: Uuid::new_v4(),
            group_key: self.group.group_key.clone(),
            version: version.to_string(),
            template,
            updated_at: now(),
        });
        self
    }

    pub fn component(&self, key: &str) -> &MComponent {
        self.components
            .iter()
            .find(|c| c.component_key == key)
            .unwrap()
    }

    pub fn build(self) -> (Self, Orchestrator<MemoryStore, Arc<FakeRegion>>, Arc<FakeRegion>) {
        let store = MemoryStore::new(self.data.clone());
        let region = Arc::new(FakeRegion::default());
        let catalog = Arc::new(Catalog::new(self.data.labels.clone(), self.data.catalog_plugins.clone()));
        let orchestrator = Orchestrator::new(store, region.clone(), catalog);
        (self, orchestrator, region)
    }
}
