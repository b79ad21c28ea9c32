/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::components::SyncComponentsBody;
use crate::config_groups::SyncConfigGroupsBody;
use crate::events::{EventQuery, EventStatus};
use crate::operations::{BatchOperation, BatchResult, BatchResultItem};
use crate::{Outcome, RegionApi, RegionError, RegionTarget};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Upper bound for event lookups, which run on every record read.
pub const EVENT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct BeanResponse<T> {
    bean: T,
}

#[derive(Deserialize, Debug)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    list: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct HttpRegionClient {
    client: reqwest::Client,
    event_timeout: Duration,
}

impl HttpRegionClient {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, RegionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            event_timeout: timeout.min(EVENT_QUERY_TIMEOUT),
        })
    }

    pub fn request(&self, target: &RegionTarget, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!(
            "{}/v2/tenants/{}/{}",
            target.url.trim_end_matches('/'),
            target.tenant_name,
            endpoint
        );

        let mut request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");

        if let Some(token) = &target.token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Outcome<bytes::Bytes>, RegionError> {
        let res = request.send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let reason = format!("{}: {}", status, String::from_utf8_lossy(&body).trim());
            warn!(%status, "Region rejected request");
            return Ok(Outcome::Failure(reason));
        }

        Ok(Outcome::Success(body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Outcome<T>, RegionError> {
        match self.send(request).await? {
            Outcome::Success(body) => serde_json::from_slice::<T>(&body)
                .map(Outcome::Success)
                .map_err(|e| RegionError::Decode(e.to_string())),
            Outcome::Failure(reason) => Ok(Outcome::Failure(reason)),
        }
    }
}

#[async_trait]
impl RegionApi for HttpRegionClient {
    #[instrument(skip(self, target, body), fields(region = %target.region_name, components = body.components.len()))]
    async fn sync_components(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncComponentsBody,
    ) -> Result<Outcome<()>, RegionError> {
        let request = self
            .request(target, Method::POST, &format!("apps/{}/components", region_app_id))
            .json(body);

        Ok(match self.send(request).await? {
            Outcome::Success(_) => Outcome::Success(()),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        })
    }

    #[instrument(skip(self, target, body), fields(region = %target.region_name))]
    async fn sync_config_groups(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncConfigGroupsBody,
    ) -> Result<Outcome<()>, RegionError> {
        let request = self
            .request(
                target,
                Method::POST,
                &format!("apps/{}/app-config-groups", region_app_id),
            )
            .json(body);

        Ok(match self.send(request).await? {
            Outcome::Success(_) => Outcome::Success(()),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        })
    }

    #[instrument(skip(self, target, operation), fields(region = %target.region_name, operation = operation.name()))]
    async fn batch_operation(
        &self,
        target: &RegionTarget,
        operation: &BatchOperation,
    ) -> Result<Outcome<Vec<BatchResultItem>>, RegionError> {
        debug!(items = operation.len(), "Submitting batch operation");
        let request = self
            .request(target, Method::POST, "batchoperation")
            .json(operation);

        Ok(
            match self.send_json::<BeanResponse<BatchResult>>(request).await? {
                Outcome::Success(res) => Outcome::Success(res.bean.batch_result),
                Outcome::Failure(reason) => Outcome::Failure(reason),
            },
        )
    }

    #[instrument(skip(self, target, event_ids), fields(region = %target.region_name, events = event_ids.len()))]
    async fn get_events_by_ids(
        &self,
        target: &RegionTarget,
        event_ids: &[String],
    ) -> Result<Outcome<Vec<EventStatus>>, RegionError> {
        let request = self
            .request(target, Method::GET, "event")
            .timeout(self.event_timeout)
            .json(&EventQuery {
                event_ids: event_ids.to_vec(),
            });

        Ok(
            match self.send_json::<ListResponse<EventStatus>>(request).await? {
                Outcome::Success(res) => Outcome::Success(res.list),
                Outcome::Failure(reason) => Outcome::Failure(reason),
            },
        )
    }
}
