/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Client for the control plane of a region cluster.
//!
//! Every call answers with an [`Outcome`]: a rejection by the region is a
//! regular result the orchestrator reacts to. [`RegionError`] is reserved
//! for requests that never produced an answer.

pub mod client;
pub mod components;
pub mod config_groups;
pub mod events;
pub mod operations;

pub use client::HttpRegionClient;

use async_trait::async_trait;
use components::SyncComponentsBody;
use config_groups::SyncConfigGroupsBody;
use events::EventStatus;
use operations::{BatchOperation, BatchResultItem};
use std::sync::Arc;

/// Region endpoint and tenant a call is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTarget {
    pub region_name: String,
    pub url: String,
    pub token: Option<String>,
    pub tenant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(reason) => Err(reason),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("region request timed out")]
    Timeout,
    #[error("region unreachable: {0}")]
    Transport(String),
    #[error("unexpected region response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RegionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegionError::Timeout
        } else if err.is_decode() {
            RegionError::Decode(err.to_string())
        } else {
            RegionError::Transport(err.to_string())
        }
    }
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RegionApi: Send + Sync {
    /// Creates or updates `components` in the region application and removes
    /// `delete_component_ids`.
    async fn sync_components(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncComponentsBody,
    ) -> Result<Outcome<()>, RegionError>;

    async fn sync_config_groups(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncConfigGroupsBody,
    ) -> Result<Outcome<()>, RegionError>;

    async fn batch_operation(
        &self,
        target: &RegionTarget,
        operation: &BatchOperation,
    ) -> Result<Outcome<Vec<BatchResultItem>>, RegionError>;

    async fn get_events_by_ids(
        &self,
        target: &RegionTarget,
        event_ids: &[String],
    ) -> Result<Outcome<Vec<EventStatus>>, RegionError>;
}

#[async_trait]
impl<T: RegionApi + ?Sized> RegionApi for Arc<T> {
    async fn sync_components(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncComponentsBody,
    ) -> Result<Outcome<()>, RegionError> {
        (**self).sync_components(target, region_app_id, body).await
    }

    async fn sync_config_groups(
        &self,
        target: &RegionTarget,
        region_app_id: &str,
        body: &SyncConfigGroupsBody,
    ) -> Result<Outcome<()>, RegionError> {
        (**self).sync_config_groups(target, region_app_id, body).await
    }

    async fn batch_operation(
        &self,
        target: &RegionTarget,
        operation: &BatchOperation,
    ) -> Result<Outcome<Vec<BatchResultItem>>, RegionError> {
        (**self).batch_operation(target, operation).await
    }

    async fn get_events_by_ids(
        &self,
        target: &RegionTarget,
        event_ids: &[String],
    ) -> Result<Outcome<Vec<EventStatus>>, RegionError> {
        (**self).get_events_by_ids(target, event_ids).await
    }
}
