/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::WebState;
use crate::error::WebResult;
use crate::requests::*;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use common::input::check_version;
use common::types::BaseResponse;
use region::RegionApi;
use region::operations::BatchResultItem;
use std::sync::Arc;
use upgrader::{ComponentPreview, Store};
use uuid::Uuid;

pub async fn get_changes<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, group)): Path<(Uuid, Uuid, Uuid)>,
    query: Result<Query<ChangesQuery>, QueryRejection>,
) -> WebResult<Json<BaseResponse<Vec<ComponentPreview>>>> {
    let Query(query) = query?;
    check_version(&query.version)?;

    let previews = state
        .orchestrator
        .changes(env, app, group, &query.version)
        .await?;

    let res = BaseResponse {
        error: false,
        message: previews,
    };

    Ok(Json(res))
}

pub async fn post_upgrade<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, component)): Path<(Uuid, Uuid, Uuid)>,
    body: Result<Json<MakeComponentUpgradeRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<Vec<BatchResultItem>>>> {
    let Json(body) = body?;
    check_version(&body.version)?;

    let results = state
        .orchestrator
        .upgrade_component(env, app, component, &body.version)
        .await?;

    let res = BaseResponse {
        error: false,
        message: results,
    };

    Ok(Json(res))
}
