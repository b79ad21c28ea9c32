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
use common::input::{check_component_keys, check_page_size, check_version};
use common::types::*;
use region::RegionApi;
use std::sync::Arc;
use upgrader::{RecordDetail, Store};
use uuid::Uuid;

pub async fn post_record<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app)): Path<(Uuid, Uuid)>,
    body: Result<Json<MakeUpgradeRecordRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<MUpgradeRecord>>> {
    let Json(body) = body?;

    let record = state
        .orchestrator
        .create_upgrade(env, app, body.upgrade_group)
        .await?;

    let res = BaseResponse {
        error: false,
        message: record,
    };

    Ok(Json(res))
}

pub async fn get_records<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app)): Path<(Uuid, Uuid)>,
    query: Result<Query<ListRecordsQuery>, QueryRejection>,
) -> WebResult<Json<BaseResponse<Paginated<MUpgradeRecord>>>> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1).max(1);
    let page_size = check_page_size(query.page_size.unwrap_or(state.page_size))?;

    let records = state
        .orchestrator
        .list_records(env, app, query.record_type, page, page_size)
        .await?;

    let res = BaseResponse {
        error: false,
        message: records,
    };

    Ok(Json(res))
}

pub async fn get_record<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<RecordDetail>>> {
    state.orchestrator.ensure_record_of(env, app, record).await?;
    let detail = state.orchestrator.get_record(env, record).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

pub async fn post_upgrade<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
    body: Result<Json<MakeUpgradeRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<MUpgradeRecord>>> {
    let Json(body) = body?;
    check_version(&body.version)?;
    if let Some(keys) = &body.component_keys {
        check_component_keys(keys)?;
    }

    let record = state
        .orchestrator
        .upgrade(env, app, &body.version, record, body.component_keys)
        .await?;

    let res = BaseResponse {
        error: false,
        message: record,
    };

    Ok(Json(res))
}

pub async fn post_deploy<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<MUpgradeRecord>>> {
    state.orchestrator.ensure_record_of(env, app, record).await?;
    let record = state.orchestrator.deploy(env, record).await?;

    let res = BaseResponse {
        error: false,
        message: record,
    };

    Ok(Json(res))
}

pub async fn post_rollback<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<RollbackResponse>>> {
    let (record, group) = state.orchestrator.restore(env, app, record).await?;

    let res = BaseResponse {
        error: false,
        message: RollbackResponse { record, group },
    };

    Ok(Json(res))
}

pub async fn get_rollback_records<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<Vec<MUpgradeRecord>>>> {
    state.orchestrator.ensure_record_of(env, app, record).await?;
    let records = state.orchestrator.list_rollback_records(env, record).await?;

    let res = BaseResponse {
        error: false,
        message: records,
    };

    Ok(Json(res))
}

pub async fn get_upgradeable_versions<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app, record)): Path<(Uuid, Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<Vec<String>>>> {
    state.orchestrator.ensure_record_of(env, app, record).await?;
    let versions = state.orchestrator.upgradeable_versions(env, record).await?;

    let res = BaseResponse {
        error: false,
        message: versions,
    };

    Ok(Json(res))
}

pub async fn get_last_record<S: Store, R: RegionApi + 'static>(
    state: State<Arc<WebState<S, R>>>,
    Path((env, app)): Path<(Uuid, Uuid)>,
    query: Result<Query<LastRecordQuery>, QueryRejection>,
) -> WebResult<Json<BaseResponse<Option<RecordDetail>>>> {
    let Query(query) = query?;

    let detail = state
        .orchestrator
        .get_latest_record(env, app, query.upgrade_group, query.record_type)
        .await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}
