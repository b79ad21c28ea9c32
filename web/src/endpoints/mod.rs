/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod components;
pub mod records;

use crate::error::{WebError, WebResult};
use axum::extract::Json;
use common::types::BaseResponse;

pub async fn handle_404() -> WebError {
    WebError::not_found("Route")
}

pub async fn get_health() -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "200 ALIVE".to_string(),
    };

    Ok(Json(res))
}
