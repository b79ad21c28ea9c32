/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod endpoints;
pub mod error;
pub mod requests;

use axum::Router;
use axum::routing::{get, post};
use common::types::ServerState;
use endpoints::{components, records};
use region::RegionApi;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use upgrader::{Orchestrator, Store};

pub struct WebState<S, R> {
    pub orchestrator: Orchestrator<S, R>,
    /// Page size of record listings without an explicit one.
    pub page_size: u64,
}

pub fn create_router<S: Store, R: RegionApi + 'static>(state: Arc<WebState<S, R>>) -> Router {
    Router::new()
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records",
            get(records::get_records::<S, R>).post(records::post_record::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}",
            get(records::get_record::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}/upgrade",
            post(records::post_upgrade::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}/deploy",
            post(records::post_deploy::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}/rollback",
            post(records::post_rollback::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}/rollback-records",
            get(records::get_rollback_records::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/upgrade-records/{record}/upgradeable-versions",
            get(records::get_upgradeable_versions::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/last-upgrade-record",
            get(records::get_last_record::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/groups/{group}/changes",
            get(components::get_changes::<S, R>),
        )
        .route(
            "/api/v1/envs/{env}/apps/{app}/components/{component}/upgrade",
            post(components::post_upgrade::<S, R>),
        )
        .route("/api/v1/health", get(endpoints::get_health))
        .fallback(endpoints::handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web<S: Store, R: RegionApi + 'static>(
    server: Arc<ServerState>,
    state: Arc<WebState<S, R>>,
) -> std::io::Result<()> {
    let server_url = format!("{}:{}", server.cli.ip, server.cli.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    tracing::info!("Listening on {}", server_url);
    axum::serve(listener, app).await
}
