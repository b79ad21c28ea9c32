/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use common::init_state;
use region::HttpRegionClient;
use std::sync::Arc;
use std::time::Duration;
use upgrader::{Catalog, Orchestrator, SeaStore};
use web::WebState;

#[tokio::main]
pub async fn main() -> Result<()> {
    let state = init_state().await?;

    let _guard = match (state.cli.report_errors, state.cli.sentry_dsn.as_deref()) {
        (true, Some(dsn)) => Some(sentry::init(dsn)),
        (true, None) => {
            tracing::warn!("Error reporting enabled without a sentry dsn");
            None
        }
        _ => None,
    };

    let store = SeaStore::new(state.db.clone());
    let catalog = Catalog::load(&store)
        .await
        .context("Failed to load label and plugin catalog")?;
    let region = HttpRegionClient::new(
        Duration::from_secs(state.cli.region_timeout),
        Duration::from_secs(state.cli.region_connect_timeout),
    )
    .context("Failed to build region client")?;

    let web_state = Arc::new(WebState {
        orchestrator: Orchestrator::new(store, region, Arc::new(catalog)),
        page_size: state.cli.records_page_size,
    });

    web::serve_web(Arc::clone(&state), web_state).await?;

    Ok(())
}
