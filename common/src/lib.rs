/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod input;
pub mod state;
pub mod types;

use anyhow::Result;
use clap::Parser;
use database::connect_db;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use types::*;

pub async fn init_state() -> Result<Arc<ServerState>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    tracing::info!("Starting Keel on {}:{}", cli.ip, cli.port);

    let db = connect_db(&cli).await?;
    state::load_and_apply_state(&db, cli.state_file.as_deref()).await?;

    Ok(Arc::new(ServerState { db, cli }))
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `log_level`.
pub fn init_logging(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
