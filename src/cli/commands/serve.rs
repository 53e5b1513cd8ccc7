//! Serve command: load the contact file and run the HTTP API

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use super::shared::{setup_logging, shutdown_signal};
use crate::app::services::contact_service::ContactService;
use crate::app::services::record_store::ContactStore;
use crate::cli::args::ServeArgs;
use crate::cli::input::resolve_contact_file;
use crate::config::AppConfig;
use crate::http::{AppState, serve};

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);

    let mut config = AppConfig::from_env().context("Invalid environment configuration")?;
    args.apply_to(&mut config);
    // A missing file is not fatal here; the first create writes it
    match resolve_contact_file(&config.store.source_path) {
        Ok(path) => config.store.source_path = path,
        Err(e) => warn!("{:#}", e),
    }
    config.validate()?;

    info!(
        "Starting contact store on {} (source: {})",
        config.server.socket_addr(),
        config.store.source_path.display()
    );

    let store_config = config.store.clone();
    let store = tokio::task::spawn_blocking(move || ContactStore::open_or_empty(store_config))
        .await
        .context("Initial load task failed")??;

    let service = ContactService::new(Arc::new(store));
    let report = service.validation_report();
    if report.invalid_rows > 0 {
        warn!(
            "{} of {} rows were rejected; see /api/contacts/validation",
            report.invalid_rows, report.total_rows
        );
    }

    let state = Arc::new(AppState::new(service));
    serve(state, &config.server, shutdown_signal()).await?;
    Ok(())
}
