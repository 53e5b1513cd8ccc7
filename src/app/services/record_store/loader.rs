//! Loading the store from its CSV source

use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use super::{ContactStore, StoreState};
use super::index::ReadStrategy;
use crate::Result;
use crate::app::models::LoadResult;
use crate::app::services::row_parser::{RowParser, read_rows};

impl ContactStore {
    /// Replace the whole store with a fresh parse of the source file
    ///
    /// Contacts, diagnostics and the read strategy are swapped in together.
    /// If the file cannot be read the previous state is left untouched.
    ///
    /// # Errors
    /// * `Error::Io` if the file cannot be opened or read
    /// * `Error::Format` if the file contains no rows
    pub fn load(&self) -> Result<LoadResult> {
        let path = self.source_path();
        info!("Loading contacts from {}", path.display());
        let start_time = Instant::now();

        let mut state = self.state.write();

        let rows = read_rows(path).inspect_err(|e| {
            warn!("Load of {} failed, keeping previous state: {}", path.display(), e);
        })?;

        let outcome = RowParser::parse_all(&rows);
        let strategy = ReadStrategy::select(
            &outcome.contacts,
            self.config.index_threshold,
            self.config.cache_capacity,
        );
        let result = outcome.load_result();

        info!(
            "Loaded {} from {} in {:.2}s ({} strategy)",
            outcome.stats.summary(),
            path.display(),
            start_time.elapsed().as_secs_f64(),
            strategy.name()
        );
        if !outcome.errors.is_empty() {
            warn!(
                "{} invalid rows with {} errors in {}",
                outcome.invalid_rows.len(),
                outcome.errors.len(),
                path.display()
            );
        }

        *state = StoreState {
            contacts: outcome.contacts,
            errors: outcome.errors,
            invalid_rows: outcome.invalid_rows,
            strategy,
            parse_stats: outcome.stats,
            last_load_time: Some(Utc::now()),
        };

        Ok(result)
    }

    /// Alias for [`load`](Self::load) used by the reload endpoint
    pub fn reload(&self) -> Result<LoadResult> {
        self.load()
    }
}
