//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw caller input into validated model inputs.
//! - Orchestrate repository calls and emit metadata-only log events.

pub mod author_service;
pub mod post_service;

use crate::repo::RepoError;
use log::{info, warn};

/// Logs the outcome of one service write without leaking field values.
fn log_write_outcome<T>(
    event: &'static str,
    result: &Result<T, RepoError>,
    record_id: impl Fn(&T) -> i64,
) {
    match result {
        Ok(value) => info!(
            "event={event} module=service status=ok id={}",
            record_id(value)
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected field={}",
            err.field()
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
