//! Shared error types for the services crate.

use thiserror::Error;

use pattern_core::model::PatternId;
use storage::sqlite::SqliteInitError;

/// Errors emitted while bootstrapping or using app services.
///
/// Study tracking itself never fails; storage problems there are logged and
/// absorbed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("no pattern with id {0} in the catalogue")]
    UnknownPattern(PatternId),
}
