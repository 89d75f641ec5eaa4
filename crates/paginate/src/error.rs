use connectors::sql::base::error::DbError;
use model::error::ModelError;
use planner::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginateError {
    /// The request could not be turned into a query.
    #[error("Query planning failed: {0}")]
    Plan(#[from] PlanError),

    /// The backend rejected the count or the fetch.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A fetched row did not match the record type.
    #[error("Failed to decode records: {0}")]
    Decode(#[from] ModelError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidVar {
        key: String,
        value: String,
        reason: String,
    },
}
