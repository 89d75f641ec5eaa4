use crate::core::data_type::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A raw request value could not be coerced into the declared type.
    #[error("Cannot convert '{raw}' to {data_type}: {reason}")]
    InvalidValue {
        raw: String,
        data_type: DataType,
        reason: String,
    },

    /// A fetched row could not be materialized into the record type.
    #[error("Failed to decode row of '{entity}': {source}")]
    Decode {
        entity: String,
        #[source]
        source: serde_json::Error,
    },
}
