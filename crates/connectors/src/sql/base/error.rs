use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A blocking database task panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    /// A raw request value does not parse as the parameter's type.
    #[error("Cannot bind '{value}' as {sql_type}: {reason}")]
    InvalidParam {
        value: String,
        sql_type: String,
        reason: String,
    },

    /// A result could not be read back into a value.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL connection failed: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("SQLite connection failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}
