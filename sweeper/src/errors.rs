use airtable::client::AirtableError;
use thiserror::Error;

/// Result type alias for sweeper operations
pub type Result<T, E = SweeperError> = std::result::Result<T, E>;

/// Errors that keep the service from starting or serving
#[derive(Error, Debug)]
pub enum SweeperError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("airtable client error: {0}")]
    Client(#[from] AirtableError),
}

/// Failure modes of the delete-random workflow. Each maps onto an HTTP
/// response in `api`; none escape the handler boundary.
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("no records found in table {table}")]
    EmptyTable { table: String },

    #[error(transparent)]
    Airtable(#[from] AirtableError),
}

impl DeleteError {
    /// Label for the outcome counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            DeleteError::MissingConfig(_) => "missing_config",
            DeleteError::EmptyTable { .. } => "empty_table",
            DeleteError::Airtable(AirtableError::Upstream { .. }) => "upstream",
            DeleteError::Airtable(_) => "network",
        }
    }
}
