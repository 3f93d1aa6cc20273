use std::path::PathBuf;

/// The errors that may occur while tracking sales.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A data file could not be read or written.
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The sales or totals table could not be read or written as CSV.
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// The product catalog is not a JSON object of names to prices.
    #[error("invalid product catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the product name cannot be empty")]
    EmptyProductName,

    #[error("the price must be greater than zero, got {0}")]
    NonPositivePrice(f64),

    /// Infinite and NaN prices cannot be stored in the catalog JSON.
    #[error("the price must be a finite number, got {0}")]
    NonFinitePrice(f64),

    /// Sale rows are addressed by their current position in the ledger.
    #[error("there is no sale at index {index}, the ledger has {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the product \"{0}\" does not exist")]
    ProductNotFound(String),

    /// A login secret was not set in the environment.
    #[error("the environment variable '{0}' must be set")]
    MissingCredential(&'static str),

    #[error("incorrect username or password")]
    InvalidCredentials,
}

impl Error {
    /// Whether the error is a rejected request that leaves all state untouched.
    ///
    /// These are reported to the operator as a warning and the session carries
    /// on. Anything else is a hard failure of the data files or configuration.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EmptyProductName
                | Error::NonPositivePrice(_)
                | Error::NonFinitePrice(_)
                | Error::IndexOutOfRange { .. }
                | Error::ProductNotFound(_)
                | Error::InvalidCredentials
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
