use std::error::Error;
use std::fmt;

use mongodb::bson;

/// Failures surfaced by the repository layer.
///
/// Callers can match on the variant to tell bad input (`InvalidId`), a
/// missing record (`NotFound`), and infrastructure trouble (`Database`,
/// `Serialization`) apart. Nothing is retried or recovered locally.
#[derive(Debug)]
pub enum StoreError {
    /// The caller-supplied identifier is not a valid ObjectId hex string.
    /// Detected before any store access.
    InvalidId(String),
    /// No document matched the given identifier.
    NotFound,
    /// The driver failed for any other reason; `query` records the failing
    /// operation in `db.<collection>.<op>(<filter>)` form for diagnostics.
    Database {
        query: String,
        source: mongodb::error::Error,
    },
    /// A request could not be encoded to BSON.
    Serialization(bson::ser::Error),
}

impl StoreError {
    pub(crate) fn database(query: String, source: mongodb::error::Error) -> Self {
        StoreError::Database { query, source }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidId(id) => {
                write!(f, "ID is not in its proper form: {}", id)
            }
            StoreError::NotFound => write!(f, "Entity not found"),
            StoreError::Database { query, source } => {
                write!(f, "{}: {}", query, source)
            }
            StoreError::Serialization(err) => {
                write!(f, "Failed to encode document: {}", err)
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Database { source, .. } => Some(source),
            StoreError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err)
    }
}
