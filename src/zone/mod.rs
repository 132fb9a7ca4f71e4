mod config;
mod models;
mod service;
pub mod store;

pub use config::*;
pub use models::*;
pub use service::*;

use thiserror::Error;

use crate::{geometry, zone::store::StoreError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] geometry::Error),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("A zone named {0:?} already exists")]
    DuplicateName(String),
    #[error("Zone {0} does not exist")]
    NotFound(ZoneId),
    #[error("Storage failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        match value {
            // The storage constraint is the backstop for the name check done up front.
            StoreError::UniqueViolation(name) => Self::DuplicateName(name),
            StoreError::MissingRow(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl Error {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Geometry(err) => err.code(),
            Error::InvalidField { .. } => "INVALID_DATA",
            Error::DuplicateName(_) => "ZONE_EXISTS",
            Error::NotFound(_) => "ZONE_NOT_FOUND",
            Error::Store(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Geometry(_) | Error::InvalidField { .. })
    }
}
