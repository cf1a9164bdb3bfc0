use crate::field::Field;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("No valid candidates after validation ({rejected} record(s) rejected)")]
    EmptyPopulation { rejected: usize },

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] LocationError),

    #[error("Internal ranking error: {0}")]
    InternalRanking(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Record-scoped validation failure. The offending record is dropped,
/// the rest of the batch still loads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no id")]
    MissingId,

    #[error("record id must be a non-empty string")]
    EmptyId,

    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    #[error("field '{field}' of '{id}' is not a non-negative integer: {value}")]
    InvalidField {
        id: String,
        field: Field,
        value: String,
    },

    #[error("location of '{id}' is invalid: {source}")]
    InvalidLocation {
        id: String,
        #[source]
        source: LocationError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("malformed location '{0}', expected '<latitude>,<longitude>'")]
    Malformed(String),
}
