use thiserror::Error;

use crate::database::DatabaseError;
use crate::filter::FilterError;
use crate::sql::SqlBuildError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No data")]
    EmptyUpdate,

    #[error("Invalid filter: {}", .0.join("; "))]
    InvalidFilter(Vec<String>),

    #[error("No {resource} found with {key} of {value}")]
    NoMatch {
        resource: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("Invalid payload: {}", .0.join("; "))]
    InvalidPayload(Vec<String>),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected row shape: {0}")]
    RowDecode(#[from] serde_json::Error),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidFilter(errors) => ServiceError::InvalidFilter(errors),
            FilterError::NoMatch { resource, key, value } => ServiceError::NoMatch { resource, key, value },
        }
    }
}

impl From<SqlBuildError> for ServiceError {
    fn from(err: SqlBuildError) -> Self {
        match err {
            SqlBuildError::EmptyUpdate => ServiceError::EmptyUpdate,
            SqlBuildError::NotAnObject => ServiceError::InvalidPayload(vec![err.to_string()]),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        if let DatabaseError::Sqlx(sqlx::Error::Database(db_err)) = &err {
            if db_err.is_unique_violation() {
                return ServiceError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return ServiceError::NotFound(db_err.message().to_string());
            }
        }
        ServiceError::Database(err)
    }
}
