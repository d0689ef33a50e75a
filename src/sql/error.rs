use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlBuildError {
    #[error("No data")]
    EmptyUpdate,

    #[error("Update payload must be a JSON object")]
    NotAnObject,
}
