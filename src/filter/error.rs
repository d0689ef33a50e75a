use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Every violated constraint, in the order they were found
    #[error("Invalid filter: {}", .0.join("; "))]
    InvalidFilter(Vec<String>),

    #[error("No {resource} found with {key} of {value}")]
    NoMatch {
        resource: &'static str,
        key: &'static str,
        value: String,
    },
}
