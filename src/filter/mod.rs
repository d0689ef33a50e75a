pub mod applier;
pub mod error;
pub mod request;
pub mod fields;
pub mod validator;

pub use applier::{FilterApplier, Filterable};
pub use error::FilterError;
pub use request::FilterRequest;
pub use fields::{FilterField, FilterRelation, FilterSpec, COMPANY_FILTERS, JOB_FILTERS};
pub use validator::{FlagFilter, FilterValidator, RangeFilter, TextFilter, ValidatedFilter};
