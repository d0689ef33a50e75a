use serde_json::Value;

use super::error::FilterError;
use super::request::FilterRequest;
use super::fields::{FilterRelation, FilterSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    pub key: &'static str,
    pub target: &'static str,
    pub needle: String,
}

/// Inclusive numeric range; an unset bound does not constrain.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub target: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagFilter {
    pub key: &'static str,
    pub target: &'static str,
}

/// Recognized, correctly typed filters. Flags appear only when asserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFilter {
    pub resource: &'static str,
    pub text: Option<TextFilter>,
    pub ranges: Vec<RangeFilter>,
    pub flags: Vec<FlagFilter>,
}

impl ValidatedFilter {
    pub fn empty(resource: &'static str) -> Self {
        Self { resource, text: None, ranges: vec![], flags: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.ranges.is_empty() && self.flags.is_empty()
    }

    fn range_mut(&mut self, target: &'static str) -> &mut RangeFilter {
        let pos = match self.ranges.iter().position(|r| r.target == target) {
            Some(pos) => pos,
            None => {
                self.ranges.push(RangeFilter { target, min: None, max: None });
                self.ranges.len() - 1
            }
        };
        &mut self.ranges[pos]
    }
}

pub struct FilterValidator;

impl FilterValidator {
    /// Validate `request` against `spec`.
    ///
    /// Unrecognized keys are dropped. Every violation is collected before failing.
    pub fn validate(request: &FilterRequest, spec: &FilterSpec) -> Result<ValidatedFilter, FilterError> {
        let mut filter = ValidatedFilter::empty(spec.resource);
        let mut errors = Vec::new();

        for field in spec.fields {
            let Some(value) = request.get(field.key) else { continue };
            if value.is_null() {
                continue;
            }

            match field.relation {
                FilterRelation::Substring => match value {
                    Value::String(s) if s.is_empty() => {}
                    Value::String(s) => {
                        if filter.text.is_none() {
                            filter.text = Some(TextFilter { key: field.key, target: field.target, needle: s.clone() });
                        }
                    }
                    _ => errors.push(type_error(field.key, field.relation)),
                },
                FilterRelation::Min | FilterRelation::Max => match value.as_f64() {
                    Some(n) if n < 0.0 => {
                        errors.push(format!("{} must be greater than or equal to 0", field.key));
                    }
                    Some(n) => {
                        let range = filter.range_mut(field.target);
                        if field.relation == FilterRelation::Min {
                            range.min = Some(n);
                        } else {
                            range.max = Some(n);
                        }
                    }
                    None => errors.push(type_error(field.key, field.relation)),
                },
                FilterRelation::Truthy => match value {
                    Value::Bool(true) => filter.flags.push(FlagFilter { key: field.key, target: field.target }),
                    Value::Bool(false) => {}
                    _ => errors.push(type_error(field.key, field.relation)),
                },
            }
        }

        for range in &filter.ranges {
            if let (Some(min), Some(max)) = (range.min, range.max) {
                if min > max {
                    errors.push(format!(
                        "{} cannot exceed {}",
                        bound_key(spec, range.target, FilterRelation::Min),
                        bound_key(spec, range.target, FilterRelation::Max)
                    ));
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!("Rejected {} filter: {:?}", spec.resource, errors);
            return Err(FilterError::InvalidFilter(errors));
        }

        Ok(filter)
    }
}

fn type_error(key: &str, relation: FilterRelation) -> String {
    format!("{} must be a {}", key, relation.expected_type())
}

fn bound_key(spec: &FilterSpec, target: &str, relation: FilterRelation) -> &'static str {
    spec.fields
        .iter()
        .find(|f| f.target == target && f.relation == relation)
        .map(|f| f.key)
        .unwrap_or("min")
}
