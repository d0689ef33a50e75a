use super::error::FilterError;
use super::validator::{FlagFilter, RangeFilter, TextFilter, ValidatedFilter};

/// Field access used by [`FilterApplier`], keyed by external field name.
pub trait Filterable {
    fn text_field(&self, field: &str) -> Option<&str>;
    fn numeric_field(&self, field: &str) -> Option<f64>;
}

pub struct FilterApplier;

impl FilterApplier {
    /// Narrow `records` by `filter`, preserving their relative order.
    ///
    /// The text filter runs first; if it matches nothing the result is
    /// [`FilterError::NoMatch`]. Range and flag filters may narrow to empty.
    pub fn apply<T: Filterable>(records: Vec<T>, filter: &ValidatedFilter) -> Result<Vec<T>, FilterError> {
        let mut records = records;

        if let Some(text) = &filter.text {
            records.retain(|r| matches_text(r, text));
            if records.is_empty() {
                return Err(FilterError::NoMatch {
                    resource: filter.resource,
                    key: text.key,
                    value: text.needle.clone(),
                });
            }
        }

        for range in &filter.ranges {
            records.retain(|r| within_range(r, range));
        }

        for flag in &filter.flags {
            records.retain(|r| flag_holds(r, flag));
        }

        Ok(records)
    }
}

fn matches_text<T: Filterable>(record: &T, filter: &TextFilter) -> bool {
    let needle = filter.needle.to_lowercase();
    record
        .text_field(filter.target)
        .map(|value| value.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

// Records without a value are outside every active range
fn within_range<T: Filterable>(record: &T, range: &RangeFilter) -> bool {
    let Some(value) = record.numeric_field(range.target) else { return false };
    value >= range.min.unwrap_or(0.0) && value <= range.max.unwrap_or(f64::INFINITY)
}

fn flag_holds<T: Filterable>(record: &T, flag: &FlagFilter) -> bool {
    record.numeric_field(flag.target).map(|v| v > 0.0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::request::FilterRequest;
    use crate::filter::fields::{COMPANY_FILTERS, JOB_FILTERS};
    use crate::filter::validator::FilterValidator;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        size: Option<f64>,
        equity: Option<f64>,
    }

    impl Filterable for Row {
        fn text_field(&self, field: &str) -> Option<&str> {
            match field {
                "name" | "title" => Some(self.name),
                _ => None,
            }
        }

        fn numeric_field(&self, field: &str) -> Option<f64> {
            match field {
                "numEmployees" | "salary" => self.size,
                "equity" => self.equity,
                _ => None,
            }
        }
    }

    fn row(name: &'static str, size: f64, equity: f64) -> Row {
        Row { name, size: Some(size), equity: Some(equity) }
    }

    fn companies() -> Vec<Row> {
        vec![row("Alpha", 10.0, 0.0), row("Beta", 100.0, 0.0)]
    }

    fn jobs() -> Vec<Row> {
        vec![row("mobBoss", 500.0, 0.5), row("film guy", 300.0, 0.0), row("dead man", 666.0, 0.69)]
    }

    fn company_filter(value: serde_json::Value) -> ValidatedFilter {
        FilterValidator::validate(&FilterRequest::from_value(value), &COMPANY_FILTERS).unwrap()
    }

    fn job_filter(value: serde_json::Value) -> ValidatedFilter {
        FilterValidator::validate(&FilterRequest::from_value(value), &JOB_FILTERS).unwrap()
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let out = FilterApplier::apply(companies(), &company_filter(json!({ "name": "al" }))).unwrap();
        assert_eq!(names(&out), vec!["Alpha"]);

        let out = FilterApplier::apply(companies(), &company_filter(json!({ "name": "BET" }))).unwrap();
        assert_eq!(names(&out), vec!["Beta"]);
    }

    #[test]
    fn text_without_match_fails() {
        let err = FilterApplier::apply(companies(), &company_filter(json!({ "name": "zzz" }))).unwrap_err();
        assert_eq!(
            err,
            FilterError::NoMatch { resource: "company", key: "name", value: "zzz".to_string() }
        );
        assert_eq!(err.to_string(), "No company found with name of zzz");
    }

    #[test]
    fn text_match_is_literal() {
        let out = FilterApplier::apply(vec![row("100% Co", 1.0, 0.0), row("Other", 1.0, 0.0)], &company_filter(json!({ "name": "%" })))
            .unwrap();
        assert_eq!(names(&out), vec!["100% Co"]);
    }

    #[test]
    fn min_salary_keeps_order() {
        let out = FilterApplier::apply(jobs(), &job_filter(json!({ "minSalary": 400 }))).unwrap();
        assert_eq!(names(&out), vec!["mobBoss", "dead man"]);
    }

    #[test]
    fn range_may_narrow_to_empty() {
        let out = FilterApplier::apply(companies(), &company_filter(json!({ "minEmployees": 1000 }))).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let out = FilterApplier::apply(
            companies(),
            &company_filter(json!({ "minEmployees": 10, "maxEmployees": 100 })),
        )
        .unwrap();
        assert_eq!(names(&out), vec!["Alpha", "Beta"]);

        let out = FilterApplier::apply(companies(), &company_filter(json!({ "maxEmployees": 10 }))).unwrap();
        assert_eq!(names(&out), vec!["Alpha"]);
    }

    #[test]
    fn missing_numeric_value_is_excluded_by_range() {
        let rows = vec![Row { name: "Ghost", size: None, equity: None }, row("Alpha", 5.0, 0.0)];
        let out = FilterApplier::apply(rows, &company_filter(json!({ "minEmployees": 0 }))).unwrap();
        assert_eq!(names(&out), vec!["Alpha"]);
    }

    #[test]
    fn has_equity_requires_positive_equity() {
        let out = FilterApplier::apply(jobs(), &job_filter(json!({ "hasEquity": true }))).unwrap();
        assert_eq!(names(&out), vec!["mobBoss", "dead man"]);

        let out = FilterApplier::apply(jobs(), &job_filter(json!({ "hasEquity": false }))).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn filters_compose_after_text() {
        let filter = job_filter(json!({ "title": "m", "minSalary": 600, "hasEquity": true }));
        let out = FilterApplier::apply(jobs(), &filter).unwrap();
        assert_eq!(names(&out), vec!["dead man"]);

        // text matched, later filters emptied the set: not an error
        let filter = job_filter(json!({ "title": "film", "hasEquity": true }));
        assert!(FilterApplier::apply(jobs(), &filter).unwrap().is_empty());
    }

    #[test]
    fn empty_filter_returns_everything() {
        let out = FilterApplier::apply(jobs(), &ValidatedFilter::empty("job")).unwrap();
        assert_eq!(out, jobs());
    }
}
