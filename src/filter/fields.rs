/// How a filter key constrains its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRelation {
    /// Case-insensitive substring of a text field
    Substring,
    /// Inclusive lower bound on a numeric field
    Min,
    /// Inclusive upper bound on a numeric field
    Max,
    /// When true, the numeric field must be strictly positive
    Truthy,
}

impl FilterRelation {
    pub fn expected_type(&self) -> &'static str {
        match self {
            FilterRelation::Substring => "string",
            FilterRelation::Min | FilterRelation::Max => "number",
            FilterRelation::Truthy => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Query key as sent by clients
    pub key: &'static str,
    /// Record field the key constrains
    pub target: &'static str,
    pub relation: FilterRelation,
}

impl FilterField {
    pub const fn substring(key: &'static str, target: &'static str) -> Self {
        Self { key, target, relation: FilterRelation::Substring }
    }

    pub const fn min(key: &'static str, target: &'static str) -> Self {
        Self { key, target, relation: FilterRelation::Min }
    }

    pub const fn max(key: &'static str, target: &'static str) -> Self {
        Self { key, target, relation: FilterRelation::Max }
    }

    pub const fn truthy(key: &'static str, target: &'static str) -> Self {
        Self { key, target, relation: FilterRelation::Truthy }
    }
}

/// Declared filter keys for one resource. At most one substring field.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub resource: &'static str,
    pub fields: &'static [FilterField],
}

impl FilterSpec {
    pub fn field(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

pub const COMPANY_FILTERS: FilterSpec = FilterSpec {
    resource: "company",
    fields: &[
        FilterField::substring("name", "name"),
        FilterField::min("minEmployees", "numEmployees"),
        FilterField::max("maxEmployees", "numEmployees"),
    ],
};

pub const JOB_FILTERS: FilterSpec = FilterSpec {
    resource: "job",
    fields: &[
        FilterField::substring("title", "title"),
        FilterField::min("minSalary", "salary"),
        FilterField::truthy("hasEquity", "equity"),
    ],
};
