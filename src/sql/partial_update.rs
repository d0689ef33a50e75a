use serde_json::{Map, Value};

use super::column_map::ColumnMapper;
use super::error::SqlBuildError;

/// A partial set of fields to change, keyed by external field name.
///
/// Key order is the order the caller supplied them in and decides placeholder
/// numbering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseUpdate {
    fields: Map<String, Value>,
}

impl SparseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, SqlBuildError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(SqlBuildError::NotAnObject),
        }
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

/// `"column"=$n` assignments and the values bound to them, position for position.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentClause {
    assignments: Vec<String>,
    values: Vec<Value>,
}

impl AssignmentClause {
    pub fn assignments(&self) -> &[String] {
        &self.assignments
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Comma-joined assignments for a SET clause
    pub fn set_clause(&self) -> String {
        self.assignments.join(", ")
    }

    /// Index of the first placeholder after the assignments (for WHERE bindings)
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Build the SET assignments for a partial update.
///
/// Values never appear in the clause text; they come back separately for
/// positional binding.
pub fn build_partial_update(
    update: &SparseUpdate,
    mapper: &ColumnMapper,
) -> Result<AssignmentClause, SqlBuildError> {
    if update.is_empty() {
        return Err(SqlBuildError::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(update.len());
    let mut values = Vec::with_capacity(update.len());

    for (idx, (field, value)) in update.iter().enumerate() {
        let column = mapper.column(field);
        assignments.push(format!("{}=${}", quote_identifier(column), idx + 1));
        values.push(value.clone());
    }

    Ok(AssignmentClause { assignments, values })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
