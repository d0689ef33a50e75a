use std::collections::HashMap;

/// Translates external (API) field names to storage column names.
///
/// Fields without an entry map to themselves.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    columns: HashMap<&'static str, &'static str>,
}

impl ColumnMapper {
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            columns: pairs.iter().copied().collect(),
        }
    }

    /// Identity mapper
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn column<'a>(&self, field: &'a str) -> &'a str {
        match self.columns.get(field) {
            Some(column) => column,
            None => field,
        }
    }
}
