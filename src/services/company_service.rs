use std::sync::Arc;

use serde_json::{json, Value};

use super::{check_schema, decode_first, decode_payload, decode_rows, require_fields, ServiceError};
use crate::database::StorageClient;
use crate::filter::{FilterApplier, FilterRequest, FilterValidator, COMPANY_FILTERS};
use crate::models::{Company, CompanyDetail, CompanyJob, NewCompany};
use crate::sql::{build_partial_update, ColumnMapper, SparseUpdate};
use crate::validation::schemas;

const COMPANY_COLUMNS: &str =
    r#"handle, name, description, num_employees AS "numEmployees", logo_url AS "logoUrl""#;

/// External field name -> column for companies
pub fn company_columns() -> ColumnMapper {
    ColumnMapper::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
}

pub struct CompanyService {
    db: Arc<dyn StorageClient>,
}

impl CompanyService {
    pub fn new(db: Arc<dyn StorageClient>) -> Self {
        Self { db }
    }

    /// All companies ordered by name, narrowed by `request`
    pub async fn list(&self, request: &FilterRequest) -> Result<Vec<Company>, ServiceError> {
        let filter = FilterValidator::validate(request, &COMPANY_FILTERS)?;

        let sql = format!("SELECT {} FROM companies ORDER BY name", COMPANY_COLUMNS);
        let companies: Vec<Company> = decode_rows(self.db.execute(&sql, &[]).await?)?;

        let total = companies.len();
        let companies = FilterApplier::apply(companies, &filter)?;
        tracing::debug!("Listed {}/{} companies", companies.len(), total);
        Ok(companies)
    }

    /// Insert a company; fails with `Duplicate` if the handle is taken.
    /// NULLs bind as text, hence the cast on the integer column.
    pub async fn create(&self, payload: Value) -> Result<Company, ServiceError> {
        require_fields(&payload)?;
        check_schema(&payload, &schemas::company_new())?;
        let new: NewCompany = decode_payload(payload)?;

        let existing = self
            .db
            .execute("SELECT handle FROM companies WHERE handle = $1", &[json!(new.handle)])
            .await?;
        if !existing.is_empty() {
            return Err(ServiceError::Duplicate(format!("Duplicate company: {}", new.handle)));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4::integer, $5) \
             RETURNING {}",
            COMPANY_COLUMNS
        );
        let values = [
            json!(new.handle),
            json!(new.name),
            json!(new.description),
            json!(new.num_employees),
            json!(new.logo_url),
        ];
        let company: Company = decode_first(self.db.execute(&sql, &values).await?)?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", new.handle)))?;

        tracing::info!("Created company {}", company.handle);
        Ok(company)
    }

    /// A company with its jobs; both reads run concurrently
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, ServiceError> {
        tracing::debug!("Fetching company {}", handle);
        let company_sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLUMNS);
        let jobs_sql = "SELECT title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id";
        let key = [json!(handle)];

        let (company_rows, job_rows) =
            futures::try_join!(self.db.execute(&company_sql, &key), self.db.execute(jobs_sql, &key))?;

        let company: Company = decode_first(company_rows)?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))?;
        let jobs: Vec<CompanyJob> = decode_rows(job_rows)?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Partial update; only the supplied fields change
    pub async fn update(&self, handle: &str, payload: Value) -> Result<Company, ServiceError> {
        check_schema(&payload, &schemas::company_update())?;
        let update = SparseUpdate::from_value(payload)?;
        let clause = build_partial_update(&update, &company_columns())?;

        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            clause.set_clause(),
            clause.next_placeholder(),
            COMPANY_COLUMNS
        );
        let mut values = clause.into_values();
        values.push(json!(handle));

        let company: Company = decode_first(self.db.execute(&sql, &values).await?)?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))?;

        tracing::info!("Updated company {} ({} fields)", handle, update.len());
        Ok(company)
    }

    pub async fn remove(&self, handle: &str) -> Result<(), ServiceError> {
        let rows = self
            .db
            .execute("DELETE FROM companies WHERE handle = $1 RETURNING handle", &[json!(handle)])
            .await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!("No company: {}", handle)));
        }

        tracing::info!("Removed company {}", handle);
        Ok(())
    }
}
