use std::sync::Arc;

use serde_json::{json, Value};

use super::{check_schema, decode_first, decode_payload, decode_rows, require_fields, ServiceError};
use crate::database::StorageClient;
use crate::filter::{FilterApplier, FilterRequest, FilterValidator, JOB_FILTERS};
use crate::models::{Job, NewJob};
use crate::sql::{build_partial_update, ColumnMapper, SparseUpdate};
use crate::validation::schemas;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Jobs are keyed by title, case-insensitively.
pub struct JobService {
    db: Arc<dyn StorageClient>,
}

impl JobService {
    pub fn new(db: Arc<dyn StorageClient>) -> Self {
        Self { db }
    }

    pub async fn list(&self, request: &FilterRequest) -> Result<Vec<Job>, ServiceError> {
        let filter = FilterValidator::validate(request, &JOB_FILTERS)?;

        let sql = format!("SELECT {} FROM jobs ORDER BY id", JOB_COLUMNS);
        let jobs: Vec<Job> = decode_rows(self.db.execute(&sql, &[]).await?)?;

        let total = jobs.len();
        let jobs = FilterApplier::apply(jobs, &filter)?;
        tracing::debug!("Listed {}/{} jobs", jobs.len(), total);
        Ok(jobs)
    }

    pub async fn create(&self, payload: Value) -> Result<Job, ServiceError> {
        require_fields(&payload)?;
        check_schema(&payload, &schemas::job_new())?;
        let new: NewJob = decode_payload(payload)?;

        if self.title_taken(&new.title).await? {
            return Err(ServiceError::Duplicate(format!("Job {} already exists", new.title)));
        }

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2::integer, $3::numeric, $4) \
             RETURNING {}",
            JOB_COLUMNS
        );
        let values = [
            json!(new.title),
            json!(new.salary),
            json!(new.equity),
            json!(new.company_handle),
        ];
        let job: Job = decode_first(self.db.execute(&sql, &values).await?)?
            .ok_or_else(|| ServiceError::NotFound(format!("{} does not exist", new.title)))?;

        tracing::info!("Created job {} ({})", job.title, job.id);
        Ok(job)
    }

    pub async fn get(&self, title: &str) -> Result<Job, ServiceError> {
        tracing::debug!("Fetching job {}", title);
        let sql = format!("SELECT {} FROM jobs WHERE LOWER(title) = LOWER($1)", JOB_COLUMNS);
        decode_first(self.db.execute(&sql, &[json!(title)]).await?)?
            .ok_or_else(|| ServiceError::NotFound(format!("{} does not exist", title)))
    }

    /// Partial update; a new title must not collide with another job
    pub async fn update(&self, title: &str, payload: Value) -> Result<Job, ServiceError> {
        check_schema(&payload, &schemas::job_update())?;
        let update = SparseUpdate::from_value(payload)?;
        let clause = build_partial_update(&update, &ColumnMapper::identity())?;

        let renamed_to = update
            .iter()
            .find(|(field, _)| field.as_str() == "title")
            .and_then(|(_, value)| value.as_str())
            .filter(|new_title| new_title.to_lowercase() != title.to_lowercase())
            .map(str::to_string);
        if let Some(new_title) = renamed_to {
            if self.title_taken(&new_title).await? {
                return Err(ServiceError::Duplicate(format!("Job {} already exists", new_title)));
            }
        }

        let sql = format!(
            "UPDATE jobs SET {} WHERE LOWER(title) = LOWER(${}) RETURNING {}",
            clause.set_clause(),
            clause.next_placeholder(),
            JOB_COLUMNS
        );
        let mut values = clause.into_values();
        values.push(json!(title));

        let job: Job = decode_first(self.db.execute(&sql, &values).await?)?
            .ok_or_else(|| ServiceError::NotFound(format!("{} does not exist", title)))?;

        tracing::info!("Updated job {} ({} fields)", job.id, update.len());
        Ok(job)
    }

    pub async fn remove(&self, title: &str) -> Result<(), ServiceError> {
        let rows = self
            .db
            .execute("DELETE FROM jobs WHERE LOWER(title) = LOWER($1) RETURNING title", &[json!(title)])
            .await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!("{} not found", title)));
        }

        tracing::info!("Removed job {}", title);
        Ok(())
    }

    async fn title_taken(&self, title: &str) -> Result<bool, ServiceError> {
        let rows = self
            .db
            .execute("SELECT id FROM jobs WHERE LOWER(title) = LOWER($1)", &[json!(title)])
            .await?;
        Ok(!rows.is_empty())
    }
}
