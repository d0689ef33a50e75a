use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};
use sqlx::{postgres::PgRow, Column, PgPool, Row as _, TypeInfo};

use super::manager::DatabaseError;
use crate::config::DatabaseConfig;

/// A result row keyed by column name (or `AS` alias)
pub type Row = Map<String, Value>;

/// Executes a parameterized statement with `$1..$n` placeholders bound
/// positionally from `values`.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn execute(&self, statement: &str, values: &[Value]) -> Result<Vec<Row>, DatabaseError>;
}

/// PostgreSQL implementation backed by a sqlx pool
#[derive(Clone)]
pub struct PgClient {
    pool: PgPool,
    query_logging: bool,
    slow_query_ms: Option<u64>,
}

impl PgClient {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            query_logging: config.enable_query_logging,
            slow_query_ms: config
                .enable_slow_query_warning
                .then_some(config.slow_query_threshold_ms),
        }
    }
}

#[async_trait]
impl StorageClient for PgClient {
    async fn execute(&self, statement: &str, values: &[Value]) -> Result<Vec<Row>, DatabaseError> {
        if self.query_logging {
            tracing::debug!("SQL: {} -- params: {:?}", collapse_whitespace(statement), values);
        }

        let started = Instant::now();
        let mut q = sqlx::query(statement);
        for value in values {
            q = bind_param(q, value);
        }
        let rows = q.fetch_all(&self.pool).await?;

        let elapsed = started.elapsed().as_millis() as u64;
        if let Some(threshold) = self.slow_query_ms {
            if elapsed > threshold {
                tracing::warn!("Slow query ({}ms): {}", elapsed, collapse_whitespace(statement));
            }
        }

        rows.iter().map(row_to_json).collect()
    }
}

fn collapse_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert database row to JSON
fn row_to_json(row: &PgRow) -> Result<Row, DatabaseError> {
    let mut record = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = column_value(row, i, column.type_info().name())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn column_value(row: &PgRow, index: usize, type_name: &str) -> Result<Value, DatabaseError> {
    let value = match type_name {
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)?
            .map(Value::String),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .and_then(|f| Number::from_f64(f as f64))
            .map(Value::Number),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)?
            .and_then(Number::from_f64)
            .map(Value::Number),
        "NUMERIC" => row
            .try_get::<Option<rust_decimal::Decimal>, _>(index)?
            .and_then(|d| d.to_f64())
            .and_then(Number::from_f64)
            .map(Value::Number),
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?
            .map(|t| Value::String(t.to_rfc3339())),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
            .map(|t| Value::String(t.to_string())),
        other => {
            return Err(DatabaseError::QueryError(format!(
                "unsupported column type {} at index {}",
                other, index
            )))
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Bind parameter to SQL query
fn bind_param<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => q.bind(sqlx::types::Json(v)),
    }
}
