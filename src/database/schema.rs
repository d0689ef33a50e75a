use super::client::StorageClient;
use super::manager::DatabaseError;

/// Tables the service expects, created at start-up when missing
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS companies (
        handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
        name TEXT UNIQUE NOT NULL,
        num_employees INTEGER CHECK (num_employees >= 0),
        description TEXT NOT NULL,
        logo_url TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS jobs (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        salary INTEGER CHECK (salary >= 0),
        equity NUMERIC CHECK (equity <= 1.0),
        company_handle VARCHAR(25) NOT NULL
            REFERENCES companies ON DELETE CASCADE
    )"#,
];

pub async fn ensure_schema(client: &dyn StorageClient) -> Result<(), DatabaseError> {
    for statement in SCHEMA_STATEMENTS {
        client.execute(statement, &[]).await?;
    }
    tracing::info!("Database schema ready ({} tables)", SCHEMA_STATEMENTS.len());
    Ok(())
}
