pub mod client;
pub mod manager;
pub mod schema;

pub use client::{PgClient, Row, StorageClient};
pub use manager::{DatabaseError, DatabaseManager};
