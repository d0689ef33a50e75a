pub mod companies;
pub mod health;
pub mod jobs;

use std::sync::Arc;

use crate::database::StorageClient;
use crate::services::{CompanyService, JobService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageClient>,
    pub companies: Arc<CompanyService>,
    pub jobs: Arc<JobService>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageClient>) -> Self {
        Self {
            companies: Arc::new(CompanyService::new(storage.clone())),
            jobs: Arc::new(JobService::new(storage.clone())),
            storage,
        }
    }
}
