use async_trait::async_trait;

use crate::domain::{NewSchool, SchoolRecord};
use crate::error::AppResult;

/// Storage for schools. Every backend exposes the same two capabilities.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Persists a school and returns the id the backend assigned to it.
    async fn insert(&self, school: &NewSchool) -> AppResult<i64>;

    /// Full snapshot of stored schools in insertion (id) order.
    async fn list_all(&self) -> AppResult<Vec<SchoolRecord>>;
}
