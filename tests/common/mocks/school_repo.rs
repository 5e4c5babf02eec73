#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use school_locator::domain::{NewSchool, SchoolRecord};
use school_locator::error::{AppError, AppResult};
use school_locator::infrastructure::repositories::SchoolRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFailure {
    /// Pool exhausted or connection lost.
    Unavailable,
    /// The query itself failed.
    Query,
}

impl StorageFailure {
    fn to_error(self) -> AppError {
        match self {
            StorageFailure::Unavailable => AppError::from(sqlx::Error::PoolTimedOut),
            StorageFailure::Query => AppError::from(sqlx::Error::RowNotFound),
        }
    }
}

/// In-memory repository. Ids count up from 1 in insertion order, the same way
/// the database sequences do.
pub struct MockSchoolRepo {
    pub schools: Mutex<Vec<SchoolRecord>>,
    next_id: AtomicI64,
    failure: Mutex<Option<StorageFailure>>,
}

impl Default for MockSchoolRepo {
    fn default() -> Self {
        Self::with_schools(Vec::new())
    }
}

impl MockSchoolRepo {
    pub fn with_schools(schools: Vec<SchoolRecord>) -> Self {
        let next_id = schools.iter().map(|school| school.id).max().unwrap_or(0) + 1;
        Self {
            schools: Mutex::new(schools),
            next_id: AtomicI64::new(next_id),
            failure: Mutex::new(None),
        }
    }

    /// Every subsequent call fails with `failure` until cleared with `None`.
    pub fn fail_with(&self, failure: Option<StorageFailure>) {
        *self.failure.lock().expect("failure mutex poisoned") = failure;
    }

    pub fn stored(&self) -> Vec<SchoolRecord> {
        self.schools.lock().expect("schools mutex poisoned").clone()
    }

    fn check_failure(&self) -> AppResult<()> {
        match *self.failure.lock().expect("failure mutex poisoned") {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchoolRepository for MockSchoolRepo {
    async fn insert(&self, school: &NewSchool) -> AppResult<i64> {
        self.check_failure()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.schools
            .lock()
            .expect("schools mutex poisoned")
            .push(school.clone().into_record(id));
        Ok(id)
    }

    async fn list_all(&self) -> AppResult<Vec<SchoolRecord>> {
        self.check_failure()?;
        Ok(self.stored())
    }
}
