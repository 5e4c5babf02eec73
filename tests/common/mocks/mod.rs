#[allow(dead_code, unused_imports)]
pub mod school_repo;

#[allow(dead_code, unused_imports)]
pub use school_repo::{MockSchoolRepo, StorageFailure};
