use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::{NewSchool, SchoolRecord};
use crate::error::{AppError, AppResult};

use super::school_row::{SchoolRow, SELECT_ALL_SCHOOLS};
use super::traits::SchoolRepository;

pub struct MySqlSchoolRepository {
    pool: MySqlPool,
}

impl MySqlSchoolRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for MySqlSchoolRepository {
    async fn insert(&self, school: &NewSchool) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO schools (name, address, latitude, longitude) VALUES (?, ?, ?, ?)",
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.location.latitude)
        .bind(school.location.longitude)
        .execute(&self.pool)
        .await?;

        i64::try_from(result.last_insert_id()).map_err(|_| {
            AppError::InternalError(anyhow::anyhow!(
                "insert id {} does not fit in i64",
                result.last_insert_id()
            ))
        })
    }

    async fn list_all(&self) -> AppResult<Vec<SchoolRecord>> {
        let rows = sqlx::query_as::<_, SchoolRow>(SELECT_ALL_SCHOOLS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(SchoolRecord::from).collect())
    }
}
