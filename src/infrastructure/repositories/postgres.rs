use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{NewSchool, SchoolRecord};
use crate::error::AppResult;

use super::school_row::{SchoolRow, SELECT_ALL_SCHOOLS};
use super::traits::SchoolRepository;

pub struct PgSchoolRepository {
    pool: PgPool,
}

impl PgSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for PgSchoolRepository {
    async fn insert(&self, school: &NewSchool) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO schools (name, address, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.location.latitude)
        .bind(school.location.longitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_all(&self) -> AppResult<Vec<SchoolRecord>> {
        let rows = sqlx::query_as::<_, SchoolRow>(SELECT_ALL_SCHOOLS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(SchoolRecord::from).collect())
    }
}
