use crate::domain::DomainError;
use crate::error::app_error::AppError;
use crate::error::db_mapping::map_database_error;
use crate::error::validation_mapping::flatten_validation_errors;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = match err {
            DomainError::CoordinateOutOfRange { .. } => "range",
            DomainError::NonFiniteCoordinate { .. } => "finite",
        };
        AppError::field_error(err.field(), code, err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => AppError::database_unavailable(
                "Unable to connect to database. Please try again later.",
            ),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => AppError::database_unavailable(
                "Service temporarily unavailable. Please try again later.",
            ),
            sqlx::Error::Database(database_error) => {
                let mapped =
                    map_database_error(database_error.code().as_deref(), database_error.message());
                mapped.unwrap_or_else(|| {
                    AppError::DatabaseError(sqlx::Error::Database(database_error))
                })
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let issues = flatten_validation_errors(&err);

        let message = match issues.as_slice() {
            [issue] => issue.message.clone(),
            _ => "Request validation failed".to_string(),
        };

        AppError::ValidationError { message, issues }
    }
}
