use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{field} must be between {min} and {max}")]
    CoordinateOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NonFiniteCoordinate { field: &'static str },
}

impl DomainError {
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::CoordinateOutOfRange { field, .. }
            | DomainError::NonFiniteCoordinate { field } => *field,
        }
    }
}
