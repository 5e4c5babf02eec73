use super::app_error::AppError;

const CONNECT_FAILED: &str = "Unable to connect to database. Please try again later.";
const TEMPORARILY_UNAVAILABLE: &str = "Service temporarily unavailable. Please try again later.";

/// Maps SQLSTATE codes reported by PostgreSQL or MySQL onto client-facing errors.
///
/// Unrecognized codes return `None` and stay opaque database errors.
pub(super) fn map_database_error(code: Option<&str>, message: &str) -> Option<AppError> {
    match code? {
        "23502" => Some(required_field_error(message)),
        // mysql reports every integrity violation as 23000
        "23000" if message.contains("cannot be null") => Some(required_field_error(message)),
        "22001" => Some(AppError::validation_error("value is too long")),
        "22P02" | "22007" | "22003" => Some(AppError::validation_error("invalid input format")),
        "08001" | "08004" | "08006" | "08S01" => {
            Some(AppError::database_unavailable(CONNECT_FAILED))
        }
        "53300" | "57P03" => Some(AppError::database_unavailable(TEMPORARILY_UNAVAILABLE)),
        "HY000" if is_overload_message(message) => {
            Some(AppError::database_unavailable(TEMPORARILY_UNAVAILABLE))
        }
        _ => None,
    }
}

fn required_field_error(message: &str) -> AppError {
    AppError::validation_error(
        required_field_message_from_db(message)
            .unwrap_or_else(|| "required field is missing".to_string()),
    )
}

/// Pulls the column name out of either backend's not-null message:
/// postgres quotes it with `"`, mysql with `'`.
pub(super) fn required_field_message_from_db(message: &str) -> Option<String> {
    let (marker, quote) = if message.contains("column \"") {
        ("column \"", '"')
    } else {
        ("Column '", '\'')
    };
    let start = message.find(marker)?;
    let rest = &message[start + marker.len()..];
    let end = rest.find(quote)?;
    let field = &rest[..end];
    if field.is_empty() {
        return None;
    }
    Some(format!("{field} is required"))
}

fn is_overload_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("too many connections") || lower.contains("shutting down")
}
