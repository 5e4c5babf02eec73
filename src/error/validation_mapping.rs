use validator::{ValidationErrors, ValidationErrorsKind};

use super::app_error::ValidationIssue;

/// Flattens nested validator output into one issue per failed rule,
/// sorted by field path and then rule code.
pub(super) fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    walk(None, errors, &mut issues);
    issues.sort_by(|left, right| {
        left.field
            .cmp(&right.field)
            .then_with(|| left.code.cmp(&right.code))
    });
    issues
}

fn walk(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let path = prefix.map_or_else(|| field.to_string(), |prefix| format!("{prefix}.{field}"));

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| ValidationIssue {
                    field: path.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| default_message(&path, &error.code)),
                    code: error.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => walk(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    walk(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

fn default_message(path: &str, code: &str) -> String {
    match code {
        "required" => format!("{path} is required"),
        "length" => format!("{path} has an invalid length"),
        _ => format!("{path} is invalid"),
    }
}
