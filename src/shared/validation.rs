//! Validation Utilities

use chrono::{Local, NaiveDate};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::Validation(field_errors(&errors))
}

/// Flatten (possibly nested) validation errors into `field -> message`
/// pairs, using camelCase dotted paths such as `address.zipCode`.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = Vec::new();
    collect(errors, None, &mut collected);
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, camel_case(field)),
            None => camel_case(field),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    error: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

/// `zip_code` -> `zipCode`
fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Accepts only dates strictly before today.
pub fn past_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value >= Local::now().date_naive() {
        return Err(ValidationError::new("past"));
    }
    Ok(())
}
