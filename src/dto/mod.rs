use std::collections::HashMap;
use validator::ValidationErrors;

pub mod members;
pub mod password;
pub mod topup;

/// Flattens validation output to one displayable message per failed field.
pub fn field_messages(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let message = errors
                .first()
                .and_then(|error| error.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| String::from("Invalid value"));
            (field.to_string(), message)
        })
        .collect()
}
