//! Validation helpers shared across the crate.

use mongodb::bson::oid::ObjectId;
use validator::ValidationErrors;

use crate::errors::StoreError;

/// Check that a caller-supplied user ID is a well-formed ObjectId hex string.
///
/// Runs before any store access so malformed input never reaches the driver.
pub fn validate_user_id(user_id: &str) -> Result<(), StoreError> {
    match ObjectId::parse_str(user_id) {
        Ok(_) => Ok(()),
        Err(_) => Err(StoreError::InvalidId(user_id.to_string())),
    }
}

/// Flatten `validator` errors into their messages.
///
/// # Example
/// ```ignore
/// req.validate().map_err(validation_error_messages)?;
/// ```
pub fn validation_error_messages(e: ValidationErrors) -> Vec<String> {
    e.field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect()
}
