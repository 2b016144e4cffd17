//! Invite code generation and validation utilities.
//!
//! Codes are 12-character URL-safe strings produced from OS randomness.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Length of an encoded invite code.
pub const INVITE_CODE_LENGTH: usize = 12;

/// Generates a cryptographically secure random invite code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate invite code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Checks that a user-supplied invite code is well-formed.
///
/// Rejects malformed codes before they reach the database.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code has the wrong length or
/// contains characters outside the URL-safe base64 alphabet.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if code.len() != INVITE_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Invite code must be 12 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Invite code contains invalid characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
