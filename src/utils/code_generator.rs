//! Short code generation and validation utilities.
//!
//! Generated and user-provided codes share one alphabet: ASCII letters and
//! digits. Generation is not cryptographically secure; uniqueness is enforced
//! by the link store, not by the generator.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of codes produced when the caller does not supply one.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest accepted custom code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted custom code.
pub const MAX_CODE_LENGTH: usize = 8;

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("valid custom code regex"));

/// Generates a random code of exactly `length` characters.
///
/// Each character is drawn independently and uniformly from `A-Za-z0-9`.
///
/// # Examples
///
/// ```
/// use tinylink::utils::code_generator::generate_code;
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `code` has the shape of a short code.
pub fn is_valid_code(code: &str) -> bool {
    CUSTOM_CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 6-8 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len()) {
        return Err(AppError::bad_request(
            "Code must be 6-8 alphanumeric characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Code must be 6-8 alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
