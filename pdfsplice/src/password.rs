//! Password complexity rule.
//!
//! A password is accepted when it contains at least one upper-case letter
//! and at least one digit, in any script. There is no length requirement.

use crate::error::MergeError;

/// Whether `password` satisfies the complexity rule.
///
/// ```
/// use pdfsplice::password::is_valid_password;
///
/// assert!(is_valid_password("Password1"));
/// assert!(!is_valid_password("password1"));
/// ```
pub fn is_valid_password(password: &str) -> bool {
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(char::is_numeric);
    has_upper && has_digit
}

/// Interpret an optional password at the call site of a merge.
///
/// Absent and empty both mean "no encryption" and yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`MergeError::WeakPassword`] for a non-empty password that fails
/// [`is_valid_password`].
pub fn check_password(password: Option<&str>) -> Result<Option<&str>, MergeError> {
    match password {
        None | Some("") => Ok(None),
        Some(p) if is_valid_password(p) => Ok(Some(p)),
        Some(_) => Err(MergeError::WeakPassword),
    }
}
