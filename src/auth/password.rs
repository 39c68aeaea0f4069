use crate::error::AppError;
use bcrypt::{hash, verify};
use validator::ValidationError;

/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validator for password fields: the UTF-8 encoding must fit in
/// [`MAX_PASSWORD_BYTES`]. `length(max = ..)` counts chars, so it cannot be used here.
pub fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some(format!("must be at most {} bytes", MAX_PASSWORD_BYTES).into());
        return Err(error);
    }
    Ok(())
}

/// Hashes `password` with a fresh salt at the given bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored hash. Input longer than
/// [`MAX_PASSWORD_BYTES`] never matches, since bcrypt would compare only its prefix.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    // bcrypt keeps its MIN_COST (4) private; mirror it for tests.
    const MIN_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let hashed = hash_password("123", MIN_COST).unwrap();

        assert_ne!(hashed, "123");
        assert!(verify_password("123", &hashed).unwrap());
        assert!(!verify_password("1234", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("123", MIN_COST).unwrap();
        let second = hash_password("123", MIN_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_cost_is_an_internal_error() {
        match hash_password("123", 2) {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to hash password"))
            }
            other => panic!("expected hashing to fail, got {:?}", other),
        }
    }

    #[test]
    fn test_input_past_72_bytes_never_verifies() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let hashed = hash_password(&prefix, MIN_COST).unwrap();

        assert!(verify_password(&prefix, &hashed).unwrap());
        assert!(!verify_password(&format!("{}different", prefix), &hashed).unwrap());
    }

    #[test]
    fn test_validate_password_counts_bytes_not_chars() {
        // "é" is two bytes in UTF-8.
        assert!(validate_password_bytes(&"é".repeat(36)).is_ok());
        assert!(validate_password_bytes(&"é".repeat(37)).is_err());
        assert!(validate_password_bytes(&"a".repeat(72)).is_ok());
        assert!(validate_password_bytes(&"a".repeat(73)).is_err());
    }
}
