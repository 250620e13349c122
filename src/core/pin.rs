//! One-way PIN digest and length policy.
//!
//! The digest is a plain SHA-256 over the UTF-8 PIN, stored as lowercase
//! hex. It is a deterrence control against a quick self-disable, not a
//! credential store; there is deliberately no salt or key stretching.

use sha2::{Digest, Sha256};

use crate::config;
use crate::error::AppError;

/// Compute the lowercase-hex SHA-256 digest of a PIN.
pub fn pin_digest(pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}

/// Enforce the accepted PIN length range on setup.
pub fn validate_pin_length(pin: &str) -> Result<(), AppError> {
    let len = pin.chars().count();
    if len < config::PIN_MIN_LEN || len > config::PIN_MAX_LEN {
        return Err(AppError::InvalidInput(format!(
            "PIN must be {}-{} digits",
            config::PIN_MIN_LEN,
            config::PIN_MAX_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(pin_digest("1234"), pin_digest("1234"));
        assert_eq!(pin_digest("8675309"), pin_digest("8675309"));
    }

    #[test]
    fn test_digest_known_value() {
        // SHA-256("1234"), lowercase hex.
        assert_eq!(
            pin_digest("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn test_digest_distinguishes_pins() {
        assert_ne!(pin_digest("1234"), pin_digest("1235"));
        assert_ne!(pin_digest("0000"), pin_digest("00000"));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = pin_digest("4321");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_validate_length_accepts_bounds() {
        assert!(validate_pin_length("1234").is_ok());
        assert!(validate_pin_length("12345678").is_ok());
        assert!(validate_pin_length("123456").is_ok());
    }

    #[test]
    fn test_validate_length_rejects_out_of_range() {
        assert_eq!(validate_pin_length("").unwrap_err().kind(), "InvalidInput");
        assert_eq!(validate_pin_length("123").unwrap_err().kind(), "InvalidInput");
        assert_eq!(
            validate_pin_length("123456789").unwrap_err().kind(),
            "InvalidInput"
        );
    }
}
