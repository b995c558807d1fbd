/*!
 * Signing policy
 */

use serde::{Deserialize, Serialize};

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Attempt budget applied when no explicit policy is given
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Limits applied to the rejection-sampling signing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningPolicy {
    /// Maximum number of candidate signatures tried before giving up
    pub max_attempts: u32,
}

impl Default for SigningPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SigningPolicy {
    pub fn new(max_attempts: u32) -> CryptoResult<Self> {
        let policy = Self { max_attempts };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> CryptoResult<()> {
        if self.max_attempts == 0 {
            return Err(CryptoError::invalid_parameter(
                "max_attempts",
                "at least 1",
                "0",
                error_codes::INVALID_SIGNING_POLICY,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        assert_eq!(SigningPolicy::default().max_attempts, 1000);
        assert!(SigningPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = SigningPolicy::new(0).unwrap_err();
        assert_eq!(err.error_type(), "InvalidParameter");
        assert_eq!(err.error_code(), error_codes::INVALID_SIGNING_POLICY);
        assert!(err.suggested_remediation().unwrap().contains("at least one"));
        assert_eq!(SigningPolicy::new(5).unwrap().max_attempts, 5);
    }

    #[test]
    fn test_json_roundtrip_and_defaults() {
        let policy = SigningPolicy::new(42).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, r#"{"max_attempts":42}"#);
        let back: SigningPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);

        let empty: SigningPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SigningPolicy::default());
    }
}
