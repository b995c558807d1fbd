/*!
 * Error Handling for the Lattice Signature Module
 *
 * Provides error types with detailed diagnostics, error codes,
 * user-friendly messages, and suggested remediation strategies.
 *
 * Signature verification is deliberately absent from this taxonomy: a
 * malformed or forged signature makes `verify` return `false`, it never
 * surfaces as an error.
 */

use std::collections::HashMap;
use thiserror::Error;

/// Error type for all key, signing and parsing operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid parameter: {parameter} - expected {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Decode error: {object} - expected {expected} - got {actual}")]
    DecodeError {
        object: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Signature operation failed: {operation} - {cause}")]
    SignatureError {
        operation: String,
        cause: String,
        error_code: u32,
        context: HashMap<String, String>,
    },

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },

    #[error("Resource exhaustion: {resource} - {limit}")]
    ResourceExhaustion {
        resource: String,
        limit: String,
        error_code: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // Configuration errors: 1000-1999
    pub const INVALID_SECURITY_LEVEL: u32 = 1001;
    pub const UNSUPPORTED_ETA: u32 = 1002;
    pub const UNSUPPORTED_GAMMA1: u32 = 1003;
    pub const UNSUPPORTED_GAMMA2: u32 = 1004;
    pub const INVALID_SEED_LENGTH: u32 = 1005;
    pub const INVALID_SIGNING_POLICY: u32 = 1006;

    // Signature scheme errors: 2000-2999
    pub const INVALID_SIGNATURE: u32 = 2004;
    pub const INVALID_KEY_SIZE: u32 = 2005;
    pub const INVALID_SIGNATURE_SIZE: u32 = 2006;
    pub const INVALID_ENCODING: u32 = 2007;
    pub const SIGNING_ATTEMPTS_EXHAUSTED: u32 = 2008;
    pub const KEY_PAIR_MISMATCH: u32 = 2009;

    // Entropy errors: 5000-5999
    pub const INSUFFICIENT_ENTROPY: u32 = 5002;

    // Serialization errors: 9000-9999
    pub const SERIALIZATION_FAILED: u32 = 9001;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::InvalidParameter { error_code, .. } => *error_code,
            CryptoError::DecodeError { error_code, .. } => *error_code,
            CryptoError::SignatureError { error_code, .. } => *error_code,
            CryptoError::RandomGenerationError { error_code, .. } => *error_code,
            CryptoError::ResourceExhaustion { error_code, .. } => *error_code,
            CryptoError::SerializationError(_) => error_codes::SERIALIZATION_FAILED,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::InvalidParameter {
                parameter,
                expected,
                ..
            } => {
                format!(
                    "Invalid parameter '{}'. Expected {}.",
                    parameter, expected
                )
            }
            CryptoError::DecodeError { object, .. } => {
                format!(
                    "Could not parse the {}. The data is truncated, padded or belongs to another security level.",
                    object
                )
            }
            CryptoError::SignatureError { operation, .. } => {
                format!("Signature operation '{}' failed. Message authenticity cannot be established.", operation)
            }
            CryptoError::RandomGenerationError { .. } => {
                "Random number generation failed. Key generation cannot proceed securely."
                    .to_string()
            }
            CryptoError::ResourceExhaustion { resource, .. } => {
                format!(
                    "Resource '{}' exhausted before the operation could complete.",
                    resource
                )
            }
            CryptoError::SerializationError(_) => {
                "Data serialization failed. Data format may be corrupted.".to_string()
            }
        }
    }

    /// Get technical details for debugging
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());
        details.insert("timestamp".to_string(), chrono::Utc::now().to_rfc3339());

        match self {
            CryptoError::SignatureError {
                operation,
                cause,
                context,
                ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("cause".to_string(), cause.clone());
                details.extend(context.clone());
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            CryptoError::DecodeError {
                object,
                expected,
                actual,
                ..
            } => {
                details.insert("object".to_string(), object.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            _ => {
                details.insert("details".to_string(), format!("{:?}", self));
            }
        }

        details
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            CryptoError::InvalidParameter { error_code, .. } => match *error_code {
                error_codes::INVALID_SECURITY_LEVEL => {
                    Some("Use one of the supported security levels: 2, 3 or 5.".to_string())
                }
                error_codes::INVALID_SEED_LENGTH => {
                    Some("Provide a key generation seed of at most 32 bytes.".to_string())
                }
                error_codes::INVALID_SIGNING_POLICY => {
                    Some("Allow at least one signing attempt in the signing policy.".to_string())
                }
                error_codes::KEY_PAIR_MISMATCH => Some(
                    "Derive the public key from the private key instead of pairing keys by hand."
                        .to_string(),
                ),
                _ => Some("Check the parameter set against the supported levels.".to_string()),
            },
            CryptoError::DecodeError { .. } => Some(
                "Make sure the bytes were produced for the same security level and were not truncated."
                    .to_string(),
            ),
            CryptoError::SignatureError { error_code, .. } => match *error_code {
                error_codes::INVALID_SIGNATURE => Some(
                    "The signature encoding is not canonical. Check for data tampering."
                        .to_string(),
                ),
                _ => None,
            },
            CryptoError::RandomGenerationError { .. } => Some(
                "Check system entropy sources, or supply an explicit seed for deterministic generation."
                    .to_string(),
            ),
            CryptoError::ResourceExhaustion { .. } => Some(
                "Raise the signing policy attempt limit or check the private key for corruption."
                    .to_string(),
            ),
            CryptoError::SerializationError(_) => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::InvalidParameter { .. } => "InvalidParameter",
            CryptoError::DecodeError { .. } => "DecodeError",
            CryptoError::SignatureError { .. } => "SignatureError",
            CryptoError::RandomGenerationError { .. } => "RandomGenerationError",
            CryptoError::ResourceExhaustion { .. } => "ResourceExhaustion",
            CryptoError::SerializationError(_) => "SerializationError",
        }
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str, error_code: u32) -> Self {
        CryptoError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    pub fn decode_error(object: &str, expected: usize, actual: usize, error_code: u32) -> Self {
        CryptoError::DecodeError {
            object: object.to_string(),
            expected: format!("{} bytes", expected),
            actual: format!("{} bytes", actual),
            error_code,
        }
    }

    pub fn signature_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::SignatureError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
            context: HashMap::new(),
        }
    }

    /// Attach a diagnostic entry to a `SignatureError`; other variants are
    /// returned unchanged
    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        if let CryptoError::SignatureError { context, .. } = &mut self {
            context.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn resource_exhaustion(resource: &str, limit: &str, error_code: u32) -> Self {
        CryptoError::ResourceExhaustion {
            resource: resource.to_string(),
            limit: limit.to_string(),
            error_code,
        }
    }
}

impl From<bincode::Error> for CryptoError {
    fn from(err: bincode::Error) -> Self {
        CryptoError::SerializationError(err.to_string())
    }
}

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_generation() {
        let error = CryptoError::invalid_parameter(
            "security_level",
            "2, 3 or 5",
            "4",
            error_codes::INVALID_SECURITY_LEVEL,
        );
        assert_eq!(error.error_code(), error_codes::INVALID_SECURITY_LEVEL);
        assert_eq!(error.error_type(), "InvalidParameter");
    }

    #[test]
    fn test_decode_error_reports_lengths() {
        let error = CryptoError::decode_error("signature", 2420, 2419, error_codes::INVALID_SIGNATURE_SIZE);
        let message = error.to_string();
        assert!(message.contains("2420 bytes"));
        assert!(message.contains("2419 bytes"));

        let details = error.technical_details();
        assert_eq!(details.get("expected").map(String::as_str), Some("2420 bytes"));
        assert_eq!(details.get("actual").map(String::as_str), Some("2419 bytes"));
        assert!(details.contains_key("timestamp"));
    }

    #[test]
    fn test_signature_error_context_in_details() {
        let error = CryptoError::signature_error("hint decoding", "nonzero padding", error_codes::INVALID_SIGNATURE)
            .with_context("level", "Level3")
            .with_context("offset", "54");
        let details = error.technical_details();
        assert_eq!(details.get("level").map(String::as_str), Some("Level3"));
        assert_eq!(details.get("offset").map(String::as_str), Some("54"));

        // Only signature errors carry context
        let other = CryptoError::decode_error("signature", 1, 2, error_codes::INVALID_SIGNATURE_SIZE)
            .with_context("level", "Level2");
        assert!(!other.technical_details().contains_key("level"));
    }

    #[test]
    fn test_user_friendly_message() {
        let error = CryptoError::resource_exhaustion(
            "signing attempts",
            "1000",
            error_codes::SIGNING_ATTEMPTS_EXHAUSTED,
        );
        assert!(error.user_friendly_message().contains("signing attempts"));
    }

    #[test]
    fn test_remediation_suggestions() {
        let error = CryptoError::RandomGenerationError {
            cause: "Insufficient entropy".to_string(),
            error_code: error_codes::INSUFFICIENT_ENTROPY,
        };
        let suggestion = error.suggested_remediation();
        assert!(suggestion.is_some());
        assert!(suggestion.unwrap().contains("entropy"));
    }
}
