/*!
 * Byte, hex and base64 encodings for keys and signatures
 *
 * Every serializable object has a fixed length dictated by its security
 * level, so decoding always takes the level alongside the data.
 */

use zeroize::Zeroizing;

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::keys::{PrivateKey, PublicKey};
use crate::params::SecurityLevel;
use crate::sign::Signature;

/// Objects with a fixed, level-dependent byte encoding
pub trait Encodable: Sized {
    /// Name used in decode errors
    const OBJECT: &'static str;

    fn encode(&self) -> Vec<u8>;

    fn decode(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self>;

    /// Lowercase hex of the byte encoding
    fn to_hex(&self) -> String {
        hex::encode(Zeroizing::new(self.encode()).as_slice())
    }

    fn from_hex(text: &str, level: SecurityLevel) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(
            hex::decode(text.trim()).map_err(|e| text_error(Self::OBJECT, "hex", e))?,
        );
        Self::decode(&bytes, level)
    }

    /// Standard base64 of the byte encoding
    fn to_base64(&self) -> String {
        base64::encode(Zeroizing::new(self.encode()).as_slice())
    }

    fn from_base64(text: &str, level: SecurityLevel) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(
            base64::decode(text.trim()).map_err(|e| text_error(Self::OBJECT, "base64", e))?,
        );
        Self::decode(&bytes, level)
    }
}

fn text_error(object: &str, format: &str, err: impl std::fmt::Display) -> CryptoError {
    CryptoError::DecodeError {
        object: object.to_string(),
        expected: format!("{} text", format),
        actual: err.to_string(),
        error_code: error_codes::INVALID_ENCODING,
    }
}

impl Encodable for PrivateKey {
    const OBJECT: &'static str = "private key";

    fn encode(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn decode(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        PrivateKey::from_bytes(bytes, level)
    }
}

impl Encodable for PublicKey {
    const OBJECT: &'static str = "public key";

    fn encode(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn decode(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        PublicKey::from_bytes(bytes, level)
    }
}

impl Encodable for Signature {
    const OBJECT: &'static str = "signature";

    fn encode(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn decode(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        Signature::from_bytes(bytes, level)
    }
}

/// Encode a key or signature to bytes
pub fn encode<T: Encodable>(value: &T) -> Vec<u8> {
    value.encode()
}

/// Decode a key or signature, failing on a length mismatch
pub fn decode<T: Encodable>(bytes: &[u8], level: SecurityLevel) -> CryptoResult<T> {
    T::decode(bytes, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_base64_roundtrip() {
        let (sk, pk) = PrivateKey::generate(SecurityLevel::Level2, Some(&b"encoding"[..])).unwrap();

        let hex_pk = pk.to_hex();
        assert_eq!(hex_pk.len(), 2 * SecurityLevel::Level2.public_key_length());
        assert_eq!(PublicKey::from_hex(&hex_pk, SecurityLevel::Level2).unwrap(), pk);

        let b64_sk = sk.to_base64();
        assert_eq!(PrivateKey::from_base64(&b64_sk, SecurityLevel::Level2).unwrap(), sk);

        let sig = sk.sign(b"text").unwrap();
        let restored: Signature = decode(&encode(&sig), SecurityLevel::Level2).unwrap();
        assert_eq!(restored, sig);
        assert_eq!(Signature::from_hex(&sig.to_hex(), SecurityLevel::Level2).unwrap(), sig);
    }

    #[test]
    fn test_invalid_text_is_a_decode_error() {
        let err = PublicKey::from_hex("zz", SecurityLevel::Level2).unwrap_err();
        assert_eq!(err.error_code(), error_codes::INVALID_ENCODING);
        assert_eq!(err.error_type(), "DecodeError");

        let err = Signature::from_base64("***", SecurityLevel::Level3).unwrap_err();
        assert_eq!(err.error_code(), error_codes::INVALID_ENCODING);
    }

    #[test]
    fn test_wrong_level_is_a_length_error() {
        let (_, pk) = PrivateKey::generate(SecurityLevel::Level3, Some(&b"len"[..])).unwrap();
        let err = PublicKey::from_hex(&pk.to_hex(), SecurityLevel::Level5).unwrap_err();
        assert_eq!(err.error_code(), error_codes::INVALID_KEY_SIZE);
    }
}
