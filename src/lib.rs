/*!
 * Lattice-based Digital Signatures
 *
 * This crate implements a CRYSTALS-Dilithium-class signature scheme over the
 * ring Z_Q[X]/(X^256 + 1) with Q = 8380417, at three security levels:
 *
 * - Level 2: k = 4, l = 4
 * - Level 3: k = 6, l = 5
 * - Level 5: k = 8, l = 7
 *
 * Signing is deterministic: the same key and message always produce the same
 * signature. Verification never fails with an error; any malformed, truncated
 * or forged signature simply verifies as `false`.
 *
 * Key and signature byte layouts follow the round-3 reference packing, so
 * lengths are fixed per level (see [`SecurityLevel`]).
 */

/// Error types and codes
pub mod error;

/// Security levels and parameter tables
pub mod params;

/// SHAKE-based hash streams
pub mod xof;

/// Ring arithmetic, NTT, rounding, packing and sampling
pub mod poly;

/// Vectors and matrices of ring elements
pub mod polyvec;

/// Hint computation and the canonical hint encoding
pub mod hint;

/// Incremental byte writer and reader for packed objects
pub mod codec;

/// Private keys, public keys and key pairs
pub mod keys;

/// Signature generation and verification
pub mod sign;

/// Signing policy configuration
pub mod policy;

/// Hex and base64 text encodings
pub mod encoding;

pub use encoding::{decode, encode, Encodable};
pub use error::{CryptoError, CryptoResult};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use params::{select_level, ParameterSet, SecurityLevel};
pub use policy::SigningPolicy;
pub use sign::{sign, sign_with_policy, verify, verify_bytes, Signature};

/// Generate a key pair for the given security level
///
/// # Arguments
///
/// * `level` - The security level to generate keys for
/// * `seed` - Optional seed of at most 32 bytes; the same seed always yields
///   the same keys. When absent, the seed is drawn from the OS RNG.
///
/// # Returns
///
/// The private and public key, or an error if the seed is too long or the
/// random source fails
///
/// # Example
///
/// ```
/// use lattice_dsa::prelude::*;
///
/// fn main() -> Result<(), CryptoError> {
///     let (sk, pk) = generate_key_pair(SecurityLevel::Level2, None)?;
///     let signature = sign(b"hello", &sk)?;
///     assert!(verify(b"hello", &signature, &pk));
///     Ok(())
/// }
/// ```
pub fn generate_key_pair(
    level: SecurityLevel,
    seed: Option<&[u8]>,
) -> CryptoResult<(PrivateKey, PublicKey)> {
    PrivateKey::generate(level, seed)
}

/// Recompute the public key belonging to a private key
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    private_key.derive_public_key()
}

/// The most commonly used types and functions.
pub mod prelude {
    pub use crate::derive_public_key;
    pub use crate::encoding::Encodable;
    pub use crate::generate_key_pair;
    pub use crate::select_level;
    pub use crate::sign;
    pub use crate::sign_with_policy;
    pub use crate::verify;
    pub use crate::verify_bytes;
    pub use crate::CryptoError;
    pub use crate::CryptoResult;
    pub use crate::KeyPair;
    pub use crate::PrivateKey;
    pub use crate::PublicKey;
    pub use crate::SecurityLevel;
    pub use crate::Signature;
    pub use crate::SigningPolicy;
}
