/*!
 * Key generation, derivation and serialization
 *
 * A private key carries its packed fields plus NTT-domain copies of the
 * secret vectors and the expanded public matrix. The matrix is a pure
 * function of rho, so a private key and every public key derived from it
 * share one reference-counted copy.
 */

use std::fmt;
use std::sync::Arc;

use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::codec::{ByteReader, ByteWriter, Field};
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::params::{SecurityLevel, CRHBYTES, SEEDBYTES};
use crate::poly::Ntt;
use crate::policy::SigningPolicy;
use crate::polyvec::{Matrix, PolyVec};
use crate::sign::{self, Signature};
use crate::xof::{crh, shake256};

/// Private signing key
#[derive(Clone)]
pub struct PrivateKey {
    level: SecurityLevel,
    rho: [u8; SEEDBYTES],
    key: [u8; SEEDBYTES],
    tr: [u8; CRHBYTES],
    s1: PolyVec,
    s2: PolyVec,
    t0: PolyVec,
    s1_hat: PolyVec<Ntt>,
    s2_hat: PolyVec<Ntt>,
    t0_hat: PolyVec<Ntt>,
    matrix: Arc<Matrix>,
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.rho.zeroize();
        self.key.zeroize();
        self.tr.zeroize();
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
        self.s1_hat.zeroize();
        self.s2_hat.zeroize();
        self.t0_hat.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
            && self.rho == other.rho
            && self.key == other.key
            && self.tr == other.tr
            && self.s1 == other.s1
            && self.s2 == other.s2
            && self.t0 == other.t0
    }
}

impl Eq for PrivateKey {}

/// Public verification key
#[derive(Clone)]
pub struct PublicKey {
    level: SecurityLevel,
    rho: [u8; SEEDBYTES],
    t1: PolyVec,
    /// NTT of t1 * 2^d
    t1_hat: PolyVec<Ntt>,
    /// CRH of the serialized key
    tr: [u8; CRHBYTES],
    matrix: Arc<Matrix>,
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("level", &self.level)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.rho == other.rho && self.t1 == other.t1
    }
}

impl Eq for PublicKey {}

/// t = A * s1 + s2 in canonical form
fn compute_t(matrix: &Matrix, s1_hat: &PolyVec<Ntt>, s2: &PolyVec) -> PolyVec {
    let mut t = matrix.multiply(s1_hat);
    t.reduce();
    let mut t = t.inverse_ntt().add(s2);
    t.caddq();
    t
}

impl PrivateKey {
    /// Generate a key pair
    ///
    /// # Arguments
    ///
    /// * `level` - Security level of the new keys
    /// * `seed` - Optional seed of at most 32 bytes, zero-extended; drawn
    ///   from the operating system RNG when absent
    ///
    /// # Returns
    ///
    /// The private key and its public key, or an error if the seed is too
    /// long or the RNG fails
    pub fn generate(
        level: SecurityLevel,
        seed: Option<&[u8]>,
    ) -> CryptoResult<(PrivateKey, PublicKey)> {
        let params = level.parameters();

        let mut seedbuf = [0u8; SEEDBYTES];
        match seed {
            Some(s) if s.len() > SEEDBYTES => {
                return Err(CryptoError::invalid_parameter(
                    "seed",
                    "at most 32 bytes",
                    &format!("{} bytes", s.len()),
                    error_codes::INVALID_SEED_LENGTH,
                ));
            }
            Some(s) => seedbuf[..s.len()].copy_from_slice(s),
            None => OsRng.try_fill_bytes(&mut seedbuf).map_err(|e| {
                CryptoError::RandomGenerationError {
                    cause: e.to_string(),
                    error_code: error_codes::INSUFFICIENT_ENTROPY,
                }
            })?,
        }

        let mut expanded = [0u8; 3 * SEEDBYTES];
        shake256(&[&seedbuf[..]], &mut expanded);
        seedbuf.zeroize();

        let mut rho = [0u8; SEEDBYTES];
        let mut sigma = [0u8; SEEDBYTES];
        let mut key = [0u8; SEEDBYTES];
        rho.copy_from_slice(&expanded[..SEEDBYTES]);
        sigma.copy_from_slice(&expanded[SEEDBYTES..2 * SEEDBYTES]);
        key.copy_from_slice(&expanded[2 * SEEDBYTES..]);
        expanded.zeroize();

        let s1 = PolyVec::uniform_eta(&sigma, 0, params.l, params.eta);
        let s2 = PolyVec::uniform_eta(&sigma, params.l as u16, params.k, params.eta);
        sigma.zeroize();

        let matrix = Arc::new(Matrix::expand(&rho, params.k, params.l));
        let s1_hat = s1.ntt();
        let t = compute_t(&matrix, &s1_hat, &s2);
        let (t0, t1) = t.power2round();

        let public = PublicKey::from_parts(level, rho, t1, Arc::clone(&matrix));
        let private = PrivateKey::from_parts(level, rho, key, public.tr, s1, s2, t0, matrix);
        key.zeroize();

        debug!("Generated {} key pair ({})", level, public.fingerprint());
        Ok((private, public))
    }

    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        level: SecurityLevel,
        rho: [u8; SEEDBYTES],
        key: [u8; SEEDBYTES],
        tr: [u8; CRHBYTES],
        s1: PolyVec,
        s2: PolyVec,
        t0: PolyVec,
        matrix: Arc<Matrix>,
    ) -> Self {
        let s1_hat = s1.ntt();
        let s2_hat = s2.ntt();
        let t0_hat = t0.ntt();
        PrivateKey {
            level,
            rho,
            key,
            tr,
            s1,
            s2,
            t0,
            s1_hat,
            s2_hat,
            t0_hat,
            matrix,
        }
    }

    /// Recompute the public key from the secret vectors and cached matrix
    pub fn derive_public_key(&self) -> PublicKey {
        let t = compute_t(&self.matrix, &self.s1_hat, &self.s2);
        let (_, t1) = t.power2round();
        PublicKey::from_parts(self.level, self.rho, t1, Arc::clone(&self.matrix))
    }

    /// Sign a message with the default signing policy
    pub fn sign(&self, message: &[u8]) -> CryptoResult<Signature> {
        sign::sign(message, self)
    }

    /// Sign a message under an explicit signing policy
    pub fn sign_with_policy(&self, message: &[u8], policy: &SigningPolicy) -> CryptoResult<Signature> {
        sign::sign_with_policy(message, self, policy)
    }

    /// Serialize as `rho || K || tr || s1 || s2 || t0`
    pub fn to_bytes(&self) -> Vec<u8> {
        let params = self.level.parameters();
        let mut writer = ByteWriter::new(params.private_key_bytes());
        writer
            .write_bytes(&self.rho)
            .write_bytes(&self.key)
            .write_bytes(&self.tr)
            .write_polyvec(Field::Eta(params.eta), &self.s1)
            .write_polyvec(Field::Eta(params.eta), &self.s2)
            .write_polyvec(Field::T0, &self.t0);
        writer.finish()
    }

    /// Parse a private key and rebuild its matrix and NTT caches
    ///
    /// # Arguments
    ///
    /// * `bytes` - Serialized private key
    /// * `level` - Security level the key was generated for
    ///
    /// # Returns
    ///
    /// The private key, or a `DecodeError` if the length does not match the level
    pub fn from_bytes(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        let params = level.parameters();
        let mut reader = ByteReader::new(
            bytes,
            params.private_key_bytes(),
            "private key",
            error_codes::INVALID_KEY_SIZE,
        )?;
        let rho = reader.read_array::<SEEDBYTES>()?;
        let key = reader.read_array::<SEEDBYTES>()?;
        let tr = reader.read_array::<CRHBYTES>()?;
        let s1 = reader.read_polyvec(Field::Eta(params.eta), params.l)?;
        let s2 = reader.read_polyvec(Field::Eta(params.eta), params.k)?;
        let t0 = reader.read_polyvec(Field::T0, params.k)?;

        let matrix = Arc::new(Matrix::expand(&rho, params.k, params.l));
        Ok(PrivateKey::from_parts(level, rho, key, tr, s1, s2, t0, matrix))
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn rho(&self) -> &[u8; SEEDBYTES] {
        &self.rho
    }

    pub(crate) fn key(&self) -> &[u8; SEEDBYTES] {
        &self.key
    }

    pub(crate) fn tr(&self) -> &[u8; CRHBYTES] {
        &self.tr
    }

    pub fn s1(&self) -> &PolyVec {
        &self.s1
    }

    pub fn s2(&self) -> &PolyVec {
        &self.s2
    }

    pub fn t0(&self) -> &PolyVec {
        &self.t0
    }

    pub(crate) fn s1_hat(&self) -> &PolyVec<Ntt> {
        &self.s1_hat
    }

    pub(crate) fn s2_hat(&self) -> &PolyVec<Ntt> {
        &self.s2_hat
    }

    pub(crate) fn t0_hat(&self) -> &PolyVec<Ntt> {
        &self.t0_hat
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

impl PublicKey {
    fn from_parts(
        level: SecurityLevel,
        rho: [u8; SEEDBYTES],
        t1: PolyVec,
        matrix: Arc<Matrix>,
    ) -> Self {
        let t1_hat = t1.shift_left(level.parameters().d).ntt();
        let mut key = PublicKey {
            level,
            rho,
            t1,
            t1_hat,
            tr: [0u8; CRHBYTES],
            matrix,
        };
        key.tr = crh(&[&key.to_bytes()[..]]);
        key
    }

    /// Serialize as `rho || t1`
    pub fn to_bytes(&self) -> Vec<u8> {
        let params = self.level.parameters();
        let mut writer = ByteWriter::new(params.public_key_bytes());
        writer
            .write_bytes(&self.rho)
            .write_polyvec(Field::T1, &self.t1);
        writer.finish()
    }

    /// Parse a public key and expand its matrix
    pub fn from_bytes(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        let params = level.parameters();
        let mut reader = ByteReader::new(
            bytes,
            params.public_key_bytes(),
            "public key",
            error_codes::INVALID_KEY_SIZE,
        )?;
        let rho = reader.read_array::<SEEDBYTES>()?;
        let t1 = reader.read_polyvec(Field::T1, params.k)?;
        let matrix = Arc::new(Matrix::expand(&rho, params.k, params.l));
        Ok(PublicKey::from_parts(level, rho, t1, matrix))
    }

    /// Verify a signature; every failure mode yields `false`
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        sign::verify(message, signature, self)
    }

    /// Parse and verify a serialized signature in one step
    pub fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_bytes(signature, self.level) {
            Ok(sig) => self.verify(message, &sig),
            Err(e) => {
                debug!("Rejected signature at parse stage: {}", e);
                false
            }
        }
    }

    /// Generate a fingerprint of this public key
    ///
    /// This can be used as a short identifier for the public key.
    ///
    /// # Returns
    ///
    /// 16 hex characters: the first 8 bytes of SHA-256 over the level id and
    /// the serialized key
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update([self.level.id()]);
        hasher.update(self.to_bytes());
        let hash = hasher.finalize();
        hex::encode(&hash[0..8])
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn rho(&self) -> &[u8; SEEDBYTES] {
        &self.rho
    }

    pub fn t1(&self) -> &PolyVec {
        &self.t1
    }

    pub(crate) fn t1_hat(&self) -> &PolyVec<Ntt> {
        &self.t1_hat
    }

    pub(crate) fn tr(&self) -> &[u8; CRHBYTES] {
        &self.tr
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

/// A private key together with its public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

/// Self-describing container used by `KeyPair::to_bytes`
#[derive(Serialize, Deserialize)]
struct KeyPairContainer {
    level: SecurityLevel,
    private_key: Vec<u8>,
}

impl Drop for KeyPairContainer {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl KeyPair {
    /// Generate a new key pair
    pub fn generate(level: SecurityLevel, seed: Option<&[u8]>) -> CryptoResult<Self> {
        let (private_key, public_key) = PrivateKey::generate(level, seed)?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Build a key pair from a private key, deriving the public half
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.derive_public_key();
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Build a key pair from both halves
    ///
    /// # Returns
    ///
    /// The key pair, or `InvalidParameter` if the public key is not the one
    /// derived from the private key
    pub fn from_parts(private_key: PrivateKey, public_key: PublicKey) -> CryptoResult<Self> {
        if private_key.derive_public_key() != public_key {
            return Err(CryptoError::invalid_parameter(
                "public_key",
                "the public key of the given private key",
                &format!("unrelated {} public key", public_key.level()),
                error_codes::KEY_PAIR_MISMATCH,
            ));
        }
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn level(&self) -> SecurityLevel {
        self.private_key.level()
    }

    pub fn sign(&self, message: &[u8]) -> CryptoResult<Signature> {
        self.private_key.sign(message)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Serialize the key pair
    ///
    /// # Returns
    ///
    /// The level and private key bytes in a bincode container; the public
    /// key is re-derived on load
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        let container = KeyPairContainer {
            level: self.level(),
            private_key: self.private_key.to_bytes(),
        };
        bincode::serialize(&container).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }

    /// Deserialize a key pair from bytes
    ///
    /// # Arguments
    ///
    /// * `data` - The serialized key pair
    ///
    /// # Returns
    ///
    /// The deserialized key pair or an error
    pub fn from_bytes(data: &[u8]) -> CryptoResult<Self> {
        let container: KeyPairContainer = bincode::deserialize(data)?;
        let private_key = PrivateKey::from_bytes(&container.private_key, container.level)?;
        Ok(KeyPair::from_private_key(private_key))
    }
}
