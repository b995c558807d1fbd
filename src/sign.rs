/*!
 * Signing and verification
 *
 * Signing is Fiat-Shamir with aborts: each attempt draws a fresh masking
 * vector, derives a challenge from the rounded commitment, and is thrown
 * away entirely if any of the four rejection checks fires. Verification
 * replays the public half of the computation and compares challenge seeds.
 */

use std::fmt;

use log::{debug, trace, warn};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::codec::{ByteReader, ByteWriter, Field};
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::hint::HintVector;
use crate::keys::{PrivateKey, PublicKey};
use crate::params::{Gamma2, ParameterSet, SecurityLevel, CRHBYTES, SEEDBYTES};
use crate::policy::SigningPolicy;
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::xof::{crh, shake256};

/// A signature: challenge seed, response vector and hint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    level: SecurityLevel,
    c: [u8; SEEDBYTES],
    z: PolyVec,
    hint: HintVector,
}

impl Signature {
    /// Serialize as `c || z || hint`
    pub fn to_bytes(&self) -> Vec<u8> {
        let params = self.level.parameters();
        let mut writer = ByteWriter::new(params.signature_bytes());
        writer
            .write_bytes(&self.c)
            .write_polyvec(Field::Z(params.gamma1), &self.z)
            .write_with(params.hint_bytes(), |out| self.hint.encode(params.omega, out));
        writer.finish()
    }

    /// Parse a signature
    ///
    /// # Arguments
    ///
    /// * `bytes` - Serialized signature
    /// * `level` - Security level of the signing key
    ///
    /// # Returns
    ///
    /// The signature, a `DecodeError` on a length mismatch, or a
    /// `SignatureError` if the hint section is not canonically encoded
    pub fn from_bytes(bytes: &[u8], level: SecurityLevel) -> CryptoResult<Self> {
        let params = level.parameters();
        let mut reader = ByteReader::new(
            bytes,
            params.signature_bytes(),
            "signature",
            error_codes::INVALID_SIGNATURE_SIZE,
        )?;
        let c = reader.read_array::<SEEDBYTES>()?;
        let z = reader.read_polyvec(Field::Z(params.gamma1), params.l)?;
        let hint = HintVector::decode(reader.read_bytes(params.hint_bytes())?, params.k, params.omega)
            .map_err(|e| e.with_context("level", level.to_string()))?;
        Ok(Signature { level, c, z, hint })
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn challenge_seed(&self) -> &[u8; SEEDBYTES] {
        &self.c
    }

    pub fn z(&self) -> &PolyVec {
        &self.z
    }

    pub fn hint(&self) -> &HintVector {
        &self.hint
    }
}

/// Why a signing attempt was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    ResponseNorm,
    LowBitsNorm,
    CarryNorm,
    HintWeight(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ResponseNorm => write!(f, "z exceeds gamma1 - beta"),
            Rejection::LowBitsNorm => write!(f, "w0 - c*s2 exceeds gamma2 - beta"),
            Rejection::CarryNorm => write!(f, "c*t0 exceeds gamma2"),
            Rejection::HintWeight(w) => write!(f, "hint weight {} exceeds omega", w),
        }
    }
}

/// SHAKE256(mu || pack_w1(w1)) truncated to the seed length
fn challenge_seed(mu: &[u8; CRHBYTES], w1: &PolyVec, gamma2: Gamma2) -> [u8; SEEDBYTES] {
    let mut writer = ByteWriter::new(w1.len() * gamma2.w1_packed_bytes());
    writer.write_polyvec(Field::W1(gamma2), w1);
    let packed = writer.finish();

    let mut c = [0u8; SEEDBYTES];
    shake256(&[&mu[..], &packed[..]], &mut c);
    c
}

/// Wipe a rejected response before reporting why it was rejected
fn discard(z: &mut PolyVec, reason: Rejection) -> Rejection {
    z.zeroize();
    reason
}

/// One candidate for attempt `kappa`
///
/// Every secret-dependent intermediate is wiped before returning, whether the
/// candidate is accepted or rejected.
fn attempt(
    sk: &PrivateKey,
    params: &ParameterSet,
    mu: &[u8; CRHBYTES],
    rhoprime: &[u8; CRHBYTES],
    kappa: u32,
) -> Result<Signature, Rejection> {
    let mut y = PolyVec::uniform_gamma1(rhoprime, kappa, params.l, params.gamma1);
    let mut y_hat = y.ntt();

    let mut w = sk.matrix().multiply(&y_hat);
    y_hat.zeroize();
    w.reduce();
    let mut w = w.inverse_ntt();
    w.caddq();
    let (w0, w1) = w.decompose(params.gamma2);
    w.zeroize();
    let w0 = Zeroizing::new(w0);

    let c = challenge_seed(mu, &w1, params.gamma2);
    let cp = Poly::challenge(&c, params.tau).ntt();

    let mut z = sk.s1_hat().pointwise_poly_montgomery(&cp).inverse_ntt().add(&y);
    y.zeroize();
    if z.exceeds_norm(params.gamma1.value() - params.beta) {
        return Err(discard(&mut z, Rejection::ResponseNorm));
    }

    let cs2 = Zeroizing::new(sk.s2_hat().pointwise_poly_montgomery(&cp).inverse_ntt());
    let r0 = Zeroizing::new(w0.sub(&cs2));
    if r0.exceeds_norm(params.gamma2.value() - params.beta) {
        return Err(discard(&mut z, Rejection::LowBitsNorm));
    }

    let mut ct0 = Zeroizing::new(sk.t0_hat().pointwise_poly_montgomery(&cp).inverse_ntt());
    ct0.reduce();
    if ct0.exceeds_norm(params.gamma2.value()) {
        return Err(discard(&mut z, Rejection::CarryNorm));
    }

    let low = Zeroizing::new(r0.add(&ct0));
    let hint = HintVector::make(&low, &w1, params.gamma2);
    if hint.weight() > params.omega {
        return Err(discard(&mut z, Rejection::HintWeight(hint.weight())));
    }

    z.center();
    Ok(Signature {
        level: params.level,
        c,
        z,
        hint,
    })
}

/// Sign a message with the default signing policy
pub fn sign(message: &[u8], sk: &PrivateKey) -> CryptoResult<Signature> {
    sign_with_policy(message, sk, &SigningPolicy::default())
}

/// Sign a message, giving up after `policy.max_attempts` rejected candidates
///
/// # Arguments
///
/// * `message` - The message to sign
/// * `sk` - The signing key
/// * `policy` - Attempt budget for the rejection loop
///
/// # Returns
///
/// The signature, or `ResourceExhaustion` if every attempt was rejected.
/// Signing is deterministic, so retrying with the same inputs fails again.
pub fn sign_with_policy(
    message: &[u8],
    sk: &PrivateKey,
    policy: &SigningPolicy,
) -> CryptoResult<Signature> {
    policy.validate()?;
    let params = sk.level().parameters();

    let mu = crh(&[&sk.tr()[..], message]);
    let mut rhoprime = crh(&[&sk.key()[..], &mu[..]]);

    for kappa in 0..policy.max_attempts {
        match attempt(sk, params, &mu, &rhoprime, kappa) {
            Ok(signature) => {
                rhoprime.zeroize();
                debug!(
                    "Signed {} byte message at {} after {} attempt(s)",
                    message.len(),
                    params.level,
                    kappa + 1
                );
                return Ok(signature);
            }
            Err(reason) => trace!("Signing attempt {} rejected: {}", kappa, reason),
        }
    }

    rhoprime.zeroize();
    warn!(
        "Signing at {} gave up after {} attempts",
        params.level, policy.max_attempts
    );
    Err(CryptoError::resource_exhaustion(
        "signing attempts",
        &policy.max_attempts.to_string(),
        error_codes::SIGNING_ATTEMPTS_EXHAUSTED,
    ))
}

/// Verify a signature against a message and public key
///
/// Never fails with an error: a signature for another level, an oversized
/// response, or a challenge mismatch all return `false`.
pub fn verify(message: &[u8], signature: &Signature, pk: &PublicKey) -> bool {
    if signature.level != pk.level() {
        debug!(
            "Signature level {} does not match key level {}",
            signature.level,
            pk.level()
        );
        return false;
    }
    let params = pk.level().parameters();

    if signature.z.len() != params.l
        || signature.hint.positions().len() != params.k
        || signature.hint.weight() > params.omega
    {
        return false;
    }
    if signature
        .z
        .exceeds_norm(params.gamma1.value() - params.beta)
    {
        debug!("Signature rejected: z exceeds gamma1 - beta");
        return false;
    }

    let mu = crh(&[&pk.tr()[..], message]);
    let cp = Poly::challenge(&signature.c, params.tau).ntt();

    let az = pk.matrix().multiply(&signature.z.ntt());
    let ct1 = pk.t1_hat().pointwise_poly_montgomery(&cp);
    let mut w = az.sub(&ct1);
    w.reduce();
    let mut w = w.inverse_ntt();
    w.caddq();

    let w1 = signature.hint.apply(&w, params.gamma2);
    let expected = challenge_seed(&mu, &w1, params.gamma2);
    expected[..].ct_eq(&signature.c[..]).into()
}

/// Parse and verify in one step; parse failures yield `false`
pub fn verify_bytes(message: &[u8], signature: &[u8], pk: &PublicKey) -> bool {
    pk.verify_bytes(message, signature)
}
