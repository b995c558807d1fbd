/*!
 * Hint vectors
 *
 * A hint records, per commitment polynomial, the coefficient positions
 * where the verifier must nudge its recomputed high bits. The encoding is
 * canonical: positions are strictly increasing inside each polynomial, group
 * boundaries never decrease, and unused slots are zero, so every logical
 * hint has exactly one byte representation.
 */

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::params::{Gamma2, N};
use crate::poly::rounding::{make_hint, use_hint};
use crate::poly::{Coeff, Poly};
use crate::polyvec::PolyVec;

/// Sorted hint positions for each of the k commitment polynomials
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HintVector {
    positions: Vec<Vec<u8>>,
}

impl HintVector {
    /// Compute hints for the low parts `low` against the high parts `high`
    ///
    /// `low` must hold canonical representatives in `[0, Q)`.
    pub fn make(low: &PolyVec<Coeff>, high: &PolyVec<Coeff>, gamma2: Gamma2) -> Self {
        let positions = low
            .iter()
            .zip(high.iter())
            .map(|(a0, a1)| {
                (0..N)
                    .filter(|&j| make_hint(a0.coeffs()[j], a1.coeffs()[j], gamma2))
                    .map(|j| j as u8)
                    .collect()
            })
            .collect();
        HintVector { positions }
    }

    /// Apply the hints to a canonical vector, recovering its corrected high bits
    pub fn apply(&self, w: &PolyVec<Coeff>, gamma2: Gamma2) -> PolyVec<Coeff> {
        let polys = w
            .iter()
            .zip(self.positions.iter())
            .map(|(poly, positions)| {
                let mut flags = [false; N];
                for &p in positions {
                    flags[p as usize] = true;
                }
                let mut out = [0i32; N];
                for j in 0..N {
                    out[j] = use_hint(poly.coeffs()[j], flags[j], gamma2);
                }
                Poly::from_coeffs(out)
            })
            .collect();
        PolyVec::from_polys(polys)
    }

    /// Total number of set hint bits
    pub fn weight(&self) -> usize {
        self.positions.iter().map(Vec::len).sum()
    }

    pub fn positions(&self) -> &[Vec<u8>] {
        &self.positions
    }

    /// Write `omega` position bytes followed by one end marker per polynomial
    ///
    /// The weight must not exceed `omega`; the signer rejects such candidates
    /// before encoding.
    pub fn encode(&self, omega: usize, out: &mut [u8]) {
        let k = self.positions.len();
        out[..omega + k].iter_mut().for_each(|b| *b = 0);

        let mut idx = 0;
        for (i, positions) in self.positions.iter().enumerate() {
            for &p in positions {
                out[idx] = p;
                idx += 1;
            }
            out[omega + i] = idx as u8;
        }
    }

    /// Parse the hint section of a signature, rejecting non-canonical input
    ///
    /// # Arguments
    ///
    /// * `bytes` - The `omega + k` byte hint section
    /// * `k` - Number of commitment polynomials
    /// * `omega` - Hint budget of the parameter set
    ///
    /// # Returns
    ///
    /// The hint vector, or a `SignatureError` when a boundary decreases or
    /// exceeds `omega`, positions are not strictly increasing, or an unused
    /// slot is nonzero
    pub fn decode(bytes: &[u8], k: usize, omega: usize) -> CryptoResult<Self> {
        if bytes.len() != omega + k {
            return Err(CryptoError::decode_error(
                "hint section",
                omega + k,
                bytes.len(),
                error_codes::INVALID_SIGNATURE_SIZE,
            ));
        }

        let mut positions = Vec::with_capacity(k);
        let mut start = 0usize;
        for i in 0..k {
            let end = bytes[omega + i] as usize;
            if end < start || end > omega {
                return Err(non_canonical("hint boundary out of order or out of range")
                    .with_context("polynomial", i.to_string()));
            }
            let group = &bytes[start..end];
            if group.windows(2).any(|w| w[1] <= w[0]) {
                return Err(non_canonical("hint positions not strictly increasing")
                    .with_context("polynomial", i.to_string()));
            }
            positions.push(group.to_vec());
            start = end;
        }

        if let Some(offset) = bytes[start..omega].iter().position(|&b| b != 0) {
            return Err(non_canonical("nonzero padding after last hint")
                .with_context("offset", (start + offset).to_string()));
        }

        Ok(HintVector { positions })
    }
}

fn non_canonical(cause: &str) -> CryptoError {
    CryptoError::signature_error("hint decoding", cause, error_codes::INVALID_SIGNATURE)
}
