//! Fixed-width coefficient encodings
//!
//! Every field uses the same continuous little-endian bit packing: value `i`
//! occupies bits `i * w .. (i + 1) * w` of the output, least significant bit
//! first. Signed fields are offset into an unsigned range before packing.

use super::reduce::centered;
use super::{Coeff, Poly};
use crate::params::{Eta, Gamma1, Gamma2, N, POLYT0_PACKED_BYTES, POLYT1_PACKED_BYTES};

const T0_OFFSET: i32 = 1 << 12;

/// Pack `N` values of `bits` bits each into `out`
pub(crate) fn pack_bits<I>(values: I, bits: u32, out: &mut [u8])
where
    I: IntoIterator<Item = u32>,
{
    let mask = (1u64 << bits) - 1;
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut pos = 0usize;

    for value in values {
        acc |= (value as u64 & mask) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            acc >>= 8;
            filled -= 8;
            pos += 1;
        }
    }
    if filled > 0 {
        out[pos] = acc as u8;
    }
}

/// Unpack `N` values of `bits` bits each
///
/// Missing input bytes read as zero; callers check lengths up front.
pub(crate) fn unpack_bits(bytes: &[u8], bits: u32) -> [u32; N] {
    let mask = (1u64 << bits) - 1;
    let mut out = [0u32; N];
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut pos = 0usize;

    for value in out.iter_mut() {
        while filled < bits {
            acc |= (bytes.get(pos).copied().unwrap_or(0) as u64) << filled;
            pos += 1;
            filled += 8;
        }
        *value = (acc & mask) as u32;
        acc >>= bits;
        filled -= bits;
    }
    out
}

fn from_unsigned(values: [u32; N], map: impl Fn(i32) -> i32) -> Poly<Coeff> {
    let mut coeffs = [0i32; N];
    for (c, v) in coeffs.iter_mut().zip(values.iter()) {
        *c = map(*v as i32);
    }
    Poly::from_coeffs(coeffs)
}

impl Poly<Coeff> {
    /// Coefficients in `[-eta, eta]`, 3 or 4 bits each
    pub fn pack_eta(&self, eta: Eta, out: &mut [u8]) {
        let e = eta.value();
        pack_bits(
            self.coeffs.iter().map(|&c| (e - centered(c)) as u32),
            eta.bits(),
            &mut out[..eta.packed_bytes()],
        );
    }

    pub fn unpack_eta(bytes: &[u8], eta: Eta) -> Self {
        let e = eta.value();
        from_unsigned(unpack_bits(bytes, eta.bits()), |v| e - v)
    }

    /// High-order bits of t, 10 bits each
    pub fn pack_t1(&self, out: &mut [u8]) {
        pack_bits(
            self.coeffs.iter().map(|&c| c as u32),
            10,
            &mut out[..POLYT1_PACKED_BYTES],
        );
    }

    pub fn unpack_t1(bytes: &[u8]) -> Self {
        from_unsigned(unpack_bits(bytes, 10), |v| v)
    }

    /// Low-order bits of t in `(-2^12, 2^12]`, 13 bits each
    pub fn pack_t0(&self, out: &mut [u8]) {
        pack_bits(
            self.coeffs.iter().map(|&c| (T0_OFFSET - centered(c)) as u32),
            13,
            &mut out[..POLYT0_PACKED_BYTES],
        );
    }

    pub fn unpack_t0(bytes: &[u8]) -> Self {
        from_unsigned(unpack_bits(bytes, 13), |v| T0_OFFSET - v)
    }

    /// Coefficients in `(-gamma1, gamma1]`, 18 or 20 bits each
    pub fn pack_z(&self, gamma1: Gamma1, out: &mut [u8]) {
        let g1 = gamma1.value();
        pack_bits(
            self.coeffs.iter().map(|&c| (g1 - centered(c)) as u32),
            gamma1.bits(),
            &mut out[..gamma1.packed_bytes()],
        );
    }

    pub fn unpack_z(bytes: &[u8], gamma1: Gamma1) -> Self {
        let g1 = gamma1.value();
        from_unsigned(unpack_bits(bytes, gamma1.bits()), |v| g1 - v)
    }

    /// High bits produced by decompose, 4 or 6 bits each
    pub fn pack_w1(&self, gamma2: Gamma2, out: &mut [u8]) {
        pack_bits(
            self.coeffs.iter().map(|&c| c as u32),
            gamma2.w1_bits(),
            &mut out[..gamma2.w1_packed_bytes()],
        );
    }

    pub fn unpack_w1(bytes: &[u8], gamma2: Gamma2) -> Self {
        from_unsigned(unpack_bits(bytes, gamma2.w1_bits()), |v| v)
    }
}
