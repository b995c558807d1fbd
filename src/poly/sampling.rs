/*!
 * Deterministic sampling of ring elements from hash streams
 *
 * Matrix entries and secrets come from SHAKE128 over `seed || nonce`; the
 * masking vector and the challenge come from SHAKE256.
 */

use super::{Coeff, Ntt, Poly};
use crate::params::{Eta, Gamma1, CRHBYTES, N, Q, SEEDBYTES};
use crate::xof::{Shake128Stream, Shake256Stream, SHAKE128_RATE, SHAKE256_RATE};

/// SHAKE128 blocks squeezed before the first uniform rejection pass
const UNIFORM_INITIAL_BLOCKS: usize = 5;

/// Keep 23-bit little-endian words below Q; returns how many were written
fn rej_uniform(out: &mut [i32], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(3) {
        if ctr == out.len() {
            break;
        }
        let t = (chunk[0] as u32 | (chunk[1] as u32) << 8 | (chunk[2] as u32) << 16) & 0x7F_FFFF;
        if t < Q as u32 {
            out[ctr] = t as i32;
            ctr += 1;
        }
    }
    ctr
}

/// Keep half-bytes that map into `[-eta, eta]`; returns how many were written
fn rej_eta(out: &mut [i32], buf: &[u8], eta: Eta) -> usize {
    let mut ctr = 0;
    for &byte in buf {
        if ctr == out.len() {
            break;
        }
        for t in [(byte & 0x0F) as i32, (byte >> 4) as i32] {
            if ctr == out.len() {
                break;
            }
            match eta {
                Eta::Two if t < 15 => {
                    out[ctr] = 2 - (t - ((205 * t) >> 10) * 5);
                    ctr += 1;
                }
                Eta::Four if t < 9 => {
                    out[ctr] = 4 - t;
                    ctr += 1;
                }
                _ => {}
            }
        }
    }
    ctr
}

impl Poly<Ntt> {
    /// Uniform element of Z_Q[X]/(X^256 + 1), already in the NTT domain
    ///
    /// Matrix cell `(i, j)` uses nonce `(i << 8) + j`.
    pub fn uniform(rho: &[u8; SEEDBYTES], nonce: u16) -> Self {
        let mut coeffs = [0i32; N];
        let mut stream = Shake128Stream::with_nonce(rho, nonce);

        let buf = stream.squeeze_vec(UNIFORM_INITIAL_BLOCKS * SHAKE128_RATE);
        let mut ctr = rej_uniform(&mut coeffs, &buf);

        let mut block = [0u8; SHAKE128_RATE];
        while ctr < N {
            stream.squeeze(&mut block);
            ctr += rej_uniform(&mut coeffs[ctr..], &block);
        }
        Poly::from_coeffs(coeffs)
    }
}

impl Poly<Coeff> {
    /// Secret polynomial with coefficients in `[-eta, eta]`
    pub fn uniform_eta(seed: &[u8; SEEDBYTES], nonce: u16, eta: Eta) -> Self {
        let initial_blocks = match eta {
            Eta::Two => 1,
            Eta::Four => 2,
        };
        let mut coeffs = [0i32; N];
        let mut stream = Shake128Stream::with_nonce(seed, nonce);

        let buf = stream.squeeze_vec(initial_blocks * SHAKE128_RATE);
        let mut ctr = rej_eta(&mut coeffs, &buf, eta);

        let mut block = [0u8; SHAKE128_RATE];
        while ctr < N {
            stream.squeeze(&mut block);
            ctr += rej_eta(&mut coeffs[ctr..], &block, eta);
        }
        Poly::from_coeffs(coeffs)
    }

    /// Masking polynomial with coefficients in `(-gamma1, gamma1]`
    pub fn uniform_gamma1(seed: &[u8; CRHBYTES], nonce: u16, gamma1: Gamma1) -> Self {
        let buf = Shake256Stream::with_nonce(seed, nonce).squeeze_vec(gamma1.packed_bytes());
        Self::unpack_z(&buf, gamma1)
    }

    /// Challenge polynomial with exactly `tau` coefficients equal to ±1
    pub fn challenge(seed: &[u8; SEEDBYTES], tau: usize) -> Self {
        let mut stream = Shake256Stream::new(&[&seed[..]]);
        let mut block = [0u8; SHAKE256_RATE];
        stream.squeeze(&mut block);

        let mut signs = 0u64;
        for (i, byte) in block[..8].iter().enumerate() {
            signs |= (*byte as u64) << (8 * i);
        }
        let mut pos = 8;

        let mut coeffs = [0i32; N];
        for i in N - tau..N {
            let b = loop {
                if pos >= SHAKE256_RATE {
                    stream.squeeze(&mut block);
                    pos = 0;
                }
                let b = block[pos] as usize;
                pos += 1;
                if b <= i {
                    break b;
                }
            };
            coeffs[i] = coeffs[b];
            coeffs[b] = 1 - 2 * (signs & 1) as i32;
            signs >>= 1;
        }
        Poly::from_coeffs(coeffs)
    }
}
