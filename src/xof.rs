/*!
 * Extendable-output hash streams
 *
 * Thin wrappers over the SHAKE128/SHAKE256 implementations in `sha3`. Each
 * stream is created from its full input in one step and then squeezed as
 * many times as the caller needs; streams never share state.
 */

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

use crate::params::CRHBYTES;

/// SHAKE128 block size in bytes
pub const SHAKE128_RATE: usize = 168;
/// SHAKE256 block size in bytes
pub const SHAKE256_RATE: usize = 136;

/// An absorbed XOF ready to be squeezed
pub struct XofStream<H: ExtendableOutput> {
    reader: H::Reader,
}

pub type Shake128Stream = XofStream<Shake128>;
pub type Shake256Stream = XofStream<Shake256>;

impl<H> XofStream<H>
where
    H: Default + Update + ExtendableOutput,
{
    /// Absorb the concatenation of `parts` and switch to squeezing
    pub fn new(parts: &[&[u8]]) -> Self {
        let mut hasher = H::default();
        for part in parts {
            hasher.update(part);
        }
        XofStream {
            reader: hasher.finalize_xof(),
        }
    }

    /// Absorb `seed` followed by a little-endian 16-bit nonce
    pub fn with_nonce(seed: &[u8], nonce: u16) -> Self {
        Self::new(&[seed, &nonce.to_le_bytes()[..]])
    }

    /// Fill `out` with the next bytes of the stream
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }

    pub fn squeeze_vec(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out);
        out
    }
}

/// Collision-resistant hash: SHAKE256 truncated to 48 bytes
pub fn crh(parts: &[&[u8]]) -> [u8; CRHBYTES] {
    let mut out = [0u8; CRHBYTES];
    Shake256Stream::new(parts).squeeze(&mut out);
    out
}

/// SHAKE256 of the concatenation of `parts`, written into `out`
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    Shake256Stream::new(parts).squeeze(out);
}
