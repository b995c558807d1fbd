/*!
 * Cursor-based byte layout for keys and signatures
 *
 * `ByteWriter` owns a buffer of the exact serialized size and appends
 * fields in layout order; `ByteReader` checks the total length once and then
 * hands out fields in the same order. Neither exposes raw offsets.
 */

use crate::error::{CryptoError, CryptoResult};
use crate::params::{Eta, Gamma1, Gamma2, POLYT0_PACKED_BYTES, POLYT1_PACKED_BYTES};
use crate::poly::{Coeff, Poly};
use crate::polyvec::PolyVec;

/// Packed polynomial encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Secret coefficients in `[-eta, eta]`
    Eta(Eta),
    /// High-order bits of t
    T1,
    /// Low-order bits of t
    T0,
    /// Response vector coefficients
    Z(Gamma1),
    /// Commitment high bits
    W1(Gamma2),
}

impl Field {
    /// Bytes used by one packed polynomial
    pub fn packed_bytes(self) -> usize {
        match self {
            Field::Eta(eta) => eta.packed_bytes(),
            Field::T1 => POLYT1_PACKED_BYTES,
            Field::T0 => POLYT0_PACKED_BYTES,
            Field::Z(gamma1) => gamma1.packed_bytes(),
            Field::W1(gamma2) => gamma2.w1_packed_bytes(),
        }
    }

    fn pack(self, poly: &Poly<Coeff>, out: &mut [u8]) {
        match self {
            Field::Eta(eta) => poly.pack_eta(eta, out),
            Field::T1 => poly.pack_t1(out),
            Field::T0 => poly.pack_t0(out),
            Field::Z(gamma1) => poly.pack_z(gamma1, out),
            Field::W1(gamma2) => poly.pack_w1(gamma2, out),
        }
    }

    fn unpack(self, bytes: &[u8]) -> Poly<Coeff> {
        match self {
            Field::Eta(eta) => Poly::unpack_eta(bytes, eta),
            Field::T1 => Poly::unpack_t1(bytes),
            Field::T0 => Poly::unpack_t0(bytes),
            Field::Z(gamma1) => Poly::unpack_z(bytes, gamma1),
            Field::W1(gamma2) => Poly::unpack_w1(bytes, gamma2),
        }
    }
}

/// Append-only writer over a buffer of fixed final size
pub struct ByteWriter {
    buf: Vec<u8>,
    capacity: usize,
}

impl ByteWriter {
    pub fn new(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn written(&self) -> usize {
        self.buf.len()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Reserve `len` zeroed bytes and let `fill` write into them
    pub fn write_with(&mut self, len: usize, fill: impl FnOnce(&mut [u8])) -> &mut Self {
        let start = self.buf.len();
        self.buf.resize(start + len, 0);
        fill(&mut self.buf[start..]);
        self
    }

    pub fn write_poly(&mut self, field: Field, poly: &Poly<Coeff>) -> &mut Self {
        self.write_with(field.packed_bytes(), |out| field.pack(poly, out))
    }

    pub fn write_polyvec(&mut self, field: Field, vec: &PolyVec<Coeff>) -> &mut Self {
        for poly in vec.iter() {
            self.write_poly(field, poly);
        }
        self
    }

    /// Hand out the finished buffer
    pub fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.buf.len(), self.capacity, "layout size mismatch");
        self.buf
    }
}

/// Reader over a buffer whose total length has already been validated
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    object: &'static str,
    error_code: u32,
}

impl<'a> ByteReader<'a> {
    /// Start reading `bytes`, which must be exactly `expected_len` long
    ///
    /// # Arguments
    ///
    /// * `bytes` - Serialized object
    /// * `expected_len` - Length dictated by the parameter set
    /// * `object` - Name used in the decode error
    /// * `error_code` - Code reported when the buffer has the wrong length
    ///
    /// # Returns
    ///
    /// A reader positioned at the first byte, or a `DecodeError` carrying
    /// the expected and actual lengths
    pub fn new(
        bytes: &'a [u8],
        expected_len: usize,
        object: &'static str,
        error_code: u32,
    ) -> CryptoResult<Self> {
        if bytes.len() != expected_len {
            return Err(CryptoError::decode_error(object, expected_len, bytes.len(), error_code));
        }
        Ok(ByteReader {
            bytes,
            pos: 0,
            object,
            error_code,
        })
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize) -> CryptoResult<&'a [u8]> {
        let end = self.pos + len;
        let slice = self.bytes.get(self.pos..end).ok_or_else(|| {
            CryptoError::decode_error(self.object, end, self.bytes.len(), self.error_code)
        })?;
        self.pos = end;
        Ok(slice)
    }

    pub fn read_array<const M: usize>(&mut self) -> CryptoResult<[u8; M]> {
        let mut out = [0u8; M];
        out.copy_from_slice(self.read_bytes(M)?);
        Ok(out)
    }

    pub fn read_poly(&mut self, field: Field) -> CryptoResult<Poly<Coeff>> {
        let bytes = self.read_bytes(field.packed_bytes())?;
        Ok(field.unpack(bytes))
    }

    pub fn read_polyvec(&mut self, field: Field, len: usize) -> CryptoResult<PolyVec<Coeff>> {
        let polys = (0..len)
            .map(|_| self.read_poly(field))
            .collect::<CryptoResult<Vec<_>>>()?;
        Ok(PolyVec::from_polys(polys))
    }
}
