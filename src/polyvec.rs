/*!
 * Vectors and matrices of ring elements
 *
 * Lifts the single-polynomial operations to length-k and length-l vectors
 * and provides the public matrix A, which lives permanently in the NTT
 * domain.
 */

use zeroize::Zeroize;

use crate::params::{Eta, Gamma1, Gamma2, CRHBYTES, SEEDBYTES};
use crate::poly::{Coeff, Domain, Ntt, Poly};

/// A fixed-length vector of ring elements
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyVec<D: Domain = Coeff> {
    polys: Vec<Poly<D>>,
}

impl<D: Domain> Zeroize for PolyVec<D> {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}

impl<D: Domain> PolyVec<D> {
    pub fn zero(len: usize) -> Self {
        PolyVec {
            polys: vec![Poly::zero(); len],
        }
    }

    pub fn from_polys(polys: Vec<Poly<D>>) -> Self {
        PolyVec { polys }
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn polys(&self) -> &[Poly<D>] {
        &self.polys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Poly<D>> {
        self.polys.iter()
    }

    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, Poly::add)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, Poly::sub)
    }

    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Poly::reduce);
    }

    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    fn zip_with(&self, other: &Self, f: impl Fn(&Poly<D>, &Poly<D>) -> Poly<D>) -> Self {
        debug_assert_eq!(self.len(), other.len());
        PolyVec {
            polys: self
                .polys
                .iter()
                .zip(other.polys.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }
}

impl PolyVec<Coeff> {
    pub fn ntt(&self) -> PolyVec<Ntt> {
        PolyVec::from_polys(self.polys.iter().map(|p| p.ntt()).collect())
    }

    pub fn shift_left(&self, d: u32) -> Self {
        PolyVec::from_polys(self.polys.iter().map(|p| p.shift_left(d)).collect())
    }

    pub fn center(&mut self) {
        self.polys.iter_mut().for_each(|p| p.center());
    }

    /// Whether any component reaches `bound` in centered absolute value
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        self.polys.iter().any(|p| p.exceeds_norm(bound))
    }

    pub fn infinity_norm(&self) -> i32 {
        self.polys.iter().map(|p| p.infinity_norm()).max().unwrap_or(0)
    }

    /// Component-wise `(low, high)` split at 2^D
    pub fn power2round(&self) -> (Self, Self) {
        let (low, high): (Vec<_>, Vec<_>) = self.polys.iter().map(|p| p.power2round()).unzip();
        (PolyVec::from_polys(low), PolyVec::from_polys(high))
    }

    /// Component-wise `(low, high)` split at 2 * gamma2
    pub fn decompose(&self, gamma2: Gamma2) -> (Self, Self) {
        let (low, high): (Vec<_>, Vec<_>) = self.polys.iter().map(|p| p.decompose(gamma2)).unzip();
        (PolyVec::from_polys(low), PolyVec::from_polys(high))
    }

    /// Secret vector; component `i` uses nonce `first_nonce + i`
    pub fn uniform_eta(seed: &[u8; SEEDBYTES], first_nonce: u16, len: usize, eta: Eta) -> Self {
        PolyVec::from_polys(
            (0..len)
                .map(|i| Poly::uniform_eta(seed, first_nonce.wrapping_add(i as u16), eta))
                .collect(),
        )
    }

    /// Masking vector for signing attempt `kappa`
    ///
    /// Component `i` uses nonce `len * kappa + i`, truncated to 16 bits.
    pub fn uniform_gamma1(seed: &[u8; CRHBYTES], kappa: u32, len: usize, gamma1: Gamma1) -> Self {
        PolyVec::from_polys(
            (0..len)
                .map(|i| {
                    let nonce = (len as u32).wrapping_mul(kappa).wrapping_add(i as u32) as u16;
                    Poly::uniform_gamma1(seed, nonce, gamma1)
                })
                .collect(),
        )
    }
}

impl PolyVec<Ntt> {
    pub fn inverse_ntt(&self) -> PolyVec<Coeff> {
        PolyVec::from_polys(self.polys.iter().map(|p| p.inverse_ntt()).collect())
    }

    /// Multiply every component by the same polynomial
    pub fn pointwise_poly_montgomery(&self, c: &Poly<Ntt>) -> Self {
        PolyVec::from_polys(self.polys.iter().map(|p| c.pointwise_montgomery(p)).collect())
    }

    /// Sum of pointwise Montgomery products of matching components
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> Poly<Ntt> {
        debug_assert_eq!(self.len(), other.len());
        self.polys
            .iter()
            .zip(other.polys.iter())
            .fold(Poly::zero(), |acc, (a, b)| acc.add(&a.pointwise_montgomery(b)))
    }
}

/// The k x l public matrix, expanded from rho
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<PolyVec<Ntt>>,
}

impl Matrix {
    /// Expand the matrix; cell `(i, j)` uses nonce `(i << 8) + j`
    pub fn expand(rho: &[u8; SEEDBYTES], k: usize, l: usize) -> Self {
        let rows = (0..k)
            .map(|i| {
                PolyVec::from_polys(
                    (0..l)
                        .map(|j| Poly::uniform(rho, ((i << 8) + j) as u16))
                        .collect(),
                )
            })
            .collect();
        Matrix { rows }
    }

    pub fn rows(&self) -> &[PolyVec<Ntt>] {
        &self.rows
    }

    /// Number of rows
    pub fn k(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn l(&self) -> usize {
        self.rows.first().map(PolyVec::len).unwrap_or(0)
    }

    /// Matrix-vector product in the NTT domain
    ///
    /// Output coefficients are canonical but still carry the Montgomery
    /// factor removed by `inverse_ntt`.
    pub fn multiply(&self, v: &PolyVec<Ntt>) -> PolyVec<Ntt> {
        PolyVec::from_polys(
            self.rows
                .iter()
                .map(|row| row.pointwise_acc_montgomery(v))
                .collect(),
        )
    }
}
