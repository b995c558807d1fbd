/*!
 * Ring arithmetic over Z_Q[X]/(X^256 + 1)
 *
 * A `Poly<D>` carries its representation in the type: `Poly<Coeff>` is in
 * the coefficient domain and `Poly<Ntt>` in the NTT domain. Rounding, norm
 * checks and packing only exist on `Poly<Coeff>`; pointwise multiplication
 * only exists on `Poly<Ntt>`. Crossing between the two is always an explicit
 * `ntt()` or `inverse_ntt()` call.
 */

pub mod ntt;
pub mod packing;
pub mod reduce;
pub mod rounding;
pub mod sampling;

use std::fmt;
use std::marker::PhantomData;

use zeroize::Zeroize;

use crate::params::{Gamma2, N, Q};

mod private {
    pub trait Sealed {}
    impl Sealed for super::Coeff {}
    impl Sealed for super::Ntt {}
}

/// Representation marker for ring elements
pub trait Domain:
    private::Sealed + Copy + Clone + fmt::Debug + PartialEq + Eq + Send + Sync + 'static
{
    const NAME: &'static str;
}

/// Coefficient (time) domain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coeff;

/// NTT (frequency) domain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ntt;

impl Domain for Coeff {
    const NAME: &'static str = "coeff";
}

impl Domain for Ntt {
    const NAME: &'static str = "ntt";
}

/// A ring element with 256 signed coefficients
#[derive(Clone, PartialEq, Eq)]
pub struct Poly<D: Domain = Coeff> {
    coeffs: [i32; N],
    domain: PhantomData<D>,
}

impl<D: Domain> fmt::Debug for Poly<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly")
            .field("domain", &D::NAME)
            .field("head", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}

impl<D: Domain> Zeroize for Poly<D> {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl<D: Domain> Default for Poly<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: Domain> Poly<D> {
    pub fn zero() -> Self {
        Self::from_coeffs([0; N])
    }

    pub(crate) fn from_coeffs(coeffs: [i32; N]) -> Self {
        Poly {
            coeffs,
            domain: PhantomData,
        }
    }

    pub fn coeffs(&self) -> &[i32; N] {
        &self.coeffs
    }

    /// Coefficient-wise addition, result in `[0, Q)`
    pub fn add(&self, other: &Self) -> Self {
        let mut out = [0i32; N];
        for (o, (a, b)) in out.iter_mut().zip(self.coeffs.iter().zip(other.coeffs.iter())) {
            *o = (*a as i64 + *b as i64).rem_euclid(Q as i64) as i32;
        }
        Self::from_coeffs(out)
    }

    /// Coefficient-wise subtraction, result in `[0, Q)`
    pub fn sub(&self, other: &Self) -> Self {
        let mut out = [0i32; N];
        for (o, (a, b)) in out.iter_mut().zip(self.coeffs.iter().zip(other.coeffs.iter())) {
            *o = (*a as i64 - *b as i64).rem_euclid(Q as i64) as i32;
        }
        Self::from_coeffs(out)
    }

    /// Bring every coefficient into `[-6283009, 6283007]`
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::reduce32(*c);
        }
    }

    /// Map negative coefficients into `[0, Q)`
    pub fn caddq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::caddq(*c);
        }
    }
}

impl Poly<Coeff> {
    /// Forward transform into the NTT domain
    pub fn ntt(&self) -> Poly<Ntt> {
        let mut coeffs = self.coeffs;
        ntt::ntt(&mut coeffs);
        Poly::from_coeffs(coeffs)
    }

    /// Multiply by 2^d without reduction
    pub fn shift_left(&self, d: u32) -> Self {
        let mut out = self.coeffs;
        for c in out.iter_mut() {
            *c <<= d;
        }
        Self::from_coeffs(out)
    }

    /// Replace every coefficient by its centered representative
    pub fn center(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::centered(*c);
        }
    }

    /// Whether any centered coefficient reaches `bound` in absolute value
    ///
    /// Bounds above (Q-1)/8 are always reported as exceeded. Input may be in
    /// any representation modulo Q.
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        if bound > (Q - 1) / 8 {
            return true;
        }
        self.coeffs
            .iter()
            .any(|&c| reduce::centered(c).abs() >= bound)
    }

    /// Largest centered absolute coefficient
    pub fn infinity_norm(&self) -> i32 {
        self.coeffs
            .iter()
            .map(|&c| reduce::centered(c).abs())
            .max()
            .unwrap_or(0)
    }

    /// Split canonical coefficients into `(low, high)` at 2^D
    pub fn power2round(&self) -> (Self, Self) {
        let mut low = [0i32; N];
        let mut high = [0i32; N];
        for i in 0..N {
            let (a0, a1) = rounding::power2round(self.coeffs[i]);
            low[i] = a0;
            high[i] = a1;
        }
        (Self::from_coeffs(low), Self::from_coeffs(high))
    }

    /// Split canonical coefficients into `(low, high)` at 2 * gamma2
    pub fn decompose(&self, gamma2: Gamma2) -> (Self, Self) {
        let mut low = [0i32; N];
        let mut high = [0i32; N];
        for i in 0..N {
            let (a0, a1) = rounding::decompose(self.coeffs[i], gamma2);
            low[i] = a0;
            high[i] = a1;
        }
        (Self::from_coeffs(low), Self::from_coeffs(high))
    }
}

impl Poly<Ntt> {
    /// Pointwise Montgomery product
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        let mut out = [0i32; N];
        for (o, (a, b)) in out.iter_mut().zip(self.coeffs.iter().zip(other.coeffs.iter())) {
            *o = reduce::montgomery_reduce(*a as i64 * *b as i64);
        }
        Self::from_coeffs(out)
    }

    /// Inverse transform back to the coefficient domain
    ///
    /// Coefficients must be smaller than Q in absolute value, so call
    /// `reduce` after accumulating sums.
    pub fn inverse_ntt(&self) -> Poly<Coeff> {
        let mut coeffs = self.coeffs;
        ntt::invntt_tomont(&mut coeffs);
        Poly::from_coeffs(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(scale: i32) -> Poly<Coeff> {
        let mut c = [0i32; N];
        for (i, v) in c.iter_mut().enumerate() {
            *v = (i as i32 * scale) % Q - Q / 3;
        }
        Poly::from_coeffs(c)
    }

    #[test]
    fn test_add_sub_are_canonical() {
        let a = ramp(32771);
        let b = ramp(-7919);
        let sum = a.add(&b);
        let diff = a.sub(&b);
        assert!(sum.coeffs().iter().all(|&c| (0..Q).contains(&c)));
        assert!(diff.coeffs().iter().all(|&c| (0..Q).contains(&c)));
        let back = diff.add(&b);
        let expected = a.add(&Poly::zero());
        assert_eq!(back, expected);
    }

    #[test]
    fn test_ntt_multiplication_by_one() {
        let mut one = [0i32; N];
        one[0] = 1;
        let one = Poly::<Coeff>::from_coeffs(one);
        let a = ramp(4099);

        let mut product = a.ntt().pointwise_montgomery(&one.ntt());
        product.reduce();
        let mut product = product.inverse_ntt();
        product.caddq();

        assert_eq!(product, a.add(&Poly::zero()));
    }

    #[test]
    fn test_multiplication_by_x_rotates_negacyclically() {
        let mut x = [0i32; N];
        x[1] = 1;
        let x = Poly::<Coeff>::from_coeffs(x);
        let a = ramp(13);

        let mut product = a.ntt().pointwise_montgomery(&x.ntt()).inverse_ntt();
        product.caddq();
        let canonical = a.add(&Poly::zero());

        assert_eq!(product.coeffs()[0], (Q - canonical.coeffs()[N - 1]) % Q);
        for i in 1..N {
            assert_eq!(product.coeffs()[i], canonical.coeffs()[i - 1]);
        }
    }

    #[test]
    fn test_norm_check() {
        let mut c = [0i32; N];
        c[5] = Q - 100;
        c[9] = 99;
        let p = Poly::<Coeff>::from_coeffs(c);
        assert_eq!(p.infinity_norm(), 100);
        assert!(p.exceeds_norm(100));
        assert!(!p.exceeds_norm(101));
        assert!(Poly::<Coeff>::zero().exceeds_norm((Q - 1) / 8 + 1));
        assert!(!Poly::<Coeff>::zero().exceeds_norm((Q - 1) / 8));
    }

    #[test]
    fn test_power2round_splits_every_coefficient() {
        let a = ramp(65537).add(&Poly::zero());
        let (low, high) = a.power2round();
        for i in 0..N {
            assert_eq!(high.coeffs()[i] * (1 << 13) + low.coeffs()[i], a.coeffs()[i]);
        }
        let rebuilt = high.shift_left(13).add(&low);
        assert_eq!(rebuilt, a);
    }
}
