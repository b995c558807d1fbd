//! Coefficient rounding: power-of-two split, decompose and hint bits
//!
//! Every routine expects a canonical input in `[0, Q)`.

use crate::params::{Gamma2, D, Q};

/// Split `a` into `(a0, a1)` with `a = a1 * 2^D + a0` and
/// `-2^(D-1) < a0 <= 2^(D-1)`
#[inline]
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    let a0 = a - (a1 << D);
    (a0, a1)
}

/// Split `a` into `(a0, a1)` with `a ≡ a1 * 2 * gamma2 + a0 (mod Q)`
///
/// `a0` is centered in `(-gamma2, gamma2]`, except that the top bucket wraps
/// to `a1 = 0` with `a0` shifted down by one.
#[inline]
pub fn decompose(a: i32, gamma2: Gamma2) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    match gamma2 {
        Gamma2::QMinus1Over32 => {
            a1 = (a1 * 1025 + (1 << 21)) >> 22;
            a1 &= 15;
        }
        Gamma2::QMinus1Over88 => {
            a1 = (a1 * 11275 + (1 << 23)) >> 24;
            a1 ^= ((43 - a1) >> 31) & a1;
        }
    }

    let mut a0 = a - a1 * 2 * gamma2.value();
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a0, a1)
}

/// Hint bit telling whether the low part `a0` overflows into the high part `a1`
#[inline]
pub fn make_hint(a0: i32, a1: i32, gamma2: Gamma2) -> bool {
    let g2 = gamma2.value();
    !(a0 <= g2 || a0 > Q - g2 || (a0 == Q - g2 && a1 == 0))
}

/// Recover the corrected high part of `a` from its hint bit
#[inline]
pub fn use_hint(a: i32, hint: bool, gamma2: Gamma2) -> i32 {
    let (a0, a1) = decompose(a, gamma2);
    if !hint {
        return a1;
    }

    match gamma2 {
        Gamma2::QMinus1Over32 => {
            if a0 > 0 {
                (a1 + 1) & 15
            } else {
                (a1 - 1) & 15
            }
        }
        Gamma2::QMinus1Over88 => {
            if a0 > 0 {
                if a1 == 43 {
                    0
                } else {
                    a1 + 1
                }
            } else if a1 == 0 {
                43
            } else {
                a1 - 1
            }
        }
    }
}
