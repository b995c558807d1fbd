//! Scalar reductions modulo Q
//!
//! All routines work on signed 32-bit representatives and never divide.

use crate::params::{Q, QINV};

/// Montgomery reduction
///
/// For `-2^31 * Q <= a <= 2^31 * Q` returns `r` with
/// `r ≡ a * 2^-32 (mod Q)` and `-Q < r < Q`.
#[inline]
pub fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - t as i64 * Q as i64) >> 32) as i32
}

/// Shift-and-subtract reduction
///
/// For `a <= 2^31 - 2^22 - 1` returns `r ≡ a (mod Q)` with
/// `-6283009 <= r <= 6283008`.
#[inline]
pub fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add Q if `a` is negative
#[inline]
pub fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Canonical representative in `[0, Q)` of an arbitrary value
#[inline]
pub fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}

/// Centered representative in `[-(Q-1)/2, (Q-1)/2]` of an arbitrary value
#[inline]
pub fn centered(a: i32) -> i32 {
    let r = freeze(a);
    r - ((((Q - 1) / 2 - r) >> 31) & Q)
}
