//! Saturating integer primitives for growth-curve math.
//!
//! Growth formulas run over `u64` and must never wrap or trap: any step
//! that would exceed [`POINT_MAX`] short-circuits to it instead. Integer
//! only, no floating point anywhere, so results are bit-identical across
//! platforms.

/// Saturation sentinel for point arithmetic.
pub const POINT_MAX: u64 = u64::MAX;

/// Integer exponentiation by repeated squaring, saturating at [`POINT_MAX`].
///
/// `0^0` is 1, matching `u64::pow`.
pub fn saturating_pow(base: u64, exp: u64) -> u64 {
    let mut result: u64 = 1;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = match result.checked_mul(base) {
                Some(value) => value,
                None => return POINT_MAX,
            };
        }
        exp >>= 1;
        if exp > 0 {
            base = match base.checked_mul(base) {
                Some(value) => value,
                None => return POINT_MAX,
            };
        }
    }
    result
}

/// Floor of the square root of `n`, by binary search.
///
/// The probe is `mid <= n / mid` rather than `mid * mid <= n`, which keeps
/// every intermediate value inside `u64`.
pub fn integer_sqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut left: u64 = 1;
    let mut right: u64 = n;
    let mut answer: u64 = 1;
    while left <= right {
        let mid = left + (right - left) / 2;
        if mid <= n / mid {
            answer = mid;
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }
    answer
}
