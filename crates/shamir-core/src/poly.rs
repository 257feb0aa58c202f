//! Per-byte random polynomial construction.
//!
//! For secret byte `s_i`, builds `P_i(x) = s_i + c_1*x + ... + c_{K-1}*x^{K-1}`
//! with coefficients `c_1..c_{K-1}` drawn independently from the CSPRNG gate.
//! `K = 2` is the degree-1 case (one random coefficient); nothing here is
//! special-cased for it — the general construction already handles it.

use crate::hygiene::Sensitive;
use crate::random;

/// Build the coefficient vector for one secret byte's polynomial. The
/// constant term is the secret byte itself; everything above it is random.
/// Returned wrapped in [`Sensitive`] since coefficients are secret material
/// per spec.md §3's lifecycle rule.
pub fn build_coefficients(secret_byte: u8, k: u8) -> Sensitive {
    let degree_terms = (k - 1) as usize;
    let mut coeffs = Vec::with_capacity(1 + degree_terms);
    coeffs.push(secret_byte);
    if degree_terms > 0 {
        coeffs.extend(random::random_bytes(degree_terms));
    }
    Sensitive::new(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf256;

    #[test]
    fn constant_term_is_the_secret_byte() {
        let coeffs = build_coefficients(0x42, 5);
        assert_eq!(coeffs.as_slice()[0], 0x42);
        assert_eq!(coeffs.len(), 5);
    }

    #[test]
    fn k_equals_two_yields_one_random_coefficient() {
        let coeffs = build_coefficients(7, 2);
        assert_eq!(coeffs.len(), 2);
    }

    #[test]
    fn evaluating_at_zero_recovers_the_secret_byte() {
        let coeffs = build_coefficients(0x99, 4);
        assert_eq!(gf256::poly_eval(coeffs.as_slice(), 0), 0x99);
    }
}
