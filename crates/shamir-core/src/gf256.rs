//! Galois Field GF(2^8) arithmetic.
//!
//! Uses the irreducible polynomial x^8 + x^4 + x^3 + x + 1 (0x11B), the same
//! field AES and SLIP-39 use. Multiplication and inversion go through
//! precomputed log/antilog tables with generator 0x03, so every operation is
//! a handful of table lookups rather than a branchy bit-walk.

use crate::error::ShamirError;

/// log[x] = discrete log of x base 0x03. log[0] is unused (never indexed).
static LOG: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

/// exp[i] = 0x03^i. Doubled past 255 so `exp[a+b]` never needs a modulo.
static EXP: [u8; 510] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, // repeats below for branch-free index sums up to 254+254
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117, 234,
    201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181, 119,
    238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161, 95,
    190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187, 107,
    214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136, 13,
    26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197, 151,
    51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168, 77,
    154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198, 145,
    63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149, 55,
    110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167, 83,
    166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72, 144,
    61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207, 131,
    27, 54, 108, 216, 173, 71, 142,
];

/// Addition in GF(2^8) is XOR.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtraction equals addition in characteristic 2.
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplication via log/antilog tables. Either operand zero yields zero.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_a = LOG[a as usize] as usize;
    let log_b = LOG[b as usize] as usize;
    EXP[log_a + log_b]
}

/// Multiplicative inverse. Fails only for `a == 0`, which has none.
pub fn inv(a: u8) -> Result<u8, ShamirError> {
    if a == 0 {
        return Err(ShamirError::Internal(
            "gf256::inv called on zero, which has no inverse".into(),
        ));
    }
    Ok(EXP[255 - LOG[a as usize] as usize])
}

/// Division `a / b`, i.e. `a * inv(b)`.
pub fn div(a: u8, b: u8) -> Result<u8, ShamirError> {
    if a == 0 {
        inv(b)?; // still validate b != 0
        return Ok(0);
    }
    let log_a = LOG[a as usize] as usize;
    let log_b = LOG[b as usize] as usize;
    if b == 0 {
        return Err(ShamirError::Internal(
            "gf256::div called with zero divisor".into(),
        ));
    }
    Ok(EXP[log_a + 255 - log_b])
}

/// Iterated multiplication. `pow(a, 0) == 1` for all a (including 0), and
/// `pow(0, e) == 0` for e > 0.
pub fn pow(a: u8, e: u32) -> u8 {
    if e == 0 {
        return 1;
    }
    if a == 0 {
        return 0;
    }
    let log_a = LOG[a as usize] as u64;
    let idx = (log_a * e as u64) % 255;
    EXP[idx as usize]
}

/// Verifies the tables are mutually inverse: `antilog[log[a]] == a` for all
/// nonzero `a`. Run once at `init()` as a cheap sanity check that the
/// compiled-in tables weren't corrupted or miscompiled.
pub fn verify_tables() -> Result<(), ShamirError> {
    for a in 1..=255u8 {
        if EXP[LOG[a as usize] as usize] != a {
            return Err(ShamirError::Internal(format!(
                "gf256 table inconsistency at a={a}"
            )));
        }
    }
    Ok(())
}

/// Evaluate a polynomial at `x` via Horner's method.
/// `coefficients[0]` is the constant term, highest index is the highest degree.
pub fn poly_eval(coefficients: &[u8], x: u8) -> u8 {
    let mut result = 0u8;
    for &coef in coefficients.iter().rev() {
        result = add(mul(result, x), coef);
    }
    result
}

/// Lagrange interpolation at x=0: recovers the constant term of the
/// polynomial passing through `points`, i.e. the shared secret byte.
pub fn lagrange_interpolate_at_zero(points: &[(u8, u8)]) -> Result<u8, ShamirError> {
    let mut secret = 0u8;

    for (j, &(xj, yj)) in points.iter().enumerate() {
        let mut lambda = 1u8;
        for (k, &(xk, _)) in points.iter().enumerate() {
            if j == k {
                continue;
            }
            // lambda_j(0) = prod_{k != j} xk / (xk ^ xj)
            let denom = sub(xk, xj);
            lambda = mul(lambda, div(xk, denom)?);
        }
        secret = add(secret, mul(yj, lambda));
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_xor_and_self_inverse() {
        assert_eq!(add(0x53, 0xCA), 0x99);
        assert_eq!(add(0, 0x53), 0x53);
        assert_eq!(add(0x53, 0x53), 0);
    }

    #[test]
    fn mul_basic_cases() {
        assert_eq!(mul(0, 0x53), 0);
        assert_eq!(mul(1, 0x53), 0x53);
        assert_eq!(mul(2, 2), 4);
        // 0x80 * 2 = 0x100, reduced mod 0x11B = 0x1D
        assert_eq!(mul(0x80, 2), 0x1D);
    }

    #[test]
    fn field_axioms_hold_over_all_elements() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(mul(a, b), mul(b, a), "commutativity a={a} b={b}");
                assert_eq!(add(a, b), add(b, a), "commutativity a={a} b={b}");
            }
        }
        for a in 1..=255u8 {
            assert_eq!(mul(a, inv(a).unwrap()), 1, "a * inv(a) = 1 for a={a}");
        }
        assert_eq!(mul(42, 0), 0);
        for a in 0..=255u8 {
            assert_eq!(add(a, a), 0);
        }
        // distributivity: a*(b^c) == (a*b)^(a*c)
        for a in [0u8, 1, 2, 0x53, 0xFF] {
            for b in [0u8, 3, 0x11, 0x80] {
                for c in [0u8, 7, 0x99, 0x42] {
                    assert_eq!(mul(a, add(b, c)), add(mul(a, b), mul(a, c)));
                }
            }
        }
    }

    #[test]
    fn inv_zero_fails() {
        assert!(inv(0).is_err());
    }

    #[test]
    fn pow_sanity() {
        assert_eq!(pow(0x03, 255), 1);
        assert_eq!(pow(0, 0), 1);
        assert_eq!(pow(0, 5), 0);
        assert_eq!(pow(7, 1), 7);
    }

    #[test]
    fn pow_does_not_overflow_on_large_exponents() {
        // log_a up to 254 times e near u32::MAX must not overflow the
        // intermediate product.
        assert_eq!(pow(0xFF, u32::MAX), pow(0xFF, u32::MAX % 255));
    }

    #[test]
    fn inv_of_0x53_is_self_consistent() {
        let inverse = inv(0x53).unwrap();
        assert_eq!(mul(inverse, 0x53), 1);
    }

    #[test]
    fn poly_eval_matches_hand_computation() {
        // p(x) = 5 + 3x + 2x^2
        let coeffs = [5u8, 3, 2];
        assert_eq!(poly_eval(&coeffs, 0), 5);
        assert_eq!(poly_eval(&coeffs, 1), 5 ^ 3 ^ 2);
    }

    #[test]
    fn lagrange_recovers_known_secret() {
        let secret = 42u8;
        let coef = 7u8;
        let points: Vec<(u8, u8)> = (1..=3)
            .map(|x| (x, add(secret, mul(coef, x))))
            .collect();

        assert_eq!(lagrange_interpolate_at_zero(&points[0..2]).unwrap(), secret);
        assert_eq!(lagrange_interpolate_at_zero(&points[1..3]).unwrap(), secret);
        assert_eq!(
            lagrange_interpolate_at_zero(&[points[0], points[2]]).unwrap(),
            secret
        );
    }

    #[test]
    fn tables_are_internally_consistent() {
        verify_tables().unwrap();
    }
}
