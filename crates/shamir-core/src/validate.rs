//! Parameter, secret, and share-batch validation — the tool's security
//! envelope. Every range and character-class rule in spec.md §4.7 lives
//! here, in one place, so `split`/`reconstruct` can call through it rather
//! than re-deriving the rules.

use crate::error::ShamirError;
use crate::serializer::ShareRecord;

pub const MAX_SECRET_LEN: usize = 64;
pub const MIN_THRESHOLD: u8 = 2;

/// Validate (N, K, L) against the ranges in spec.md §4.4 / §4.7.
pub fn validate_parameters(n: u8, k: u8, secret_len: usize) -> Result<(), ShamirError> {
    if k < MIN_THRESHOLD {
        return Err(ShamirError::InvalidParameters {
            reason: format!("threshold K must be at least {MIN_THRESHOLD}, got {k}"),
        });
    }
    if k > n {
        return Err(ShamirError::InvalidParameters {
            reason: format!("threshold K ({k}) exceeds total shares N ({n})"),
        });
    }
    // n: u8 already caps at 255, the field's non-zero-element count.
    if secret_len == 0 {
        return Err(ShamirError::InvalidSecret {
            reason: "secret must not be empty".into(),
        });
    }
    if secret_len > MAX_SECRET_LEN {
        return Err(ShamirError::InvalidSecret {
            reason: format!("secret length {secret_len} exceeds the {MAX_SECRET_LEN}-byte ceiling"),
        });
    }
    Ok(())
}

/// Validate a secret as UTF-8 text per spec.md §4.7: non-empty once
/// encoded, at most 64 encoded bytes, no embedded NUL, and no ASCII
/// control characters other than tab/newline/CR.
pub fn validate_secret_text(secret: &str) -> Result<(), ShamirError> {
    let bytes = secret.as_bytes();
    if bytes.is_empty() {
        return Err(ShamirError::InvalidSecret {
            reason: "secret must not be empty".into(),
        });
    }
    if bytes.len() > MAX_SECRET_LEN {
        return Err(ShamirError::InvalidSecret {
            reason: format!(
                "encoded secret length {} exceeds the {MAX_SECRET_LEN}-byte ceiling",
                bytes.len()
            ),
        });
    }
    for &b in bytes {
        if b == 0 {
            return Err(ShamirError::InvalidSecret {
                reason: "secret must not contain an embedded NUL byte".into(),
            });
        }
        if b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r' {
            return Err(ShamirError::InvalidSecret {
                reason: format!("secret contains disallowed control byte 0x{b:02x}"),
            });
        }
        if b == 0x7F {
            return Err(ShamirError::InvalidSecret {
                reason: "secret contains a disallowed DEL control byte".into(),
            });
        }
    }
    Ok(())
}

/// Cross-consistency checks on a decoded share batch: distinct x values
/// (after deduplicating exact duplicates), identical Y lengths, and at
/// least two shares. Mismatched duplicates (same x, different Y) are the
/// caller's job to have already rejected during decode merge — see
/// `shamir::dedup_and_check`.
pub fn validate_share_batch(shares: &[ShareRecord]) -> Result<(), ShamirError> {
    if shares.len() < 2 {
        return Err(ShamirError::InsufficientShares { got: shares.len() });
    }
    let expected_len = shares[0].y.len();
    for s in shares {
        if s.y.len() != expected_len {
            return Err(ShamirError::InconsistentShareLengths {
                expected: expected_len,
                actual: s.y.len(),
            });
        }
    }
    let mut xs: Vec<u8> = shares.iter().map(|s| s.x).collect();
    xs.sort_unstable();
    xs.dedup();
    if xs.len() < 2 {
        return Err(ShamirError::InsufficientShares { got: xs.len() });
    }
    Ok(())
}
