//! Split/Reconstruct engine.
//!
//! `split_secret` draws a fresh random polynomial per secret byte and
//! evaluates it at x = 1..=N. `reconstruct_secret` decodes a batch of
//! share strings, checks their cross-consistency, and recovers the secret
//! via Lagrange interpolation at x = 0.

use std::collections::BTreeMap;

use crate::error::ShamirError;
use crate::gf256;
use crate::hygiene::Sensitive;
use crate::poly;
use crate::random;
use crate::serializer::{self, ShareRecord};
use crate::validate;

/// Split `secret` into `n` shares, any `k` of which reconstruct it exactly.
/// Shares are emitted in increasing x order (1..=n), as required by
/// spec.md §5's ordering guarantee.
pub fn split_secret(secret: &[u8], n: u8, k: u8) -> Result<Vec<ShareRecord>, ShamirError> {
    validate::validate_parameters(n, k, secret.len())?;
    let secret_text = std::str::from_utf8(secret).map_err(|_| ShamirError::InvalidSecret {
        reason: "secret is not valid UTF-8".into(),
    })?;
    validate::validate_secret_text(secret_text)?;
    random::verify()?;

    let mut shares: Vec<ShareRecord> = (1..=n)
        .map(|x| ShareRecord {
            x,
            y: Vec::with_capacity(secret.len()),
        })
        .collect();

    for &secret_byte in secret {
        let coeffs = poly::build_coefficients(secret_byte, k);
        for share in &mut shares {
            share.y.push(gf256::poly_eval(coeffs.as_slice(), share.x));
        }
        coeffs.release();
    }

    Ok(shares)
}

/// Encode freshly split shares to the canonical padded-Base62 wire form.
pub fn encode_shares(shares: &[ShareRecord]) -> Result<Vec<String>, ShamirError> {
    shares.iter().map(serializer::encode_base62).collect()
}

/// Decode a batch of share lines, collapsing exact duplicates and
/// rejecting x-coordinate collisions that disagree on Y (spec.md §4.5
/// step 1).
fn decode_and_dedup(lines: &[String]) -> Result<Vec<ShareRecord>, ShamirError> {
    let mut by_x: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
    let mut order: Vec<u8> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(record) = serializer::decode_share_line(line, Some(i))? else {
            continue;
        };
        match by_x.get(&record.x) {
            None => {
                by_x.insert(record.x, record.y.clone());
                order.push(record.x);
            }
            Some(existing) if *existing == record.y => {
                // Exact duplicate: harmless, spec.md §8 property 6.
            }
            Some(_) => {
                return Err(ShamirError::InconsistentShares { x: record.x });
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|x| ShareRecord {
            x,
            y: by_x.remove(&x).expect("x was just inserted above"),
        })
        .collect())
}

/// Reconstruct the secret from a batch of encoded share lines. Order of
/// input lines does not affect the output (spec.md §8 property 5): shares
/// are sorted by x before interpolation.
pub fn reconstruct_secret(lines: &[String]) -> Result<Vec<u8>, ShamirError> {
    let mut shares = decode_and_dedup(lines)?;
    validate::validate_share_batch(&shares)?;
    shares.sort_by_key(|s| s.x);

    let len = shares[0].y.len();
    let mut secret = Vec::with_capacity(len);
    for byte_idx in 0..len {
        let points: Vec<(u8, u8)> = shares.iter().map(|s| (s.x, s.y[byte_idx])).collect();
        secret.push(gf256::lagrange_interpolate_at_zero(&points)?);
    }

    // Decoded share data held secret material; wipe it before returning.
    for share in shares.drain(..) {
        Sensitive::new(share.y).release();
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(shares: &[ShareRecord]) -> Vec<String> {
        encode_shares(shares).unwrap()
    }

    #[test]
    fn split_and_reconstruct_round_trips_2_of_3() {
        let secret = b"Hello, Shamir!";
        let shares = split_secret(secret, 3, 2).unwrap();
        assert_eq!(shares.len(), 3);
        let encoded = encode_all(&shares);

        let recovered = reconstruct_secret(&[encoded[0].clone(), encoded[1].clone()]).unwrap();
        assert_eq!(recovered, secret);
        let recovered = reconstruct_secret(&[encoded[1].clone(), encoded[2].clone()]).unwrap();
        assert_eq!(recovered, secret);
        let recovered = reconstruct_secret(&[encoded[0].clone(), encoded[2].clone()]).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn share_x_coordinates_are_consecutive_from_one() {
        let shares = split_secret(b"test", 5, 2).unwrap();
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share.x, (i + 1) as u8);
        }
    }

    #[test]
    fn order_of_input_shares_does_not_matter() {
        let shares = split_secret(b"order independence", 5, 3).unwrap();
        let encoded = encode_all(&shares);

        let forward = vec![encoded[0].clone(), encoded[2].clone(), encoded[4].clone()];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(
            reconstruct_secret(&forward).unwrap(),
            reconstruct_secret(&backward).unwrap()
        );
    }

    #[test]
    fn exact_duplicate_shares_are_harmless() {
        let shares = split_secret(b"dup", 4, 2).unwrap();
        let encoded = encode_all(&shares);
        let lines = vec![encoded[0].clone(), encoded[0].clone(), encoded[1].clone()];
        assert_eq!(reconstruct_secret(&lines).unwrap(), b"dup");
    }

    #[test]
    fn mismatched_duplicate_x_is_rejected() {
        let a = split_secret(b"secretA", 3, 2).unwrap();
        let b = split_secret(b"secretB", 3, 2).unwrap();
        let encoded_a = encode_all(&a);
        let encoded_b = encode_all(&b);
        // Same x=1 position, two different splits -> different Y.
        let lines = vec![encoded_a[0].clone(), encoded_b[0].clone()];
        let result = reconstruct_secret(&lines);
        assert!(matches!(result, Err(ShamirError::InconsistentShares { x: 1 })));
    }

    #[test]
    fn below_threshold_reconstruction_does_not_error_but_is_wrong() {
        let shares = split_secret(b"test", 5, 3).unwrap();
        let encoded = encode_all(&shares);
        let result = reconstruct_secret(&encoded[0..2]);
        assert!(result.is_ok());
        assert_ne!(result.unwrap(), b"test".to_vec());
    }

    #[test]
    fn fewer_than_two_decodable_shares_is_insufficient() {
        let shares = split_secret(b"x", 3, 2).unwrap();
        let encoded = encode_all(&shares);
        let result = reconstruct_secret(&encoded[0..1]);
        assert!(matches!(result, Err(ShamirError::InsufficientShares { .. })));
    }

    #[test]
    fn single_byte_secret_round_trips() {
        let shares = split_secret(b"Q", 3, 2).unwrap();
        let encoded = encode_all(&shares);
        let recovered = reconstruct_secret(&encoded[0..2]).unwrap();
        assert_eq!(recovered, b"Q");
    }

    #[test]
    fn unicode_secret_round_trips() {
        let secret = "héllo🔐".as_bytes();
        let shares = split_secret(secret, 4, 2).unwrap();
        let encoded = encode_all(&shares);
        let recovered = reconstruct_secret(&encoded[0..2]).unwrap();
        assert_eq!(recovered, secret);
        assert_eq!(String::from_utf8(recovered).unwrap(), "héllo🔐");
    }

    #[test]
    fn legacy_hex_input_is_accepted_alongside_base62() {
        let shares = split_secret(b"MySecretSeedPhrase123", 3, 2).unwrap();
        let legacy0 = serializer::encode_legacy_hex(&shares[0]);
        let legacy1 = serializer::encode_legacy_hex(&shares[1]);
        let recovered = reconstruct_secret(&[legacy0, legacy1]).unwrap();
        assert_eq!(recovered, b"MySecretSeedPhrase123");
    }

    #[test]
    fn mixed_format_input_reconstructs() {
        let shares = split_secret(b"mixed formats ok", 3, 2).unwrap();
        let legacy = serializer::encode_legacy_hex(&shares[0]);
        let base62 = serializer::encode_base62(&shares[1]).unwrap();
        let recovered = reconstruct_secret(&[legacy, base62]).unwrap();
        assert_eq!(recovered, b"mixed formats ok");
    }
}
