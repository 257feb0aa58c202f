//! Share serialization: two accepted input formats, one canonical output
//! format.
//!
//! * **Legacy hex**: `"XX-HHHH...HH"` — a holdover wire format, still
//!   accepted on decode for compatibility with shares produced by older
//!   tooling.
//! * **Padded Base62**: `x || L || Y || padding || pad_len`, big-endian,
//!   encoded over the alphabet `0-9A-Za-z`, padded to a minimum rendered
//!   length of 250 characters. This is what `split()` emits.
//!
//! A single `reconstruct()` call may mix both formats freely; each line is
//! classified independently.

use crate::error::ShamirError;
use crate::random;

/// A decoded share: an x-coordinate and the per-byte polynomial
/// evaluations at that coordinate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShareRecord {
    pub x: u8,
    pub y: Vec<u8>,
}

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const MIN_BASE62_LEN: usize = 250;

fn base62_digit_value(c: u8) -> Option<u8> {
    BASE62_ALPHABET.iter().position(|&d| d == c).map(|i| i as u8)
}

// ---- legacy hex form ----

pub fn encode_legacy_hex(share: &ShareRecord) -> String {
    format!("{:02x}-{}", share.x, hex::encode(&share.y))
}

pub fn decode_legacy_hex(line: &str, index: Option<usize>) -> Result<ShareRecord, ShamirError> {
    let malformed = |reason: &str| ShamirError::MalformedShare {
        index,
        reason: reason.to_string(),
    };

    let (x_part, y_part) = line
        .split_once('-')
        .ok_or_else(|| malformed("legacy share must contain exactly one '-' separator"))?;

    if x_part.len() != 2 {
        return Err(malformed("x-coordinate field must be exactly 2 hex digits"));
    }
    if y_part.is_empty() || y_part.len() % 2 != 0 {
        return Err(malformed("share data must be a nonzero, even number of hex digits"));
    }
    if y_part.len() > 128 {
        return Err(malformed("share data exceeds 64 bytes"));
    }
    if !x_part.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
        || !y_part.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
    {
        return Err(malformed("legacy share must use lowercase hex digits only"));
    }

    let x = u8::from_str_radix(x_part, 16).map_err(|_| malformed("x-coordinate is not valid hex"))?;
    if x == 0 {
        return Err(malformed("x-coordinate must not be zero"));
    }
    let y = hex::decode(y_part).map_err(|_| malformed("share data is not valid hex"))?;

    Ok(ShareRecord { x, y })
}

// ---- padded Base62 form ----

/// Big-endian byte-vector long division by 62. Returns (quotient, remainder).
fn divmod62(num: &[u8]) -> (Vec<u8>, u8) {
    let mut quotient = Vec::with_capacity(num.len());
    let mut remainder: u32 = 0;
    for &byte in num {
        let cur = remainder * 256 + byte as u32;
        quotient.push((cur / 62) as u8);
        remainder = cur % 62;
    }
    (quotient, remainder as u8)
}

fn is_zero(num: &[u8]) -> bool {
    num.iter().all(|&b| b == 0)
}

/// Encode a byte buffer as Base62, preserving leading zero bytes by
/// prefixing one `'0'` character per leading zero byte (spec.md §4.6 /
/// §9). The magnitude of a value of exactly zero encodes as zero digits
/// (not one), so that the leading-zero prefix alone accounts for an
/// all-zero buffer without an off-by-one.
fn base62_encode_bytes(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();

    let mut digits_rev: Vec<u8> = Vec::new();
    if !is_zero(bytes) {
        let mut num = bytes.to_vec();
        loop {
            let (q, r) = divmod62(&num);
            digits_rev.push(r);
            num = q;
            if is_zero(&num) {
                break;
            }
        }
    }

    let mut s = String::with_capacity(leading_zeros + digits_rev.len());
    for _ in 0..leading_zeros {
        s.push('0');
    }
    for &d in digits_rev.iter().rev() {
        s.push(BASE62_ALPHABET[d as usize] as char);
    }
    s
}

/// Reverse of [`base62_encode_bytes`].
fn base62_decode_bytes(s: &str) -> Result<Vec<u8>, ShamirError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let chars: Vec<u8> = s.bytes().collect();
    let leading_zeros = chars.iter().take_while(|&&c| c == b'0').count();
    let magnitude = &chars[leading_zeros..];

    let mut num: Vec<u8> = Vec::new();
    for &c in magnitude {
        let digit = base62_digit_value(c).ok_or_else(|| ShamirError::MalformedShare {
            index: None,
            reason: format!("character '{}' is not in the Base62 alphabet", c as char),
        })?;
        let mut carry = digit as u32;
        for byte in num.iter_mut().rev() {
            let cur = (*byte as u32) * 62 + carry;
            *byte = (cur & 0xFF) as u8;
            carry = cur >> 8;
        }
        while carry > 0 {
            num.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; leading_zeros];
    out.extend(num);
    Ok(out)
}

/// Encode a share record to the padded Base62 form, drawing random padding
/// from the CSPRNG gate and growing it one byte at a time until the
/// rendered length clears the 250-character floor (the deterministic rule
/// this crate adopts for spec.md §9's open question).
pub fn encode_base62(share: &ShareRecord) -> Result<String, ShamirError> {
    if share.x == 0 {
        return Err(ShamirError::Internal("share x-coordinate must not be zero".into()));
    }
    let l = share.y.len();
    if l == 0 || l > 64 {
        return Err(ShamirError::Internal(format!(
            "share data length {l} outside the 1..=64 range"
        )));
    }

    for p in 0u16..=255 {
        let pad = random::random_bytes(p as usize);
        let mut buf = Vec::with_capacity(2 + l + p as usize + 1);
        buf.push(share.x);
        buf.push(l as u8);
        buf.extend_from_slice(&share.y);
        buf.extend_from_slice(&pad);
        buf.push(p as u8);

        let encoded = base62_encode_bytes(&buf);
        if encoded.len() >= MIN_BASE62_LEN {
            return Ok(encoded);
        }
    }

    Err(ShamirError::Internal(
        "could not reach the minimum Base62 length within a single padding byte's range".into(),
    ))
}

pub fn decode_base62(line: &str, index: Option<usize>) -> Result<ShareRecord, ShamirError> {
    let malformed = |reason: String| ShamirError::MalformedShare { index, reason };

    if line.len() < MIN_BASE62_LEN {
        return Err(malformed(format!(
            "Base62 share is {} characters, below the {MIN_BASE62_LEN}-character minimum",
            line.len()
        )));
    }
    if !line.bytes().all(|b| base62_digit_value(b).is_some()) {
        return Err(malformed("share contains characters outside the Base62 alphabet".into()));
    }

    let buf = base62_decode_bytes(line).map_err(|e| match e {
        ShamirError::MalformedShare { reason, .. } => malformed(reason),
        other => other,
    })?;

    if buf.len() < 4 {
        return Err(malformed("decoded record is too short to contain x, L, Y, and a pad-length byte".into()));
    }

    let x = buf[0];
    if x == 0 {
        return Err(malformed("x-coordinate must not be zero".into()));
    }
    let l = buf[1] as usize;
    if l == 0 || l > 64 {
        return Err(malformed(format!("declared secret length {l} is outside 1..=64")));
    }

    let total = buf.len();
    // total = 1 (x) + 1 (L) + l (Y) + P (padding) + 1 (pad-len trailer)
    if total < 2 + l + 1 {
        return Err(malformed("declared length overflows the decoded buffer".into()));
    }
    let p = total - 2 - l - 1;
    let declared_p = *buf.last().expect("checked len >= 4") as usize;
    if declared_p != p {
        return Err(malformed("declared pad length does not match the decoded buffer".into()));
    }

    let y = buf[2..2 + l].to_vec();
    Ok(ShareRecord { x, y })
}

// ---- line preprocessing + dispatch ----

/// Strip ASCII whitespace and an optional leading `"Share <digits>:"` label.
fn preprocess(line: &str) -> &str {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("Share ") {
        if let Some(colon) = rest.find(':') {
            let (digits, after) = rest.split_at(colon);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return after[1..].trim_start();
            }
        }
    }
    trimmed
}

/// Decode a single input line in whichever of the two formats it matches.
/// Returns `Ok(None)` for a blank line (skipped, not an error).
pub fn decode_share_line(
    line: &str,
    index: Option<usize>,
) -> Result<Option<ShareRecord>, ShamirError> {
    let line = preprocess(line);
    if line.is_empty() {
        return Ok(None);
    }

    // The legacy form always contains a '-' separator, which never appears
    // in the Base62 alphabet, so the two formats are unambiguous.
    if line.contains('-') {
        decode_legacy_hex(line, index).map(Some)
    } else {
        decode_base62(line, index).map(Some)
    }
}
