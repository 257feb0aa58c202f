//! Shamir's Secret Sharing over GF(2^8).
//!
//! Splits an arbitrary byte string into N shares such that any K
//! reconstruct it exactly and any fewer reveal nothing
//! information-theoretically. This crate is the cryptographic core only:
//! it performs no I/O, reads no environment variables, and persists
//! nothing. The GUI, clipboard handling, and CLI plumbing that consume it
//! live elsewhere.
//!
//! # Five operations
//!
//! - [`init`] — initialize GF256 tables and run the CSPRNG self-check.
//! - [`split`] — split a secret into N encoded shares.
//! - [`reconstruct`] — recover a secret from a batch of encoded shares.
//! - [`validate_parameters`] — check (N, K, secret length) without splitting.
//! - [`teardown`] — wipe the sensitive-buffer registry.

pub mod error;
pub mod gf256;
pub mod hygiene;
pub mod poly;
pub mod random;
pub mod serializer;
pub mod shamir;
pub mod validate;

pub use error::ShamirError;
pub use serializer::ShareRecord;

/// Initialize the engine: verify the GF256 tables are internally
/// consistent and run the CSPRNG self-check. Call once at host startup.
/// `RandomnessUnavailable` here is fatal — the host should exit rather
/// than retry.
pub fn init() -> Result<(), ShamirError> {
    gf256::verify_tables()?;
    random::verify()?;
    Ok(())
}

/// Split `secret` (1..=64 bytes) into `n` shares, any `k` of which
/// reconstruct it exactly. Returns the shares in the canonical padded
/// Base62 wire form, ready to hand to a host for display or storage.
pub fn split(secret: &[u8], n: u8, k: u8) -> Result<Vec<String>, ShamirError> {
    let shares = shamir::split_secret(secret, n, k)?;
    shamir::encode_shares(&shares)
}

/// Reconstruct a secret from a batch of encoded share lines (either wire
/// format, freely mixed). Returns the exact original bytes if at least a
/// threshold's worth of valid shares were supplied; a sub-threshold input
/// decodes to some other byte string rather than failing, per spec.md
/// §4.5's note on information-theoretic secrecy.
pub fn reconstruct(share_lines: &[String]) -> Result<Vec<u8>, ShamirError> {
    shamir::reconstruct_secret(share_lines)
}

/// Validate (N, K, secret length) without performing a split.
pub fn validate_parameters(n: u8, k: u8, secret_len: usize) -> Result<(), ShamirError> {
    validate::validate_parameters(n, k, secret_len)
}

/// Wipe the sensitive-buffer registry. Call on engine shutdown.
pub fn teardown() {
    hygiene::teardown();
}
