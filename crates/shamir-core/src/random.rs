//! CSPRNG gate.
//!
//! Polynomial coefficients must come from the OS cryptographic source —
//! never a user-space PRNG, never seeded, never a fallback. If the OS
//! source is unavailable, the gate refuses to proceed rather than degrade
//! silently.
//!
//! The source is a single indirection (`SecureRandom`) so tests can inject
//! a deterministic stream. Production code always resolves to
//! [`OsRandom`], backed by `rand::rngs::OsRng` — the same primitive the
//! teacher crate already reaches for in `nostring_ccd::generate_chain_code`
//! — and that binding cannot be changed outside the `test-util` feature.

use std::sync::Mutex;

use rand::RngCore;

use crate::error::ShamirError;

/// A source of cryptographically secure random bytes.
pub trait SecureRandom: Send + Sync {
    fn fill(&self, buf: &mut [u8]);
}

/// The production random source: the operating system's CSPRNG.
#[derive(Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, buf: &mut [u8]) {
        rand::rngs::OsRng.fill_bytes(buf);
    }
}

static SOURCE: Mutex<Option<Box<dyn SecureRandom>>> = Mutex::new(None);

fn with_source<T>(f: impl FnOnce(&dyn SecureRandom) -> T) -> T {
    let mut guard = SOURCE.lock().unwrap_or_else(|e| e.into_inner());
    if guard.is_none() {
        *guard = Some(Box::new(OsRandom));
    }
    f(guard.as_deref().expect("source initialized above"))
}

/// Swap the process-wide randomness source. Only available under
/// `test-util` (or `cfg(test)`) so production binaries can never retarget
/// the CSPRNG gate at runtime.
#[cfg(any(test, feature = "test-util"))]
pub fn set_source(source: Box<dyn SecureRandom>) {
    let mut guard = SOURCE.lock().unwrap_or_else(|e| e.into_inner());
    *guard = Some(source);
}

/// Draw `n` bytes from the current randomness source.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    with_source(|src| src.fill(&mut buf));
    buf
}

/// Startup (and pre-split) self-check. Detects catastrophic randomness
/// failures — a stuck output, a zeroed source, a disabled syscall — with
/// minimal ceremony; this is not a statistical test of randomness quality.
pub fn verify() -> Result<(), ShamirError> {
    let samples: Vec<Vec<u8>> = (0..3).map(|_| random_bytes(32)).collect();

    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            if samples[i] == samples[j] {
                return Err(ShamirError::RandomnessUnavailable {
                    reason: "two independent 32-byte samples were identical".into(),
                });
            }
        }
    }

    for sample in &samples {
        let mut distinct = std::collections::HashSet::new();
        distinct.extend(sample.iter().copied());
        if distinct.len() < 16 {
            return Err(ShamirError::RandomnessUnavailable {
                reason: "sample had fewer than 16 distinct byte values".into(),
            });
        }
    }

    // A fourth draw must simply succeed without panicking.
    let _ = random_bytes(1);

    Ok(())
}
