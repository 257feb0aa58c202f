//! Sensitive-memory hygiene.
//!
//! Every buffer that ever holds secret bytes, polynomial coefficients, or
//! decoded share data is wrapped in [`Sensitive`]. Construction registers
//! the buffer in a process-wide, mutex-guarded registry; `Drop` (or an
//! explicit [`Sensitive::release`]) zeroizes the contents and deregisters
//! it. Double-release is a no-op, matching the contract in spec.md §4.8.
//!
//! This mirrors `nostring-core::memory::LockedBuffer`, minus `mlock` —
//! this crate's non-goals exclude swap-defense hardening, only
//! zero-on-release is required.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use zeroize::Zeroize;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static REGISTRY: Mutex<Option<HashMap<u64, usize>>> = Mutex::new(None);

fn registry() -> std::sync::MutexGuard<'static, Option<HashMap<u64, usize>>> {
    let mut guard = REGISTRY.lock().unwrap_or_else(|e| e.into_inner());
    if guard.is_none() {
        *guard = Some(HashMap::new());
    }
    guard
}

/// A heap buffer holding secret material. Zeroized on drop or release.
pub struct Sensitive {
    id: u64,
    data: Vec<u8>,
    released: bool,
}

impl Sensitive {
    pub fn new(data: Vec<u8>) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        registry()
            .as_mut()
            .expect("registry initialized above")
            .insert(id, data.len());
        Self {
            id,
            data,
            released: false,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zeroize and deregister now, rather than waiting for `Drop`. Calling
    /// this more than once (or letting `Drop` run afterward) is a no-op.
    pub fn release(mut self) {
        self.do_release();
    }

    fn do_release(&mut self) {
        if self.released {
            return;
        }
        self.data.zeroize();
        if let Some(map) = registry().as_mut() {
            map.remove(&self.id);
        }
        self.released = true;
    }
}

impl Drop for Sensitive {
    fn drop(&mut self) {
        self.do_release();
    }
}

/// Number of sensitive buffers currently registered (i.e. not yet released).
/// Exposed for tests and for `teardown()`'s diagnostic log.
pub fn live_count() -> usize {
    registry().as_ref().map(|m| m.len()).unwrap_or(0)
}

/// Sweep the registry on engine teardown. Any entries remaining indicate a
/// buffer that was leaked (e.g. via `mem::forget`) rather than released
/// through normal control flow — that's a caller bug, logged categorically
/// (id and length only, never content) and then cleared.
///
/// Also invokes the host's collector-sweep hook, if one was registered —
/// Rust has no garbage collector to force a pass over, so this hook exists
/// purely for hosts embedding this crate behind an FFI boundary with their
/// own managed heap.
pub fn teardown() {
    {
        let mut guard = registry();
        let map = guard.as_mut().expect("registry initialized above");
        for (id, len) in map.iter() {
            eprintln!(
                "[shamir-core] Warning: sensitive buffer id={id} (len={len}) was never released before teardown"
            );
        }
        map.clear();
    }

    if let Some(hook) = collector_hook() {
        hook();
    }
}

static COLLECTOR_HOOK: Mutex<Option<fn()>> = Mutex::new(None);

/// Register a collector-sweep hook to be called on `teardown()`. No-op if
/// never set (spec.md §6: "optionally, a collector-sweep hook").
pub fn set_collector_hook(hook: fn()) {
    *COLLECTOR_HOOK.lock().unwrap_or_else(|e| e.into_inner()) = Some(hook);
}

fn collector_hook() -> Option<fn()> {
    *COLLECTOR_HOOK.lock().unwrap_or_else(|e| e.into_inner())
}
