//! Process-wide readiness of the cryptographic backend.
//!
//! The primitives keep no global state, so sealing and opening work without
//! [`init`]. Calling it once at startup surfaces a missing entropy source
//! before any user data is touched.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::crypto::{random::secure_random, wipe};
use crate::error::Result;

static READY: AtomicBool = AtomicBool::new(false);

/// Probes the OS random generator. Safe to call any number of times.
pub fn init() -> Result<()> {
    if READY.load(Ordering::Acquire) {
        return Ok(());
    }

    let mut probe = [0u8; 32];
    secure_random(&mut probe)?;
    wipe(&mut probe);

    READY.store(true, Ordering::Release);
    debug!("crypto backend ready");
    Ok(())
}

/// Marks the backend as torn down. A later [`init`] probes again.
pub fn shutdown() {
    if READY.swap(false, Ordering::AcqRel) {
        debug!("crypto backend shut down");
    }
}

pub fn is_initialized() -> bool {
    READY.load(Ordering::Acquire)
}
