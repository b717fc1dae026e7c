//! Secure erasure of sensitive buffers.
//!
//! Writes go through [`zeroize`], which uses volatile stores followed by a
//! compiler fence so the optimizer cannot drop them as dead. A full hardware
//! fence is issued afterwards.

use std::sync::atomic::{Ordering, fence};

use zeroize::Zeroize;

/// Overwrites `buf` with zeros. Empty slices are left alone.
pub fn wipe(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }

    buf.zeroize();
    fence(Ordering::SeqCst);
}
