//! Fatal invariant handling.
//!
//! Input problems are reported as [`crate::error::CodecError`]. The conditions
//! routed here can only arise from a defect in the codec itself, after every
//! input-derived bounds check has already passed, so the process is stopped
//! instead of continuing with a broken bounds discipline.

use tracing::error;

/// Log the violated invariant and abort the process.
#[cold]
#[inline(never)]
pub fn invariant_violated(what: &str) -> ! {
    error!(invariant = what, "Codec invariant violated, aborting");
    std::process::abort()
}
