//! Constant-time digest comparison

use subtle::ConstantTimeEq;

/// Compare two digests without exiting early on the first differing byte.
///
/// A length mismatch is rejected by a single up-front check; equal-length
/// inputs are always compared in full. Only for secret material.
pub fn equal(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
