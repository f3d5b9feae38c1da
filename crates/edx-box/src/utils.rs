//! Constant-time comparison for key material.

use constant_time_eq::constant_time_eq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal. Used wherever secret-derived
/// bytes are checked against caller input, such as the public half embedded
/// in a 64-byte signing secret.
///
/// ```rust
/// use edx_box::utils::constant_time_compare;
///
/// assert!(constant_time_compare(&[7u8; 32], &[7u8; 32]));
/// assert!(!constant_time_compare(&[7u8; 32], &[8u8; 32]));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    constant_time_eq(a, b)
}
