//! Deterministic sub-key derivation from signatures.
//!
//! A master key that can only sign (a hardware wallet, a remote signer) can
//! still anchor a hierarchy of keys: sign a fixed message, hash the signature
//! into a seed, and expand the seed into a fresh Ed25519 keypair. Ed25519
//! signatures are deterministic, so the same master and message always give
//! the same derived keypair, and the master secret itself is never read.
//!
//! # Caller obligation
//!
//! The signature bytes are the derived key's secret. Anyone who sees them,
//! or who can get the master to sign the same message again, can recompute
//! the derived secret key. Never publish, transmit or reuse the signature
//! passed to [`derive_keypair`], and never sign the same derivation message
//! for any other purpose. Nothing here can check this.

use sha2::digest::consts::U32;
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::hash::digest32;
use crate::keys::SigningKeypair;

/// Derive a signing keypair from `signature` using SHA-256.
///
/// Pure and infallible: identical input yields an identical keypair. Any
/// length is accepted, including empty input. See the module docs for the
/// caller obligation on `signature`.
pub fn derive_keypair(signature: &[u8]) -> SigningKeypair {
    derive_keypair_with::<Sha256>(signature)
}

/// Derive a signing keypair from `signature` using digest `D`.
pub fn derive_keypair_with<D>(signature: &[u8]) -> SigningKeypair
where
    D: Digest<OutputSize = U32>,
{
    debug!(input_len = signature.len(), "deriving keypair from signature");
    let seed = Zeroizing::new(digest32::<D>(signature));
    SigningKeypair::from_seed(&seed)
}

/// Derive a child keypair of `master` for `context`.
///
/// The child is `derive_keypair(master.sign(context))`. The same obligation
/// applies: `master` must never sign `context` anywhere else.
pub fn derive_subkey(master: &SigningKeypair, context: &[u8]) -> SigningKeypair {
    let signature = Zeroizing::new(master.sign(context));
    derive_keypair(signature.as_slice())
}
