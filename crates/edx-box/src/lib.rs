#![forbid(unsafe_code)]

//! Authenticated messaging between Ed25519 identities.
//!
//! Each party holds an Ed25519 signing keypair. The matching X25519 keypair
//! is derived from it on demand and used for NaCl-style box encryption
//! (X25519 + XSalsa20-Poly1305), so two parties can exchange confidential,
//! authenticated messages knowing only each other's signing public keys.
//!
//! - `convert`: Ed25519 → X25519 key conversion
//! - `dual`: signing keypair bundled with its derived encryption keypair
//! - `sealer`: seal/open messages with fresh random nonces
//! - `derive`: signing keypairs derived from signatures (sub-keys)
//!
//! ```rust
//! use edx_box::{open, seal, SigningKeypair};
//!
//! let alice = SigningKeypair::from_seed(&[1u8; 32]);
//! let bob = SigningKeypair::from_seed(&[2u8; 32]);
//!
//! let msg = seal(b"hello", bob.public(), &alice).unwrap();
//! assert_eq!(open(&msg, alice.public(), &bob).unwrap(), b"hello");
//! ```

pub mod convert;
pub mod derive;
pub mod dual;
pub mod hash;
pub mod keys;
pub mod message;
pub mod sealer;
pub mod utils;

#[cfg(test)]
mod proptests;

pub use convert::{
    convert_public_key, convert_secret_key, ConversionError, EncryptionPublicKey,
    EncryptionSecretKey,
};
pub use derive::{derive_keypair, derive_subkey};
pub use dual::{DualKeypair, EncryptionKeypair};
pub use keys::{KeyError, SigningKeypair, SigningPublicKey};
pub use message::{EncryptedMessage, MessageFormatError, Nonce, NONCE_SIZE, TAG_SIZE};
pub use sealer::{open, seal, seal_with_rng, OpenError, SealError, Sealer};
