//! Ed25519 signing keys as they arrive from an identity source.
//!
//! A [`SigningKeypair`] is the NaCl layout: a 32-byte public key plus a
//! 64-byte secret key made of `seed || public`. The pair is treated as opaque
//! input; nothing here checks that the public key is a valid curve point.
//! That happens when the keys are converted for encryption (see
//! [`crate::convert`]).

use std::fmt;

use ed25519_dalek::{Signer, SigningKey};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of an Ed25519 secret key (`seed || public`) in bytes.
pub const SECRET_KEY_SIZE: usize = 64;
/// Size of the seed a keypair is expanded from.
pub const SEED_SIZE: usize = 32;
/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Error type for parsing key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A 32-byte Ed25519 public key, own or received from a correspondent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SigningPublicKey([u8; PUBLIC_KEY_SIZE]);

impl SigningPublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a public key from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for SigningPublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for SigningPublicKey {
    type Error = KeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for SigningPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for SigningPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SigningPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningPublicKey({})", self.to_hex())
    }
}

/// An Ed25519 signing keypair.
///
/// Immutable once built. The secret half is zeroized when the keypair is
/// dropped and is never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKeypair {
    #[zeroize(skip)]
    public: SigningPublicKey,
    secret: [u8; SECRET_KEY_SIZE],
}

impl SigningKeypair {
    /// Generate a new random keypair.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        Self::from_signing_key(&SigningKey::generate(rng))
    }

    /// Deterministically expand a 32-byte seed into a keypair.
    pub fn from_seed(seed: &[u8; SEED_SIZE]) -> Self {
        Self::from_signing_key(&SigningKey::from_bytes(seed))
    }

    /// Assemble a keypair from raw parts without checking them.
    ///
    /// Mismatched or malformed parts are reported as
    /// [`ConversionError`](crate::convert::ConversionError) once the keypair
    /// is used for encryption.
    pub fn from_parts(public: SigningPublicKey, secret: [u8; SECRET_KEY_SIZE]) -> Self {
        Self { public, secret }
    }

    /// Build a keypair from a 64-byte `seed || public` secret key, taking
    /// the public key from its trailing half.
    pub fn from_keypair_bytes(secret: &[u8; SECRET_KEY_SIZE]) -> Self {
        let mut public = [0u8; PUBLIC_KEY_SIZE];
        public.copy_from_slice(&secret[SEED_SIZE..]);
        Self {
            public: SigningPublicKey(public),
            secret: *secret,
        }
    }

    fn from_signing_key(signing_key: &SigningKey) -> Self {
        Self {
            public: SigningPublicKey(signing_key.verifying_key().to_bytes()),
            secret: signing_key.to_keypair_bytes(),
        }
    }

    pub fn public(&self) -> &SigningPublicKey {
        &self.public
    }

    /// The 64-byte `seed || public` secret key.
    pub fn secret_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.secret
    }

    /// Sign `message`, returning a 64-byte Ed25519 signature.
    ///
    /// Signatures are produced from the seed half of the secret key.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.signing_key().sign(message).to_bytes()
    }

    fn signing_key(&self) -> SigningKey {
        let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
        seed.copy_from_slice(&self.secret[..SEED_SIZE]);
        SigningKey::from_bytes(&seed)
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeypair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
