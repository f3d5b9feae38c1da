//! Sealing and opening messages between two Ed25519 identities.
//!
//! A message from S to R is an X25519 + XSalsa20-Poly1305 box keyed with S's
//! converted secret key and R's converted public key, under a fresh random
//! 24-byte nonce. R opens it with its own converted secret key and S's
//! converted public key. The tag is checked before any plaintext is released.
//!
//! The free functions build a [`DualKeypair`] per call, so encryption keys
//! live only for one operation. Long-lived callers can build a holder once
//! and use [`DualKeypair::seal_to`] / [`DualKeypair::open_from`] instead.

use std::borrow::Borrow;

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use rand_core::{CryptoRngCore, OsRng};
use tracing::{debug, warn};

use crate::convert::{
    convert_public_key, ConversionError, EncryptionPublicKey, EncryptionSecretKey,
};
use crate::dual::DualKeypair;
use crate::keys::{SigningKeypair, SigningPublicKey};
use crate::message::{EncryptedMessage, Nonce, NONCE_SIZE};

/// Error type for sealing.
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("key conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    #[error("entropy source failed: {0}")]
    Entropy(rand_core::Error),
    #[error("encryption failed")]
    Encryption,
}

/// Error type for opening.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OpenError {
    #[error("key conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    /// Tag mismatch, wrong keys, or a truncated/corrupted payload.
    #[error("message failed authentication")]
    Authentication,
}

/// Seals messages with nonces drawn from an injected random source.
///
/// `Sealer::default()` uses the operating system RNG. Tests can pass any
/// [`CryptoRngCore`] to make nonces reproducible.
#[derive(Debug)]
pub struct Sealer<R = OsRng> {
    rng: R,
}

impl Sealer<OsRng> {
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for Sealer<OsRng> {
    fn default() -> Self {
        Self::os()
    }
}

impl<R: CryptoRngCore> Sealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Seal `plaintext` from `sender` to `receiver`.
    pub fn seal(
        &mut self,
        plaintext: &[u8],
        receiver: &SigningPublicKey,
        sender: &SigningKeypair,
    ) -> Result<EncryptedMessage, SealError> {
        seal_with_rng(&mut self.rng, plaintext, receiver, sender)
    }

    /// Open a message `sender` sealed for `receiver`.
    ///
    /// Convenience mirror of [`open`]; opening draws no randomness, so the
    /// random source is not used.
    pub fn open(
        &self,
        message: &EncryptedMessage,
        sender: &SigningPublicKey,
        receiver: &SigningKeypair,
    ) -> Result<Vec<u8>, OpenError> {
        open(message, sender, receiver)
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// Seal `plaintext` from `sender` to `receiver` with an OS-random nonce.
pub fn seal(
    plaintext: &[u8],
    receiver: &SigningPublicKey,
    sender: &SigningKeypair,
) -> Result<EncryptedMessage, SealError> {
    seal_with_rng(&mut OsRng, plaintext, receiver, sender)
}

/// Seal `plaintext` from `sender` to `receiver`, drawing the nonce from `rng`.
///
/// Both conversions happen before any entropy is consumed.
pub fn seal_with_rng<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    plaintext: &[u8],
    receiver: &SigningPublicKey,
    sender: &SigningKeypair,
) -> Result<EncryptedMessage, SealError> {
    let sender = DualKeypair::new(sender)?;
    let receiver_enc = convert_public_key(receiver)?;

    debug!(
        sender = %sender.signing_public(),
        receiver = %receiver,
        len = plaintext.len(),
        "sealing message"
    );
    seal_box(rng, plaintext, &receiver_enc, sender.encryption().secret())
}

/// Open a message `sender` sealed for `receiver`.
pub fn open(
    message: &EncryptedMessage,
    sender: &SigningPublicKey,
    receiver: &SigningKeypair,
) -> Result<Vec<u8>, OpenError> {
    let sender_enc = convert_public_key(sender)?;
    let receiver = DualKeypair::new(receiver)?;

    debug!(
        sender = %sender,
        receiver = %receiver.signing_public(),
        len = message.sealed().len(),
        "opening message"
    );
    open_box(message, &sender_enc, receiver.encryption().secret())
}

impl<K: Borrow<SigningKeypair>> DualKeypair<K> {
    /// Seal `plaintext` from this holder to `receiver`.
    pub fn seal_to<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        receiver: &SigningPublicKey,
    ) -> Result<EncryptedMessage, SealError> {
        let receiver_enc = convert_public_key(receiver)?;
        seal_box(rng, plaintext, &receiver_enc, self.encryption().secret())
    }

    /// Open a message `sender` sealed for this holder.
    pub fn open_from(
        &self,
        message: &EncryptedMessage,
        sender: &SigningPublicKey,
    ) -> Result<Vec<u8>, OpenError> {
        let sender_enc = convert_public_key(sender)?;
        open_box(message, &sender_enc, self.encryption().secret())
    }
}

pub(crate) fn fresh_nonce<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Nonce, SealError> {
    let mut nonce = [0u8; NONCE_SIZE];
    rng.try_fill_bytes(&mut nonce).map_err(SealError::Entropy)?;
    Ok(nonce)
}

fn seal_box<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    plaintext: &[u8],
    receiver: &EncryptionPublicKey,
    sender: &EncryptionSecretKey,
) -> Result<EncryptedMessage, SealError> {
    let nonce = fresh_nonce(rng)?;
    let sealed = SalsaBox::new(receiver, sender)
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| SealError::Encryption)?;
    Ok(EncryptedMessage::new(nonce, sealed))
}

fn open_box(
    message: &EncryptedMessage,
    sender: &EncryptionPublicKey,
    receiver: &EncryptionSecretKey,
) -> Result<Vec<u8>, OpenError> {
    SalsaBox::new(sender, receiver)
        .decrypt(GenericArray::from_slice(message.nonce()), message.sealed())
        .map_err(|_| {
            warn!(len = message.sealed().len(), "message failed authentication");
            OpenError::Authentication
        })
}
