//! A signing keypair bundled with the encryption keypair derived from it.

use std::borrow::Borrow;
use std::fmt;

use tracing::warn;

use crate::convert::{
    convert_public_key, convert_secret_key, ConversionError, EncryptionPublicKey,
    EncryptionSecretKey,
};
use crate::keys::{SigningKeypair, SigningPublicKey, SEED_SIZE};
use crate::utils::constant_time_compare;

/// X25519 keypair derived from a [`SigningKeypair`].
///
/// Only [`DualKeypair::new`] produces one.
pub struct EncryptionKeypair {
    public: EncryptionPublicKey,
    secret: EncryptionSecretKey,
}

impl EncryptionKeypair {
    pub fn public(&self) -> &EncryptionPublicKey {
        &self.public
    }

    pub fn secret(&self) -> &EncryptionSecretKey {
        &self.secret
    }
}

impl fmt::Debug for EncryptionKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKeypair")
            .field("public", &hex::encode(self.public.as_bytes()))
            .finish_non_exhaustive()
    }
}

/// A signing keypair together with its encryption keypair.
///
/// The encryption keypair is computed once, when the holder is built, and
/// never changes. `K` is the signing keypair itself or a borrow of it, so a
/// holder can wrap a caller's keypair for one operation without copying it,
/// or own it when cached for reuse. Holders are immutable and can be shared
/// across threads without locking.
pub struct DualKeypair<K = SigningKeypair> {
    signing: K,
    encryption: EncryptionKeypair,
}

impl<K: Borrow<SigningKeypair>> DualKeypair<K> {
    /// Convert both halves of `signing` and bundle the results.
    ///
    /// Either conversion failing fails the whole construction; no holder
    /// with missing or invalid encryption keys is ever returned. The
    /// advertised public key must also be the one embedded in the secret,
    /// otherwise the two encryption halves would not pair up.
    pub fn new(signing: K) -> Result<Self, ConversionError> {
        let keypair = signing.borrow();
        let secret = convert_secret_key(keypair.secret_bytes())?;
        let public = convert_public_key(keypair.public())?;

        if !constant_time_compare(
            keypair.public().as_bytes(),
            &keypair.secret_bytes()[SEED_SIZE..],
        ) {
            warn!(public_key = %keypair.public(), "public key does not match secret key");
            return Err(ConversionError::KeypairMismatch);
        }

        Ok(Self {
            signing,
            encryption: EncryptionKeypair { public, secret },
        })
    }

    pub fn signing(&self) -> &SigningKeypair {
        self.signing.borrow()
    }

    pub fn signing_public(&self) -> &SigningPublicKey {
        self.signing().public()
    }

    pub fn encryption(&self) -> &EncryptionKeypair {
        &self.encryption
    }
}

impl<K: Borrow<SigningKeypair>> fmt::Debug for DualKeypair<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualKeypair")
            .field("signing", self.signing())
            .field("encryption", &self.encryption)
            .finish()
    }
}
