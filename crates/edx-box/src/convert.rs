//! Conversion from Ed25519 signing keys to X25519 encryption keys.
//!
//! Public keys go through the birational map from the Edwards curve to
//! Curve25519. Secret keys use the SHA-512 expansion of the seed, the same
//! scalar Ed25519 signs with, so a converted secret always pairs with the
//! converted public key.

use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::SigningKey;
use tracing::warn;
use zeroize::Zeroizing;

use crate::keys::{SigningPublicKey, SECRET_KEY_SIZE, SEED_SIZE};
use crate::utils::constant_time_compare;

/// X25519 public key used for box encryption.
pub type EncryptionPublicKey = crypto_box::PublicKey;
/// X25519 secret key used for box encryption. Zeroized on drop.
pub type EncryptionSecretKey = crypto_box::SecretKey;

/// Error type for key conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("public key is not a valid Ed25519 curve point")]
    InvalidPublicKey,
    #[error("public key is a small-order point")]
    SmallOrderPublicKey,
    #[error("secret key does not match its embedded public key")]
    KeypairMismatch,
}

/// Convert an Ed25519 public key to its X25519 equivalent.
///
/// Fails when the bytes do not decompress to a curve point, or when the point
/// has small order (its Montgomery form would force an all-zero shared
/// secret).
///
/// Rejecting small-order points is stricter than the common `ed2curve`
/// conversion, which maps the identity point (y = 1) to u = 0 without error.
/// Keys accepted there may fail here.
pub fn convert_public_key(
    public: &SigningPublicKey,
) -> Result<EncryptionPublicKey, ConversionError> {
    let point = CompressedEdwardsY(public.to_bytes())
        .decompress()
        .ok_or_else(|| {
            warn!(public_key = %public, "public key failed to decompress");
            ConversionError::InvalidPublicKey
        })?;

    if point.is_small_order() {
        warn!(public_key = %public, "public key has small order");
        return Err(ConversionError::SmallOrderPublicKey);
    }

    Ok(EncryptionPublicKey::from(point.to_montgomery().to_bytes()))
}

/// Convert a 64-byte Ed25519 secret key (`seed || public`) to its X25519
/// equivalent.
///
/// The conversion itself cannot fail; a secret whose trailing public half
/// does not belong to its seed is malformed and rejected.
pub fn convert_secret_key(
    secret: &[u8; SECRET_KEY_SIZE],
) -> Result<EncryptionSecretKey, ConversionError> {
    let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
    seed.copy_from_slice(&secret[..SEED_SIZE]);
    let signing_key = SigningKey::from_bytes(&seed);

    let derived_public = signing_key.verifying_key().to_bytes();
    if !constant_time_compare(&derived_public, &secret[SEED_SIZE..]) {
        warn!("secret key does not match its embedded public key");
        return Err(ConversionError::KeypairMismatch);
    }

    let scalar = Zeroizing::new(signing_key.to_scalar_bytes());
    Ok(EncryptionSecretKey::from(*scalar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SigningKeypair;
    use rand_core::OsRng;

    /// y = 2 has no matching x on edwards25519.
    fn not_a_point() -> SigningPublicKey {
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        SigningPublicKey::from_bytes(bytes)
    }

    #[test]
    fn test_public_key_conversion_matches_secret_key_conversion() {
        for _ in 0..8 {
            let keypair = SigningKeypair::generate(&mut OsRng);
            let public = convert_public_key(keypair.public()).unwrap();
            let secret = convert_secret_key(keypair.secret_bytes()).unwrap();
            assert_eq!(secret.public_key(), public);
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let keypair = SigningKeypair::from_seed(&[5u8; 32]);
        let a = convert_public_key(keypair.public()).unwrap();
        let b = convert_public_key(keypair.public()).unwrap();
        assert_eq!(a, b);

        let sa = convert_secret_key(keypair.secret_bytes()).unwrap();
        let sb = convert_secret_key(keypair.secret_bytes()).unwrap();
        assert_eq!(sa.public_key(), sb.public_key());
    }

    #[test]
    fn test_invalid_point_rejected() {
        assert_eq!(
            convert_public_key(&not_a_point()),
            Err(ConversionError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_identity_point_rejected() {
        // y = 1 encodes the neutral element.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        assert_eq!(
            convert_public_key(&SigningPublicKey::from_bytes(bytes)),
            Err(ConversionError::SmallOrderPublicKey)
        );
    }

    #[test]
    fn test_mismatched_secret_rejected() {
        let a = SigningKeypair::from_seed(&[1u8; 32]);
        let b = SigningKeypair::from_seed(&[2u8; 32]);

        let mut spliced = *a.secret_bytes();
        spliced[32..].copy_from_slice(b.public().as_bytes());

        assert!(matches!(
            convert_secret_key(&spliced),
            Err(ConversionError::KeypairMismatch)
        ));
    }
}
