#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_core::OsRng;

    use crate::convert::{convert_public_key, convert_secret_key};
    use crate::derive::derive_keypair;
    use crate::dual::DualKeypair;
    use crate::keys::SigningKeypair;
    use crate::message::EncryptedMessage;
    use crate::sealer::{open, seal, OpenError};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // Round-trip: open(seal(P, R.pub, S), S.pub, R) == P
        #[test]
        fn test_seal_open_round_trip(
            sender_seed in any::<[u8; 32]>(),
            receiver_seed in any::<[u8; 32]>(),
            plaintext in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            let sender = SigningKeypair::from_seed(&sender_seed);
            let receiver = SigningKeypair::from_seed(&receiver_seed);

            let msg = seal(&plaintext, receiver.public(), &sender).unwrap();
            prop_assert_eq!(msg.sealed().len(), plaintext.len() + 16);

            let opened = open(&msg, sender.public(), &receiver).unwrap();
            prop_assert_eq!(opened, plaintext);
        }

        // Tamper detection: any single bit flip in nonce or payload fails.
        #[test]
        fn test_bit_flip_rejected(
            plaintext in proptest::collection::vec(any::<u8>(), 0..128),
            position in any::<prop::sample::Index>(),
            bit in 0..8u8
        ) {
            let sender = SigningKeypair::generate(&mut OsRng);
            let receiver = SigningKeypair::generate(&mut OsRng);
            let msg = seal(&plaintext, receiver.public(), &sender).unwrap();

            let mut wire = msg.to_bytes();
            let i = position.index(wire.len());
            wire[i] ^= 1 << bit;
            let tampered = EncryptedMessage::from_bytes(&wire).unwrap();

            prop_assert_eq!(
                open(&tampered, sender.public(), &receiver),
                Err(OpenError::Authentication)
            );
        }

        // Wrong-key rejection: a third party cannot open the message.
        #[test]
        fn test_wrong_receiver_rejected(
            seeds in any::<([u8; 32], [u8; 32], [u8; 32])>(),
            plaintext in proptest::collection::vec(any::<u8>(), 0..128)
        ) {
            let (s, r, e) = seeds;
            prop_assume!(r != e);
            let sender = SigningKeypair::from_seed(&s);
            let receiver = SigningKeypair::from_seed(&r);
            let eve = SigningKeypair::from_seed(&e);

            let msg = seal(&plaintext, receiver.public(), &sender).unwrap();
            prop_assert_eq!(
                open(&msg, sender.public(), &eve),
                Err(OpenError::Authentication)
            );
        }

        // Converted public key always pairs with the converted secret key.
        #[test]
        fn test_conversion_consistency(seed in any::<[u8; 32]>()) {
            let keypair = SigningKeypair::from_seed(&seed);
            let public = convert_public_key(keypair.public()).unwrap();
            let secret = convert_secret_key(keypair.secret_bytes()).unwrap();
            prop_assert_eq!(&secret.public_key(), &public);

            let holder = DualKeypair::new(&keypair).unwrap();
            prop_assert_eq!(holder.encryption().public(), &public);
        }

        // Determinism of derivation, and sensitivity to input.
        #[test]
        fn test_derivation_determinism(
            sig in proptest::collection::vec(any::<u8>(), 0..128),
            other in proptest::collection::vec(any::<u8>(), 0..128)
        ) {
            let a = derive_keypair(&sig);
            let b = derive_keypair(&sig);
            prop_assert_eq!(a.public(), b.public());
            prop_assert_eq!(a.secret_bytes(), b.secret_bytes());

            if sig != other {
                let o = derive_keypair(&other);
                prop_assert_ne!(a.public(), o.public());
            }
        }

        // Derived keypairs are usable for messaging.
        #[test]
        fn test_derived_keypairs_round_trip(
            sig_a in proptest::collection::vec(any::<u8>(), 64),
            sig_b in proptest::collection::vec(any::<u8>(), 64),
            plaintext in proptest::collection::vec(any::<u8>(), 0..64)
        ) {
            let a = derive_keypair(&sig_a);
            let b = derive_keypair(&sig_b);
            let msg = seal(&plaintext, b.public(), &a).unwrap();
            prop_assert_eq!(open(&msg, a.public(), &b).unwrap(), plaintext);
        }
    }
}
