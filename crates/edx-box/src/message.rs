//! Encrypted message value and its compact byte form.
//!
//! Wire format:
//!   [ nonce (24 bytes) | ciphertext + tag (plaintext + 16 bytes) ]

/// Size of a box nonce in bytes.
pub const NONCE_SIZE: usize = 24;
/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

pub type Nonce = [u8; NONCE_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageFormatError {
    #[error("encrypted message too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },
}

/// A sealed payload together with the nonce it was sealed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    nonce: Nonce,
    sealed: Vec<u8>,
}

impl EncryptedMessage {
    pub fn new(nonce: Nonce, sealed: Vec<u8>) -> Self {
        Self { nonce, sealed }
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Ciphertext followed by the authentication tag.
    pub fn sealed(&self) -> &[u8] {
        &self.sealed
    }

    /// Length of the plaintext this message decrypts to, if well-formed.
    pub fn plaintext_len(&self) -> Option<usize> {
        self.sealed.len().checked_sub(TAG_SIZE)
    }

    pub fn into_parts(self) -> (Nonce, Vec<u8>) {
        (self.nonce, self.sealed)
    }

    /// Encode as `nonce || sealed`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_SIZE + self.sealed.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.sealed);
        out
    }

    /// Decode `nonce || sealed`.
    ///
    /// Only the length is checked here; authenticity is established when the
    /// message is opened.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageFormatError> {
        let min = NONCE_SIZE + TAG_SIZE;
        if bytes.len() < min {
            return Err(MessageFormatError::TooShort {
                len: bytes.len(),
                min,
            });
        }
        let (nonce_bytes, sealed) = bytes.split_at(NONCE_SIZE);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            sealed: sealed.to_vec(),
        })
    }
}
