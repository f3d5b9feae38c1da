use sha2::digest::consts::U32;
use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    digest32::<Sha256>(data)
}

/// Hash `data` with any digest producing 32 bytes of output.
pub fn digest32<D>(data: &[u8]) -> [u8; 32]
where
    D: Digest<OutputSize = U32>,
{
    let mut h = D::new();
    h.update(data);
    let out = h.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
