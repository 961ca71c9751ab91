pub use hmac::Hmac;
pub use sha2::Sha512;

/// Chain code: extension for both private and public keys which provides an
/// additional 256-bits of entropy.
pub type ChainCode = [u8; KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// BIP32 key fingerprints: first 4 bytes of RIPEMD160(SHA256(public key)),
/// kept in wire (big-endian) order.
pub type KeyFingerprint = [u8; 4];

/// Bytes which represent a private key.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Bytes which represent a SEC1-compressed public key.
pub type PublicKeyBytes = [u8; KEY_SIZE + 1];

/// HMAC with SHA-512
pub type HmacSha512 = Hmac<Sha512>;

/// Size of input key material and derived keys.
pub const KEY_SIZE: usize = 32;

/// Domain separator used as the HMAC key for master key generation.
pub const BIP32_SEED_KEY: &[u8; 12] = b"Bitcoin seed";

/// Split a finalized HMAC-SHA512 into the `IL` key tweak and the `IR`
/// chain code.
pub(crate) fn split_digest(hmac: HmacSha512) -> (PrivateKeyBytes, ChainCode) {
    use hmac::Mac;

    let digest = hmac.finalize().into_bytes();
    let mut key = [0u8; KEY_SIZE];
    let mut chain_code = [0u8; KEY_SIZE];
    key.copy_from_slice(&digest[..KEY_SIZE]);
    chain_code.copy_from_slice(&digest[KEY_SIZE..]);
    (key, chain_code)
}
