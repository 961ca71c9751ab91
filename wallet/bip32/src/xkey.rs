//! Parser for extended key types (i.e. `xprv` and `xpub`)

use crate::{ChildNumber, CodecError, Error, ExtendedKeyAttrs, KEY_SIZE, KeyVersion, Result};
use core::{
    fmt::{self, Debug, Display},
    str::FromStr,
};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

/// Serialized extended key (e.g. `xprv` and `xpub`).
///
/// Wire layout, all multi-byte integers big-endian:
///
/// | bytes   | field              |
/// |---------|--------------------|
/// | 0..4    | version            |
/// | 4       | depth              |
/// | 5..9    | parent fingerprint |
/// | 9..13   | child number       |
/// | 13..45  | chain code         |
/// | 45..78  | key material       |
/// | 78..82  | checksum           |
#[derive(Clone)]
pub struct ExtendedKey {
    /// Version tag of the key (e.g. `xprv`, `xpub`)
    pub version: KeyVersion,

    /// Extended key attributes.
    pub attrs: ExtendedKeyAttrs,

    /// Key material (may be public or private).
    ///
    /// Private keys are prefixed with a `0x00` marker byte, public keys
    /// carry their SEC1 tag.
    pub key_bytes: [u8; KEY_SIZE + 1],
}

impl ExtendedKey {
    /// Size of the extended key payload without its checksum.
    pub const BYTE_SIZE: usize = 78;

    /// Size of the double-SHA256 checksum suffix.
    pub const CHECKSUM_SIZE: usize = 4;

    /// Size of the full binary serialization (payload and checksum).
    pub const SERIALIZED_SIZE: usize = Self::BYTE_SIZE + Self::CHECKSUM_SIZE;

    /// Serialize into the 82-byte binary form.
    pub fn to_bytes(&self) -> Zeroizing<[u8; Self::SERIALIZED_SIZE]> {
        let mut bytes = Zeroizing::new([0u8; Self::SERIALIZED_SIZE]);
        bytes[..4].copy_from_slice(&self.version.to_bytes());
        bytes[4] = self.attrs.depth;
        bytes[5..9].copy_from_slice(&self.attrs.parent_fingerprint);
        bytes[9..13].copy_from_slice(&self.attrs.child_number.to_bytes());
        bytes[13..45].copy_from_slice(&self.attrs.chain_code);
        bytes[45..78].copy_from_slice(&self.key_bytes);
        let checksum = checksum(&bytes[..Self::BYTE_SIZE]);
        bytes[Self::BYTE_SIZE..].copy_from_slice(&checksum);
        bytes
    }

    /// Deserialize from the 82-byte binary form.
    ///
    /// Checks, in order: length, checksum and version tag. Key material and
    /// master key consistency are validated when converting into a private or
    /// public extended key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SERIALIZED_SIZE {
            return Err(CodecError::WrongLength { actual: bytes.len(), expected: Self::SERIALIZED_SIZE }.into());
        }

        let (payload, expected) = bytes.split_at(Self::BYTE_SIZE);
        if checksum(payload) != expected {
            return Err(CodecError::ChecksumMismatch.into());
        }

        let version = KeyVersion::try_from(take::<4>(payload, 0))?;
        let depth = payload[4];
        let parent_fingerprint = take::<4>(payload, 5);
        let child_number = ChildNumber::from_bytes(take::<4>(payload, 9));
        let chain_code = take::<KEY_SIZE>(payload, 13);
        let key_bytes = take::<{ KEY_SIZE + 1 }>(payload, 45);

        let attrs = ExtendedKeyAttrs { depth, parent_fingerprint, child_number, chain_code };
        Ok(ExtendedKey { version, attrs, key_bytes })
    }

    /// Base58 representation of the binary form.
    pub fn to_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(self.to_bytes().as_ref()).into_string())
    }
}

/// First four bytes of `SHA256(SHA256(payload))`.
fn checksum(payload: &[u8]) -> [u8; ExtendedKey::CHECKSUM_SIZE] {
    take::<{ ExtendedKey::CHECKSUM_SIZE }>(&Sha256::digest(Sha256::digest(payload)), 0)
}

/// Copy `N` bytes starting at `offset`; callers guarantee the bounds.
fn take<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey").field("version", &self.version).field("attrs", &self.attrs).finish_non_exhaustive()
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(base58: &str) -> Result<Self> {
        let bytes = Zeroizing::new(bs58::decode(base58).into_vec()?);
        ExtendedKey::from_bytes(&bytes)
    }
}

impl TryFrom<&[u8]> for ExtendedKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        ExtendedKey::from_bytes(bytes)
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key_bytes.zeroize();
    }
}
