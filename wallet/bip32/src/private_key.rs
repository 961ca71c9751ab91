//! Trait for deriving child keys on a given type.

use crate::{CodecError, DerivationError, KEY_SIZE, PrivateKeyBytes, PublicKey, Result};
use secp256k1::{SECP256K1, Scalar};

/// Trait for key types which can be derived using BIP32.
pub trait PrivateKey: Sized + Clone {
    /// Public key type which corresponds to this private key.
    type PublicKey: PublicKey;

    /// Initialize this key from bytes.
    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self>;

    /// Serialize this key as bytes.
    fn to_bytes(&self) -> PrivateKeyBytes;

    /// Derive a child key from a parent key and the left half of the
    /// HMAC output: `child = (parent + tweak) mod n`.
    fn derive_child(&self, other: PrivateKeyBytes) -> Result<Self>;

    /// Get the [`Self::PublicKey`] that corresponds to this private key.
    fn public_key(&self) -> Self::PublicKey;
}

impl PrivateKey for secp256k1::SecretKey {
    type PublicKey = secp256k1::PublicKey;

    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self> {
        secp256k1::SecretKey::from_slice(bytes).map_err(|_| CodecError::InvalidKeyMaterial.into())
    }

    fn to_bytes(&self) -> PrivateKeyBytes {
        self.secret_bytes()
    }

    fn derive_child(&self, other: PrivateKeyBytes) -> Result<Self> {
        // out of range tweaks (IL >= n) and a zero sum are both rejected
        let tweak = Scalar::from_be_bytes(other).map_err(|_| DerivationError::InvalidTweak)?;
        Ok(self.add_tweak(&tweak).map_err(|_| DerivationError::InvalidTweak)?)
    }

    fn public_key(&self) -> Self::PublicKey {
        secp256k1::PublicKey::from_secret_key(SECP256K1, self)
    }
}

/// Left-pad a big-endian scalar to [`KEY_SIZE`] bytes.
///
/// Serialized scalars are always exactly 32 bytes wide, including values with
/// leading zero bytes.
pub(crate) fn pad_scalar(bytes: &[u8]) -> Option<PrivateKeyBytes> {
    let offset = KEY_SIZE.checked_sub(bytes.len())?;
    let mut padded = [0u8; KEY_SIZE];
    padded[offset..].copy_from_slice(bytes);
    Some(padded)
}
