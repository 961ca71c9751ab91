use hmac::Mac;
use std::fmt::{self, Debug};
use std::str::FromStr;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    BIP32_SEED_KEY, ChildNumber, CodecError, DerivationError, DerivationPath, Error, ExtendedKey, ExtendedKeyAttrs,
    ExtendedPublicKey, KEY_SIZE, KeyVersion, PrivateKey, PublicKey, Result, Visibility, private_key::pad_scalar, types::*,
};

/// Accepted seed lengths in bytes.
const SEED_LENGTH: std::ops::RangeInclusive<usize> = 16..=64;

/// Extended private keys derived using BIP32.
///
/// Generic around a [`PrivateKey`] type. The key remembers the version it was
/// created or decoded with, derived children inherit it.
#[derive(Clone)]
pub struct ExtendedPrivateKey<K: PrivateKey> {
    /// Derived private key
    private_key: K,

    /// Version tag used for serialization.
    version: KeyVersion,

    /// Extended key attributes.
    attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    /// Maximum derivation depth.
    pub const MAX_DEPTH: Depth = u8::MAX;

    /// Create the root extended key for the given seed value using the
    /// `xprv` version.
    pub fn new<S>(seed: S) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        Self::new_with_version(seed, KeyVersion::Xprv)
    }

    /// Create the root extended key for the given seed value.
    pub fn new_with_version<S>(seed: S, version: KeyVersion) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let seed = seed.as_ref();
        if !SEED_LENGTH.contains(&seed.len()) {
            return Err(DerivationError::InvalidSeedLength(seed.len()).into());
        }
        if version.is_public() {
            return Err(CodecError::VersionMismatch { expected: Visibility::Private }.into());
        }

        let mut hmac = HmacSha512::new_from_slice(BIP32_SEED_KEY)?;
        hmac.update(seed);

        let (mut secret_key, chain_code) = split_digest(hmac);
        let private_key = K::from_bytes(&secret_key);
        secret_key.zeroize();

        Ok(ExtendedPrivateKey { private_key: private_key?, version, attrs: ExtendedKeyAttrs::master(chain_code) })
    }

    /// Assemble an extended key from a raw big-endian scalar.
    ///
    /// Scalars shorter than [`KEY_SIZE`] bytes are left-padded with zeros.
    pub fn from_scalar(scalar: &[u8], version: KeyVersion, attrs: ExtendedKeyAttrs) -> Result<Self> {
        if version.is_public() {
            return Err(CodecError::VersionMismatch { expected: Visibility::Private }.into());
        }

        let bytes = Zeroizing::new(pad_scalar(scalar).ok_or(CodecError::InvalidKeyMaterial)?);
        let private_key = K::from_bytes(&bytes)?;
        if !attrs.is_consistent() {
            return Err(CodecError::InvalidMasterKey.into());
        }

        Ok(ExtendedPrivateKey { private_key, version, attrs })
    }

    /// Derive a child key for a particular [`ChildNumber`].
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        let depth = self.attrs.depth.checked_add(1).ok_or(DerivationError::MaxDepth)?;

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        let public_key = self.private_key.public_key();
        if child_number.is_hardened() {
            let mut secret = self.private_key.to_bytes();
            hmac.update(&[0]);
            hmac.update(&secret);
            secret.zeroize();
        } else {
            hmac.update(&public_key.to_bytes());
        }

        hmac.update(&child_number.to_bytes());

        // IL >= n or a zero child scalar is reported instead of skipping to
        // the next index
        let (mut child_key, chain_code) = split_digest(hmac);
        let private_key = self.private_key.derive_child(child_key);
        child_key.zeroize();

        let attrs = ExtendedKeyAttrs { parent_fingerprint: public_key.fingerprint(), child_number, chain_code, depth };

        Ok(ExtendedPrivateKey { private_key: private_key?, version: self.version, attrs })
    }

    /// Derive the key at `path`, relative to this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self.clone(), |key, child_num| key.derive_child(child_num))
    }

    /// Borrow the derived private key value.
    pub fn private_key(&self) -> &K {
        &self.private_key
    }

    /// Version tag of this key.
    pub fn version(&self) -> KeyVersion {
        self.version
    }

    /// Public projection of this key, carrying the mirror public version.
    pub fn public_key(&self) -> ExtendedPublicKey<K::PublicKey> {
        self.into()
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Serialize the raw private key as a byte array.
    pub fn to_bytes(&self) -> PrivateKeyBytes {
        self.private_key.to_bytes()
    }

    /// Serialize this key as an [`ExtendedKey`].
    pub fn to_extended_key(&self) -> ExtendedKey {
        // Add leading `0` byte
        let mut key_bytes = [0u8; KEY_SIZE + 1];
        let mut secret = self.to_bytes();
        key_bytes[1..].copy_from_slice(&secret);
        secret.zeroize();

        ExtendedKey { version: self.version, attrs: self.attrs.clone(), key_bytes }
    }

    /// Base58 serialization of this key.
    pub fn to_string(&self) -> Zeroizing<String> {
        self.to_extended_key().to_base58()
    }
}

impl<K> ConstantTimeEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut key_a = self.to_bytes();
        let mut key_b = other.to_bytes();

        let result = key_a.ct_eq(&key_b)
            & self.version.to_u32().ct_eq(&other.version.to_u32())
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.attrs.parent_fingerprint.ct_eq(&other.attrs.parent_fingerprint)
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0)
            & self.attrs.chain_code.ct_eq(&other.attrs.chain_code);

        key_a.zeroize();
        key_b.zeroize();

        result
    }
}

impl<K> Debug for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("private_key", &"...")
            .field("version", &self.version)
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> Eq for ExtendedPrivateKey<K> where K: PrivateKey {}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> PartialEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<K> FromStr for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    type Err = Error;

    fn from_str(xprv: &str) -> Result<Self> {
        let key = ExtendedKey::from_str(xprv)?;
        key.try_into()
    }
}

impl<K> TryFrom<ExtendedKey> for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    type Error = Error;

    fn try_from(extended_key: ExtendedKey) -> Result<ExtendedPrivateKey<K>> {
        if extended_key.version.is_public() {
            return Err(CodecError::VersionMismatch { expected: Visibility::Private }.into());
        }
        if extended_key.key_bytes[0] != 0 {
            return Err(CodecError::InvalidKeyMaterial.into());
        }

        let mut secret = [0u8; KEY_SIZE];
        secret.copy_from_slice(&extended_key.key_bytes[1..]);
        let private_key = K::from_bytes(&secret);
        secret.zeroize();
        let private_key = private_key?;

        if !extended_key.attrs.is_consistent() {
            return Err(CodecError::InvalidMasterKey.into());
        }

        Ok(ExtendedPrivateKey { private_key, version: extended_key.version, attrs: extended_key.attrs.clone() })
    }
}
