//! Extended public keys
//!
use crate::{
    ChildNumber, CodecError, DerivationError, DerivationPath, Error, ExtendedKey, ExtendedKeyAttrs, ExtendedPrivateKey,
    KeyFingerprint, KeyVersion, PrivateKey, PublicKey, PublicKeyBytes, Result, Visibility, types::*,
};
use core::{
    fmt::{self, Display},
    ops::Range,
    str::FromStr,
};
use hmac::Mac;

/// Extended public keys derived using BIP32.
///
/// Generic around a [`PublicKey`] type. The [`XPub`](crate::XPub) alias
/// provides extended secp256k1 public keys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedPublicKey<K: PublicKey> {
    /// Derived public key
    public_key: K,

    /// Version tag used for serialization.
    version: KeyVersion,

    /// Extended key attributes.
    attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPublicKey<K>
where
    K: PublicKey,
{
    /// Obtain the non-extended public key value `K`.
    pub fn public_key(&self) -> &K {
        &self.public_key
    }

    /// Version tag of this key.
    pub fn version(&self) -> KeyVersion {
        self.version
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Compute a 4-byte key fingerprint for this extended public key.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.public_key().fingerprint()
    }

    /// Derive a child key for a particular [`ChildNumber`].
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        if child_number.is_hardened() {
            // Cannot derive child public keys for hardened `ChildNumber`s
            return Err(DerivationError::InvalidChildIndex(child_number.0).into());
        }

        let depth = self.attrs.depth.checked_add(1).ok_or(DerivationError::MaxDepth)?;

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        hmac.update(&self.public_key.to_bytes());
        hmac.update(&child_number.to_bytes());

        let (child_key, chain_code) = split_digest(hmac);
        let public_key = self.public_key.derive_child(child_key)?;

        let attrs = ExtendedKeyAttrs { parent_fingerprint: self.public_key.fingerprint(), child_number, chain_code, depth };

        Ok(ExtendedPublicKey { public_key, version: self.version, attrs })
    }

    /// Derive the key at `path`, relative to this key. Every step of the path
    /// must be non-hardened.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self.clone(), |key, child_num| key.derive_child(child_num))
    }

    /// Resolve `base` once, then derive the non-hardened children `indices`
    /// of it in ascending order.
    ///
    /// Fails without a partial result if `base` contains a hardened step or
    /// the range reaches into the hardened index space.
    pub fn derive_range(&self, base: &DerivationPath, indices: Range<u32>) -> Result<Vec<Self>> {
        if let Some(hardened) = base.iter().find(ChildNumber::is_hardened) {
            return Err(DerivationError::InvalidChildIndex(hardened.0).into());
        }
        if indices.end > ChildNumber::HARDENED_FLAG {
            return Err(DerivationError::InvalidChildIndex(indices.end - 1).into());
        }

        log::trace!("deriving public range {}..{} below {}", indices.start, indices.end, base);

        let parent = self.derive_path(base)?;
        indices.map(|index| parent.derive_child(ChildNumber(index))).collect()
    }

    /// Serialize the raw public key as a byte array (e.g. SEC1-encoded).
    pub fn to_bytes(&self) -> PublicKeyBytes {
        self.public_key.to_bytes()
    }

    /// Serialize this key as an [`ExtendedKey`].
    pub fn to_extended_key(&self) -> ExtendedKey {
        ExtendedKey { version: self.version, attrs: self.attrs.clone(), key_bytes: self.to_bytes() }
    }

    /// Assemble an extended key from an existing public key.
    pub fn from_public_key(public_key: K, version: KeyVersion, attrs: &ExtendedKeyAttrs) -> Result<Self> {
        if version.is_private() {
            return Err(CodecError::VersionMismatch { expected: Visibility::Public }.into());
        }
        if !attrs.is_consistent() {
            return Err(CodecError::InvalidMasterKey.into());
        }
        Ok(ExtendedPublicKey { public_key, version, attrs: attrs.clone() })
    }
}

impl<K> From<&ExtendedPrivateKey<K>> for ExtendedPublicKey<K::PublicKey>
where
    K: PrivateKey,
{
    fn from(xprv: &ExtendedPrivateKey<K>) -> ExtendedPublicKey<K::PublicKey> {
        ExtendedPublicKey {
            public_key: xprv.private_key().public_key(),
            version: xprv.version().public(),
            attrs: xprv.attrs().clone(),
        }
    }
}

impl<K> Display for ExtendedPublicKey<K>
where
    K: PublicKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_extended_key().to_base58())
    }
}

impl<K> FromStr for ExtendedPublicKey<K>
where
    K: PublicKey,
{
    type Err = Error;

    fn from_str(xpub: &str) -> Result<Self> {
        ExtendedKey::from_str(xpub)?.try_into()
    }
}

impl<K> TryFrom<ExtendedKey> for ExtendedPublicKey<K>
where
    K: PublicKey,
{
    type Error = Error;

    fn try_from(extended_key: ExtendedKey) -> Result<ExtendedPublicKey<K>> {
        if extended_key.version.is_private() {
            return Err(CodecError::VersionMismatch { expected: Visibility::Public }.into());
        }
        let public_key = PublicKey::from_bytes(extended_key.key_bytes)?;
        if !extended_key.attrs.is_consistent() {
            return Err(CodecError::InvalidMasterKey.into());
        }
        Ok(ExtendedPublicKey { public_key, version: extended_key.version, attrs: extended_key.attrs.clone() })
    }
}
