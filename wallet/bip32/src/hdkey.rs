//!
//! Decoded extended keys of either visibility.
//!

use crate::{
    CoinType, CodecError, DerivationError, Depth, Error, ExtendedKey, ExtendedKeyAttrs, KeyVersion, Purpose, Result, Visibility,
    XPrv, XPub,
};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Position of a key within the `m/purpose'/coin'/account'/chain/index`
/// hierarchy, as far as it can be told from the depth alone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedType {
    Master,
    Account,
    Bip32,
}

impl DerivedType {
    /// Depth of an account key (`m/purpose'/coin'/account'`).
    pub const ACCOUNT_DEPTH: Depth = 3;

    pub fn from_depth(depth: Depth) -> Self {
        match depth {
            0 => DerivedType::Master,
            Self::ACCOUNT_DEPTH => DerivedType::Account,
            _ => DerivedType::Bip32,
        }
    }
}

/// Summary of what a serialized key claims to be.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
    pub purpose: Purpose,
    pub coin_type: CoinType,
    pub derived_type: DerivedType,
}

/// Extended key decoded from its wire form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HdKey {
    Private(XPrv),
    Public(XPub),
}

impl HdKey {
    /// Decode a Base58 extended key, picking the variant from its version.
    pub fn decode(base58: &str) -> Result<Self> {
        ExtendedKey::from_str(base58)?.try_into()
    }

    /// Decode a Base58 extended key and require the given visibility.
    pub fn decode_expecting(base58: &str, expected: Visibility) -> Result<Self> {
        Self::expecting(ExtendedKey::from_str(base58)?, expected)
    }

    /// Decode the 82-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ExtendedKey::from_bytes(bytes)?.try_into()
    }

    /// Decode the 82-byte binary form and require the given visibility.
    pub fn from_bytes_expecting(bytes: &[u8], expected: Visibility) -> Result<Self> {
        Self::expecting(ExtendedKey::from_bytes(bytes)?, expected)
    }

    fn expecting(extended_key: ExtendedKey, expected: Visibility) -> Result<Self> {
        if extended_key.version.visibility() != expected {
            return Err(CodecError::VersionMismatch { expected }.into());
        }
        extended_key.try_into()
    }

    pub fn to_extended_key(&self) -> ExtendedKey {
        match self {
            HdKey::Private(xprv) => xprv.to_extended_key(),
            HdKey::Public(xpub) => xpub.to_extended_key(),
        }
    }

    /// Base58 form of the key.
    pub fn encode(&self) -> Zeroizing<String> {
        self.to_extended_key().to_base58()
    }

    /// 82-byte binary form of the key.
    pub fn to_bytes(&self) -> Zeroizing<[u8; ExtendedKey::SERIALIZED_SIZE]> {
        self.to_extended_key().to_bytes()
    }

    pub fn version(&self) -> KeyVersion {
        match self {
            HdKey::Private(xprv) => xprv.version(),
            HdKey::Public(xpub) => xpub.version(),
        }
    }

    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        match self {
            HdKey::Private(xprv) => xprv.attrs(),
            HdKey::Public(xpub) => xpub.attrs(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.version().visibility()
    }

    pub fn is_private(&self) -> bool {
        matches!(self, HdKey::Private(_))
    }

    /// Public projection; a public key is returned unchanged.
    pub fn to_public(&self) -> XPub {
        match self {
            HdKey::Private(xprv) => xprv.public_key(),
            HdKey::Public(xpub) => xpub.clone(),
        }
    }

    pub fn into_private(self) -> Result<XPrv> {
        match self {
            HdKey::Private(xprv) => Ok(xprv),
            HdKey::Public(_) => Err(DerivationError::UnsupportedOperation("a public key has no private counterpart").into()),
        }
    }

    pub fn derived_type(&self) -> DerivedType {
        DerivedType::from_depth(self.attrs().depth)
    }

    pub fn info(&self) -> KeyInfo {
        let family = self.version().family();
        KeyInfo { purpose: family.purpose, coin_type: family.coin_type, derived_type: self.derived_type() }
    }
}

impl TryFrom<ExtendedKey> for HdKey {
    type Error = Error;

    fn try_from(extended_key: ExtendedKey) -> Result<Self> {
        match extended_key.version.visibility() {
            Visibility::Private => Ok(HdKey::Private(extended_key.try_into()?)),
            Visibility::Public => Ok(HdKey::Public(extended_key.try_into()?)),
        }
    }
}

impl FromStr for HdKey {
    type Err = Error;

    fn from_str(base58: &str) -> Result<Self> {
        HdKey::decode(base58)
    }
}

impl From<XPrv> for HdKey {
    fn from(xprv: XPrv) -> Self {
        HdKey::Private(xprv)
    }
}

impl From<XPub> for HdKey {
    fn from(xpub: XPub) -> Self {
        HdKey::Public(xpub)
    }
}

#[cfg(test)]
mod tests {
    use super::{DerivedType, HdKey, KeyInfo};
    use crate::{ChildNumber, CodecError, CoinType, DerivationError, Error, ExtendedKey, KeyVersion, Purpose, Visibility, XPrv};

    const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
    const XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";

    #[test]
    fn decode_picks_variant() {
        let xprv = HdKey::decode(XPRV).unwrap();
        assert!(xprv.is_private());
        assert_eq!(xprv.visibility(), Visibility::Private);
        assert_eq!(&*xprv.encode(), XPRV);

        let xpub = HdKey::decode(XPUB).unwrap();
        assert!(!xpub.is_private());
        assert_eq!(&*xpub.encode(), XPUB);
        assert_eq!(xprv.to_public(), xpub.to_public());
    }

    #[test]
    fn expected_visibility() {
        assert!(HdKey::decode_expecting(XPUB, Visibility::Public).is_ok());
        assert_eq!(
            HdKey::decode_expecting(XPUB, Visibility::Private).unwrap_err(),
            Error::Codec(CodecError::VersionMismatch { expected: Visibility::Private })
        );

        let bytes = HdKey::decode(XPRV).unwrap().to_bytes();
        assert!(HdKey::from_bytes_expecting(bytes.as_ref(), Visibility::Private).is_ok());
        assert_eq!(
            HdKey::from_bytes_expecting(bytes.as_ref(), Visibility::Public).unwrap_err(),
            Error::Codec(CodecError::VersionMismatch { expected: Visibility::Public })
        );
    }

    #[test]
    fn invalid_key_material() {
        for key in [
            // public key with a 0x04 prefix
            "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6Txnt3siSujt9RCVYsx4qHZGc62TG4McvMGcAUjeuwZdduYEvFn",
            // public key 020000000000000000000000000000000000000000000000000000000000000007
            "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6Q5JXayek4PRsn35jii4veMimro1xefsM58PgBMrvdYre8QyULY",
            // private key with a 0x04 marker byte
            "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFGpWnsj83BHtEy5Zt8CcDr1UiRXuWCmTQLxEK9vbz5gPstX92JQ",
            // private key 0
            "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzF93Y5wvzdUayhgkkFoicQZcP3y52uPPxFnfoLZB21Teqt1VvEHx",
            // private key n
            "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFAzHGBP2UuGCqWLTAPLcMtD5SDKr24z3aiUvKr9bJpdrcLg1y3G",
        ] {
            assert_eq!(HdKey::decode(key).unwrap_err(), Error::Codec(CodecError::InvalidKeyMaterial), "{key}");
        }
    }

    #[test]
    fn public_key_has_no_private_counterpart() {
        let xpub = HdKey::decode(XPUB).unwrap();
        assert!(matches!(xpub.into_private(), Err(Error::Derivation(DerivationError::UnsupportedOperation(_)))));
        assert!(HdKey::decode(XPRV).unwrap().into_private().is_ok());
    }

    #[test]
    fn derived_type_from_depth() {
        assert_eq!(DerivedType::from_depth(0), DerivedType::Master);
        assert_eq!(DerivedType::from_depth(1), DerivedType::Bip32);
        assert_eq!(DerivedType::from_depth(3), DerivedType::Account);
        assert_eq!(DerivedType::from_depth(5), DerivedType::Bip32);
    }

    #[test]
    fn key_info() {
        let master = XPrv::new_with_version([3u8; 64], KeyVersion::Mtpv).unwrap();
        let account = master.derive_path(&"m/49'/2'/0'".parse().unwrap()).unwrap();

        assert_eq!(
            HdKey::from(master).info(),
            KeyInfo { purpose: Purpose::Bip49, coin_type: CoinType::Litecoin, derived_type: DerivedType::Master }
        );

        let info = HdKey::from(account.public_key()).info();
        assert_eq!(info, KeyInfo { purpose: Purpose::Bip49, coin_type: CoinType::Litecoin, derived_type: DerivedType::Account });
    }

    #[test]
    fn debug_hides_private_keys() {
        let xprv = HdKey::decode(XPRV).unwrap();
        let debug = format!("{xprv:?}");
        assert!(!debug.contains(XPRV));
        assert!(!debug.contains("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"));
        assert!(!debug.contains("[232, 243, 46, 114"));
    }

    #[test]
    fn visibility_and_key_material_are_checked_before_master_consistency() {
        // BIP32 test vector 5: zero depth with a non-zero index
        const INCONSISTENT_XPRV: &str =
            "xprv9s21ZrQH4r4TsiLvyLXqM9P7k1K3EYhA1kkD6xuquB5i39AU8KF42acDyL3qsDbU9NmZn6MsGSUYZEsuoePmjzsB3eFKSUEh3Gu1N3cqVUN";
        assert_eq!(
            HdKey::decode_expecting(INCONSISTENT_XPRV, Visibility::Public).unwrap_err(),
            Error::Codec(CodecError::VersionMismatch { expected: Visibility::Public })
        );
        assert_eq!(
            HdKey::decode_expecting(INCONSISTENT_XPRV, Visibility::Private).unwrap_err(),
            Error::Codec(CodecError::InvalidMasterKey)
        );

        let mut extended_key = XPRV.parse::<ExtendedKey>().unwrap();
        extended_key.attrs.child_number = ChildNumber::new(1, false).unwrap();
        extended_key.key_bytes[0] = 0x01;
        let bytes = extended_key.to_bytes();
        assert_eq!(HdKey::from_bytes(bytes.as_ref()).unwrap_err(), Error::Codec(CodecError::InvalidKeyMaterial));

        extended_key.key_bytes[0] = 0x00;
        let bytes = extended_key.to_bytes();
        assert_eq!(HdKey::from_bytes(bytes.as_ref()).unwrap_err(), Error::Codec(CodecError::InvalidMasterKey));
    }
}
