//!
//! Extended key version registry.
//!
//! Maps `(purpose, coin type, visibility)` families to the 4-byte version tags
//! that prefix serialized extended keys (`xprv`, `ypub`, `Ltub`, ...).
//!

use crate::error::CodecError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Address scheme selected by the first level of a derivation path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// Legacy P2PKH
    Bip44,
    /// P2WPKH nested in P2SH
    Bip49,
    /// Native segwit P2WPKH
    Bip84,
    /// Taproot single key P2TR
    Bip86,
}

impl Purpose {
    pub fn index(&self) -> u32 {
        match self {
            Purpose::Bip44 => 44,
            Purpose::Bip49 => 49,
            Purpose::Bip84 => 84,
            Purpose::Bip86 => 86,
        }
    }
}

impl Display for Purpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BIP{}", self.index())
    }
}

/// Coin family of an extended key version.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinType {
    Bitcoin,
    Litecoin,
}

impl CoinType {
    /// SLIP-44 registered coin type index.
    pub fn slip44_index(&self) -> u32 {
        match self {
            CoinType::Bitcoin => 0,
            CoinType::Litecoin => 2,
        }
    }
}

impl Display for CoinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoinType::Bitcoin => f.write_str("bitcoin"),
            CoinType::Litecoin => f.write_str("litecoin"),
        }
    }
}

/// Whether key material is a private scalar or a public point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => f.write_str("private"),
            Visibility::Public => f.write_str("public"),
        }
    }
}

/// The family a version tag belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct KeyFamily {
    pub purpose: Purpose,
    pub coin_type: CoinType,
    pub visibility: Visibility,
}

impl KeyFamily {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Extended key version tag (a.k.a. "prefix").
///
/// Only tags present in the registry are representable; decoding an
/// unregistered tag fails with [`CodecError::UnknownVersion`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum KeyVersion {
    #[serde(rename = "xprv")]
    Xprv = 0x0488_ade4,
    #[serde(rename = "xpub")]
    Xpub = 0x0488_b21e,
    #[serde(rename = "yprv")]
    Yprv = 0x049d_7878,
    #[serde(rename = "ypub")]
    Ypub = 0x049d_7cb2,
    #[serde(rename = "Yprv")]
    YprvMultisig = 0x0295_b005,
    #[serde(rename = "Ypub")]
    YpubMultisig = 0x0295_b43f,
    #[serde(rename = "zprv")]
    Zprv = 0x04b2_430c,
    #[serde(rename = "zpub")]
    Zpub = 0x04b2_4746,
    #[serde(rename = "Zprv")]
    ZprvMultisig = 0x02aa_7a99,
    #[serde(rename = "Zpub")]
    ZpubMultisig = 0x02aa_7ed3,
    #[serde(rename = "Ltpv")]
    Ltpv = 0x019d_9cfe,
    #[serde(rename = "Ltub")]
    Ltub = 0x019d_a462,
    #[serde(rename = "Mtpv")]
    Mtpv = 0x01b2_6792,
    #[serde(rename = "Mtub")]
    Mtub = 0x01b2_6ef6,
}

/// One registry row: a private/public version pair sharing a family.
struct VersionEntry {
    private: KeyVersion,
    public: KeyVersion,
    purpose: Purpose,
    coin_type: CoinType,
    multisig: bool,
}

impl VersionEntry {
    const fn new(private: KeyVersion, public: KeyVersion, purpose: Purpose, coin_type: CoinType, multisig: bool) -> Self {
        Self { private, public, purpose, coin_type, multisig }
    }
}

static VERSIONS: [VersionEntry; 7] = [
    VersionEntry::new(KeyVersion::Xprv, KeyVersion::Xpub, Purpose::Bip44, CoinType::Bitcoin, false),
    VersionEntry::new(KeyVersion::Yprv, KeyVersion::Ypub, Purpose::Bip49, CoinType::Bitcoin, false),
    VersionEntry::new(KeyVersion::YprvMultisig, KeyVersion::YpubMultisig, Purpose::Bip49, CoinType::Bitcoin, true),
    VersionEntry::new(KeyVersion::Zprv, KeyVersion::Zpub, Purpose::Bip84, CoinType::Bitcoin, false),
    VersionEntry::new(KeyVersion::ZprvMultisig, KeyVersion::ZpubMultisig, Purpose::Bip84, CoinType::Bitcoin, true),
    VersionEntry::new(KeyVersion::Ltpv, KeyVersion::Ltub, Purpose::Bip44, CoinType::Litecoin, false),
    VersionEntry::new(KeyVersion::Mtpv, KeyVersion::Mtub, Purpose::Bip49, CoinType::Litecoin, false),
];

static VERSIONS_BY_TAG: Lazy<HashMap<u32, KeyVersion>> = Lazy::new(|| {
    VERSIONS.iter().flat_map(|entry| [entry.private, entry.public]).map(|version| (version.to_u32(), version)).collect()
});

impl KeyVersion {
    /// Size of a serialized version tag.
    pub const SIZE: usize = 4;

    /// Resolve the single-signature version tag of a family.
    pub fn lookup(purpose: Purpose, coin_type: CoinType, visibility: Visibility) -> Result<Self, CodecError> {
        VERSIONS
            .iter()
            .find(|entry| !entry.multisig && entry.purpose == purpose && entry.coin_type == coin_type)
            .map(|entry| match visibility {
                Visibility::Private => entry.private,
                Visibility::Public => entry.public,
            })
            .ok_or(CodecError::UnsupportedCombination { purpose, coin_type })
    }

    fn entry(&self) -> &'static VersionEntry {
        let row = match self {
            KeyVersion::Xprv | KeyVersion::Xpub => 0,
            KeyVersion::Yprv | KeyVersion::Ypub => 1,
            KeyVersion::YprvMultisig | KeyVersion::YpubMultisig => 2,
            KeyVersion::Zprv | KeyVersion::Zpub => 3,
            KeyVersion::ZprvMultisig | KeyVersion::ZpubMultisig => 4,
            KeyVersion::Ltpv | KeyVersion::Ltub => 5,
            KeyVersion::Mtpv | KeyVersion::Mtub => 6,
        };
        &VERSIONS[row]
    }

    /// The family (purpose, coin type, visibility) of this tag.
    pub fn family(&self) -> KeyFamily {
        let entry = self.entry();
        KeyFamily { purpose: entry.purpose, coin_type: entry.coin_type, visibility: self.visibility() }
    }

    /// The public tag mirroring this one within the same family.
    pub fn public(&self) -> Self {
        self.entry().public
    }

    /// The private tag mirroring this one within the same family.
    pub fn private(&self) -> Self {
        self.entry().private
    }

    pub fn visibility(&self) -> Visibility {
        if self.entry().public == *self { Visibility::Public } else { Visibility::Private }
    }

    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    pub fn is_private(&self) -> bool {
        self.visibility() == Visibility::Private
    }

    /// Is this a multi-signature (SLIP-132 capitalized) family?
    pub fn is_multisig(&self) -> bool {
        self.entry().multisig
    }

    pub fn to_u32(self) -> u32 {
        self as u32
    }

    /// Serialize the tag in wire (big-endian) order.
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        self.to_u32().to_be_bytes()
    }

    /// Four character Base58 prefix of keys carrying this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyVersion::Xprv => "xprv",
            KeyVersion::Xpub => "xpub",
            KeyVersion::Yprv => "yprv",
            KeyVersion::Ypub => "ypub",
            KeyVersion::YprvMultisig => "Yprv",
            KeyVersion::YpubMultisig => "Ypub",
            KeyVersion::Zprv => "zprv",
            KeyVersion::Zpub => "zpub",
            KeyVersion::ZprvMultisig => "Zprv",
            KeyVersion::ZpubMultisig => "Zpub",
            KeyVersion::Ltpv => "Ltpv",
            KeyVersion::Ltub => "Ltub",
            KeyVersion::Mtpv => "Mtpv",
            KeyVersion::Mtub => "Mtub",
        }
    }
}

impl TryFrom<u32> for KeyVersion {
    type Error = CodecError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        VERSIONS_BY_TAG.get(&tag).copied().ok_or(CodecError::UnknownVersion(tag))
    }
}

impl TryFrom<[u8; KeyVersion::SIZE]> for KeyVersion {
    type Error = CodecError;

    fn try_from(bytes: [u8; KeyVersion::SIZE]) -> Result<Self, Self::Error> {
        KeyVersion::try_from(u32::from_be_bytes(bytes))
    }
}

impl FromStr for KeyVersion {
    type Err = CodecError;

    fn from_str(prefix: &str) -> Result<Self, Self::Err> {
        VERSIONS
            .iter()
            .flat_map(|entry| [entry.private, entry.public])
            .find(|version| version.as_str() == prefix)
            .ok_or_else(|| CodecError::UnknownPrefix(prefix.to_string()))
    }
}

impl TryFrom<&str> for KeyVersion {
    type Error = CodecError;

    fn try_from(prefix: &str) -> Result<Self, Self::Error> {
        prefix.parse()
    }
}

impl Display for KeyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<KeyVersion> for u32 {
    fn from(version: KeyVersion) -> Self {
        version.to_u32()
    }
}
