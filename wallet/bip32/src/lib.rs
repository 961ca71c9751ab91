//!
//! # BIP32 hierarchical deterministic keys
//!
//! Master key generation from a seed, private and public child key
//! derivation, derivation path parsing and the `xprv`/`xpub` extended
//! key wire format (including the BIP49/BIP84 and Litecoin version families).
//!

mod attrs;
mod child_number;
mod derivation_path;
mod error;
mod hdkey;
mod keychain;
mod private_key;
mod public_key;
mod result;
pub mod types;
mod version;
mod xkey;
mod xprivate_key;
mod xpublic_key;


pub use secp256k1;
pub use secp256k1::SecretKey;

pub use attrs::ExtendedKeyAttrs;
pub use child_number::ChildNumber;
pub use derivation_path::DerivationPath;
pub use error::{CodecError, DerivationError, Error, ParseError};
pub use hdkey::{DerivedType, HdKey, KeyInfo};
pub use keychain::Keychain;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use result::Result;
pub use types::*;
pub use version::{CoinType, KeyFamily, KeyVersion, Purpose, Visibility};
pub use xkey::ExtendedKey;
pub use xprivate_key::ExtendedPrivateKey;
pub use xpublic_key::ExtendedPublicKey;

/// Extended secp256k1 private key.
pub type XPrv = ExtendedPrivateKey<secp256k1::SecretKey>;

/// Extended secp256k1 public key.
pub type XPub = ExtendedPublicKey<secp256k1::PublicKey>;
