//!
//! Common imports used internally by this crate.
//!

pub use crate::config::WalletConfig;
pub use crate::error::Error;
pub use crate::result::Result;
pub use crate::types::*;
pub use hdkit_bip32::{
    ChildNumber, CoinType, DerivationPath, DerivedType, HdKey, KeyVersion, Keychain, Purpose, Visibility, XPrv, XPub,
};
pub use serde::{Deserialize, Serialize};
pub use std::ops::Range;
