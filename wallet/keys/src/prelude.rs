//!
//! Re-exports of the most commonly used types and traits in this crate.
//!

pub use crate::account::*;
pub use crate::config::*;
pub use crate::pubkeygen::*;
pub use crate::types::*;
pub use crate::wallet::*;
pub use hdkit_bip32::{DerivationPath, HdKey, KeyVersion, Purpose, XPrv, XPub};
