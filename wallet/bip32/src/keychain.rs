//!
//! Path based derivation from a single private root key.
//!

use crate::{ChildNumber, DerivationPath, KeyVersion, Result, XPrv, XPub};
use std::ops::Range;

/// Holds one root key and derives descendants on demand.
///
/// Derived keys are returned to the caller and never cached.
#[derive(Clone, Debug)]
pub struct Keychain {
    root: XPrv,
}

impl Keychain {
    pub fn new(root: XPrv) -> Self {
        log::debug!("keychain created ({} root at depth {})", root.version(), root.attrs().depth);
        Self { root }
    }

    /// Derive the master key from `seed` and wrap it.
    pub fn from_seed<S: AsRef<[u8]>>(seed: S, version: KeyVersion) -> Result<Self> {
        Ok(Self::new(XPrv::new_with_version(seed, version)?))
    }

    pub fn root(&self) -> &XPrv {
        &self.root
    }

    /// Derive the private key at `path` relative to the root.
    pub fn derive(&self, path: &DerivationPath) -> Result<XPrv> {
        log::trace!("resolving {path}");
        self.root.derive_path(path)
    }

    /// Parse `path` and derive the private key at it.
    pub fn derive_str(&self, path: &str) -> Result<XPrv> {
        self.derive(&path.parse()?)
    }

    /// Derive the public keys `path/i` for every `i` in `indices`.
    ///
    /// `path` is resolved privately and may contain hardened steps; the
    /// children are derived from the public projection of that key.
    pub fn derive_range(&self, path: &DerivationPath, indices: Range<u32>) -> Result<Vec<XPub>> {
        if indices.end > ChildNumber::HARDENED_FLAG {
            return Err(crate::DerivationError::InvalidChildIndex(indices.end - 1).into());
        }
        let base = self.derive(path)?.public_key();
        base.derive_range(&DerivationPath::default(), indices)
    }
}
