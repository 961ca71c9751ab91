//!
//! BIP44 style wallet over a master private key.
//!

use crate::imports::*;
use crate::pubkeygen::PublicKeyGenerator;

/// Derives keys at `m/purpose'/coin'/account'/chain/index` from a master key.
#[derive(Clone, Debug)]
pub struct HdWallet {
    keychain: Keychain,
    config: WalletConfig,
}

impl HdWallet {
    /// Derive the master key from `seed` using the configured version.
    pub fn new<S: AsRef<[u8]>>(seed: S, config: WalletConfig) -> Result<Self> {
        let keychain = Keychain::from_seed(seed, config.version)?;
        Ok(Self { keychain, config })
    }

    /// Wrap an existing master private key. The configured version is
    /// replaced by the version of `master`.
    pub fn from_master_key(master: XPrv, config: WalletConfig) -> Result<Self> {
        let derived_type = DerivedType::from_depth(master.attrs().depth);
        if derived_type != DerivedType::Master {
            return Err(Error::UnsupportedDerivedType(derived_type));
        }
        let config = WalletConfig { version: master.version(), ..config };
        Ok(Self { keychain: Keychain::new(master), config })
    }

    /// Decode a Base58 master private key.
    pub fn from_master_xprv(xprv: &str, config: WalletConfig) -> Result<Self> {
        let master = HdKey::decode_expecting(xprv, Visibility::Private)?.into_private()?;
        Self::from_master_key(master, config)
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn master_key(&self) -> &XPrv {
        self.keychain.root()
    }

    /// Account key at `m/purpose'/coin'/account'`.
    pub fn account_private_key(&self, account: u32) -> Result<XPrv> {
        Ok(self.keychain.derive(&self.config.account_path(account)?)?)
    }

    pub fn account_public_key(&self, account: u32) -> Result<XPub> {
        Ok(self.account_private_key(account)?.public_key())
    }

    /// Address key at `m/purpose'/coin'/account'/chain/index`.
    pub fn private_key(&self, account: u32, index: u32, address_type: AddressType) -> Result<XPrv> {
        let mut path = self.config.chain_path(account, address_type)?;
        path.push(ChildNumber::new(index, false)?);
        Ok(self.keychain.derive(&path)?)
    }

    /// Private key at an arbitrary path (absolute from the master key).
    pub fn private_key_for_path(&self, path: &str) -> Result<XPrv> {
        Ok(self.keychain.derive_str(path)?)
    }

    pub fn public_key(&self, account: u32, index: u32, address_type: AddressType) -> Result<XPub> {
        Ok(self.private_key(account, index, address_type)?.public_key())
    }

    /// Public keys for `indices` on one chain of an account; the chain key is
    /// resolved once.
    pub fn public_keys(&self, account: u32, indices: Range<u32>, address_type: AddressType) -> Result<Vec<XPub>> {
        let path = self.config.chain_path(account, address_type)?;
        Ok(self.keychain.derive_range(&path, indices)?)
    }

    /// Read-only generator for one account.
    pub fn public_key_generator(&self, account: u32) -> Result<PublicKeyGenerator> {
        PublicKeyGenerator::from_xpub(self.account_public_key(account)?)
    }
}
