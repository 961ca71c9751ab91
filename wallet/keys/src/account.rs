//!
//! Wallet over a single account key.
//!

use crate::config::DEFAULT_GAP_LIMIT;
use crate::imports::*;
use crate::pubkeygen::PublicKeyGenerator;

/// Derives address keys below an account key (`m/purpose'/coin'/account'`)
/// using relative `chain/index` paths.
#[derive(Clone, Debug)]
pub struct HdAccountWallet {
    keychain: Keychain,
    gap_limit: u32,
}

impl HdAccountWallet {
    /// `gap_limit` defaults to [`DEFAULT_GAP_LIMIT`].
    pub fn new(account_key: XPrv, gap_limit: Option<u32>) -> Result<Self> {
        let derived_type = DerivedType::from_depth(account_key.attrs().depth);
        if derived_type != DerivedType::Account {
            return Err(Error::UnsupportedDerivedType(derived_type));
        }
        Ok(Self { keychain: Keychain::new(account_key), gap_limit: gap_limit.unwrap_or(DEFAULT_GAP_LIMIT) })
    }

    /// Decode a Base58 account private key.
    pub fn from_xprv(xprv: &str, gap_limit: Option<u32>) -> Result<Self> {
        let account_key = HdKey::decode_expecting(xprv, Visibility::Private)?.into_private()?;
        Self::new(account_key, gap_limit)
    }

    pub fn account_key(&self) -> &XPrv {
        self.keychain.root()
    }

    pub fn gap_limit(&self) -> u32 {
        self.gap_limit
    }

    fn chain_path(address_type: AddressType) -> Result<DerivationPath> {
        Ok(DerivationPath::from(vec![ChildNumber::new(address_type.index(), false)?]))
    }

    /// Key at `chain/index` below the account key.
    pub fn private_key(&self, index: u32, address_type: AddressType) -> Result<XPrv> {
        Ok(self.keychain.derive(&Self::chain_path(address_type)?.child(ChildNumber::new(index, false)?))?)
    }

    /// Key at a path relative to the account key, e.g. `0/5`.
    pub fn private_key_for_path(&self, path: &str) -> Result<XPrv> {
        Ok(self.keychain.derive_str(path)?)
    }

    pub fn public_key(&self, index: u32, address_type: AddressType) -> Result<XPub> {
        Ok(self.private_key(index, address_type)?.public_key())
    }

    pub fn public_keys(&self, indices: Range<u32>, address_type: AddressType) -> Result<Vec<XPub>> {
        Ok(self.keychain.derive_range(&Self::chain_path(address_type)?, indices)?)
    }

    /// The first `gap_limit` public keys of a chain.
    pub fn gap_public_keys(&self, address_type: AddressType) -> Result<Vec<XPub>> {
        self.public_keys(0..self.gap_limit, address_type)
    }

    pub fn public_key_generator(&self) -> Result<PublicKeyGenerator> {
        PublicKeyGenerator::from_xpub(self.account_key().public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::HdAccountWallet;
    use crate::error::Error;
    use crate::imports::*;
    use crate::wallet::HdWallet;

    fn wallet() -> HdWallet {
        HdWallet::new([0x6du8; 32], WalletConfig::default()).unwrap()
    }

    #[test]
    fn relative_paths_match_full_wallet() {
        let wallet = wallet();
        let account = HdAccountWallet::new(wallet.account_private_key(2).unwrap(), None).unwrap();
        assert_eq!(account.gap_limit(), 5);

        assert_eq!(account.private_key(4, AddressType::Receive).unwrap(), wallet.private_key(2, 4, AddressType::Receive).unwrap());
        assert_eq!(account.private_key_for_path("1/9").unwrap(), wallet.private_key(2, 9, AddressType::Change).unwrap());
        assert_eq!(account.public_key(0, AddressType::Change).unwrap(), wallet.public_key(2, 0, AddressType::Change).unwrap());
        assert_eq!(
            account.public_keys(3..6, AddressType::Receive).unwrap(),
            wallet.public_keys(2, 3..6, AddressType::Receive).unwrap()
        );
    }

    #[test]
    fn gap_limit() {
        let wallet = wallet();
        let account = HdAccountWallet::new(wallet.account_private_key(0).unwrap(), Some(8)).unwrap();
        let keys = account.gap_public_keys(AddressType::Receive).unwrap();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[7], wallet.public_key(0, 7, AddressType::Receive).unwrap());
    }

    #[test]
    fn from_account_xprv_string() {
        let wallet = wallet();
        let xprv = wallet.account_private_key(1).unwrap().to_string();
        let account = HdAccountWallet::from_xprv(&xprv, None).unwrap();
        assert_eq!(account.account_key(), &wallet.account_private_key(1).unwrap());

        let generator = account.public_key_generator().unwrap();
        assert_eq!(generator.receive_pubkey(2).unwrap(), *account.public_key(2, AddressType::Receive).unwrap().public_key());
    }

    #[test]
    fn requires_account_depth() {
        let wallet = wallet();
        assert!(matches!(
            HdAccountWallet::new(wallet.master_key().clone(), None),
            Err(Error::UnsupportedDerivedType(DerivedType::Master))
        ));
        assert!(matches!(
            HdAccountWallet::new(wallet.private_key(0, 0, AddressType::Receive).unwrap(), None),
            Err(Error::UnsupportedDerivedType(DerivedType::Bip32))
        ));
    }
}
