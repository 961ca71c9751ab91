use crate::imports::*;
use std::fmt;

///
/// Generates receive and change public keys from an extended public key
/// without access to any private material.
///
/// The source key is either a master key or an account key
/// (`m/purpose'/coin'/account'`); addresses are derived below it at the
/// relative path `chain/index`.
///
#[derive(Clone, Debug)]
pub struct PublicKeyGenerator {
    xpub: XPub,
    receive: XPub,
    change: XPub,
}

impl PublicKeyGenerator {
    pub fn from_xpub(xpub: XPub) -> Result<PublicKeyGenerator> {
        let derived_type = DerivedType::from_depth(xpub.attrs().depth);
        if !matches!(derived_type, DerivedType::Master | DerivedType::Account) {
            return Err(Error::UnsupportedDerivedType(derived_type));
        }

        let receive = xpub.derive_child(ChildNumber::new(AddressType::Receive.index(), false)?)?;
        let change = xpub.derive_child(ChildNumber::new(AddressType::Change.index(), false)?)?;
        log::debug!("public key generator created ({} {:?} key)", xpub.version(), derived_type);

        Ok(Self { xpub, receive, change })
    }

    /// Decode a Base58 extended public key.
    pub fn from_xpub_str(xpub: &str) -> Result<PublicKeyGenerator> {
        let key = HdKey::decode_expecting(xpub, Visibility::Public)?;
        Self::from_xpub(key.to_public())
    }

    /// Derive the account key of `config` from a master private key and keep
    /// only its public half.
    pub fn from_master_xprv(xprv: &str, config: &WalletConfig, account: u32) -> Result<PublicKeyGenerator> {
        let master = HdKey::decode_expecting(xprv, Visibility::Private)?.into_private()?;
        let derived_type = DerivedType::from_depth(master.attrs().depth);
        if derived_type != DerivedType::Master {
            return Err(Error::UnsupportedDerivedType(derived_type));
        }
        let account_key = master.derive_path(&config.account_path(account)?)?;
        Self::from_xpub(account_key.public_key())
    }

    pub fn xpub(&self) -> &XPub {
        &self.xpub
    }

    pub fn receive_pubkey(&self, index: u32) -> Result<secp256k1::PublicKey> {
        Self::derive_pubkey(&self.receive, index)
    }

    pub fn receive_pubkeys(&self, indices: Range<u32>) -> Result<Vec<secp256k1::PublicKey>> {
        Self::derive_pubkey_range(&self.receive, indices)
    }

    pub fn change_pubkey(&self, index: u32) -> Result<secp256k1::PublicKey> {
        Self::derive_pubkey(&self.change, index)
    }

    pub fn change_pubkeys(&self, indices: Range<u32>) -> Result<Vec<secp256k1::PublicKey>> {
        Self::derive_pubkey_range(&self.change, indices)
    }

    fn derive_pubkey(chain: &XPub, index: u32) -> Result<secp256k1::PublicKey> {
        Ok(*chain.derive_child(ChildNumber::new(index, false)?)?.public_key())
    }

    fn derive_pubkey_range(chain: &XPub, indices: Range<u32>) -> Result<Vec<secp256k1::PublicKey>> {
        let keys = chain.derive_range(&DerivationPath::default(), indices)?;
        Ok(keys.iter().map(|key| *key.public_key()).collect())
    }
}

impl fmt::Display for PublicKeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.xpub, f)
    }
}
