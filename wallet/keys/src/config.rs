//!
//! Wallet derivation settings.
//!

use crate::imports::*;

/// Default number of consecutive unused addresses scanned before giving up.
pub const DEFAULT_GAP_LIMIT: u32 = 5;

/// Settings that select the `m/purpose'/coin'/account'` tree of a wallet
/// and the version its keys are serialized with.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletConfig {
    pub purpose: Purpose,
    /// SLIP-44 coin type index.
    pub coin_type: u32,
    /// Version of the master private key; derived keys inherit it.
    pub version: KeyVersion,
    pub gap_limit: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self { purpose: Purpose::Bip44, coin_type: CoinType::Bitcoin.slip44_index(), version: KeyVersion::Xprv, gap_limit: DEFAULT_GAP_LIMIT }
    }
}

impl WalletConfig {
    /// Settings for a registered purpose and coin family.
    pub fn for_family(purpose: Purpose, coin_type: CoinType) -> Result<Self> {
        let version = KeyVersion::lookup(purpose, coin_type, Visibility::Private)?;
        Ok(Self { purpose, coin_type: coin_type.slip44_index(), version, ..Default::default() })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// `m/purpose'/coin'/account'`
    pub fn account_path(&self, account: u32) -> Result<DerivationPath> {
        let path = format!("m/{}'/{}'/{account}'", self.purpose.index(), self.coin_type);
        Ok(path.parse::<DerivationPath>()?)
    }

    /// `m/purpose'/coin'/account'/chain`
    pub fn chain_path(&self, account: u32, address_type: AddressType) -> Result<DerivationPath> {
        let mut path = self.account_path(account)?;
        path.push(ChildNumber::new(address_type.index(), false)?);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::WalletConfig;
    use crate::error::Error;
    use crate::types::AddressType;
    use hdkit_bip32::{CodecError, CoinType, KeyVersion, ParseError, Purpose};

    #[test]
    fn defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.purpose, Purpose::Bip44);
        assert_eq!(config.coin_type, 0);
        assert_eq!(config.version, KeyVersion::Xprv);
        assert_eq!(config.gap_limit, 5);
    }

    #[test]
    fn json_with_defaults() {
        let config = WalletConfig::from_json(r#"{ "purpose": "bip84", "version": "zprv" }"#).unwrap();
        assert_eq!(config.purpose, Purpose::Bip84);
        assert_eq!(config.version, KeyVersion::Zprv);
        assert_eq!(config.coin_type, 0);
        assert_eq!(config.gap_limit, 5);

        assert_eq!(WalletConfig::from_json("{}").unwrap(), WalletConfig::default());

        let config = WalletConfig::from_json(r#"{ "coinType": 2, "version": "Ltpv", "gapLimit": 20 }"#).unwrap();
        assert_eq!(config.coin_type, 2);
        assert_eq!(config.gap_limit, 20);
        assert_eq!(WalletConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(WalletConfig::from_json(r#"{ "version": "tprv" }"#), Err(Error::Config(_))));
        assert!(matches!(WalletConfig::from_json("[1, 2]"), Err(Error::Config(_))));
    }

    #[test]
    fn family_lookup() {
        let config = WalletConfig::for_family(Purpose::Bip49, CoinType::Litecoin).unwrap();
        assert_eq!(config.version, KeyVersion::Mtpv);
        assert_eq!(config.coin_type, 2);

        assert!(matches!(
            WalletConfig::for_family(Purpose::Bip86, CoinType::Bitcoin),
            Err(Error::Bip32(hdkit_bip32::Error::Codec(CodecError::UnsupportedCombination { .. })))
        ));
    }

    #[test]
    fn paths() {
        let config = WalletConfig::for_family(Purpose::Bip49, CoinType::Bitcoin).unwrap();
        assert_eq!(config.account_path(3).unwrap().to_string(), "m/49'/0'/3'");
        assert_eq!(config.chain_path(0, AddressType::Change).unwrap().to_string(), "m/49'/0'/0'/1");
        assert!(matches!(
            config.account_path(0x8000_0000),
            Err(Error::Bip32(hdkit_bip32::Error::Parse(ParseError::IndexTooLarge(0x8000_0000))))
        ));
    }
}
