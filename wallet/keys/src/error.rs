//!
//! Error types used by the wallet key facade.
//!

use hdkit_bip32::DerivedType;
use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by the wallet key facade.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("Bip32 -> {0}")]
    Bip32(#[from] hdkit_bip32::Error),

    #[error("Unsupported derived type `{0:?}` (expected a master or an account key)")]
    UnsupportedDerivedType(DerivedType),

    #[error("Config -> {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}

impl From<hdkit_bip32::ParseError> for Error {
    fn from(err: hdkit_bip32::ParseError) -> Self {
        Self::Bip32(err.into())
    }
}

impl From<hdkit_bip32::CodecError> for Error {
    fn from(err: hdkit_bip32::CodecError) -> Self {
        Self::Bip32(err.into())
    }
}

impl From<hdkit_bip32::DerivationError> for Error {
    fn from(err: hdkit_bip32::DerivationError) -> Self {
        Self::Bip32(err.into())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::Custom(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Self::Custom(err.to_string())
    }
}
