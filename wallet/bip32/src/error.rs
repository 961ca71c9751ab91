//!
//! Error types emitted by path parsing, extended key decoding and key derivation.
//!

use crate::{CoinType, Purpose, Visibility};
use thiserror::Error;

/// Derivation path text errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("Malformed derivation path segment `{0}`")]
    Malformed(String),

    #[error("Child index {0} is too large (must be below 2^31)")]
    IndexTooLarge(u64),
}

/// Extended key serialization errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CodecError {
    #[error("Invalid extended key length {actual} (expected {expected})")]
    WrongLength { actual: usize, expected: usize },

    #[error("Unknown extended key version 0x{0:08x}")]
    UnknownVersion(u32),

    #[error("Unknown extended key prefix `{0}`")]
    UnknownPrefix(String),

    #[error("Extended key version mismatch (expected a {expected} key)")]
    VersionMismatch { expected: Visibility },

    #[error("Extended key checksum mismatch")]
    ChecksumMismatch,

    #[error("No extended key version defined for {purpose} / {coin_type}")]
    UnsupportedCombination { purpose: Purpose, coin_type: CoinType },

    #[error("Base58 -> {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("Invalid extended key material")]
    InvalidKeyMaterial,

    #[error("Zero depth key with a non-zero parent fingerprint or child number")]
    InvalidMasterKey,
}

/// Key derivation errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DerivationError {
    #[error("Invalid child index 0x{0:08x}")]
    InvalidChildIndex(u32),

    #[error("Derived key is out of range for the curve order")]
    InvalidTweak,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("Maximum derivation depth exceeded")]
    MaxDepth,

    #[error("Invalid seed length {0} (must be between 16 and 64 bytes)")]
    InvalidSeedLength(usize),

    #[error("HMAC key rejected")]
    Hmac,
}

/// [`Error`](enum@Error) variants emitted by this crate.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self {
        Error::Codec(CodecError::Base58(err))
    }
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        Error::Derivation(DerivationError::Hmac)
    }
}
