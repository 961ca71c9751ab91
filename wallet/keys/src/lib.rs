//!
//! # HD Wallet Keys
//!
//! Wallet level access to BIP32 keys: purpose/coin/account scoped private
//! and public keys, account wallets addressed by relative paths and
//! read-only public key generators.
//!

pub mod account;
pub mod config;
pub mod error;
mod imports;
pub mod prelude;
pub mod pubkeygen;
pub mod result;
pub mod types;
pub mod wallet;
