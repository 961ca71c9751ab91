//!
//! [`Result`] type alias bound to the wallet key [`Error`](crate::error::Error) enum.
//!

pub type Result<T, E = super::error::Error> = std::result::Result<T, E>;
