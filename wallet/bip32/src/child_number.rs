//! Child numbers

use crate::{DerivationError, ParseError, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Index of a particular child key for a given (extended) private key.
///
/// The most significant bit is the hardening flag; the remaining 31 bits are
/// the index within the hardened or non-hardened range.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Hardened child keys use indices 2^31 through 2^32-1.
    pub const HARDENED_FLAG: u32 = 1 << 31;

    /// Create new [`ChildNumber`] with the given index and hardened flag.
    ///
    /// Returns an error if the index is already in the hardened range.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG == 0 {
            let mut child = index;
            if hardened {
                child |= Self::HARDENED_FLAG;
            }
            Ok(ChildNumber(child))
        } else {
            Err(DerivationError::InvalidChildIndex(index).into())
        }
    }

    /// Get the index number for this [`ChildNumber`], without the hardening flag.
    pub fn index(&self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    /// Is this child number within the hardened range?
    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }

    /// Serialize this child number as bytes (big-endian).
    pub fn to_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Decode a child number from its big-endian serialization.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

impl From<u32> for ChildNumber {
    fn from(n: u32) -> ChildNumber {
        ChildNumber(n)
    }
}

impl From<ChildNumber> for u32 {
    fn from(n: ChildNumber) -> u32 {
        n.0
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;

        if self.is_hardened() {
            f.write_str("'")?;
        }

        Ok(())
    }
}

impl FromStr for ChildNumber {
    type Err = crate::Error;

    fn from_str(child: &str) -> Result<ChildNumber> {
        let (digits, hardened) = match child.strip_suffix(['\'', 'h']) {
            Some(digits) => (digits, true),
            None => (child, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::Malformed(child.to_string()).into());
        }

        // any all-digit string that does not fit a u64 is over the limit as well
        let index = digits.parse::<u64>().unwrap_or(u64::MAX);
        if index >= u64::from(Self::HARDENED_FLAG) {
            return Err(ParseError::IndexTooLarge(index).into());
        }

        ChildNumber::new(index as u32, hardened)
    }
}
