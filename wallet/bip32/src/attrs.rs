use crate::{ChainCode, ChildNumber, Depth, KeyFingerprint};
use borsh::{BorshDeserialize, BorshSerialize};

/// Extended key attributes: the header shared by private and public extended
/// keys (depth, parent fingerprint, child number and chain code).
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy.
    pub depth: Depth,

    /// Parent fingerprint.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number.
    pub child_number: ChildNumber,

    /// Chain code.
    pub chain_code: ChainCode,
}

impl ExtendedKeyAttrs {
    /// Attributes of a master (root) key.
    pub fn master(chain_code: ChainCode) -> Self {
        Self { depth: 0, parent_fingerprint: KeyFingerprint::default(), child_number: ChildNumber::default(), chain_code }
    }

    /// Zero depth keys must not reference a parent or carry a child number.
    pub fn is_consistent(&self) -> bool {
        self.depth != 0 || (self.parent_fingerprint == KeyFingerprint::default() && self.child_number == ChildNumber::default())
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedKeyAttrs;
    use crate::ChildNumber;
    use borsh::BorshDeserialize;

    #[test]
    fn borsh_round_trip() {
        let attrs = ExtendedKeyAttrs {
            depth: 3,
            parent_fingerprint: [0xde, 0xad, 0xbe, 0xef],
            child_number: ChildNumber::new(1, true).unwrap(),
            chain_code: [7u8; 32],
        };
        let bytes = borsh::to_vec(&attrs).unwrap();
        assert_eq!(bytes.len(), 1 + 4 + 4 + 32);
        assert_eq!(ExtendedKeyAttrs::try_from_slice(&bytes).unwrap(), attrs);
    }

    #[test]
    fn master_consistency() {
        assert!(ExtendedKeyAttrs::master([1u8; 32]).is_consistent());

        let mut attrs = ExtendedKeyAttrs::master([1u8; 32]);
        attrs.parent_fingerprint = [0, 0, 0, 1];
        assert!(!attrs.is_consistent());

        attrs.depth = 1;
        assert!(attrs.is_consistent());
    }
}
