//! Derivation paths

use crate::{ChildNumber, Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Prefix for absolute derivation paths.
const PREFIX: &str = "m";

/// Derivation paths within a hierarchical keyspace.
///
/// Text paths may start with `m` (or `M`) to denote the root; paths without
/// the prefix are relative to whatever key they are applied to.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DerivationPath {
    path: Vec<ChildNumber>,
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<DerivationPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DerivationPathVisitor;
        impl de::Visitor<'_> for DerivationPathVisitor {
            type Value = DerivationPath;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a derivation path string such as m/44'/0'/0'")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                DerivationPath::from_str(value).map_err(|err| de::Error::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(DerivationPathVisitor)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl DerivationPath {
    /// Iterate over the [`ChildNumber`] values in this derivation path.
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.path.iter().cloned()
    }

    /// Is this derivation path empty? (i.e. the root)
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Get the count of [`ChildNumber`] values in this derivation path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Get the parent [`DerivationPath`] for the current one.
    ///
    /// Returns `None` if this is already the root path.
    pub fn parent(&self) -> Option<Self> {
        self.path.len().checked_sub(1).map(|n| {
            let mut parent = self.clone();
            parent.path.truncate(n);
            parent
        })
    }

    /// Push a [`ChildNumber`] onto an existing derivation path.
    pub fn push(&mut self, child_number: ChildNumber) {
        self.path.push(child_number)
    }

    /// Return a new path with `child_number` appended.
    pub fn child(&self, child_number: ChildNumber) -> Self {
        let mut path = self.clone();
        path.push(child_number);
        path
    }

    /// Does any step of this path require the private key?
    pub fn has_hardened(&self) -> bool {
        self.path.iter().any(ChildNumber::is_hardened)
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.path
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(path: Vec<ChildNumber>) -> Self {
        DerivationPath { path }
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;

        for child_number in self.iter() {
            write!(f, "/{}", child_number)?;
        }

        Ok(())
    }
}

impl Extend<ChildNumber> for DerivationPath {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        self.path.extend(iter);
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let mut segments = path.split('/').peekable();

        if segments.next_if(|segment| segment.eq_ignore_ascii_case(PREFIX)).is_some() && segments.peek().is_none() {
            return Ok(DerivationPath::default());
        }

        // `split` always yields at least one segment, so an empty input reaches
        // the segment parser and is reported as malformed there
        Ok(DerivationPath { path: segments.map(str::parse).collect::<Result<_>>()? })
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> std::vec::IntoIter<ChildNumber> {
        self.path.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::DerivationPath;
    use crate::{ChildNumber, Error, ParseError};

    fn steps(path: &str) -> Vec<(u32, bool)> {
        path.parse::<DerivationPath>().unwrap().iter().map(|child| (child.index(), child.is_hardened())).collect()
    }

    #[test]
    fn round_trip() {
        let path_m = "m";
        assert_eq!(path_m.parse::<DerivationPath>().unwrap().to_string(), path_m);

        let path_m_0 = "m/0";
        assert_eq!(path_m_0.parse::<DerivationPath>().unwrap().to_string(), path_m_0);

        let path_m_0_2147483647h = "m/0/2147483647'";
        assert_eq!(path_m_0_2147483647h.parse::<DerivationPath>().unwrap().to_string(), path_m_0_2147483647h);

        let path_m_0_2147483647h_1_2147483646h_2 = "m/0/2147483647'/1/2147483646'/2";
        assert_eq!(
            path_m_0_2147483647h_1_2147483646h_2.parse::<DerivationPath>().unwrap().to_string(),
            path_m_0_2147483647h_1_2147483646h_2
        );
    }

    #[test]
    fn parse_bip44_path() {
        assert_eq!(steps("m/44'/0'/0'/0/0"), vec![(44, true), (0, true), (0, true), (0, false), (0, false)]);
        assert_eq!(steps("M/44h/0h/0h/1/7"), vec![(44, true), (0, true), (0, true), (1, false), (7, false)]);
        assert_eq!("m/44h/0h".parse::<DerivationPath>().unwrap().to_string(), "m/44'/0'");
    }

    #[test]
    fn root_and_relative_paths() {
        assert!("m".parse::<DerivationPath>().unwrap().is_empty());
        assert!("M".parse::<DerivationPath>().unwrap().is_empty());
        assert_eq!(steps("0/1"), vec![(0, false), (1, false)]);
        assert_eq!(steps("1"), vec![(1, false)]);
    }

    #[test]
    fn reject_invalid_paths() {
        assert_eq!("m/2147483648".parse::<DerivationPath>(), Err(Error::Parse(ParseError::IndexTooLarge(2147483648))));
        assert_eq!("m/x".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("x".into()))));
        assert_eq!("m/".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("".into()))));
        assert_eq!("m//0".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("".into()))));
        assert_eq!("".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("".into()))));
        assert_eq!("m/0''".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("0''".into()))));
        assert_eq!("m/0/m".parse::<DerivationPath>(), Err(Error::Parse(ParseError::Malformed("m".into()))));
    }

    #[test]
    fn parent() {
        let path_m_0_2147483647h = "m/0/2147483647'".parse::<DerivationPath>().unwrap();
        let path_m_0 = path_m_0_2147483647h.parent().unwrap();
        assert_eq!("m/0", path_m_0.to_string());

        let path_m = path_m_0.parent().unwrap();
        assert_eq!("m", path_m.to_string());
        assert_eq!(path_m.parent(), None);
    }

    #[test]
    fn hardened_detection() {
        assert!("m/44'/0".parse::<DerivationPath>().unwrap().has_hardened());
        let path = "m/0/1".parse::<DerivationPath>().unwrap();
        assert!(!path.has_hardened());
        assert!(path.child(ChildNumber::new(3, true).unwrap()).has_hardened());
    }

    #[test]
    fn serde_text_form() {
        let path: DerivationPath = serde_json::from_str("\"m/84'/0'/0'\"").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"m/84'/0'/0'\"");
        assert!(serde_json::from_str::<DerivationPath>("\"m/q\"").is_err());
    }
}
