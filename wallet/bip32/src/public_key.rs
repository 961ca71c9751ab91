//! Trait for deriving child keys on a given type.

use crate::{CodecError, DerivationError, KeyFingerprint, PrivateKeyBytes, PublicKeyBytes, Result};
use ripemd::Ripemd160;
use secp256k1::{SECP256K1, Scalar};
use sha2::{Digest, Sha256};

/// Trait for key types which can be derived using BIP32.
pub trait PublicKey: Sized + Clone {
    /// Initialize this key from bytes.
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self>;

    /// Serialize this key as bytes.
    fn to_bytes(&self) -> PublicKeyBytes;

    /// Derive a child key from a parent key and the left half of the
    /// HMAC output: `child = tweak * G + parent`.
    fn derive_child(&self, other: PrivateKeyBytes) -> Result<Self>;

    /// Compute a 4-byte key fingerprint for this public key.
    ///
    /// Default implementation uses `RIPEMD160(SHA256(public_key))`.
    fn fingerprint(&self) -> KeyFingerprint {
        let digest = Ripemd160::digest(Sha256::digest(self.to_bytes()));
        let mut fingerprint = KeyFingerprint::default();
        fingerprint.copy_from_slice(&digest[..4]);
        fingerprint
    }
}

impl PublicKey for secp256k1::PublicKey {
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self> {
        secp256k1::PublicKey::from_slice(&bytes).map_err(|_| CodecError::InvalidKeyMaterial.into())
    }

    fn to_bytes(&self) -> PublicKeyBytes {
        self.serialize()
    }

    fn derive_child(&self, other: PrivateKeyBytes) -> Result<Self> {
        let tweak = Scalar::from_be_bytes(other).map_err(|_| DerivationError::InvalidTweak)?;
        // fails when the sum is the point at infinity
        Ok(self.add_exp_tweak(SECP256K1, &tweak).map_err(|_| DerivationError::InvalidTweak)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PublicKey;
    use crate::{DerivationError, Error, PrivateKey};
    use faster_hex::hex_decode;

    fn bytes<const N: usize>(hex: &str) -> [u8; N] {
        let mut dst = [0u8; N];
        hex_decode(hex.as_bytes(), &mut dst).unwrap();
        dst
    }

    #[test]
    fn fingerprint_of_bip32_vector_1_master() {
        let key = secp256k1::PublicKey::from_bytes(bytes("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2")).unwrap();
        assert_eq!(key.fingerprint(), [0x34, 0x42, 0x19, 0x3e]);
    }

    #[test]
    fn tweak_matches_private_derivation() {
        let secret = secp256k1::SecretKey::from_bytes(&bytes("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")).unwrap();
        let tweak = bytes("0000000000000000000000000000000000000000000000000000000000000abc");
        let via_private = PrivateKey::public_key(&secret.derive_child(tweak).unwrap());
        let via_public = PrivateKey::public_key(&secret).derive_child(tweak).unwrap();
        assert_eq!(via_private, via_public);
    }

    #[test]
    fn point_at_infinity_is_rejected() {
        // P + (n - k) * G == infinity when P = k * G
        let mut k = [0u8; 32];
        k[31] = 1;
        let point = PrivateKey::public_key(&secp256k1::SecretKey::from_bytes(&k).unwrap());
        let minus_one = bytes("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
        assert_eq!(point.derive_child(minus_one).unwrap_err(), Error::Derivation(DerivationError::InvalidTweak));
    }

    #[test]
    fn invalid_points() {
        let mut not_on_curve = [0u8; 33];
        not_on_curve[0] = 0x02;
        not_on_curve[1..].copy_from_slice(&[0xff; 32]);
        assert!(secp256k1::PublicKey::from_bytes(not_on_curve).is_err());

        let mut bad_tag = bytes::<33>("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2");
        bad_tag[0] = 0x04;
        assert!(secp256k1::PublicKey::from_bytes(bad_tag).is_err());
    }
}
