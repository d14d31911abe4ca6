//! Fixed-width digest produced by every hashing [`Algorithm`].
//!
//! [`Algorithm`]: crate::hash::Algorithm

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Width of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Output of a hashing algorithm: 32 bytes, compared byte-exactly.
///
/// Prints and parses as 64 lower-case hex characters, which is the form used
/// when roots and proofs leave the process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Digest {
        Digest(bytes)
    }

    /// Creates a digest from a slice, which must be exactly [`DIGEST_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Digest> {
        if bytes.len() != DIGEST_LEN {
            return Err(Error::InvalidDigestLength {
                expected: DIGEST_LEN,
                actual: bytes.len(),
            });
        }
        let mut d = [0u8; DIGEST_LEN];
        d.copy_from_slice(bytes);
        Ok(Digest(d))
    }

    /// Returns the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Consumes the digest, returning its bytes.
    pub const fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lower-case hex form.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(d: Digest) -> Self {
        d.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:x})", self)
    }
}

impl FromStr for Digest {
    type Err = Error;

    /// Parses 64 hex characters, either case, with an optional `0x` prefix.
    fn from_str(s: &str) -> Result<Digest> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != 2 * DIGEST_LEN {
            return Err(Error::invalid_hex(format!(
                "expected {} hex characters, got {}",
                2 * DIGEST_LEN,
                s.len()
            )));
        }

        let mut d = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut d).map_err(|e| Error::invalid_hex(e.to_string()))?;
        Ok(Digest(d))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_hex_display_and_parse() {
        let d: Digest = ABC.parse().unwrap();
        assert_eq!(d.as_bytes()[0], 0xba);
        assert_eq!(d.as_bytes()[31], 0xad);
        assert_eq!(d.to_string(), ABC);
        assert_eq!(format!("{:#x}", d), format!("0x{}", ABC));
        assert_eq!(format!("{:X}", d), ABC.to_uppercase());

        let upper: Digest = format!("0x{}", ABC.to_uppercase()).parse().unwrap();
        assert_eq!(upper, d);
    }

    #[test]
    fn test_hex_parse_rejects_garbage() {
        assert!(matches!("abcd".parse::<Digest>(), Err(Error::InvalidHex(_))));
        let bad = format!("{}zz", &ABC[..62]);
        assert!(matches!(bad.parse::<Digest>(), Err(Error::InvalidHex(_))));
        assert!(matches!("".parse::<Digest>(), Err(Error::InvalidHex(_))));
        // 64 bytes, but not 64 characters
        let wide = format!("{}é", &ABC[..62]);
        assert_eq!(wide.len(), 64);
        assert!(matches!(wide.parse::<Digest>(), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_hex_matches_hex_crate() {
        let d = Digest::new([0xa5; 32]);
        assert_eq!(d.to_hex(), hex::encode([0xa5u8; 32]));
        assert_eq!(format!("{:X}", d), hex::encode_upper([0xa5u8; 32]));
        assert_eq!(hex::encode(d), d.to_hex());
    }

    #[test]
    fn test_from_slice() {
        let d = Digest::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(d.into_bytes(), [7u8; 32]);
        assert_eq!(
            Digest::from_slice(&[0u8; 31]),
            Err(Error::InvalidDigestLength {
                expected: 32,
                actual: 31
            })
        );
        assert!(Digest::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_debug() {
        let d = Digest::new([0u8; 32]);
        assert_eq!(format!("{:?}", d), format!("Digest({})", "0".repeat(64)));
    }
}
