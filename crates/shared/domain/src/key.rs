use ripemd::{Digest, Ripemd160};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compressed ECDSA point length.
const KEY_BYTES: usize = 33;
/// Trailing checksum length.
const CHECKSUM_BYTES: usize = 4;

/// Reasons a public key string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("public key must start with the '{0}' chain prefix")]
    Prefix(String),
    #[error("public key is not valid base58: {0}")]
    Base58(String),
    #[error("public key must decode to {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
    #[error("public key checksum mismatch")]
    Checksum,
    #[error("public key is not a compressed ECDSA point (leading byte {0:#04x})")]
    PointTag(u8),
}

/// A well-formed chain public key in its canonical string form.
///
/// The wire format is `<PREFIX><base58>` where the base58 payload is a
/// 33-byte compressed ECDSA point followed by the first four bytes of its
/// RIPEMD-160 digest. The faucet never signs with this key; it only checks
/// that the requester submitted something the chain will accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(String);

impl PublicKey {
    /// Parses and checksums a public key string against `prefix`.
    ///
    /// # Errors
    /// Returns a [`KeyError`] describing why the key cannot belong to the
    /// configured chain.
    pub fn parse(raw: &str, prefix: &str) -> Result<Self, KeyError> {
        let payload =
            raw.strip_prefix(prefix).ok_or_else(|| KeyError::Prefix(prefix.to_owned()))?;

        let bytes =
            bs58::decode(payload).into_vec().map_err(|e| KeyError::Base58(e.to_string()))?;

        if bytes.len() != KEY_BYTES + CHECKSUM_BYTES {
            return Err(KeyError::Length { expected: KEY_BYTES + CHECKSUM_BYTES, got: bytes.len() });
        }

        let (point, checksum) = bytes.split_at(KEY_BYTES);

        let digest = Ripemd160::digest(point);
        if digest[..CHECKSUM_BYTES] != *checksum {
            return Err(KeyError::Checksum);
        }

        if point[0] != 0x02 && point[0] != 0x03 {
            return Err(KeyError::PointTag(point[0]));
        }

        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a syntactically valid key string for tests.
    fn encode_key(prefix: &str, point: [u8; KEY_BYTES]) -> String {
        let digest = Ripemd160::digest(point);
        let mut bytes = point.to_vec();
        bytes.extend_from_slice(&digest[..CHECKSUM_BYTES]);
        format!("{prefix}{}", bs58::encode(bytes).into_string())
    }

    #[test]
    fn accepts_checksummed_compressed_keys() {
        let mut point = [0u8; KEY_BYTES];
        point[0] = 0x02;
        point[1] = 0x8f;
        let raw = encode_key("BTS", point);
        let key = PublicKey::parse(&raw, "BTS").unwrap();
        assert_eq!(key.as_str(), raw);
    }

    #[test]
    fn rejects_wrong_prefix() {
        let mut point = [0u8; KEY_BYTES];
        point[0] = 0x03;
        let raw = encode_key("TEST", point);
        assert!(matches!(PublicKey::parse(&raw, "BTS"), Err(KeyError::Prefix(_))));
    }

    #[test]
    fn rejects_corrupted_payload() {
        let mut point = [0u8; KEY_BYTES];
        point[0] = 0x02;
        let mut raw = encode_key("BTS", point);
        // Flip the last base58 character to break the checksum.
        let last = if raw.ends_with('1') { '2' } else { '1' };
        raw.pop();
        raw.push(last);
        let err = PublicKey::parse(&raw, "BTS").unwrap_err();
        assert!(matches!(err, KeyError::Checksum | KeyError::Base58(_) | KeyError::Length { .. }));
    }

    #[test]
    fn rejects_uncompressed_point_tag() {
        let mut point = [0u8; KEY_BYTES];
        point[0] = 0x04;
        let raw = encode_key("BTS", point);
        assert_eq!(PublicKey::parse(&raw, "BTS"), Err(KeyError::PointTag(0x04)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(PublicKey::parse("BTS0OIl", "BTS"), Err(KeyError::Base58(_))));
        assert!(matches!(
            PublicKey::parse("BTS111", "BTS"),
            Err(KeyError::Length { .. })
        ));
    }
}
