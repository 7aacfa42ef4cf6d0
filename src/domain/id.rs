//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Job identifier - four raw bytes, rendered as lowercase hex.
///
/// Uniqueness across concurrent drivers is the metadata service's concern;
/// this type only guarantees a well-formed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId([u8; JobId::SIZE]);

impl JobId {
    /// Width of a job id in bytes.
    pub const SIZE: usize = 4;

    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a job id from its integer form, most significant byte first.
    #[must_use]
    pub const fn from_int(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Decode a job id from exactly `2 * SIZE` hex characters.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidJobId> {
        let hex = hex.trim();
        if hex.len() != Self::SIZE * 2 {
            return Err(InvalidJobId(format!(
                "expected {} hex characters, got {}",
                Self::SIZE * 2,
                hex.len()
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidJobId(format!("'{hex}' contains non-hex characters")));
        }

        let mut bytes = [0u8; Self::SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = hex
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| InvalidJobId(format!("non-ascii input '{hex}'")))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| InvalidJobId(format!("'{pair}' is not a hex byte")))?;
        }
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for JobId {
    type Err = InvalidJobId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = InvalidJobId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.to_hex()
    }
}

/// A job id string that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid job id: {0}")]
pub struct InvalidJobId(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_decodes_bytes_in_order() {
        let id = JobId::from_hex("deadbeef").unwrap();
        assert_eq!(id.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(id.to_hex(), "deadbeef");
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        assert_eq!(
            JobId::from_hex("DEADBEEF").unwrap(),
            JobId::from_int(0xdead_beef)
        );
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(JobId::from_hex("dead").is_err());
        assert!(JobId::from_hex("deadbeef00").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(JobId::from_hex("zzzzzzzz").is_err());
        assert!(JobId::from_hex("éééé").is_err());
    }

    #[test]
    fn from_hex_rejects_sign_prefix() {
        assert!(JobId::from_hex("+a+b+c+d").is_err());
        assert!(JobId::from_hex("-deadbee").is_err());
    }

    #[test]
    fn display_pads_leading_zeros() {
        assert_eq!(JobId::from_int(1).to_string(), "00000001");
    }
}
