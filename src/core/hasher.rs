use data_encoding::HEXLOWER;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

/// The hash algorithms the benchmark can drive the chain with.
///
/// A closed enum instead of a trait object: every variant is just the pair
/// (digest, name), selection is by value, and the registry is a fixed array
/// the driver can enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
    Blake2b,
    Blake2s,
}

impl HashAlgorithm {
    /// Every algorithm the driver can select, in reporting order.
    pub const ALL: [HashAlgorithm; 7] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Blake2s,
    ];

    /// Computes the one-shot digest of `data` as a lowercase hex string.
    ///
    /// Pure and deterministic: the same payload always yields the same
    /// output for the same variant.
    pub fn digest(&self, data: &[u8]) -> String {
        let digest = match self {
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
            HashAlgorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
            HashAlgorithm::Blake2b => Blake2b512::digest(data).to_vec(),
            HashAlgorithm::Blake2s => Blake2s256::digest(data).to_vec(),
        };
        HEXLOWER.encode(digest.as_slice())
    }

    /// Stable human-readable identifier, used only for reporting.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Sha3_256 => "SHA3-256",
            HashAlgorithm::Sha3_512 => "SHA3-512",
            HashAlgorithm::Blake2b => "BLAKE2b",
            HashAlgorithm::Blake2s => "BLAKE2s",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "SHA-256", "sha256", "sha_256" and so on
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "sha3256" => Ok(HashAlgorithm::Sha3_256),
            "sha3512" => Ok(HashAlgorithm::Sha3_512),
            "blake2b" => Ok(HashAlgorithm::Blake2b),
            "blake2s" => Ok(HashAlgorithm::Blake2s),
            _ => Err(format!(
                "Unknown hash algorithm: {s}. Valid options: MD5, SHA-256, SHA-512, SHA3-256, SHA3-512, BLAKE2b, BLAKE2s"
            )),
        }
    }
}

// Serialized as the reporting name so exported chains record which
// algorithm sealed each block.
impl Serialize for HashAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
