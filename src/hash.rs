use crypto::digest::Digest;
use crypto::sha2::Sha256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type Hash represents a SHA-256 fingerprint of some content.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct Hash(Vec<u8>);

impl Hash {
    /// Create a new hash, given a hex representation.
    pub fn from_hex(hex: &str) -> Hash {
        Hash(hex::decode(hex).unwrap())
    }

    /// Create a new hash for the given content
    pub fn for_bytes(bytes: &[u8]) -> Hash {
        let mut sha = Sha256::new();
        sha.input(bytes);
        let mut hash = Hash(vec![0; sha.output_bytes()]);
        sha.result(&mut hash.0);
        hash
    }

    /// Get the hex representation of this hash.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Hash any serializable structure, via its canonical bincode encoding.
pub fn hash_content<T: Serialize>(content: &T) -> Hash {
    let encoded: Vec<u8> = bincode::serialize(content).unwrap();
    Hash::for_bytes(&encoded)
}
