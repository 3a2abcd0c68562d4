use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::constants::{HASH_SIZE, NONCE_MAX};
use crate::transaction::Transaction;

pub type Hash = [u8; HASH_SIZE];

/// One ledger entry. Fields are fixed at construction; the hash is derived
/// on demand and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    prev_hash: Option<String>,
    transaction: Transaction,
    timestamp: u64,
    nonce: u64,
}

impl Block {
    /// Builds a block whose nonce is drawn uniformly from `0..=NONCE_MAX`.
    pub fn new<R: Rng>(
        prev_hash: Option<String>,
        transaction: Transaction,
        timestamp: u64,
        rng: &mut R,
    ) -> Self {
        let nonce = rng.gen_range(0..=NONCE_MAX);
        Self::from_parts(prev_hash, transaction, timestamp, nonce)
    }

    pub fn from_parts(
        prev_hash: Option<String>,
        transaction: Transaction,
        timestamp: u64,
        nonce: u64,
    ) -> Self {
        Self {
            prev_hash,
            transaction,
            timestamp,
            nonce,
        }
    }

    pub fn prev_hash(&self) -> Option<&str> {
        self.prev_hash.as_deref()
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_none()
    }

    /// Hash input: prevHash, transaction, timestamp, nonce, in that order.
    pub fn canonical_form(&self) -> String {
        let prev_hash = match &self.prev_hash {
            Some(h) => Value::from(h.as_str()),
            None => Value::Null,
        };
        format!(
            r#"{{"prevHash":{},"transaction":{},"timestamp":{},"nonce":{}}}"#,
            prev_hash,
            self.transaction.canonical_form(),
            self.timestamp,
            self.nonce,
        )
    }

    pub fn digest(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_form().as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; HASH_SIZE];
        out.copy_from_slice(&digest[..]);
        out
    }

    /// Lowercase hex SHA-256 of [`Block::canonical_form`].
    pub fn hash(&self) -> String {
        hex::encode(self.digest())
    }
}
