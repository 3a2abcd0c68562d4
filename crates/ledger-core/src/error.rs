use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The signature does not verify for the transaction under the given key.
    /// Undecodable keys and signatures end up here too.
    #[error("invalid signature")]
    InvalidSignature,

    #[error("mining cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    #[error("crypto error: {0}")]
    Crypto(String),
}
