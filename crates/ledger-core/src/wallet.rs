//! Key material for identities: ECDSA P-256 with SHA-256 message digests.
//!
//! An identity is the hex encoding of the uncompressed public key point.

use ring::rand::SystemRandom;
use ring::signature::{
    EcdsaKeyPair, KeyPair, UnparsedPublicKey, ECDSA_P256_SHA256_FIXED,
    ECDSA_P256_SHA256_FIXED_SIGNING,
};
use std::fmt;
use tracing::warn;

use crate::chain::{Appended, Chain, Clock};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

pub struct Wallet {
    key_pair: EcdsaKeyPair,
    pkcs8: Vec<u8>,
    public_key: String,
}

impl Wallet {
    /// Generates a fresh key pair from OS randomness.
    pub fn generate() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng)
            .map_err(|e| LedgerError::Crypto(format!("failed to generate key pair: {e}")))?;
        Self::from_pkcs8(pkcs8.as_ref())
    }

    pub fn from_pkcs8(pkcs8: &[u8]) -> Result<Self> {
        let rng = SystemRandom::new();
        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8, &rng)
            .map_err(|e| LedgerError::Crypto(format!("failed to load PKCS#8 key: {e}")))?;
        let public_key = hex::encode(key_pair.public_key().as_ref());
        Ok(Self {
            key_pair,
            pkcs8: pkcs8.to_vec(),
            public_key,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The PKCS#8 document the key pair was loaded from.
    pub fn pkcs8(&self) -> &[u8] {
        &self.pkcs8
    }

    pub fn sign(&self, transaction: &Transaction) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();
        let signature = self
            .key_pair
            .sign(&rng, transaction.canonical_form().as_bytes())
            .map_err(|e| LedgerError::Crypto(format!("failed to sign transaction: {e}")))?;
        Ok(signature.as_ref().to_vec())
    }

    /// Pays `amount` to `payee` by signing a transaction from this wallet
    /// and appending it to `chain`.
    pub fn send<C: Clock>(
        &self,
        chain: &mut Chain<C>,
        amount: u64,
        payee: &str,
    ) -> Result<Appended> {
        let transaction = Transaction::new(amount, self.public_key.as_str(), payee);
        let signature = self.sign(&transaction)?;
        chain.append(transaction, &self.public_key, &signature)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Checks `signature` over the canonical form of `transaction` under the
/// hex-encoded `public_key`.
pub fn verify_signature(
    transaction: &Transaction,
    public_key: &str,
    signature: &[u8],
) -> Result<()> {
    let key = hex::decode(public_key).map_err(|_| {
        warn!("rejected transaction: public key is not hex");
        LedgerError::InvalidSignature
    })?;
    UnparsedPublicKey::new(&ECDSA_P256_SHA256_FIXED, key)
        .verify(transaction.canonical_form().as_bytes(), signature)
        .map_err(|_| {
            warn!(amount = transaction.amount(), "rejected transaction: bad signature");
            LedgerError::InvalidSignature
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_is_uncompressed_point_hex() -> anyhow::Result<()> {
        let wallet = Wallet::generate()?;
        assert_eq!(wallet.public_key().len(), 130);
        assert!(wallet.public_key().starts_with("04"));
        Ok(())
    }

    #[test]
    fn generated_wallets_differ() -> anyhow::Result<()> {
        let a = Wallet::generate()?;
        let b = Wallet::generate()?;
        assert_ne!(a.public_key(), b.public_key());
        Ok(())
    }

    #[test]
    fn from_pkcs8_restores_identity() -> anyhow::Result<()> {
        let wallet = Wallet::generate()?;
        let restored = Wallet::from_pkcs8(wallet.pkcs8())?;
        assert_eq!(wallet.public_key(), restored.public_key());
        Ok(())
    }

    #[test]
    fn from_pkcs8_rejects_garbage() {
        assert!(matches!(
            Wallet::from_pkcs8(b"definitely not a key"),
            Err(LedgerError::Crypto(_))
        ));
    }

    #[test]
    fn sign_then_verify() -> anyhow::Result<()> {
        let wallet = Wallet::generate()?;
        let tx = Transaction::new(50, wallet.public_key(), "bob");
        let signature = wallet.sign(&tx)?;
        assert_eq!(signature.len(), 64);
        verify_signature(&tx, wallet.public_key(), &signature)?;
        Ok(())
    }

    #[test]
    fn verify_rejects_other_transaction() -> anyhow::Result<()> {
        let wallet = Wallet::generate()?;
        let tx = Transaction::new(50, wallet.public_key(), "bob");
        let signature = wallet.sign(&tx)?;
        let other = Transaction::new(50, wallet.public_key(), "carol");
        assert_eq!(
            verify_signature(&other, wallet.public_key(), &signature),
            Err(LedgerError::InvalidSignature)
        );
        Ok(())
    }

    #[test]
    fn send_appends_signed_block() -> anyhow::Result<()> {
        let mut chain = Chain::new();
        let alice = Wallet::generate()?;
        let bob = Wallet::generate()?;
        let receipt = alice.send(&mut chain, 50, bob.public_key())?;
        assert_eq!(receipt.index, 1);
        let tx = chain.last_block().transaction();
        assert_eq!(tx.payer(), alice.public_key());
        assert_eq!(tx.payee(), bob.public_key());
        assert_eq!(tx.amount(), 50);
        Ok(())
    }

    #[test]
    fn debug_hides_private_key() -> anyhow::Result<()> {
        let wallet = Wallet::generate()?;
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains(wallet.public_key()));
        assert!(!rendered.contains(&hex::encode(wallet.pkcs8())));
        Ok(())
    }
}
