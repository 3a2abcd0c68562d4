use serde::Serialize;
use serde_json::Value;

use crate::constants::{GENESIS_AMOUNT, GENESIS_PAYEE, GENESIS_PAYER};

/// A transfer of `amount` from `payer` to `payee`.
///
/// Identities are opaque strings; wallets use their hex-encoded public key.
/// Amounts are not validated since balances are not tracked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    amount: u64,
    payer: String,
    payee: String,
}

impl Transaction {
    pub fn new(amount: u64, payer: impl Into<String>, payee: impl Into<String>) -> Self {
        Self {
            amount,
            payer: payer.into(),
            payee: payee.into(),
        }
    }

    /// The hard-coded transfer carried by the genesis block.
    pub fn genesis() -> Self {
        Self::new(GENESIS_AMOUNT, GENESIS_PAYER, GENESIS_PAYEE)
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn payer(&self) -> &str {
        &self.payer
    }

    pub fn payee(&self) -> &str {
        &self.payee
    }

    /// JSON object with the fields in the order amount, payer, payee.
    ///
    /// This exact text is what gets signed and what a block embeds in its
    /// hash input, so it must never depend on map ordering.
    pub fn canonical_form(&self) -> String {
        format!(
            r#"{{"amount":{},"payer":{},"payee":{}}}"#,
            self.amount,
            Value::from(self.payer.as_str()),
            Value::from(self.payee.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_example() {
        let tx = Transaction::new(50, "alice", "bob");
        assert_eq!(
            tx.canonical_form(),
            r#"{"amount":50,"payer":"alice","payee":"bob"}"#
        );
    }

    #[test]
    fn canonical_form_matches_serde_output() {
        let tx = Transaction::new(23, "bob", "carol");
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(tx.canonical_form(), json);
    }

    #[test]
    fn canonical_form_escapes_identities() {
        let tx = Transaction::new(1, "a\"b", "line\nbreak");
        assert_eq!(
            tx.canonical_form(),
            r#"{"amount":1,"payer":"a\"b","payee":"line\nbreak"}"#
        );
        let parsed: Value = serde_json::from_str(&tx.canonical_form()).unwrap();
        assert_eq!(parsed["payer"], "a\"b");
    }

    #[test]
    fn genesis_transaction_example() {
        let tx = Transaction::genesis();
        assert_eq!(tx.amount(), 100);
        assert_eq!(tx.payer(), "genesis");
        assert_eq!(tx.payee(), "satoshi");
    }

    #[test]
    fn transaction_inequality_different_amount() {
        let tx1 = Transaction::new(10, "alice", "bob");
        let tx2 = Transaction::new(20, "alice", "bob");
        assert_ne!(tx1, tx2);
        assert_ne!(tx1.canonical_form(), tx2.canonical_form());
    }

    #[test]
    fn transaction_inequality_swapped_parties() {
        let tx1 = Transaction::new(10, "alice", "bob");
        let tx2 = Transaction::new(10, "bob", "alice");
        assert_ne!(tx1, tx2);
    }
}
