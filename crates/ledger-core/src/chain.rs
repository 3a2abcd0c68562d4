use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::block::Block;
use crate::error::Result;
use crate::pow;
use crate::transaction::Transaction;
use crate::wallet::verify_signature;

/// Source of block timestamps, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Clock pinned to one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Receipt for a block accepted by [`Chain::append`].
///
/// `solution` is the proof-of-work answer for the block's nonce. It is
/// reported here only; the block and its hash do not contain it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Appended {
    pub index: usize,
    pub hash: String,
    pub solution: u64,
}

/// Append-only ledger starting at a genesis block.
///
/// `append` takes `&mut self`, so reading the tip and pushing the new block
/// always happen under one exclusive borrow.
pub struct Chain<C: Clock = SystemClock> {
    blocks: Vec<Block>,
    clock: C,
    rng: StdRng,
}

impl Chain<SystemClock> {
    pub fn new() -> Self {
        Self::with_sources(SystemClock, StdRng::from_entropy())
    }
}

impl Default for Chain<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Chain<C> {
    /// Creates a chain whose timestamps and nonces come from `clock` and `rng`,
    /// genesis included.
    pub fn with_sources(clock: C, mut rng: StdRng) -> Self {
        let genesis = Block::new(None, Transaction::genesis(), clock.now_millis(), &mut rng);
        debug!(hash = %genesis.hash(), "genesis block created");
        Self {
            blocks: vec![genesis],
            clock,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: genesis exists from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Verifies `signature` over the transaction's canonical form, mines the
    /// new block's nonce and appends the block.
    ///
    /// On `InvalidSignature` the chain is left untouched.
    pub fn append(
        &mut self,
        transaction: Transaction,
        signer_public_key: &str,
        signature: &[u8],
    ) -> Result<Appended> {
        verify_signature(&transaction, signer_public_key, signature)?;
        let block = self.next_block(transaction);
        let solution = pow::mine(block.nonce());
        Ok(self.push(block, solution))
    }

    /// Like [`Chain::append`], but the search stops when `cancel` is set. A
    /// cancelled search returns `MiningCancelled`, appends nothing and rewinds
    /// the nonce generator, so later blocks match a chain that never saw the
    /// cancelled call.
    pub fn append_cancellable(
        &mut self,
        transaction: Transaction,
        signer_public_key: &str,
        signature: &[u8],
        cancel: &AtomicBool,
    ) -> Result<Appended> {
        verify_signature(&transaction, signer_public_key, signature)?;
        let rng_before = self.rng.clone();
        let block = self.next_block(transaction);
        match pow::mine_cancellable(block.nonce(), cancel) {
            Ok(solution) => Ok(self.push(block, solution)),
            Err(e) => {
                self.rng = rng_before;
                Err(e)
            }
        }
    }

    fn next_block(&mut self, transaction: Transaction) -> Block {
        let prev_hash = self.last_block().hash();
        Block::new(
            Some(prev_hash),
            transaction,
            self.clock.now_millis(),
            &mut self.rng,
        )
    }

    fn push(&mut self, block: Block, solution: u64) -> Appended {
        let receipt = Appended {
            index: self.blocks.len(),
            hash: block.hash(),
            solution,
        };
        info!(index = receipt.index, hash = %receipt.hash, solution, "block appended");
        self.blocks.push(block);
        receipt
    }
}
