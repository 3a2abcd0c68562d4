//! Proof-of-work admission gate.
//!
//! The search looks for the smallest `solution >= 1` such that the MD5 hex
//! digest of the decimal text of `seed + solution` starts with [`POW_PREFIX`]. With a four
//! character prefix that takes 65536 attempts on average.

use md5::{Digest, Md5};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use crate::constants::POW_PREFIX;
use crate::error::{LedgerError, Result};

/// MD5 hex digest of the decimal sum of seed and candidate.
///
/// The sum is taken in `u128` so it cannot overflow.
pub fn attempt(seed: u64, solution: u64) -> String {
    let sum = u128::from(seed) + u128::from(solution);
    let mut hasher = Md5::new();
    hasher.update(sum.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

pub fn meets_difficulty(digest_hex: &str) -> bool {
    digest_hex.starts_with(POW_PREFIX)
}

/// Runs the search to completion on the calling thread.
pub fn mine(seed: u64) -> u64 {
    info!(seed, "mining");
    let mut solution = 1u64;
    loop {
        if meets_difficulty(&attempt(seed, solution)) {
            info!(seed, solution, "solved");
            return solution;
        }
        solution += 1;
    }
}

/// Same search as [`mine`], but gives up once `cancel` is set.
///
/// The flag is checked before every attempt, so a flag that is already set
/// returns immediately with zero attempts.
pub fn mine_cancellable(seed: u64, cancel: &AtomicBool) -> Result<u64> {
    info!(seed, "mining (cancellable)");
    let mut solution = 1u64;
    loop {
        if cancel.load(Ordering::Relaxed) {
            let attempts = solution - 1;
            debug!(seed, attempts, "mining cancelled");
            return Err(LedgerError::MiningCancelled { attempts });
        }
        if meets_difficulty(&attempt(seed, solution)) {
            info!(seed, solution, "solved");
            return Ok(solution);
        }
        solution += 1;
    }
}
