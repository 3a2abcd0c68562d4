pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
/// Hex prefix a proof-of-work digest must start with.
pub const POW_PREFIX: &str = "0000";
/// Inclusive upper bound of the random nonce drawn for every block.
pub const NONCE_MAX: u64 = 999_999_999;
pub const GENESIS_AMOUNT: u64 = 100;
pub const GENESIS_PAYER: &str = "genesis";
pub const GENESIS_PAYEE: &str = "satoshi";
