pub mod block;
pub mod error;
pub mod model;
pub mod record;

pub use block::Block;
pub use error::LedgerError;
pub use model::{Ledger, PricePoint};
pub use record::{BlockData, Metal, PriceRecord, Purity, Unit};

/// Required hex prefix of a mined block digest (Proof-of-Work target).
pub const DIFFICULTY_PREFIX: &str = "00";

/// Upper bound on nonce attempts per block. A two-zero hex prefix is hit
/// with probability ~1/256 per attempt, so this bound is unreachable in
/// practice; it exists so a mining loop can never run unbounded.
pub const MAX_MINING_ATTEMPTS: u64 = 10_000_000;
