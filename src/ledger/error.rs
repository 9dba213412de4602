use std::fmt;

/// Errors raised at the ledger boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Target index is genesis or past the end of the chain.
    IndexOutOfRange { index: usize, len: usize },
    /// Target block exists but does not hold a price record.
    NotAPriceBlock { index: usize },
    /// Proof-of-Work search hit the attempt bound without a valid digest.
    MiningExhausted { attempts: u64 },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::IndexOutOfRange { index, len } => {
                write!(f, "block index {index} out of range (chain length {len})")
            }
            LedgerError::NotAPriceBlock { index } => {
                write!(f, "block {index} is not a price block")
            }
            LedgerError::MiningExhausted { attempts } => {
                write!(f, "proof-of-work exhausted after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for LedgerError {}
