use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::record::BlockData;
use super::{DIFFICULTY_PREFIX, LedgerError};

/// A single block in the price chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC), refreshed on every (re)mine
    pub data: BlockData,
    pub prev_hash: String,
    pub nonce: u64,   // Proof-of-Work nonce
    pub hash: String, // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain). Not mined yet.
    pub fn genesis() -> Self {
        Self {
            index: 0,
            timestamp: Utc::now().timestamp(),
            data: BlockData::Genesis,
            prev_hash: String::from("0"),
            nonce: 0,
            hash: String::new(),
        }
    }

    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(index: u64, prev_hash: String, data: BlockData) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp(),
            data,
            prev_hash,
            nonce: 0,
            hash: String::new(),
        }
    }

    /// Compute the SHA-256 hash of this block using its fields (excluding
    /// the `hash` field itself).
    ///
    /// The preimage encoding is part of the hash contract and must not
    /// drift: `"{index}:{timestamp}:{prev_hash}:{nonce}:{data}"` where
    /// `data` is the JSON rendering of the payload with fields in
    /// declaration order.
    pub fn compute_hash(&self) -> String {
        let data_json = serde_json::to_string(&self.data).expect("serialize payload");
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.timestamp, self.prev_hash, self.nonce, data_json
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)
    }

    /// Perform Proof-of-Work by searching for a nonce whose hash starts
    /// with [`DIFFICULTY_PREFIX`]. The search starts from the current
    /// nonce and the first satisfying nonce wins. Fails with
    /// `MiningExhausted` once `max_attempts` hashes have been tried.
    pub fn mine(&mut self, max_attempts: u64) -> Result<(), LedgerError> {
        for _ in 0..max_attempts {
            let hash = self.compute_hash();
            if hash.starts_with(DIFFICULTY_PREFIX) {
                self.hash = hash;
                return Ok(());
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
        Err(LedgerError::MiningExhausted {
            attempts: max_attempts,
        })
    }

    /// Validate that the block's cached `hash` matches its content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self) -> bool {
        self.hash == self.compute_hash() && self.hash.starts_with(DIFFICULTY_PREFIX)
    }

    /// Whether this block holds a price record (genesis does not).
    pub fn is_price(&self) -> bool {
        self.data.is_price()
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::ledger::record::{BlockData, Metal, PriceRecord, Unit};
    use crate::ledger::{LedgerError, MAX_MINING_ATTEMPTS};

    fn silver_record(price: f64) -> BlockData {
        BlockData::Price(PriceRecord {
            date: "2024-03-01".into(),
            metal: Metal::Silver,
            purity: None,
            unit: Unit::OneGram,
            price,
            price_per_gram: price,
        })
    }

    #[test]
    fn genesis_shape() {
        let b = Block::genesis();
        assert_eq!(b.index, 0);
        assert_eq!(b.prev_hash, "0");
        assert_eq!(b.nonce, 0);
        assert!(!b.is_price());
    }

    #[test]
    fn mining_produces_difficulty_prefix() {
        let mut b = Block::new(1, "prev".into(), silver_record(100.0));
        b.mine(MAX_MINING_ATTEMPTS).unwrap();
        assert!(b.hash.starts_with("00"));
        assert!(b.is_valid());
    }

    #[test]
    fn mining_with_zero_budget_is_exhausted() {
        let mut b = Block::new(1, "prev".into(), silver_record(100.0));
        assert_eq!(
            b.mine(0),
            Err(LedgerError::MiningExhausted { attempts: 0 })
        );
        assert!(b.hash.is_empty());
    }

    #[test]
    fn invalid_when_mutated() {
        let mut b = Block::new(2, "prev".into(), silver_record(100.0));
        b.mine(MAX_MINING_ATTEMPTS).unwrap();
        let old_hash = b.hash.clone();

        // Tamper with the payload after mining.
        b.data = silver_record(999.0);

        assert_ne!(old_hash, b.compute_hash());
        assert!(!b.is_valid());
    }
}
