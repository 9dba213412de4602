use chrono::Utc;
use serde::Serialize;

use super::record::{BlockData, Metal, PriceRecord, Purity};
use super::{Block, LedgerError, MAX_MINING_ATTEMPTS};

/// One point of the price series derived from chain order: the sequential
/// position among matching blocks and the per-gram price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub position: usize,
    pub price_per_gram: f64,
}

/// Simple in-memory price ledger with Proof-of-Work.
///
/// Every mutation (append, mutate, remove) re-establishes the hash-linkage
/// invariants for each block from the affected position to the end of the
/// chain before it returns.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Vec<Block>,
    max_attempts: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(MAX_MINING_ATTEMPTS)
    }
}

impl Ledger {
    /// Initialize a new ledger with a mined genesis block.
    pub fn new(max_attempts: u64) -> Self {
        let mut genesis = Block::genesis();
        genesis
            .mine(max_attempts)
            .expect("genesis proof-of-work must succeed within the attempt bound");
        Self {
            chain: vec![genesis],
            max_attempts,
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Mine and append a new price block linked to the current top.
    pub fn append(&mut self, record: PriceRecord) -> Result<&Block, LedgerError> {
        let index = self.chain.len() as u64;
        let prev_hash = self.last_block().hash.clone();

        let mut block = Block::new(index, prev_hash, BlockData::Price(record));
        block.mine(self.max_attempts)?;

        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Replace the payload of the price block at `index` and re-mine every
    /// block from `index` to the end of the chain.
    pub fn mutate_at(&mut self, index: usize, record: PriceRecord) -> Result<&Block, LedgerError> {
        self.check_price_target(index)?;

        let mut suffix = self.chain[index..].to_vec();
        suffix[0].data = BlockData::Price(record);
        self.splice_remined(index, suffix)?;

        Ok(&self.chain[index])
    }

    /// Delete the price block at `index`, re-mining the remaining tail so
    /// linkage stays intact. Returns the new chain length.
    pub fn remove_at(&mut self, index: usize) -> Result<usize, LedgerError> {
        self.check_price_target(index)?;

        let suffix = self.chain[index + 1..].to_vec();
        self.splice_remined(index, suffix)?;

        Ok(self.chain.len())
    }

    /// Validate the entire chain: genesis shape, linkage, hashes and PoW.
    pub fn is_valid(&self) -> bool {
        let genesis = match self.chain.first() {
            Some(b) => b,
            None => return false,
        };
        if genesis.index != 0 || genesis.prev_hash != "0" || genesis.is_price() {
            return false;
        }
        if !genesis.is_valid() {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.prev_hash != prev.hash {
                return false;
            }
            if !current.is_valid() {
                return false;
            }
        }

        true
    }

    /// Project the chain onto the (position, price-per-gram) series for one
    /// metal, in insertion order. The purity filter only applies to gold;
    /// other metals never carry one.
    pub fn price_points(&self, metal: Metal, purity: Option<Purity>) -> Vec<PricePoint> {
        let mut points = Vec::new();
        for block in self.chain.iter().skip(1) {
            let BlockData::Price(record) = &block.data else {
                continue;
            };
            if record.metal != metal {
                continue;
            }
            if metal == Metal::Gold && record.purity != purity {
                continue;
            }
            points.push(PricePoint {
                position: points.len(),
                price_per_gram: record.price_per_gram,
            });
        }
        points
    }

    /// Mutation target must be a non-genesis, in-range price block.
    fn check_price_target(&self, index: usize) -> Result<(), LedgerError> {
        if index == 0 || index >= self.chain.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.chain.len(),
            });
        }
        if !self.chain[index].is_price() {
            return Err(LedgerError::NotAPriceBlock { index });
        }
        Ok(())
    }

    /// Relink and re-mine `blocks` as the chain suffix starting at `start`
    /// (must be >= 1): reindex, link to the predecessor's finalized hash,
    /// reset the nonce, refresh the timestamp, mine. The suffix is only
    /// committed once every block mined, so an exhausted search leaves the
    /// chain exactly as it was.
    fn splice_remined(&mut self, start: usize, mut blocks: Vec<Block>) -> Result<(), LedgerError> {
        let mut prev_hash = self.chain[start - 1].hash.clone();
        for (offset, block) in blocks.iter_mut().enumerate() {
            block.index = (start + offset) as u64;
            block.prev_hash = prev_hash;
            block.nonce = 0;
            block.timestamp = Utc::now().timestamp();
            block.mine(self.max_attempts)?;
            prev_hash = block.hash.clone();
        }

        self.chain.truncate(start);
        self.chain.extend(blocks);
        Ok(())
    }
}
