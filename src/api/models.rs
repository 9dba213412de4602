use crate::forecast::round4;
use crate::ledger::{Block, Ledger, Metal, PriceRecord, Purity, Unit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Shared application state: the in-memory price ledger. Reads take the
/// read lock; every mutation holds the write lock across its whole
/// remine cascade so no observer sees a half-relinked chain.
pub struct AppState {
    pub ledger: RwLock<Ledger>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ledger: RwLock::new(Ledger::default()),
        }
    }
}

/* ---------- Price API Models ---------- */

#[derive(Deserialize)]
pub struct PriceRequest {
    pub date: String,
    pub metal: Metal,
    pub purity: Option<Purity>,
    pub unit: Unit,
    pub price: f64,
}

impl PriceRequest {
    /// Validate the payload and normalize it into the record committed to
    /// the chain (per-gram price, 4 decimal places).
    pub fn normalize(&self) -> Result<PriceRecord, &'static str> {
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err("date must be in YYYY-MM-DD format");
        }
        if self.price <= 0.0 {
            return Err("price must be > 0");
        }
        match (self.metal, self.purity) {
            (Metal::Gold, None) => return Err("gold requires a purity of 18K, 22K or 24K"),
            (Metal::Gold, Some(_)) => {}
            (_, Some(_)) => return Err("purity is allowed only for gold"),
            (_, None) => {}
        }

        Ok(PriceRecord {
            date: self.date.clone(),
            metal: self.metal,
            purity: self.purity,
            unit: self.unit,
            price: self.price,
            price_per_gram: round4(self.price / self.unit.grams()),
        })
    }
}

#[derive(Serialize)]
pub struct CommitResponse<'a> {
    pub message: &'static str,
    pub block: &'a Block,
}

#[derive(Serialize)]
pub struct RemoveResponse {
    pub message: &'static str,
    pub length: usize,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chain_valid: bool,
}

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub is_valid: bool,
    pub difficulty_prefix: &'static str,
    pub blocks: &'a [Block],
}

/* ---------- Forecast API Models ---------- */

fn default_days_ahead() -> u32 {
    1
}

fn default_metal() -> Metal {
    Metal::Silver
}

#[derive(Deserialize)]
pub struct PredictQuery {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
    #[serde(default = "default_metal")]
    pub metal: Metal,
    pub purity: Option<Purity>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub days_ahead: u32,
    pub metal: Metal,
    pub purity: Option<Purity>,
    pub predicted_price_inr_1g: Option<f64>,
    pub predicted_price_inr_10g: Option<f64>,
    pub predicted_price_inr_1kg: Option<f64>,
    pub currency: &'static str,
    pub based_on_points: usize,
    pub can_predict: bool,
    pub message: &'static str,
}
