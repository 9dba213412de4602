use actix_web::{HttpResponse, Responder, delete, post, put, web};
use log::{info, warn};

use super::models::{AppState, CommitResponse, PriceRequest, RemoveResponse};
use crate::ledger::LedgerError;

/// Validate, normalize and commit a new price observation.
#[post("/prices/")]
pub async fn add_price(state: web::Data<AppState>, body: web::Json<PriceRequest>) -> impl Responder {
    let record = match body.normalize() {
        Ok(record) => record,
        Err(msg) => {
            warn!("POST /prices/ - rejected: {msg}");
            return HttpResponse::BadRequest().body(msg);
        }
    };

    let mut ledger = state.ledger.write().expect("lock poisoned");
    match ledger.append(record) {
        Ok(block) => {
            info!(
                "PRICE - committed block #{} (hash={}, nonce={})",
                block.index, block.hash, block.nonce
            );
            HttpResponse::Ok().json(CommitResponse {
                message: "Price committed to blockchain",
                block,
            })
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// Amend the price block at `index`, re-mining the tail behind it.
#[put("/prices/{index}/")]
pub async fn update_price(
    state: web::Data<AppState>,
    path: web::Path<usize>,
    body: web::Json<PriceRequest>,
) -> impl Responder {
    let index = path.into_inner();
    let record = match body.normalize() {
        Ok(record) => record,
        Err(msg) => {
            warn!("PUT /prices/{index}/ - rejected: {msg}");
            return HttpResponse::BadRequest().body(msg);
        }
    };

    let mut ledger = state.ledger.write().expect("lock poisoned");
    if let Err(e) = ledger.mutate_at(index, record) {
        warn!("PUT /prices/{index}/ - {e}");
        return ledger_error_response(&e);
    }

    info!(
        "PRICE - amended block #{index}, re-mined {} block(s)",
        ledger.len() - index
    );
    HttpResponse::Ok().json(CommitResponse {
        message: "Price block updated",
        block: &ledger.chain[index],
    })
}

/// Remove the price block at `index`, re-mining any remaining tail.
#[delete("/prices/{index}/")]
pub async fn delete_price(state: web::Data<AppState>, path: web::Path<usize>) -> impl Responder {
    let index = path.into_inner();

    let mut ledger = state.ledger.write().expect("lock poisoned");
    match ledger.remove_at(index) {
        Ok(length) => {
            info!("PRICE - removed block #{index}, chain length now {length}");
            HttpResponse::Ok().json(RemoveResponse {
                message: "Price block removed",
                length,
            })
        }
        Err(e) => {
            warn!("DELETE /prices/{index}/ - {e}");
            ledger_error_response(&e)
        }
    }
}

/// Map ledger failures onto transport responses: precondition failures are
/// the client's fault, an exhausted PoW search is ours.
fn ledger_error_response(e: &LedgerError) -> HttpResponse {
    match e {
        LedgerError::IndexOutOfRange { .. } | LedgerError::NotAPriceBlock { .. } => {
            HttpResponse::BadRequest().body(e.to_string())
        }
        LedgerError::MiningExhausted { .. } => {
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}
