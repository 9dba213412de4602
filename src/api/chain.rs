use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse};
use crate::ledger::DIFFICULTY_PREFIX;

/// Get the full chain with its validity verdict.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.read().expect("lock poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        is_valid: ledger.is_valid(),
        difficulty_prefix: DIFFICULTY_PREFIX,
        blocks: &ledger.chain,
    };
    HttpResponse::Ok().json(resp)
}
