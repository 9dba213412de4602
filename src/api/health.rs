use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.read().expect("lock poisoned");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        chain_valid: ledger.is_valid(),
    })
}
