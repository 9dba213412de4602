mod chain;
mod forecast;
mod health;
pub mod models;
mod prices;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(prices::add_price)
            .service(prices::update_price)
            .service(prices::delete_price)
            .service(forecast::predict_price),
    );
}
