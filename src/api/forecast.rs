use actix_web::{HttpResponse, Responder, get, web};
use log::debug;

use super::models::{AppState, PredictQuery, PredictResponse};
use crate::forecast::{self, ForecastError};
use crate::ledger::Metal;

/// Forecast the per-gram price `days_ahead` steps past the latest
/// observation for one metal (and purity, for gold). With fewer than two
/// matching points this soft-fails into a `can_predict: false` response.
#[get("/predict/")]
pub async fn predict_price(
    state: web::Data<AppState>,
    query: web::Query<PredictQuery>,
) -> impl Responder {
    if query.days_ahead < 1 {
        return HttpResponse::BadRequest().body("days_ahead must be >= 1");
    }
    if query.metal == Metal::Gold && query.purity.is_none() {
        return HttpResponse::BadRequest().body("gold requires a purity of 18K, 22K or 24K");
    }
    if query.metal != Metal::Gold && query.purity.is_some() {
        return HttpResponse::BadRequest().body("purity is allowed only for gold");
    }

    let points = {
        let ledger = state.ledger.read().expect("lock poisoned");
        ledger.price_points(query.metal, query.purity)
    };
    debug!(
        "PREDICT - {} point(s) for {:?}/{:?}, days_ahead={}",
        points.len(),
        query.metal,
        query.purity,
        query.days_ahead
    );

    let per_gram = match forecast::predict(&points, query.days_ahead) {
        Ok(value) => value,
        Err(ForecastError::InsufficientData { .. }) => {
            return HttpResponse::Ok().json(PredictResponse {
                days_ahead: query.days_ahead,
                metal: query.metal,
                purity: query.purity,
                predicted_price_inr_1g: None,
                predicted_price_inr_10g: None,
                predicted_price_inr_1kg: None,
                currency: "INR",
                based_on_points: points.len(),
                can_predict: false,
                message: "Need at least two data points to predict",
            });
        }
        Err(e @ ForecastError::DegenerateDataset) => {
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };

    HttpResponse::Ok().json(PredictResponse {
        days_ahead: query.days_ahead,
        metal: query.metal,
        purity: query.purity,
        predicted_price_inr_1g: Some(per_gram),
        predicted_price_inr_10g: Some(round2(per_gram * 10.0)),
        predicted_price_inr_1kg: Some(round2(per_gram * 1000.0)),
        currency: "INR",
        based_on_points: points.len(),
        can_predict: true,
        message: "Prediction generated",
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
