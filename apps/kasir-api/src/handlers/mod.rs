//! # HTTP Handlers
//!
//! ```text
//! GET    /                       welcome
//! GET    /health                 health
//! POST   /api/checkout           checkout::checkout
//! GET    /api/report/hari-ini    report::today
//! GET    /api/report             report::range
//! GET    /api/produk             product::list
//! POST   /api/produk             product::create
//! GET    /api/produk/{id}        product::get
//! PUT    /api/produk/{id}        product::update
//! DELETE /api/produk/{id}        product::delete
//! ...    /api/categories[/{id}]  category::*
//! ```

pub mod category;
pub mod checkout;
pub mod health;
pub mod product;
pub mod report;

use axum::Json;
use serde_json::{json, Value};

/// `GET /` - service banner with the endpoint list.
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Selamat datang di Kasir API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "checkout": "POST /api/checkout",
            "report_today": "GET /api/report/hari-ini",
            "report_range": "GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD",
            "products": "GET|POST /api/produk, GET|PUT|DELETE /api/produk/{id}",
            "categories": "GET|POST /api/categories, GET|PUT|DELETE /api/categories/{id}"
        }
    }))
}

/// Body returned by successful deletes.
pub(crate) fn deleted(message: &str) -> Json<Value> {
    Json(json!({ "message": message }))
}
