//! Product CRUD (`/api/produk`).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use kasir_core::validation::validate_product_input;
use kasir_core::{Product, ProductInput};

use super::deleted;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `GET /api/produk`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

/// `POST /api/produk` - 201 with the stored product.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    validate_product_input(&input)?;

    let product = state.db.products().insert(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /api/produk/{id}`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;

    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// `PUT /api/produk/{id}` - replaces every field.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Json(input) = body?;
    validate_product_input(&input)?;

    Ok(Json(state.db.products().update(id, &input).await?))
}

/// `DELETE /api/produk/{id}` - 409 if the product has sales history.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;

    state.db.products().delete(id).await?;
    Ok(deleted("Product deleted successfully"))
}
