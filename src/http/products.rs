use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::products::{Product, ProductCandidate, ProductId};

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products = state.products.list();
    tracing::debug!(count = products.len(), "Listing products");
    Json(products)
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductCandidate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(candidate) = payload?;

    let product = state.products.create(candidate)?;
    tracing::info!(product_id = %product.id, name = %product.name, "Created product");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/{}", product.id))],
        Json(product),
    ))
}

pub async fn replace_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProductCandidate>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = raw_id.parse().map_err(|_| ApiError::InvalidId(raw_id.clone()))?;
    let Json(candidate) = payload?;

    let product = state.products.replace(id, candidate)?;
    tracing::info!(product_id = %product.id, name = %product.name, "Replaced product");

    Ok(Json(product))
}
