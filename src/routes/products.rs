use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Product Router Module
///
/// Declares the full catalog surface. Each path is registered once with its
/// method set, so the read and write halves of the same path cannot drift apart.
///
/// Access Control:
/// Reads (`GET`) are public. Every mutation handler resolves the caller through
/// the `AuthUser` extractor (401 on any token failure) and then requires the
/// `admin` role (403 on mismatch) before touching the store.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        // GET  /products          — list the catalog (public, possibly empty array)
        // POST /products          — append a product (admin)
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        // GET    /products/{id}   — fetch one product (public)
        // PUT    /products/{id}   — replace name/price, id preserved (admin)
        // DELETE /products/{id}   — remove, order of the rest preserved (admin)
        .route(
            "/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}
