use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::PgPool;
use std::sync::Arc;

use crate::models::{Product, ProductDraft};

// 1. ProductStore Contract

/// ProductStore
///
/// Defines the abstract contract for the component owning the mutable product
/// collection. This trait allows us to swap the concrete implementation, from the
/// in-memory store used for local runs and tests to the Postgres-backed store in
/// persistent deployments, without affecting the calling handlers.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn ProductStore>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns the live collection as of the call. An empty collection is an
    /// empty vector, never an absent value.
    async fn list(&self) -> Vec<Product>;

    /// Retrieves a single product by id.
    async fn get(&self, id: i64) -> Option<Product>;

    /// Assigns the next unused id and appends the new entry. Ids increase
    /// monotonically and are never reused, even after deletes.
    async fn create(&self, draft: ProductDraft) -> Product;

    /// Replaces all fields of the existing entry except `id`, which is preserved
    /// regardless of what the draft contains. Returns None when the id is absent.
    async fn update(&self, id: i64, draft: ProductDraft) -> Option<Product>;

    /// Removes the entry, preserving the relative order of remaining entries.
    /// Returns true only if an entry was removed.
    async fn delete(&self, id: i64) -> bool;
}

/// StoreState
///
/// The concrete type used to share the product store across the application state.
pub type StoreState = Arc<dyn ProductStore>;

// 2. The In-Memory Implementation

/// Collection and id counter behind one exclusion domain. An id allocation and
/// its append are observed atomically by concurrent readers because both happen
/// under the same write guard.
struct MemoryInner {
    products: Vec<Product>,
    next_id: i64,
}

/// MemoryStore
///
/// Process-local implementation of `ProductStore`. Reads take the shared lock
/// and may proceed concurrently; writes take the exclusive lock and serialize.
/// The lock covers the whole collection, the right granularity for a small,
/// low-contention catalog. Guards never cross an await point.
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Vec<Product> {
        self.inner.read().products.clone()
    }

    async fn get(&self, id: i64) -> Option<Product> {
        self.inner.read().products.iter().find(|p| p.id == id).cloned()
    }

    async fn create(&self, draft: ProductDraft) -> Product {
        let mut inner = self.inner.write();

        // Counter bump and append happen under one guard so no reader can
        // observe an allocated id without its product, or vice versa.
        let id = inner.next_id;
        inner.next_id += 1;

        let product = Product {
            id,
            name: draft.name,
            price: draft.price,
        };
        inner.products.push(product.clone());

        tracing::debug!(id, "product created");
        product
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Option<Product> {
        let mut inner = self.inner.write();

        let entry = inner.products.iter_mut().find(|p| p.id == id)?;
        // The stored id wins over anything the draft carries.
        entry.name = draft.name;
        entry.price = draft.price;

        Some(entry.clone())
    }

    async fn delete(&self, id: i64) -> bool {
        let mut inner = self.inner.write();

        match inner.products.iter().position(|p| p.id == id) {
            Some(index) => {
                // Vec::remove shifts the tail left, keeping relative order.
                inner.products.remove(index);
                true
            }
            None => false,
        }
    }
}

// 3. The Postgres Implementation

/// PostgresStore
///
/// The persistent implementation of `ProductStore`, backed by a `products` table.
/// Id assignment is delegated to a BIGSERIAL column, which satisfies the same
/// monotonic, never-reused contract as the in-memory counter. Query failures are
/// logged and degrade to empty/absent results.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// ensure_schema
    ///
    /// Provisions the `products` table if it does not exist yet. Safe to call at
    /// every startup; a development convenience mirroring the original schema.
    pub async fn ensure_schema(&self) {
        let result = sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS products (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::error!("ensure_schema error: {:?}", e);
        }
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn list(&self) -> Vec<Product> {
        match sqlx::query_as::<_, Product>("SELECT id, name, price FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("list error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get(&self, id: i64) -> Option<Product> {
        sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get error: {:?}", e);
                None
            })
    }

    async fn create(&self, draft: ProductDraft) -> Product {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price",
        )
        .bind(draft.name)
        .bind(draft.price)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert product")
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Option<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, price = $3 WHERE id = $1 RETURNING id, name, price",
        )
        .bind(id)
        .bind(draft.name)
        .bind(draft.price)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update error: {:?}", e);
            None
        })
    }

    async fn delete(&self, id: i64) -> bool {
        match sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete error: {:?}", e);
                false
            }
        }
    }
}
