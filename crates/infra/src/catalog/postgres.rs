//! Postgres-backed catalog store.
//!
//! Maps to the `products` table created by `migrations/0001_products.sql`.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database | class `23` (integrity constraint) | `Constraint` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | N/A | `Unavailable` |
//! | Other | N/A | `Backend` |
//!
//! ## Concurrency
//!
//! `save` is a plain upsert of the whole row. Two callers doing a
//! read-modify-write on the same id can overwrite each other.
//!
//! ## Id Sequence
//!
//! `save` with an id past the `BIGSERIAL` sequence moves the sequence up to
//! that id in the same transaction, so a later `insert` never collides.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockroom_core::ProductId;
use stockroom_products::{CatalogStore, NewProduct, Product, StoreError, StoreResult};

const SCHEMA: &str = include_str!("../../migrations/0001_products.sql");

/// Moves `products_id_seq` to `$1` unless it is already at or past it.
const ADVANCE_ID_SEQUENCE: &str = r#"
    SELECT setval('products_id_seq', $1)
    FROM products_id_seq
    WHERE (is_called AND last_value < $1)
       OR (NOT is_called AND last_value <= $1)
"#;

/// Postgres-backed catalog store.
///
/// `PgPool` is internally reference-counted, so cloning the store shares the pool.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Create a new store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool for `database_url`.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table (and its category index) if missing.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, price, stock
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, price, stock
            FROM products
            WHERE category = $1
            ORDER BY id ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_category", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, category, price, stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, product), fields(id = %product.id), err)]
    async fn save(&self, product: Product) -> StoreResult<Product> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("save", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price, stock)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                category = EXCLUDED.category,
                price = EXCLUDED.price,
                stock = EXCLUDED.stock
            RETURNING id, name, category, price, stock
            "#,
        )
        .bind(product.id.value())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        sqlx::query(ADVANCE_ID_SEQUENCE)
            .bind(product.id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("save", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("save", e))?;

        product_from_row(&row)
    }

    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, category, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, category, price, stock
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        product_from_row(&row)
    }
}

fn product_from_row(row: &PgRow) -> StoreResult<Product> {
    let decode = |e: sqlx::Error| StoreError::Backend(format!("failed to decode product row: {e}"));

    Ok(Product {
        id: ProductId::new(row.try_get::<i64, _>("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        category: row.try_get("category").map_err(decode)?,
        price: row.try_get("price").map_err(decode)?,
        stock: row.try_get("stock").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if code.starts_with("23") => StoreError::Constraint(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
