//! Database operations for `products` and `reviews`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub url: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub product_id: i64,
    pub rating: f64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// products operations
// ---------------------------------------------------------------------------

/// Return the product stored under `url`, creating it with `name` if absent.
///
/// An existing product keeps its original name; only `updated_at` is touched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn find_or_create_product(
    pool: &PgPool,
    url: &str,
    name: &str,
) -> Result<ProductRow, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "INSERT INTO products (url, name) \
         VALUES ($1, $2) \
         ON CONFLICT (url) DO UPDATE SET updated_at = NOW() \
         RETURNING id, url, name, created_at, updated_at",
    )
    .bind(url)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// reviews operations
// ---------------------------------------------------------------------------

/// Replace every review of a product with `reviews` (`(rating, content)` pairs).
///
/// Runs in one transaction; returns the inserted rows in input order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is rolled back.
pub async fn replace_product_reviews(
    pool: &PgPool,
    product_id: i64,
    reviews: &[(f64, &str)],
) -> Result<Vec<ReviewRow>, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM reviews WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

    let ratings: Vec<f64> = reviews.iter().map(|(rating, _)| *rating).collect();
    let contents: Vec<String> = reviews
        .iter()
        .map(|(_, content)| (*content).to_string())
        .collect();

    let mut rows = sqlx::query_as::<_, ReviewRow>(
        "INSERT INTO reviews (product_id, rating, content) \
         SELECT $1, r.rating, r.content \
         FROM UNNEST($2::float8[], $3::text[]) WITH ORDINALITY AS r(rating, content, ord) \
         ORDER BY r.ord \
         RETURNING id, product_id, rating, content, created_at",
    )
    .bind(product_id)
    .bind(&ratings)
    .bind(&contents)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    // RETURNING order is unspecified; ids follow insertion order.
    rows.sort_by_key(|r| r.id);
    Ok(rows)
}

/// List the reviews of a product in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_product_reviews(
    pool: &PgPool,
    product_id: i64,
) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, product_id, rating, content, created_at \
         FROM reviews \
         WHERE product_id = $1 \
         ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
