//! Database operations for the `analyses` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, PgPool};

use crate::DbError;

/// Values for a new `analyses` row.
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub user_id: i64,
    pub product_id: i64,
    /// Bound to `NUMERIC(5,2)`; callers round to two places.
    pub average_rating: Decimal,
    pub total_reviews: i32,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub sample_insights: &'a [String],
}

/// One dashboard entry: an analysis joined with its product.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisSummaryRow {
    pub id: i64,
    pub product_name: String,
    pub product_url: String,
    pub average_rating: Decimal,
    pub total_reviews: i32,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub sample_insights: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Insert an analysis and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis(pool: &PgPool, analysis: &NewAnalysis<'_>) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO analyses \
             (user_id, product_id, average_rating, total_reviews, \
              positive, neutral, negative, sample_insights) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id",
    )
    .bind(analysis.user_id)
    .bind(analysis.product_id)
    .bind(analysis.average_rating)
    .bind(analysis.total_reviews)
    .bind(analysis.positive)
    .bind(analysis.neutral)
    .bind(analysis.negative)
    .bind(Json(analysis.sample_insights))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List a user's most recent analyses, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_analyses_for_user(
    pool: &PgPool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<AnalysisSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalysisSummaryRow>(
        "SELECT a.id, \
                p.name AS product_name, \
                p.url AS product_url, \
                a.average_rating, \
                a.total_reviews, \
                a.positive, \
                a.neutral, \
                a.negative, \
                a.sample_insights, \
                a.created_at \
         FROM analyses a \
         JOIN products p ON p.id = a.product_id \
         WHERE a.user_id = $1 \
         ORDER BY a.created_at DESC, a.id DESC \
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
