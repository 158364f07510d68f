use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use revlens_sentiment::SentimentSummary;

use crate::middleware::{AuthUser, RequestId};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const RECENT_ANALYSES_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub(super) struct DashboardItem {
    pub id: i64,
    pub product_name: String,
    pub product_url: String,
    pub average_rating: Decimal,
    pub total_reviews: i32,
    pub sentiment_summary: SentimentSummary,
    pub sample_insights: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<revlens_db::AnalysisSummaryRow> for DashboardItem {
    fn from(row: revlens_db::AnalysisSummaryRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            product_url: row.product_url,
            average_rating: row.average_rating,
            total_reviews: row.total_reviews,
            sentiment_summary: SentimentSummary {
                positive: row.positive,
                neutral: row.neutral,
                negative: row.negative,
            },
            sample_insights: row.sample_insights.0,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<DashboardItem>>>, ApiError> {
    let rows =
        revlens_db::list_recent_analyses_for_user(&state.pool, user.id, RECENT_ANALYSES_LIMIT)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(DashboardItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
