use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use revlens_sentiment::{FetchedReview, SentimentSummary};

use crate::middleware::{AuthUser, RequestId};

use super::{
    json_body, map_db_error, map_sentiment_error, required_field, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

const FALLBACK_PRODUCT_NAME: &str = "Product";

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub product_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub product_name: String,
    pub average_rating: Decimal,
    pub total_reviews: i32,
    pub sentiment_summary: SentimentSummary,
    pub sample_insights: Vec<String>,
}

pub(super) async fn analyze_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let body = json_body(&req_id.0, payload)?;
    let product_url = required_field(&req_id.0, "product_url", body.product_url.as_deref())?;

    let fetched = state
        .reviews
        .fetch_reviews(product_url)
        .await
        .map_err(|e| map_sentiment_error(req_id.0.clone(), &e))?;

    // Only used when the product is new; an existing row keeps its stored name.
    let new_product_name = if fetched.name.trim().is_empty() {
        FALLBACK_PRODUCT_NAME
    } else {
        fetched.name.as_str()
    };

    let product = revlens_db::find_or_create_product(&state.pool, product_url, new_product_name)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let review_pairs: Vec<(f64, &str)> = fetched
        .reviews
        .iter()
        .map(|r| (r.rating, r.content.as_str()))
        .collect();
    revlens_db::replace_product_reviews(&state.pool, product.id, &review_pairs)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let result = state
        .analyzer
        .analyze(&fetched.name, &fetched.review_texts())
        .await
        .map_err(|e| map_sentiment_error(req_id.0.clone(), &e))?;

    let average_rating = average_rating(&fetched.reviews);
    let total_reviews = i32::try_from(fetched.reviews.len()).map_err(|_| {
        ApiError::new(&req_id.0, "validation_error", "too many reviews for one product")
    })?;
    let summary = result.sentiment_summary;

    revlens_db::insert_analysis(
        &state.pool,
        &revlens_db::NewAnalysis {
            user_id: user.id,
            product_id: product.id,
            average_rating,
            total_reviews,
            positive: summary.positive,
            neutral: summary.neutral,
            negative: summary.negative,
            sample_insights: &result.sample_insights,
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        user_id = user.id,
        product_id = product.id,
        total_reviews,
        provider = %state.analyzer.provider_kind(),
        "stored product analysis"
    );

    Ok(Json(ApiResponse {
        data: AnalyzeResponse {
            product_name: product.name,
            average_rating,
            total_reviews,
            sentiment_summary: summary,
            sample_insights: result.sample_insights,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Mean rating rounded half away from zero to two places; zero for no reviews.
fn average_rating(reviews: &[FetchedReview]) -> Decimal {
    if reviews.is_empty() {
        return Decimal::ZERO;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64;
    Decimal::from_f64(mean)
        .map_or(Decimal::ZERO, |d| {
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        })
}
