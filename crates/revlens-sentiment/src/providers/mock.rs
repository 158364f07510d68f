use crate::types::{SentimentResult, SentimentSummary};

/// The fixed result returned by the mock provider and by every fallback path.
#[must_use]
pub fn mock_result() -> SentimentResult {
    SentimentResult {
        sentiment_summary: SentimentSummary {
            positive: 70.0,
            neutral: 20.0,
            negative: 10.0,
        },
        sample_insights: vec![
            "Great battery life".to_string(),
            "Camera is average".to_string(),
        ],
    }
}
