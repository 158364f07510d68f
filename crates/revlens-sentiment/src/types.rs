use serde::Serialize;

/// Per-bucket sentiment weights as reported by the provider.
///
/// Values are non-negative but not normalized: providers may return counts,
/// percentages, or anything in between, so the three buckets need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Normalized output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment_summary: SentimentSummary,
    /// Short phrases in provider order, at most [`SentimentResult::MAX_INSIGHTS`].
    pub sample_insights: Vec<String>,
}

impl SentimentResult {
    pub const MAX_INSIGHTS: usize = 5;
}

/// A single review as returned by a [`crate::ReviewSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedReview {
    pub rating: f64,
    pub content: String,
}

/// A product name together with its reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedProduct {
    pub name: String,
    pub reviews: Vec<FetchedReview>,
}

impl FetchedProduct {
    /// Review bodies in source order, as the analyzer consumes them.
    #[must_use]
    pub fn review_texts(&self) -> Vec<&str> {
        self.reviews.iter().map(|r| r.content.as_str()).collect()
    }
}
