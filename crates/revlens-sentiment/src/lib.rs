//! Review sentiment analysis for revlens.
//!
//! Builds a prompt from a product name and its review texts, sends it to the
//! configured provider (mock, OpenAI-style chat completions, or Gemini
//! `generateContent`), and normalizes whatever comes back into a
//! [`SentimentResult`]. Malformed provider output degrades to the fixed mock
//! result; only transport failures reach the caller as errors.

pub mod analyzer;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod reviews;
pub mod types;

pub use analyzer::{analyze_sentiment, SentimentAnalyzer};
pub use error::SentimentError;
pub use normalize::normalize;
pub use prompt::build_prompt;
pub use providers::mock_result;
pub use reviews::{MockReviewSource, ReviewSource};
pub use types::{FetchedProduct, FetchedReview, SentimentResult, SentimentSummary};
