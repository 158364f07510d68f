//! Review sources.

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::SentimentError;
use crate::types::{FetchedProduct, FetchedReview};

/// Supplies a product name and its reviews for a product reference (URL or ID).
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch the product name and reviews for `product_ref`.
    ///
    /// # Errors
    ///
    /// Implementations return [`SentimentError`] when the reviews cannot be fetched.
    async fn fetch_reviews(&self, product_ref: &str) -> Result<FetchedProduct, SentimentError>;
}

const MOCK_REVIEW_COUNT: usize = 15;

const SAMPLE_REVIEWS: &[&str] = &[
    "Battery life is great and lasts all day.",
    "The camera quality is average, could be better.",
    "Build quality feels premium and sturdy.",
    "Performance is snappy, apps open quickly.",
    "Display is vibrant but a bit dim outdoors.",
    "Customer support was helpful and quick.",
    "Price is a bit high for the features.",
];

/// Stand-in for a real scraper.
///
/// Output depends only on the product reference: the name is derived from a
/// hash of the reference and rating jitter comes from an RNG seeded with the
/// same hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockReviewSource;

#[async_trait]
impl ReviewSource for MockReviewSource {
    async fn fetch_reviews(&self, product_ref: &str) -> Result<FetchedProduct, SentimentError> {
        let hash = ref_hash(product_ref);
        let mut rng = StdRng::seed_from_u64(u64::from(hash.unsigned_abs()));

        let reviews = (0..MOCK_REVIEW_COUNT)
            .map(|i| {
                // Offsets -2..=2 scaled by 0.5, so base ratings run 2.0 to 4.0.
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
                let offset = ((i % 5) as i64 - 2) as f64 * 0.5;
                FetchedReview {
                    rating: 3.0 + offset + rng.random_range(0.0..0.5),
                    content: SAMPLE_REVIEWS[i % SAMPLE_REVIEWS.len()].to_string(),
                }
            })
            .collect();

        tracing::debug!(product_ref, count = MOCK_REVIEW_COUNT, "generated mock reviews");

        Ok(FetchedProduct {
            name: format!("Product {}", hash.unsigned_abs() % 1000),
            reviews,
        })
    }
}

/// 32-bit `h = 31 * h + unit` over the UTF-16 code units of `s`, wrapping.
fn ref_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0_i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}
