//! Coerce untrusted provider text into a [`SentimentResult`].

use serde_json::Value;

use crate::providers::mock_result;
use crate::types::{SentimentResult, SentimentSummary};

/// Normalize raw provider output.
///
/// Expects a JSON document with optional `sentimentSummary` (an object with
/// `positive`, `neutral`, `negative`) and `sampleInsights` (an array). Each
/// bucket is coerced independently: numbers and numeric strings are kept,
/// `true` counts as `1`, and anything else (missing, non-numeric, negative,
/// out of `f64` range) becomes `0`.
/// Insights keep at most the first five array entries in order.
///
/// Text that is not JSON at all, or a bare `null` document, yields the fixed
/// [`mock_result`]. This function never fails.
#[must_use]
pub fn normalize(raw_text: &str, product_name: &str) -> SentimentResult {
    let parsed: Value = match serde_json::from_str(raw_text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                product = product_name,
                error = %e,
                "provider output is not valid JSON; using fallback result"
            );
            return mock_result();
        }
    };

    if parsed.is_null() {
        tracing::warn!(
            product = product_name,
            "provider output is a null document; using fallback result"
        );
        return mock_result();
    }

    let summary = parsed.get("sentimentSummary");
    let bucket = |key: &str| {
        summary
            .and_then(|s| s.get(key))
            .map_or(0.0, coerce_non_negative)
    };

    SentimentResult {
        sentiment_summary: SentimentSummary {
            positive: bucket("positive"),
            neutral: bucket("neutral"),
            negative: bucket("negative"),
        },
        sample_insights: parsed
            .get("sampleInsights")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .take(SentimentResult::MAX_INSIGHTS)
                    .map(insight_text)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn coerce_non_negative(value: &Value) -> f64 {
    let number = match value {
        // Numbers keep their source literal, so `1e400` arrives here as text
        // and parses to infinity instead of failing the whole document.
        Value::Number(n) => n.to_string().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => n,
        _ => 0.0,
    }
}

fn insight_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
