//! Prompt construction shared by every network provider.

/// Build the analysis prompt for a product and its reviews.
///
/// Reviews are listed one per line as `#1: <text>`, `#2: <text>`, ... so that
/// providers can refer back to them by position. An empty review list still
/// yields the full instruction header.
#[must_use]
pub fn build_prompt<S: AsRef<str>>(product_name: &str, review_texts: &[S]) -> String {
    let reviews = review_texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("#{}: {}", i + 1, text.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the following product reviews and return ONLY JSON with keys: productName, \
         sentimentSummary {{positive, neutral, negative}}, sampleInsights (array of short phrases). \
         Product: {product_name}. Reviews:\n{reviews}"
    )
}
