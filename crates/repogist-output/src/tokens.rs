//! Best-effort token estimation for assembled content.

/// Injected token-counting capability.
///
/// The snapshot summary carries an optional token estimate; implementations
/// return `None` on any failure and the estimate is simply omitted — it is
/// never an error.
pub trait TokenEstimator: Send + Sync {
    /// Estimate the number of tokens in `text`, or `None` if unavailable.
    fn estimate(&self, text: &str) -> Option<u64>;
}

/// Character-ratio estimator: roughly one token per N characters.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    chars_per_token: u64,
}

impl CharRatioEstimator {
    /// Create an estimator with a custom character-per-token ratio.
    pub fn new(chars_per_token: u64) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        // Around four characters per token for source code and English text.
        Self::new(4)
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> Option<u64> {
        Some(text.chars().count() as u64 / self.chars_per_token)
    }
}

/// Format a raw token count for display: `743`, `12.3k`, `1.2M`.
pub fn format_token_count(total: u64) -> String {
    if total > 1_000_000 {
        format!("{:.1}M", total as f64 / 1_000_000.0)
    } else if total > 1_000 {
        format!("{:.1}k", total as f64 / 1_000.0)
    } else {
        total.to_string()
    }
}
