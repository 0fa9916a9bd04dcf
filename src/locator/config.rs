//! Tuning configuration for the evidence locator.
//!
//! Mirrors [`crate::config::PdfConfig`]'s plain-struct-plus-builder shape, but adds a
//! process-scope environment variable loader: the locator is usually embedded in a
//! long-running process that wants one set of tuned constants for the whole run,
//! read once at startup from `EVIDENCE_*` variables.

use std::sync::OnceLock;

/// How the scorer blends `partial`, `token_set`, and `ratio` similarity measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStrategy {
    /// Weighted mean of the three measures (falls back to `Max` if weights sum to <= 0).
    Weighted,
    /// Simple maximum of the three measures.
    Max,
}

impl ScoreStrategy {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "weighted" => Some(ScoreStrategy::Weighted),
            "max" => Some(ScoreStrategy::Max),
            _ => None,
        }
    }
}

/// Tuning constants for [`super::locate_evidence`].
///
/// Defaults match the values validated against production evidence-location
/// workloads. Values are on a 0-100 scale unless noted otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceResolveConfig {
    /// Minimum `final` score for `resolved_exact`.
    pub exact_threshold: f64,
    /// Minimum `final` score for `resolved_approximate`.
    pub approximate_threshold: f64,
    /// Retained for compatibility; superseded by `clause_weight` and never applied.
    pub clause_bonus: f64,
    /// Weight of the content score in the final blend.
    pub content_weight: f64,
    /// Weight of the context score in the final blend.
    pub context_weight: f64,
    /// Weight of the clause score in the final blend.
    pub clause_weight: f64,
    /// Minimum content score required to resolve at all (the content gate).
    pub content_min_resolve: f64,
    /// Minimum content score required to use a candidate's page as the unresolved fallback.
    pub content_fallback_min: f64,
    /// Number of top-content lines carried forward into context/clause scoring.
    pub candidate_limit: usize,
    /// How partial/token_set/ratio are combined into a content score.
    pub score_strategy: ScoreStrategy,
    /// Weight of the `partial` measure under `Weighted`.
    pub weight_partial: f64,
    /// Weight of the `token_set` measure under `Weighted`.
    pub weight_token_set: f64,
    /// Weight of the `ratio` measure under `Weighted`.
    pub weight_ratio: f64,
    /// Maximum number of content/context queries retained after dedup.
    pub query_limit: usize,
    /// Maximum length of the body text used as a content/context query.
    pub query_max_length: usize,
    /// Maximum length of a comma/period/semicolon/newline-split segment query.
    pub segment_max_length: usize,
    /// Minimum length of a split segment to be considered a query.
    pub segment_min_length: usize,
    /// Queries at or below this length use `ratio` alone, skipping partial/token_set.
    pub short_query_max_len: usize,
    /// Minimum overlapping-token count before the low-overlap penalty lifts.
    pub min_token_overlap_count: usize,
    /// Minimum overlap ratio before the (lesser) low-overlap penalty lifts.
    pub min_token_overlap_ratio: f64,
    /// Score cap applied under the token-overlap penalty.
    pub low_overlap_score_cap: f64,
    /// Maximum length of the `quote` field in a `LocatorResult`.
    pub quote_max_length: usize,
    /// Lowest valid page number (1-based).
    pub page_min: u32,
    /// Highest valid page number.
    pub page_max: u32,
}

impl Default for EvidenceResolveConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 88.0,
            approximate_threshold: 62.0,
            clause_bonus: 6.0,
            content_weight: 0.70,
            context_weight: 0.20,
            clause_weight: 0.10,
            content_min_resolve: 55.0,
            content_fallback_min: 45.0,
            candidate_limit: 120,
            score_strategy: ScoreStrategy::Weighted,
            weight_partial: 0.45,
            weight_token_set: 0.45,
            weight_ratio: 0.10,
            query_limit: 8,
            query_max_length: 260,
            segment_max_length: 220,
            segment_min_length: 18,
            short_query_max_len: 12,
            min_token_overlap_count: 2,
            min_token_overlap_ratio: 0.2,
            low_overlap_score_cap: 55.0,
            quote_max_length: 380,
            page_min: 1,
            page_max: 200,
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

impl EvidenceResolveConfig {
    /// Load configuration from `EVIDENCE_*` environment variables, falling back to
    /// defaults for missing or malformed values and clamping out-of-range values.
    ///
    /// This performs the env read every call; use [`EvidenceResolveConfig::from_env_cached`]
    /// for the process-wide memoized accessor.
    pub fn from_env() -> Self {
        let d = Self::default();

        let exact_threshold = env_f64("EVIDENCE_EXACT_THRESHOLD", d.exact_threshold).clamp(0.0, 100.0);
        let approximate_threshold =
            env_f64("EVIDENCE_APPROX_THRESHOLD", d.approximate_threshold).clamp(0.0, exact_threshold);
        let clause_bonus = env_f64("EVIDENCE_CLAUSE_BONUS", d.clause_bonus);

        let content_weight = env_f64("EVIDENCE_CONTENT_WEIGHT", d.content_weight).max(0.0);
        let context_weight = env_f64("EVIDENCE_CONTEXT_WEIGHT", d.context_weight).max(0.0);
        let clause_weight = env_f64("EVIDENCE_CLAUSE_WEIGHT", d.clause_weight).max(0.0);

        let content_min_resolve =
            env_f64("EVIDENCE_CONTENT_MIN_RESOLVE", d.content_min_resolve).clamp(0.0, 100.0);
        let content_fallback_min = env_f64("EVIDENCE_CONTENT_FALLBACK_MIN", d.content_fallback_min)
            .clamp(0.0, content_min_resolve);

        let candidate_limit = env_usize("EVIDENCE_CANDIDATE_LIMIT", d.candidate_limit).max(1);

        let score_strategy = std::env::var("EVIDENCE_SCORE_STRATEGY")
            .ok()
            .and_then(|v| ScoreStrategy::from_str(v.trim()))
            .unwrap_or(d.score_strategy);

        let weight_partial = env_f64("EVIDENCE_WEIGHT_PARTIAL", d.weight_partial).max(0.0);
        let weight_token_set = env_f64("EVIDENCE_WEIGHT_TOKEN_SET", d.weight_token_set).max(0.0);
        let weight_ratio = env_f64("EVIDENCE_WEIGHT_RATIO", d.weight_ratio).max(0.0);
        let (weight_partial, weight_token_set, weight_ratio) =
            if weight_partial + weight_token_set + weight_ratio <= 0.0 {
                (d.weight_partial, d.weight_token_set, d.weight_ratio)
            } else {
                (weight_partial, weight_token_set, weight_ratio)
            };

        let query_limit = env_usize("EVIDENCE_QUERY_LIMIT", d.query_limit).max(1);
        let query_max_length = env_usize("EVIDENCE_QUERY_MAX_LENGTH", d.query_max_length).max(1);
        let segment_max_length = env_usize("EVIDENCE_SEGMENT_MAX_LENGTH", d.segment_max_length).max(1);
        let segment_min_length = env_usize("EVIDENCE_SEGMENT_MIN_LENGTH", d.segment_min_length).max(1);
        let short_query_max_len = env_usize("EVIDENCE_SHORT_QUERY_MAX_LEN", d.short_query_max_len);

        let min_token_overlap_count =
            env_usize("EVIDENCE_MIN_TOKEN_OVERLAP_COUNT", d.min_token_overlap_count);
        let min_token_overlap_ratio =
            env_f64("EVIDENCE_MIN_TOKEN_OVERLAP_RATIO", d.min_token_overlap_ratio).clamp(0.0, 1.0);
        let low_overlap_score_cap =
            env_f64("EVIDENCE_LOW_OVERLAP_SCORE_CAP", d.low_overlap_score_cap).clamp(0.0, 100.0);

        let quote_max_length = env_usize("EVIDENCE_QUOTE_MAX_LENGTH", d.quote_max_length).max(1);

        let page_min = env_u32("EVIDENCE_PAGE_MIN", d.page_min).max(1);
        let page_max = env_u32("EVIDENCE_PAGE_MAX", d.page_max).max(page_min);

        Self {
            exact_threshold,
            approximate_threshold,
            clause_bonus,
            content_weight,
            context_weight,
            clause_weight,
            content_min_resolve,
            content_fallback_min,
            candidate_limit,
            score_strategy,
            weight_partial,
            weight_token_set,
            weight_ratio,
            query_limit,
            query_max_length,
            segment_max_length,
            segment_min_length,
            short_query_max_len,
            min_token_overlap_count,
            min_token_overlap_ratio,
            low_overlap_score_cap,
            quote_max_length,
            page_min,
            page_max,
        }
    }

    /// Process-wide memoized [`EvidenceResolveConfig::from_env`].
    ///
    /// Reads the environment once per process; later calls return the cached value
    /// even if the environment changes afterwards (matches the original service's
    /// once-per-process config load).
    pub fn from_env_cached() -> &'static Self {
        static CONFIG: OnceLock<EvidenceResolveConfig> = OnceLock::new();
        CONFIG.get_or_init(Self::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let c = EvidenceResolveConfig::default();
        assert_eq!(c.exact_threshold, 88.0);
        assert_eq!(c.approximate_threshold, 62.0);
        assert_eq!(c.candidate_limit, 120);
        assert_eq!(c.score_strategy, ScoreStrategy::Weighted);
        assert_eq!(c.page_min, 1);
        assert_eq!(c.page_max, 200);
    }

    #[test]
    fn approximate_threshold_clamped_below_exact() {
        std::env::set_var("EVIDENCE_EXACT_THRESHOLD", "50");
        std::env::set_var("EVIDENCE_APPROX_THRESHOLD", "90");
        let c = EvidenceResolveConfig::from_env();
        assert!(c.approximate_threshold <= c.exact_threshold);
        std::env::remove_var("EVIDENCE_EXACT_THRESHOLD");
        std::env::remove_var("EVIDENCE_APPROX_THRESHOLD");
    }

    #[test]
    fn malformed_weight_sum_resets_to_defaults() {
        std::env::set_var("EVIDENCE_WEIGHT_PARTIAL", "-5");
        std::env::set_var("EVIDENCE_WEIGHT_TOKEN_SET", "0");
        std::env::set_var("EVIDENCE_WEIGHT_RATIO", "0");
        let c = EvidenceResolveConfig::from_env();
        let d = EvidenceResolveConfig::default();
        assert_eq!(c.weight_partial, d.weight_partial);
        assert_eq!(c.weight_token_set, d.weight_token_set);
        assert_eq!(c.weight_ratio, d.weight_ratio);
        std::env::remove_var("EVIDENCE_WEIGHT_PARTIAL");
        std::env::remove_var("EVIDENCE_WEIGHT_TOKEN_SET");
        std::env::remove_var("EVIDENCE_WEIGHT_RATIO");
    }

    #[test]
    fn page_max_clamped_above_page_min() {
        std::env::set_var("EVIDENCE_PAGE_MIN", "50");
        std::env::set_var("EVIDENCE_PAGE_MAX", "10");
        let c = EvidenceResolveConfig::from_env();
        assert!(c.page_max >= c.page_min);
        std::env::remove_var("EVIDENCE_PAGE_MIN");
        std::env::remove_var("EVIDENCE_PAGE_MAX");
    }
}
