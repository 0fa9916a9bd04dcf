//! Scorer: per-line content/context/clause similarity, blended into a final score.

use std::collections::HashSet;

use super::config::{EvidenceResolveConfig, ScoreStrategy};
use super::index::normalize_text;

fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Longest-substring-alignment ratio: slide the shorter string across the longer
/// one and keep the best normalized-edit-distance match, scaled to 0-100.
fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let shorter_len = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();

    if longer_chars.len() <= shorter_len {
        return strsim::normalized_levenshtein(shorter, longer) * 100.0;
    }

    let mut best = 0.0f64;
    for start in 0..=(longer_chars.len() - shorter_len) {
        let window: String = longer_chars[start..start + shorter_len].iter().collect();
        let score = strsim::normalized_levenshtein(shorter, &window) * 100.0;
        if score > best {
            best = score;
        }
    }
    best
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Token-set ratio: scores the shared-token core against each side's unique tokens,
/// taking the best of the three alignments (fuzzywuzzy's token_set_ratio shape).
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<&str> = tokenize(a).into_iter().collect();
    let tokens_b: HashSet<&str> = tokenize(b).into_iter().collect();

    let mut intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    intersection.sort_unstable();
    let mut diff_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    diff_a.sort_unstable();
    let mut diff_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();
    diff_b.sort_unstable();

    let sorted_sect = intersection.join(" ");
    let sorted_1 = [sorted_sect.as_str(), &diff_a.join(" ")]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let sorted_2 = [sorted_sect.as_str(), &diff_b.join(" ")]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let mut best = ratio(&sorted_1, &sorted_2);
    if !sorted_sect.is_empty() {
        best = best.max(ratio(&sorted_sect, &sorted_1)).max(ratio(&sorted_sect, &sorted_2));
    }
    best
}

/// Score a (query, target) pair of already-normalised strings, 0-100.
pub fn score_pair(query_norm: &str, target_norm: &str, config: &EvidenceResolveConfig) -> f64 {
    if query_norm.is_empty() || target_norm.is_empty() {
        return 0.0;
    }

    let base = if query_norm.chars().count() <= config.short_query_max_len {
        ratio(query_norm, target_norm)
    } else {
        let partial = partial_ratio(query_norm, target_norm);
        let token_set = token_set_ratio(query_norm, target_norm);
        let plain_ratio = ratio(query_norm, target_norm);

        match config.score_strategy {
            ScoreStrategy::Max => partial.max(token_set).max(plain_ratio),
            ScoreStrategy::Weighted => {
                let weight_sum = config.weight_partial + config.weight_token_set + config.weight_ratio;
                if weight_sum <= 0.0 {
                    partial.max(token_set).max(plain_ratio)
                } else {
                    (partial * config.weight_partial
                        + token_set * config.weight_token_set
                        + plain_ratio * config.weight_ratio)
                        / weight_sum
                }
            }
        }
    };

    apply_token_overlap_penalty(base, query_norm, target_norm, config)
}

fn apply_token_overlap_penalty(
    score: f64,
    query_norm: &str,
    target_norm: &str,
    config: &EvidenceResolveConfig,
) -> f64 {
    let q_tokens: HashSet<&str> = tokenize(query_norm).into_iter().filter(|t| t.len() >= 3).collect();
    if q_tokens.is_empty() {
        return score;
    }

    let target_tokens: HashSet<&str> = tokenize(target_norm).into_iter().collect();
    let overlap = q_tokens.iter().filter(|t| target_tokens.contains(*t)).count();

    if q_tokens.len() >= 4 && overlap < config.min_token_overlap_count {
        return score.min(config.low_overlap_score_cap);
    }

    let overlap_ratio = overlap as f64 / q_tokens.len() as f64;
    if overlap_ratio < config.min_token_overlap_ratio {
        return score.min((config.low_overlap_score_cap + 10.0).min(100.0));
    }

    score
}

/// Best content score (and the query that produced it) for one line.
pub fn best_content_score(
    line_normalized: &str,
    content_queries: &[String],
    config: &EvidenceResolveConfig,
) -> (f64, String) {
    let mut best_score = 0.0f64;
    let mut best_query = String::new();

    for query in content_queries {
        let query_norm = normalize_text(query);
        let score = score_pair(&query_norm, line_normalized, config);
        if best_query.is_empty() || score > best_score {
            best_score = score;
            best_query = query.clone();
        }
    }

    (best_score, best_query)
}

/// Best context score over a pre-built context string.
pub fn best_context_score(
    context_string: &str,
    context_queries: &[String],
    config: &EvidenceResolveConfig,
) -> f64 {
    let mut best = 0.0f64;
    for query in context_queries {
        let query_norm = normalize_text(query);
        let score = score_pair(&query_norm, context_string, config);
        if score > best {
            best = score;
        }
    }
    best
}

/// Whether `token` appears in `haystack` as a whole number-token (not embedded in a
/// longer digit/dot run).
pub fn clause_token_present(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let token_lower = token.to_lowercase();
    let haystack_lower = haystack.to_lowercase();

    let mut search_from = 0usize;
    while let Some(pos) = haystack_lower[search_from..].find(&token_lower) {
        let start = search_from + pos;
        let end = start + token_lower.len();

        let before_ok = haystack_lower[..start]
            .chars()
            .next_back()
            .map(|c| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(true);
        let after_ok = haystack_lower[end..]
            .chars()
            .next()
            .map(|c| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(true);

        if before_ok && after_ok {
            return true;
        }
        search_from = start + 1;
        if search_from >= haystack_lower.len() {
            break;
        }
    }
    false
}

/// Clause score for one candidate: 100 if any clause candidate is whole-token
/// present in the line or its context string, else 0.
pub fn clause_score(line_normalized: &str, context_string: &str, clause_candidates: &[String]) -> f64 {
    for token in clause_candidates {
        if clause_token_present(line_normalized, token) || clause_token_present(context_string, token) {
            return 100.0;
        }
    }
    0.0
}

/// Blend content/context/clause into the final score.
pub fn blend(content: f64, context: f64, clause: f64, config: &EvidenceResolveConfig) -> f64 {
    let weight_sum = config.content_weight + config.context_weight + config.clause_weight;
    if weight_sum <= 0.0 {
        return content;
    }
    (content * config.content_weight + context * config.context_weight + clause * config.clause_weight)
        / weight_sum
}
