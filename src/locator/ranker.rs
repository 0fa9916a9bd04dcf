//! Ranker & Decision Gate: blends content/context/clause scores, retains the top
//! candidates, and decides whether to resolve or fall back.

use super::config::EvidenceResolveConfig;
use super::index::{normalize_text, IndexedLine};
use super::query::QueryBundle;
use super::scorer::{best_content_score, best_context_score, blend, clause_score, clause_token_present};

/// A line plus its four scores and the content query that produced the best match.
#[derive(Debug, Clone)]
pub struct ScoredLine {
    /// Index into the original `lines` slice.
    pub line_pos: usize,
    /// Best content score, 0-100.
    pub content: f64,
    /// Context score, 0-100.
    pub context: f64,
    /// Clause score, 0 or 100.
    pub clause: f64,
    /// Weighted blend of the three.
    pub r#final: f64,
    /// The content query that produced the best content score.
    pub best_query: String,
}

/// Outcome of the gate: either a resolved candidate or an unresolved fallback.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// A candidate cleared the content gate and a threshold.
    Resolved {
        /// Whether the `exact` or `approximate` threshold applied.
        exact: bool,
        /// The winning scored line.
        candidate: ScoredLine,
    },
    /// No candidate cleared the gate; carries a best-effort page and score.
    Unresolved {
        /// Best-effort fallback page (1-based).
        page: u32,
        /// The losing top candidate's final score (0 if there were no candidates at all).
        final_score: f64,
    },
}

fn context_string_for(lines: &[IndexedLine], candidate: &IndexedLine) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for line in lines {
        if line.page != candidate.page || line.block_index != candidate.block_index {
            continue;
        }
        if (line.line_index as i64 - candidate.line_index as i64).abs() <= 1 {
            parts.push(line.text.as_str());
        }
    }
    normalize_text(&parts.join(" "))
}

/// Compute content scores for every line, rank the top `candidate_limit` lines by
/// content + context + clause, and return them sorted `(final, content, context,
/// clause)` descending.
pub fn rank_candidates(
    lines: &[IndexedLine],
    bundle: &QueryBundle,
    config: &EvidenceResolveConfig,
) -> Vec<ScoredLine> {
    let mut content_scores: Vec<(usize, f64, String)> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let (score, query) = best_content_score(&line.normalized, &bundle.content_queries, config);
            (idx, score, query)
        })
        .collect();

    // Stable sort preserves document order as the tie-break.
    content_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    content_scores.truncate(config.candidate_limit);

    let mut scored: Vec<ScoredLine> = content_scores
        .into_iter()
        .map(|(idx, content, best_query)| {
            let line = &lines[idx];
            let context_string = context_string_for(lines, line);
            let context = best_context_score(&context_string, &bundle.context_queries, config);
            let clause = clause_score(&line.normalized, &context_string, &bundle.clause_candidates);
            let final_score = blend(content, context, clause, config);
            ScoredLine {
                line_pos: idx,
                content,
                context,
                clause,
                r#final: final_score,
                best_query,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        (b.r#final, b.content, b.context, b.clause)
            .partial_cmp(&(a.r#final, a.content, a.context, a.clause))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}

/// Best raw-content-score line across the *entire* index (not limited by
/// `candidate_limit`), used for the unresolved fallback chain.
fn best_content_candidate(lines: &[IndexedLine], bundle: &QueryBundle, config: &EvidenceResolveConfig) -> Option<(usize, f64)> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx, best_content_score(&line.normalized, &bundle.content_queries, config).0))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

fn first_clause_match_page(lines: &[IndexedLine], clause_candidates: &[String]) -> Option<u32> {
    for line in lines {
        for token in clause_candidates {
            if clause_token_present(&line.normalized, token) {
                return Some(line.page);
            }
        }
    }
    None
}

fn parse_leading_page(evidence_text: &str, page_min: u32, page_max: u32) -> u32 {
    super::query::LEADING_PAGE_RE
        .captures(evidence_text.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(page_min)
        .clamp(page_min, page_max)
}

/// Apply the gate to an already-ranked candidate list.
pub fn decide(
    lines: &[IndexedLine],
    scored: &[ScoredLine],
    bundle: &QueryBundle,
    evidence_text: &str,
    config: &EvidenceResolveConfig,
) -> GateDecision {
    if let Some(top) = scored.first() {
        if top.content >= config.content_min_resolve && top.r#final >= config.exact_threshold {
            return GateDecision::Resolved {
                exact: true,
                candidate: top.clone(),
            };
        }
        if top.content >= config.content_min_resolve && top.r#final >= config.approximate_threshold {
            return GateDecision::Resolved {
                exact: false,
                candidate: top.clone(),
            };
        }
    }

    let final_score = scored.first().map(|s| s.r#final).unwrap_or(0.0);

    if let Some((idx, content)) = best_content_candidate(lines, bundle, config) {
        if content >= config.content_fallback_min {
            return GateDecision::Unresolved {
                page: lines[idx].page,
                final_score,
            };
        }
    }

    if let Some(page) = first_clause_match_page(lines, &bundle.clause_candidates) {
        return GateDecision::Unresolved { page, final_score };
    }

    let page = parse_leading_page(evidence_text, config.page_min, config.page_max);
    GateDecision::Unresolved { page, final_score }
}
