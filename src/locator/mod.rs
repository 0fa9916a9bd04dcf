//! Evidence Locator: given a PDF and a free-form evidence excerpt, finds the page,
//! a representative quote, and one or more bounding boxes identifying where the
//! evidence appears.
//!
//! The entry point is [`locate_evidence`]. It composes five independently testable
//! stages, in fixed order: [`index`] (parse + cache), [`query`] (derive search
//! inputs from the evidence text), scoring, ranking/gating, and [`highlight`]
//! (refine to precise rectangles). Surrounding concerns — HTTP routing, report
//! storage, document export — are not part of this crate.

pub mod config;
mod error;
pub mod index;
mod highlight;
mod query;
mod ranker;
mod scorer;

use std::path::Path;

use crate::document::PdfDocument;
use crate::geometry::Rect;

pub use config::{EvidenceResolveConfig, ScoreStrategy};
pub use error::{Error, Result};
pub use index::IndexedLine;
pub use query::QueryBundle;

/// A rectangle in the output envelope: PDF points, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl From<Rect> for BBox {
    fn from(r: Rect) -> Self {
        Self {
            x0: r.left(),
            y0: r.top(),
            x1: r.right(),
            y1: r.bottom(),
        }
    }
}

impl From<BBox> for Rect {
    fn from(b: BBox) -> Self {
        Rect::from_points(b.x0, b.y0, b.x1, b.y1)
    }
}

/// How the winning line was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Final score cleared `exact_threshold`.
    Exact,
    /// Final score cleared `approximate_threshold` but not `exact_threshold`.
    Fuzzy,
    /// Reserved for externally-curated anchors; never produced by `locate_evidence`.
    Manual,
}

/// Confidence tier of a [`LocatorResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStatus {
    /// Top candidate cleared the content gate and `exact_threshold`.
    ResolvedExact,
    /// Top candidate cleared the content gate and `approximate_threshold`.
    ResolvedApproximate,
    /// No candidate cleared the gate; `page` is a best-effort fallback.
    Unresolved,
}

/// Output of [`locate_evidence`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocatorResult {
    /// Chosen page, 1-based.
    pub page: u32,
    /// Representative text, trimmed to `quote_max_length`.
    pub quote: String,
    /// The winning line's rectangle, if resolved.
    pub bbox: Option<BBox>,
    /// The refined highlight set, if resolved (`len() >= 1`).
    pub bboxes: Option<Vec<BBox>>,
    /// `final_score / 100`, rounded to 4 decimals.
    pub match_score: f64,
    /// How the match was produced.
    pub match_method: MatchMethod,
    /// Confidence tier.
    pub status: LocatorStatus,
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        s.chars().take(max_len).collect()
    }
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

/// Locate `evidence_text` (optionally hinted by `clause_keyword`) inside the PDF at
/// `pdf_path`, using `resolve_config` (or the process-wide `EVIDENCE_*`-derived
/// defaults if `None`).
///
/// Only a failure to open or parse the PDF itself escapes as
/// `Err(Error::IndexBuildFailure(..))`; every other failure mode (no extractable
/// text, no confident match, a highlight-search error) degrades to a
/// `LocatorResult` with `status = unresolved` and a best-effort page.
pub fn locate_evidence(
    pdf_path: impl AsRef<Path>,
    evidence_text: &str,
    clause_keyword: Option<&str>,
    resolve_config: Option<&EvidenceResolveConfig>,
) -> Result<LocatorResult> {
    let owned_default;
    let config = match resolve_config {
        Some(c) => c,
        None => {
            owned_default = EvidenceResolveConfig::from_env_cached();
            owned_default
        }
    };

    let pdf_path = pdf_path.as_ref();
    let lines = index::get_or_build_index(pdf_path)?;

    if lines.is_empty() {
        log::warn!("evidence locator: index has no extractable text for {}", pdf_path.display());
        return Ok(LocatorResult {
            page: config.page_min,
            quote: truncate_chars(evidence_text.trim(), config.quote_max_length),
            bbox: None,
            bboxes: None,
            match_score: 0.0,
            match_method: MatchMethod::Fuzzy,
            status: LocatorStatus::Unresolved,
        });
    }

    let bundle = query::build_query_bundle(
        evidence_text,
        clause_keyword,
        config.query_limit,
        config.query_max_length,
        config.segment_min_length,
        config.segment_max_length,
        config.quote_max_length,
    );

    let scored = ranker::rank_candidates(&lines, &bundle, config);
    let decision = ranker::decide(&lines, &scored, &bundle, evidence_text, config);

    match decision {
        ranker::GateDecision::Resolved { exact, candidate } => {
            let winning_line = &lines[candidate.line_pos];
            log::debug!(
                "evidence locator: resolved on page {} (exact={exact}, final={})",
                winning_line.page,
                candidate.r#final
            );

            let needles = highlight::collect_needles(
                evidence_text,
                &candidate.best_query,
                &winning_line.text,
                config.query_max_length,
            );

            let mut doc = PdfDocument::open(pdf_path)?;
            let rects = highlight::resolve_highlights(&mut doc, winning_line, &needles);

            Ok(LocatorResult {
                page: winning_line.page,
                quote: truncate_chars(&winning_line.text, config.quote_max_length),
                bbox: Some(BBox::from(winning_line.bbox)),
                bboxes: Some(rects.into_iter().map(BBox::from).collect()),
                match_score: round4(candidate.r#final / 100.0),
                match_method: if exact { MatchMethod::Exact } else { MatchMethod::Fuzzy },
                status: if exact {
                    LocatorStatus::ResolvedExact
                } else {
                    LocatorStatus::ResolvedApproximate
                },
            })
        }
        ranker::GateDecision::Unresolved { page, final_score } => {
            log::debug!("evidence locator: unresolved, falling back to page {page}");
            Ok(LocatorResult {
                page: page.clamp(config.page_min, config.page_max),
                quote: truncate_chars(evidence_text.trim(), config.quote_max_length),
                bbox: None,
                bboxes: None,
                match_score: round4(final_score / 100.0),
                match_method: MatchMethod::Fuzzy,
                status: LocatorStatus::Unresolved,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_roundtrips_through_rect() {
        let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
        let bbox = BBox::from(rect);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.y1, 70.0);
        let back: Rect = bbox.into();
        assert_eq!(back.left(), rect.left());
        assert_eq!(back.bottom(), rect.bottom());
    }

    #[test]
    fn match_method_serializes_snake_case() {
        let json = serde_json::to_string(&MatchMethod::Exact).unwrap();
        assert_eq!(json, "\"exact\"");
        let json = serde_json::to_string(&LocatorStatus::ResolvedApproximate).unwrap();
        assert_eq!(json, "\"resolved_approximate\"");
    }

    #[test]
    fn round4_rounds_to_four_decimals() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0), 1.0);
    }

    proptest::proptest! {
        /// `round4` never moves a value by more than half a ten-thousandth, and is
        /// idempotent once applied — the rounding invariant behind `match_score`.
        #[test]
        fn round4_is_close_and_idempotent(x in -1000.0f64..1000.0) {
            let once = round4(x);
            proptest::prop_assert!((once - x).abs() <= 0.00005 + 1e-9);
            proptest::prop_assert_eq!(round4(once), once);
        }

        /// `final_score / 100` rounded to 4 decimals stays inside `[0, 1]` for any
        /// final score on the contractual 0-100 scale, matching `LocatorResult`'s
        /// `match_score` invariant.
        #[test]
        fn match_score_from_final_score_stays_in_unit_range(final_score in 0.0f64..=100.0) {
            let match_score = round4(final_score / 100.0);
            proptest::prop_assert!((0.0..=1.0).contains(&match_score));
        }
    }
}
