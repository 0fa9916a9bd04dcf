//! Highlight Resolver: re-searches the winning page with evidence-derived needles
//! to produce one or more precise rectangles, tolerating any search failure.

use regex::RegexBuilder;

use crate::document::PdfDocument;
use crate::geometry::Rect;
use crate::search::{SearchOptions, TextSearcher};

use super::index::{normalize_text, IndexedLine};
use super::query::derive_body;

const MIN_NEEDLE_LENGTH: usize = 12;
const GROUP_GAP_FACTOR: f32 = 1.8;

fn sanitize_needle(raw: &str) -> String {
    derive_body(raw)
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Build the deduplicated, priority-ordered needle list for highlight search.
pub fn collect_needles(
    evidence_text: &str,
    best_query: &str,
    winning_line_text: &str,
    query_max_length: usize,
) -> Vec<String> {
    let max_len = (query_max_length * 2).max(220);
    let mut raw: Vec<String> = Vec::new();

    raw.extend(super::query::extract_quoted_segments(evidence_text));

    if !best_query.trim().is_empty() {
        raw.push(best_query.to_string());
    }

    if let Some(colon_pos) = evidence_text.find(':') {
        let after_first = evidence_text[colon_pos + 1..].trim().to_string();
        if !after_first.is_empty() {
            raw.push(after_first);
        }
        if let Some(last_colon_pos) = evidence_text.rfind(':') {
            if last_colon_pos != colon_pos {
                let after_last = evidence_text[last_colon_pos + 1..].trim().to_string();
                if !after_last.is_empty() {
                    raw.push(after_last);
                }
            }
        }
    }

    raw.push(evidence_text.to_string());
    raw.push(winning_line_text.to_string());

    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for candidate in raw {
        let sanitized = truncate_chars(&sanitize_needle(&candidate), max_len);
        if sanitized.chars().count() < MIN_NEEDLE_LENGTH {
            continue;
        }
        let key = normalize_text(&sanitized);
        if seen.insert(key) {
            out.push(sanitized);
        }
    }
    out
}

fn search_needle_rects(doc: &mut PdfDocument, page_idx: usize, needle: &str) -> crate::error::Result<Vec<Rect>> {
    let pattern = regex::escape(needle);
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| crate::error::Error::InvalidPdf(format!("invalid highlight pattern: {e}")))?;

    let options = SearchOptions::new();
    let results = TextSearcher::search_page(doc, page_idx, &regex, &options)?;

    let mut rects = Vec::new();
    for result in results {
        for bbox in result.span_boxes {
            if bbox.width > 0.0 && bbox.height > 0.0 {
                rects.push(bbox);
            }
        }
    }
    Ok(rects)
}

/// Sort by `(y0, x0)` and split into groups whenever the vertical gap exceeds
/// `1.8 * max(prev_height, cur_height)`.
fn group_vertically(mut rects: Vec<Rect>) -> Vec<Vec<Rect>> {
    rects.sort_by(|a, b| {
        (a.top(), a.left())
            .partial_cmp(&(b.top(), b.left()))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut groups: Vec<Vec<Rect>> = Vec::new();
    let mut current: Vec<Rect> = Vec::new();
    let mut prev: Option<Rect> = None;

    for rect in rects {
        if let Some(p) = prev {
            let gap = rect.top() - p.bottom();
            let threshold = p.height.max(rect.height) * GROUP_GAP_FACTOR;
            if gap > threshold {
                groups.push(std::mem::take(&mut current));
            }
        }
        prev = Some(rect);
        current.push(rect);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn union_all(rects: &[Rect]) -> Rect {
    let mut acc = rects[0];
    for r in &rects[1..] {
        acc = acc.union(r);
    }
    acc
}

/// Selection key: `(count, min(needle_length, 600), -|center_y diff|)`, larger is better.
fn group_key(group: &[Rect], needle_length: usize, anchor_center_y: f32) -> (usize, usize, f64) {
    let union = union_all(group);
    let diff = (union.center().y - anchor_center_y).abs() as f64;
    (group.len(), needle_length.min(600), -diff)
}

fn best_group_for_needle(rects: Vec<Rect>, needle_length: usize, anchor_center_y: f32) -> Option<(Vec<Rect>, (usize, usize, f64))> {
    if rects.is_empty() {
        return None;
    }
    let groups = group_vertically(rects);
    groups
        .into_iter()
        .map(|g| {
            let key = group_key(&g, needle_length, anchor_center_y);
            (g, key)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Produce the final highlight rectangle set for the winning line.
///
/// Fault-tolerant: any search failure (or an empty result from every needle) is
/// absorbed and yields `[winning_line.bbox]`. A failure on any single needle
/// aborts the whole resolution rather than being skipped — a later needle's
/// rectangles must not win over an error the caller never sees.
pub fn resolve_highlights(doc: &mut PdfDocument, winning_line: &IndexedLine, needles: &[String]) -> Vec<Rect> {
    let page_idx = (winning_line.page.saturating_sub(1)) as usize;
    let anchor_center_y = winning_line.bbox.center().y;

    let mut best: Option<(Vec<Rect>, (usize, usize, f64))> = None;

    for needle in needles {
        let rects = match search_needle_rects(doc, page_idx, needle) {
            Ok(rects) => rects,
            Err(e) => {
                log::warn!("evidence locator: {}", super::Error::HighlightSearchFailure(e));
                return vec![winning_line.bbox];
            }
        };

        if let Some((group, key)) = best_group_for_needle(rects, needle.chars().count(), anchor_center_y) {
            let replace = match &best {
                Some((_, best_key)) => key > *best_key,
                None => true,
            };
            if replace {
                best = Some((group, key));
            }
        }
    }

    best.map(|(rects, _)| rects).unwrap_or_else(|| vec![winning_line.bbox])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_needles_includes_quoted_and_full_evidence() {
        let evidence = r#"From report: "The Contractor shall finalise the EMP within forty five days of acceptance.""#;
        let needles = collect_needles(evidence, "", "fallback line text of sufficient length", 260);
        assert!(!needles.is_empty());
        assert!(needles.iter().any(|n| n.contains("Contractor")));
    }

    #[test]
    fn short_needles_are_discarded() {
        let needles = collect_needles("hi", "", "short", 260);
        assert!(needles.is_empty());
    }

    #[test]
    fn group_vertically_splits_on_large_gap() {
        let close = vec![
            Rect::from_points(10.0, 10.0, 200.0, 22.0),
            Rect::from_points(10.0, 22.0, 200.0, 34.0),
        ];
        let groups = group_vertically(close);
        assert_eq!(groups.len(), 1);

        let far = vec![
            Rect::from_points(10.0, 10.0, 200.0, 22.0),
            Rect::from_points(10.0, 500.0, 200.0, 512.0),
        ];
        let groups = group_vertically(far);
        assert_eq!(groups.len(), 2);
    }
}
