//! PDF line index: flattens a document's extracted spans into ordered, cacheable
//! text lines with geometry, grouped into visual blocks for context scoring.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::document::PdfDocument;
use crate::error::Result as PdfResult;
use crate::geometry::Rect;
use crate::layout::TextSpan;

/// A single physical text line on one page, with its location and block grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedLine {
    /// 1-based page number.
    pub page: u32,
    /// Visible text with internal spacing preserved.
    pub text: String,
    /// Whitespace-collapsed, trimmed, lowercased form used for matching.
    pub normalized: String,
    /// Bounding box: min of span origins, max of span extents.
    pub bbox: Rect,
    /// Position of this line's block within its page.
    pub block_index: usize,
    /// Position of this line within its block.
    pub line_index: usize,
}

/// Collapse whitespace runs to single spaces, trim, and lowercase.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Vertical gap (in font-size multiples) below which consecutive spans are treated
/// as sharing a visual line.
const LINE_GAP_EPSILON: f32 = 0.4;
/// Vertical gap (in line-height multiples) below which consecutive lines are treated
/// as sharing a visual block (paragraph).
const BLOCK_GAP_FACTOR: f32 = 1.6;

/// Group a page's spans, already in extraction order, into visual lines.
///
/// Spans are assumed to arrive close to reading order (the engine's own extraction
/// guarantees this via `sequence`); a new line starts whenever a span's vertical
/// center moves far enough from the running line's center to no longer plausibly
/// be the same text line.
fn group_spans_into_lines(spans: &[TextSpan]) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_center_y = 0.0f32;
    let mut current_height = 0.0f32;

    for (idx, span) in spans.iter().enumerate() {
        let center_y = span.bbox.center().y;
        let height = span.bbox.height.max(span.font_size.max(1.0));

        if current.is_empty() {
            current.push(idx);
            current_center_y = center_y;
            current_height = height;
            continue;
        }

        let tolerance = current_height.max(height) * LINE_GAP_EPSILON;
        if (center_y - current_center_y).abs() <= tolerance {
            current.push(idx);
            current_height = current_height.max(height);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push(idx);
            current_center_y = center_y;
            current_height = height;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Group a page's visual lines into blocks (paragraphs) using vertical spacing.
fn group_lines_into_blocks(spans: &[TextSpan], lines: &[Vec<usize>]) -> Vec<usize> {
    let mut block_of_line = Vec::with_capacity(lines.len());
    let mut current_block = 0usize;
    let mut prev_bottom: Option<f32> = None;
    let mut prev_height = 0.0f32;

    for line in lines {
        let bbox = line_bbox(spans, line);
        let (top, bottom, height) = match bbox {
            Some(r) => (r.top(), r.bottom(), r.height),
            None => {
                block_of_line.push(current_block);
                continue;
            }
        };

        if let Some(prev) = prev_bottom {
            let gap = top - prev;
            let threshold = prev_height.max(height) * BLOCK_GAP_FACTOR;
            if gap > threshold {
                current_block += 1;
            }
        }

        block_of_line.push(current_block);
        prev_bottom = Some(bottom);
        prev_height = height;
    }

    block_of_line
}

fn line_bbox(spans: &[TextSpan], indices: &[usize]) -> Option<Rect> {
    let mut acc: Option<Rect> = None;
    for &idx in indices {
        let bbox = spans[idx].bbox;
        if bbox.width <= 0.0 || bbox.height <= 0.0 {
            continue;
        }
        acc = Some(match acc {
            Some(r) => r.union(&bbox),
            None => bbox,
        });
    }
    acc
}

fn line_text(spans: &[TextSpan], indices: &[usize]) -> String {
    let mut text = String::new();
    for (pos, &idx) in indices.iter().enumerate() {
        let span_text = spans[idx].text.trim();
        if span_text.is_empty() {
            continue;
        }
        if pos > 0 && !text.is_empty() && !text.ends_with(' ') {
            text.push(' ');
        }
        text.push_str(span_text);
    }
    text.trim().to_string()
}

/// Build the flat, ordered line index for one already-open document.
pub fn build_index_for_document(doc: &mut PdfDocument) -> PdfResult<Vec<IndexedLine>> {
    let page_count = doc.page_count()?;
    let mut out = Vec::new();

    for page_idx in 0..page_count {
        let spans = doc.extract_spans(page_idx)?;
        if spans.is_empty() {
            continue;
        }

        let lines = group_spans_into_lines(&spans);
        let block_of_line = group_lines_into_blocks(&spans, &lines);

        let mut line_index_in_block: HashMap<usize, usize> = HashMap::new();

        for (line_pos, line) in lines.iter().enumerate() {
            let bbox = match line_bbox(&spans, line) {
                Some(r) => r,
                None => continue,
            };
            let text = line_text(&spans, line);
            let normalized = normalize_text(&text);
            if normalized.is_empty() {
                continue;
            }

            let block_index = block_of_line[line_pos];
            let line_index = {
                let counter = line_index_in_block.entry(block_index).or_insert(0);
                let value = *counter;
                *counter += 1;
                value
            };

            out.push(IndexedLine {
                page: (page_idx + 1) as u32,
                text,
                normalized,
                bbox,
                block_index,
                line_index,
            });
        }
    }

    Ok(out)
}

struct CachedIndex {
    modified: SystemTime,
    lines: Vec<IndexedLine>,
}

lazy_static::lazy_static! {
    static ref LINE_INDEX_CACHE: Mutex<HashMap<PathBuf, CachedIndex>> = Mutex::new(HashMap::new());
}

/// Build (or reuse from cache) the line index for the PDF at `path`.
///
/// Keyed by the canonicalised absolute path; invalidated whenever the file's
/// modification time advances. The rebuild itself happens without holding the
/// cache mutex, matching the engine's existing "check cache, parse outside lock,
/// insert" idiom used for CMap caching.
///
/// Any failure to open or parse the PDF is converted into
/// [`super::Error::IndexBuildFailure`] and propagated to the caller.
pub fn get_or_build_index(path: &Path) -> super::Result<Vec<IndexedLine>> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let modified = std::fs::metadata(&canonical)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);

    if let Ok(cache) = LINE_INDEX_CACHE.lock() {
        if let Some(entry) = cache.get(&canonical) {
            if entry.modified == modified {
                log::debug!("evidence locator: cache hit for {}", canonical.display());
                return Ok(entry.lines.clone());
            }
        }
    }

    log::info!("evidence locator: building line index for {}", canonical.display());
    let mut doc = PdfDocument::open(&canonical)?;
    let lines = build_index_for_document(&mut doc)?;

    if let Ok(mut cache) = LINE_INDEX_CACHE.lock() {
        cache.insert(
            canonical.clone(),
            CachedIndex {
                modified,
                lines: lines.clone(),
            },
        );
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_lowercases() {
        assert_eq!(normalize_text("  Hello   World\n\t"), "hello world");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_text("The  Contractor\tshall   finalise.");
        let twice = normalize_text(&once);
        assert_eq!(once, twice);
    }
}
