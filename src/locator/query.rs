//! Query Builder: turns raw evidence text plus an optional clause hint into the
//! three parallel inputs the scorer needs (content queries, context queries, and
//! normalised clause tokens).

use regex::Regex;

use super::index::normalize_text;

/// Content, context, and clause inputs derived from one evidence text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBundle {
    /// Ordered, deduplicated "body" texts scored against single lines.
    pub content_queries: Vec<String>,
    /// Ordered, deduplicated texts scored against multi-line neighbourhoods.
    pub context_queries: Vec<String>,
    /// Ordered, deduplicated normalised clause tokens (e.g. `18.3`).
    pub clause_candidates: Vec<String>,
}

lazy_static::lazy_static! {
    static ref QUOTE_DOUBLE_RE: Regex = Regex::new(r#""([^"]{20,})""#).unwrap();
    static ref QUOTE_SMART_RE: Regex = Regex::new("\u{201C}([^\u{201D}]{20,})\u{201D}").unwrap();

    static ref FROM_PREFIX_RE: Regex = Regex::new(r"(?is)^\s*from\s+.{1,240}?:\s*").unwrap();

    static ref SECTION_CLAUSE_DECOR_RE: Regex =
        Regex::new(r"(?i)^\s*(?:section|clause)\s+\d{1,3}(?:\.\d+)*(?:\(a\))?\s*[:\-]\s*").unwrap();
    static ref PLAIN_NUM_DECOR_COLON_RE: Regex =
        Regex::new(r"^\s*\d{1,3}(?:\.\d+)*(?:\(a\))?\s*[:\-]\s*").unwrap();
    static ref PLAIN_NUM_DECOR_SPACE_RE: Regex =
        Regex::new(r"^\s*\d{1,3}(?:\.\d+)*(?:\(a\))?\s+").unwrap();
    static ref PAREN_A_RE: Regex = Regex::new(r"^\s*\(a\)\s+").unwrap();

    static ref LEADING_CLAUSE_RE: Regex =
        Regex::new(r"^(?:\(a\)\s*)?(\d{1,3}(?:\.\d+)+)").unwrap();
    static ref CLAUSE_LABEL_RE: Regex =
        Regex::new(r"(?i)clause\s+(\d{1,3}(?:\.\d+){1,3})").unwrap();
    static ref BARE_DOTTED_RE: Regex = Regex::new(r"\d{1,3}(?:\.\d+)+").unwrap();

    static ref CLAUSE_TOKEN_SHAPE_RE: Regex = Regex::new(r"^\d{1,3}(\.\d+){0,3}$").unwrap();

    /// Leading page-number hint, e.g. "Clause 18.3" or "18.3" at the start of the text.
    pub(super) static ref LEADING_PAGE_RE: Regex =
        Regex::new(r"(?i)^\s*(?:clause\s*)?(\d{1,3})(?:\.\d+)?").unwrap();
}

const DECORATION_TRIM: [char; 4] = ['"', '.', ';', ':'];

fn trim_decoration(s: &str) -> String {
    s.trim_matches(|c: char| c.is_whitespace() || DECORATION_TRIM.contains(&c))
        .to_string()
}

/// Extract quoted segments (ASCII and typographic double quotes) of length >= 20,
/// trimmed, longest first.
pub fn extract_quoted_segments(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();

    for re in [&*QUOTE_DOUBLE_RE, &*QUOTE_SMART_RE] {
        for caps in re.captures_iter(text) {
            let seg = caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
            if !seg.is_empty() {
                segments.push(seg);
            }
        }
    }

    segments.sort_by(|a, b| b.len().cmp(&a.len()));
    segments
}

/// Strip a leading `From <source>:` preamble (case-insensitive, source <= 240 chars).
fn strip_from_prefix(text: &str) -> String {
    FROM_PREFIX_RE.replace(text, "").trim().to_string()
}

/// Strip leading decorations (`Section 18.3:`, `18.3:`, `18.3 `, `(a) `) in priority order.
fn strip_leading_decoration(text: &str) -> String {
    let stripped = if SECTION_CLAUSE_DECOR_RE.is_match(text) {
        SECTION_CLAUSE_DECOR_RE.replace(text, "").to_string()
    } else if PLAIN_NUM_DECOR_COLON_RE.is_match(text) {
        PLAIN_NUM_DECOR_COLON_RE.replace(text, "").to_string()
    } else if PLAIN_NUM_DECOR_SPACE_RE.is_match(text) {
        PLAIN_NUM_DECOR_SPACE_RE.replace(text, "").to_string()
    } else if PAREN_A_RE.is_match(text) {
        PAREN_A_RE.replace(text, "").to_string()
    } else {
        text.to_string()
    };
    trim_decoration(&stripped)
}

/// Derive the evidence "body": from-prefix stripped, leading decoration stripped,
/// surrounding quotes/punctuation trimmed.
pub fn derive_body(evidence_text: &str) -> String {
    let after_from = strip_from_prefix(evidence_text);
    strip_leading_decoration(&after_from)
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        s.chars().take(max_len).collect()
    }
}

fn split_into_segments(body: &str, min_len: usize, max_len: usize) -> Vec<String> {
    body.split(|c| matches!(c, ',' | '.' | ';' | '\n'))
        .map(|s| s.trim())
        .filter(|s| s.chars().count() >= min_len)
        .map(|s| truncate_chars(s, max_len))
        .collect()
}

/// Deduplicate by normalised form, preserving first occurrence, capped at `limit`.
fn dedup_cap(items: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let key = normalize_text(&item);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        out.push(item);
        if out.len() >= limit {
            break;
        }
    }
    out
}

/// Build the content/context/clause `QueryBundle` for one evidence text.
pub fn build_query_bundle(
    evidence_text: &str,
    clause_keyword: Option<&str>,
    query_limit: usize,
    query_max_length: usize,
    segment_min_length: usize,
    segment_max_length: usize,
    quote_max_length: usize,
) -> QueryBundle {
    let quoted = extract_quoted_segments(evidence_text);
    let body = derive_body(evidence_text);
    let context_base = truncate_chars(&strip_from_prefix(evidence_text), quote_max_length);

    let mut content: Vec<String> = Vec::new();
    content.extend(quoted.iter().cloned());
    if !body.is_empty() {
        content.push(truncate_chars(&body, query_max_length));
    }
    content.extend(split_into_segments(&body, segment_min_length, segment_max_length));

    let mut context: Vec<String> = Vec::new();
    context.extend(quoted.iter().cloned());
    if !context_base.is_empty() {
        context.push(truncate_chars(&context_base, query_max_length));
    }
    context.extend(split_into_segments(&context_base, segment_min_length, segment_max_length));

    let mut content = dedup_cap(content, query_limit);
    let mut context = dedup_cap(context, query_limit);

    if content.is_empty() && !context.is_empty() {
        content = context.iter().take(query_limit).cloned().collect();
    } else if context.is_empty() && !content.is_empty() {
        context = content.iter().take(query_limit).cloned().collect();
    }
    if content.is_empty() && context.is_empty() {
        let whole = truncate_chars(evidence_text.trim(), quote_max_length);
        if !whole.is_empty() {
            content.push(whole.clone());
            context.push(whole);
        }
    }

    let preamble_stripped = strip_from_prefix(evidence_text);
    let clause_candidates = build_clause_candidates(evidence_text, clause_keyword, &preamble_stripped);

    QueryBundle {
        content_queries: content,
        context_queries: context,
        clause_candidates,
    }
}

fn normalize_clause_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ',');
    if CLAUSE_TOKEN_SHAPE_RE.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

fn major_part(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}

/// Whether `idx..idx+len` in `text` is embedded inside a longer run of digits/dots
/// (i.e. the char immediately before or after is itself a digit or dot).
fn is_embedded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let touches = |c: Option<char>| matches!(c, Some(ch) if ch.is_ascii_digit() || ch == '.');
    touches(before) || touches(after)
}

fn build_clause_candidates(
    evidence_text: &str,
    clause_keyword: Option<&str>,
    preamble_stripped: &str,
) -> Vec<String> {
    let mut raw: Vec<String> = Vec::new();

    if let Some(kw) = clause_keyword {
        if !kw.trim().is_empty() {
            raw.push(kw.trim().to_string());
        }
    }

    let mut leading_major: Option<String> = None;
    if let Some(caps) = LEADING_CLAUSE_RE.captures(preamble_stripped) {
        if let Some(m) = caps.get(1) {
            leading_major = Some(major_part(m.as_str()).to_string());
            raw.push(m.as_str().to_string());
        }
    }

    let mut contextual_majors: Vec<String> = Vec::new();
    for caps in CLAUSE_LABEL_RE.captures_iter(evidence_text) {
        if let Some(m) = caps.get(1) {
            contextual_majors.push(major_part(m.as_str()).to_string());
            raw.push(m.as_str().to_string());
        }
    }

    for m in BARE_DOTTED_RE.find_iter(evidence_text) {
        if !is_embedded(evidence_text, m.start(), m.end()) {
            raw.push(m.as_str().to_string());
        }
    }

    if let Some(leading) = &leading_major {
        if leading.len() == 1 {
            for major in &contextual_majors {
                if major.len() > leading.len() && major != leading {
                    if let Some(caps) = LEADING_CLAUSE_RE.captures(preamble_stripped) {
                        if let Some(m) = caps.get(1) {
                            let rest = &m.as_str()[leading.len()..];
                            raw.push(format!("{major}{rest}"));
                        }
                    }
                }
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for candidate in raw {
        if let Some(token) = normalize_clause_token(&candidate) {
            let key = token.to_lowercase();
            if seen.insert(key) {
                out.push(token);
            }
        }
    }
    out
}
