use crate::error::{EnmlError, Result};
use crate::types::{Diagnostics, Entity, RawBlock, Value};
use std::iter::Enumerate;
use std::str::Lines;
use tracing::debug;

// --- Block extraction (text -> raw blocks) ---

enum State {
    SeekingItem,
    SeekingBrace { identifier: String, line: usize },
    InsideBlock { block: RawBlock, depth: usize },
    Finished,
}

/// Lazily splits ENML text into `<keyword> <identifier> { ... }` blocks.
///
/// Openers are matched case-insensitively against the start of the trimmed
/// line. Nested braces are balanced, so a block only closes on the `}` that
/// matches its own opening brace. An unterminated block is reported as the
/// last item of the iteration.
pub struct BlockExtractor<'a> {
    lines: Enumerate<Lines<'a>>,
    keywords: Vec<String>,
    state: State,
}

impl<'a> BlockExtractor<'a> {
    pub fn new<S: AsRef<str>>(text: &'a str, keywords: &[S]) -> Self {
        Self {
            lines: text.lines().enumerate(),
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            state: State::SeekingItem,
        }
    }

    fn is_opener(&self, code: &str) -> bool {
        let lower = code.to_lowercase();
        self.keywords.iter().any(|k| lower.starts_with(k.as_str()))
    }

    fn open(&mut self, code: &str, line: usize) -> Option<RawBlock> {
        match code.find('{') {
            Some(pos) => {
                let block = RawBlock {
                    identifier: code[..pos].trim().to_string(),
                    line,
                    lines: Vec::new(),
                };
                self.feed(block, 1, &code[pos + 1..])
            }
            None => {
                self.state = State::SeekingBrace {
                    identifier: code.to_string(),
                    line,
                };
                None
            }
        }
    }

    /// Consume one line of block content, returning the block once its
    /// closing brace has been seen.
    fn feed(&mut self, mut block: RawBlock, mut depth: usize, text: &str) -> Option<RawBlock> {
        for (pos, ch) in outside_quotes(text) {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        push_segment(&mut block, &text[..pos]);
                        let rest = text[pos + 1..].trim();
                        if !rest.is_empty() {
                            debug!(
                                "Ignoring '{}' after the end of block '{}'",
                                rest, block.identifier
                            );
                        }
                        self.state = State::SeekingItem;
                        return Some(block);
                    }
                }
                _ => {}
            }
        }
        push_segment(&mut block, text);
        self.state = State::InsideBlock { block, depth };
        None
    }
}

impl Iterator for BlockExtractor<'_> {
    type Item = Result<RawBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, raw)) = self.lines.next() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            let code = strip_comment(trimmed).trim_end();
            let line = idx + 1;

            let emitted = match std::mem::replace(&mut self.state, State::SeekingItem) {
                State::SeekingItem => {
                    if self.is_opener(code) {
                        self.open(code, line)
                    } else {
                        None
                    }
                }
                State::SeekingBrace {
                    identifier,
                    line: opened_at,
                } => {
                    if self.is_opener(code) {
                        debug!(
                            "Dropping '{}' (line {}): no opening brace before the next item",
                            identifier, opened_at
                        );
                        self.open(code, line)
                    } else if let Some(pos) = code.find('{') {
                        let block = RawBlock {
                            identifier,
                            line: opened_at,
                            lines: Vec::new(),
                        };
                        self.feed(block, 1, &code[pos + 1..])
                    } else {
                        self.state = State::SeekingBrace {
                            identifier,
                            line: opened_at,
                        };
                        None
                    }
                }
                State::InsideBlock { block, depth } => self.feed(block, depth, code),
                State::Finished => None,
            };

            if let Some(block) = emitted {
                return Some(Ok(block));
            }
        }

        match std::mem::replace(&mut self.state, State::Finished) {
            State::InsideBlock { block, .. } => Some(Err(EnmlError::UnterminatedBlock {
                identifier: block.identifier,
                line: block.line,
            })),
            State::SeekingBrace { identifier, line } => {
                debug!(
                    "Dropping '{}' (line {}): input ended before an opening brace",
                    identifier, line
                );
                None
            }
            _ => None,
        }
    }
}

fn push_segment(block: &mut RawBlock, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        block.lines.push(segment.to_string());
    }
}

/// Characters of `line` that sit outside double quotes. A line with an
/// unbalanced quote (an inch mark, say) has no quoted region.
fn outside_quotes(line: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let honor_quotes = line.matches('"').count() % 2 == 0;
    let mut quoted = false;
    line.char_indices().filter(move |&(_, ch)| {
        if honor_quotes && ch == '"' {
            quoted = !quoted;
            return false;
        }
        !quoted
    })
}

fn strip_comment(line: &str) -> &str {
    let comment = outside_quotes(line)
        .find(|&(pos, ch)| ch == '/' && line[pos + 1..].starts_with('/'))
        .map(|(pos, _)| pos);
    match comment {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// --- Normalization (raw block -> entity) ---

/// Parse block text into an entity, logging (but not keeping) warnings.
pub fn parse_block(text: &str) -> Entity {
    let mut diagnostics = Diagnostics::new();
    parse_block_with(text, "<block>", None, &mut diagnostics)
}

/// Parse block text into an entity.
///
/// Lines without `=` are ignored, as are lines belonging to nested `{ }`
/// sub-blocks. Lines with an empty key are reported to `diagnostics`.
pub fn parse_block_with(
    text: &str,
    source: &str,
    line: Option<usize>,
    diagnostics: &mut Diagnostics,
) -> Entity {
    let mut entity = Entity::new();
    let mut depth = 0usize;

    for raw in text.lines() {
        let code = strip_comment(raw).trim();
        if code.is_empty() {
            continue;
        }

        if depth > 0 || opens_sub_block(code) {
            let (opens, closes) = brace_counts(code);
            depth = (depth + opens).saturating_sub(closes);
            continue;
        }

        for statement in statements(code) {
            let Some((key, value)) = statement.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                diagnostics.warn(
                    source,
                    line,
                    format!("Malformed line (empty key): '{}'", statement.trim()),
                );
                continue;
            }
            let value = value.trim();
            let value = value.strip_suffix(';').unwrap_or(value).trim_end();
            entity.insert(key, coerce_value(value));
        }
    }

    entity
}

fn brace_counts(code: &str) -> (usize, usize) {
    outside_quotes(code).fold((0, 0), |(opens, closes), (_, ch)| match ch {
        '{' => (opens + 1, closes),
        '}' => (opens, closes + 1),
        _ => (opens, closes),
    })
}

/// A `{` before any `=` starts a nested sub-block; braces in a value do not.
fn opens_sub_block(code: &str) -> bool {
    outside_quotes(code)
        .find(|&(_, ch)| ch == '{' || ch == '=')
        .is_some_and(|(_, ch)| ch == '{')
}

/// Split a line holding several `key = value;` statements. Lines where a
/// piece is not a statement of its own (a `;` inside an unquoted value) or
/// whose quotes do not balance stay whole.
fn statements(code: &str) -> Vec<&str> {
    if code.matches('"').count() % 2 != 0 {
        return vec![code];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    for (pos, ch) in outside_quotes(code) {
        if ch == ';' {
            pieces.push(&code[start..=pos]);
            start = pos + 1;
        }
    }
    pieces.push(&code[start..]);
    pieces.retain(|piece| !piece.trim().trim_end_matches(';').trim().is_empty());
    if pieces.is_empty() {
        return vec![code];
    }

    if pieces.iter().all(|piece| piece.contains('=')) {
        pieces
    } else {
        vec![code]
    }
}

/// Normalize an extracted block, reporting against its opener line.
pub fn normalize_block(block: &RawBlock, source: &str, diagnostics: &mut Diagnostics) -> Entity {
    parse_block_with(&block.text(), source, Some(block.line), diagnostics)
}

/// Type a raw value: booleans, then integers/decimals, else text.
/// Double-quoted values are always text.
pub fn coerce_value(raw: &str) -> Value {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::text(&raw[1..raw.len() - 1]);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_numeric(raw) {
        if raw.contains('.') {
            if let Ok(v) = raw.parse::<f64>() {
                return Value::float(v);
            }
        } else if let Ok(v) = raw.parse::<i64>() {
            return Value::int(v);
        } else if let Ok(v) = raw.parse::<f64>() {
            return Value::float(v);
        }
    }
    Value::text(raw)
}

/// Optional `-`, digits, at most one `.`, and at least one digit.
fn is_numeric(raw: &str) -> bool {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    let mut digits = 0;
    let mut dots = 0;
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
