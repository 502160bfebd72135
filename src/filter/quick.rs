//! Quick-filter predicate applied to one column's rendered text.
//!
//! A query is split on whitespace. Quoted tokens (`"bolt"`) must equal a
//! whole word of the cell; other tokens only need to appear inside a word,
//! with `,` and `.` treated as the same character. Every token has to match
//! for the cell to match. Comparison ignores case.

/// One whitespace-separated piece of a query, already lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// Quoted token, quotes stripped. Matches a whole word.
    Exact(String),
    /// Unquoted token, commas replaced by periods. Matches inside a word.
    Fuzzy(String),
}

impl FilterToken {
    /// Classify a raw token. The empty quote pair `""` yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw == "\"\"" {
            return None;
        }

        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            Some(FilterToken::Exact(raw[1..raw.len() - 1].to_lowercase()))
        } else {
            Some(FilterToken::Fuzzy(normalize_separators(raw).to_lowercase()))
        }
    }

    fn matches_word(&self, word: &str) -> bool {
        match self {
            FilterToken::Exact(text) => word.to_lowercase() == *text,
            FilterToken::Fuzzy(text) => normalize_separators(word).to_lowercase().contains(text),
        }
    }

    /// True if some word of the cell satisfies this token.
    pub fn matches_any(&self, words: &[&str]) -> bool {
        words.iter().any(|word| self.matches_word(word))
    }
}

/// A compiled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFilter {
    tokens: Vec<FilterToken>,
}

impl QuickFilter {
    /// Compile `query`. Returns `None` when it filters nothing out, i.e. it
    /// is empty or holds only whitespace and `""` tokens.
    pub fn compile(query: &str) -> Option<Self> {
        let tokens: Vec<FilterToken> = query.split_whitespace().filter_map(FilterToken::parse).collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// True if every token matches at least one word of `cell_text`.
    pub fn matches(&self, cell_text: &str) -> bool {
        let words: Vec<&str> = cell_text.split_whitespace().collect();
        self.tokens.iter().all(|token| token.matches_any(&words))
    }
}

/// Match `query` against one cell. An empty query matches everything.
pub fn matches(query: &str, cell_text: &str) -> bool {
    QuickFilter::compile(query).map_or(true, |filter| filter.matches(cell_text))
}

fn normalize_separators(text: &str) -> String {
    text.replace(',', ".")
}
