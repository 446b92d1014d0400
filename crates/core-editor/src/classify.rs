//! SQL token classification for display coloring.
//!
//! A single regex alternation scans the whole text. Words followed by `(` are
//! functions, words in the keyword list are keywords, everything unmatched is
//! plain. Adjacent plain runs are merged, and the token values always concatenate
//! back to the input.

use crate::hooks::Classifier;
use core_complete::keywords::SQL_KEYWORDS;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Function,
    String,
    Number,
    Comment,
    QuotedIdentifier,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub category: TokenCategory,
}

impl Token {
    pub fn new(value: impl Into<String>, category: TokenCategory) -> Self {
        Self {
            value: value.into(),
            category,
        }
    }
}

static TOKEN_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<comment>--[^\n]*|(?s:/\*.*?(?:\*/|\z)))|(?P<string>'(?:[^'\\]|\\.)*'?|"(?:[^"\\]|\\.)*"?)|(?P<quoted>`[^`]*`?)|(?P<number>\b[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)|(?P<word>[A-Za-z_][A-Za-z0-9_]*)"#,
    )
});

static KEYWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SQL_KEYWORDS.iter().copied().collect());

/// Default classifier over the built-in keyword list.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlClassifier;

impl SqlClassifier {
    pub fn new() -> Self {
        Self
    }

    fn word_category(text: &str, word: &str, end: usize) -> TokenCategory {
        let next = text[end..].trim_start_matches([' ', '\t']);
        if next.starts_with('(') {
            return TokenCategory::Function;
        }
        if KEYWORDS.contains(word.to_ascii_uppercase().as_str()) {
            TokenCategory::Keyword
        } else {
            TokenCategory::Plain
        }
    }
}

impl Classifier for SqlClassifier {
    fn classify(&self, text: &str) -> Vec<Token> {
        let Ok(re) = &*TOKEN_RE else {
            return vec![Token::new(text, TokenCategory::Plain)];
        };
        let mut out: Vec<Token> = Vec::new();
        let mut push = |value: &str, category: TokenCategory| {
            if value.is_empty() {
                return;
            }
            match out.last_mut() {
                Some(last) if category == TokenCategory::Plain && last.category == category => {
                    last.value.push_str(value)
                }
                _ => out.push(Token::new(value, category)),
            }
        };
        let mut last_end = 0;
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            push(&text[last_end..m.start()], TokenCategory::Plain);
            let category = if caps.name("comment").is_some() {
                TokenCategory::Comment
            } else if caps.name("string").is_some() {
                TokenCategory::String
            } else if caps.name("quoted").is_some() {
                TokenCategory::QuotedIdentifier
            } else if caps.name("number").is_some() {
                TokenCategory::Number
            } else {
                Self::word_category(text, m.as_str(), m.end())
            };
            push(m.as_str(), category);
            last_end = m.end();
        }
        push(&text[last_end..], TokenCategory::Plain);
        out
    }
}
