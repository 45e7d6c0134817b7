//! Parser for the `key="value"` assignment micro-syntax.
//!
//! Multi-argument actions embed their fields in the command text:
//!
//! ```text
//! find similar documents: record="fever and cough" cand1="flu" cand2='cold'
//! multiple choice: text="..." question="..." choices=["a", "b"]
//! ```
//!
//! Grammar:
//!
//! ```text
//! assignments := (prose | assignment)*
//! assignment  := key ws* '=' ws* value
//! key         := [A-Za-z_][A-Za-z0-9_]*
//! value       := quoted | list | bare
//! quoted      := '"' chars '"' | '\'' chars '\''
//! list        := '[' ws* (quoted (ws* ',' ws* quoted)*)? ws* ','? ws* ']'
//! bare        := non-whitespace run
//! ```
//!
//! Inside a quoted string a backslash escapes the next character. Anything
//! that is not an assignment is treated as prose and skipped. When a key
//! appears more than once the first occurrence wins.

use indexmap::IndexMap;
use thiserror::Error;

/// A parsed assignment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

/// Structured parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated string for `{key}`")]
    UnterminatedString { key: String },

    #[error("unterminated list for `{key}`")]
    UnterminatedList { key: String },

    #[error("list items for `{key}` must be quoted strings")]
    InvalidListItem { key: String },
}

impl ParseError {
    /// The key whose value failed to parse.
    pub fn key(&self) -> &str {
        match self {
            Self::UnterminatedString { key }
            | Self::UnterminatedList { key }
            | Self::InvalidListItem { key } => key,
        }
    }
}

/// Parse every assignment in `input`, in order of appearance.
pub fn parse_assignments(input: &str) -> Result<IndexMap<String, Value>, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut assignments = IndexMap::new();

    while let Some(c) = cursor.peek() {
        if !is_key_start(c) || cursor.follows_key_char() {
            cursor.bump();
            continue;
        }

        let key = cursor.take_while(is_key_char);
        let after_key = cursor.pos;
        cursor.skip_whitespace();
        if cursor.peek() != Some('=') {
            cursor.pos = after_key;
            continue;
        }
        cursor.bump();
        cursor.skip_whitespace();

        let value = parse_value(&mut cursor, &key)?;
        assignments.entry(key).or_insert(value);
    }

    Ok(assignments)
}

fn parse_value(cursor: &mut Cursor, key: &str) -> Result<Value, ParseError> {
    match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            cursor
                .quoted(quote)
                .map(Value::Text)
                .ok_or_else(|| ParseError::UnterminatedString {
                    key: key.to_string(),
                })
        }
        Some('[') => {
            cursor.bump();
            parse_list(cursor, key).map(Value::List)
        }
        _ => Ok(Value::Text(cursor.take_while(|c| !c.is_whitespace()))),
    }
}

fn parse_list(cursor: &mut Cursor, key: &str) -> Result<Vec<String>, ParseError> {
    let unterminated = || ParseError::UnterminatedList {
        key: key.to_string(),
    };
    let invalid = || ParseError::InvalidListItem {
        key: key.to_string(),
    };

    let mut items = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(unterminated()),
            Some(']') => {
                cursor.bump();
                return Ok(items);
            }
            Some(quote @ ('"' | '\'')) => {
                cursor.bump();
                items.push(cursor.quoted(quote).ok_or_else(unterminated)?);
            }
            Some(_) => return Err(invalid()),
        }

        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(unterminated()),
            Some(',') => cursor.bump(),
            Some(']') => {}
            Some(_) => return Err(invalid()),
        }
    }
}

fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Whether the previous character could belong to a key, i.e. the
    /// current position is mid-word.
    fn follows_key_char(&self) -> bool {
        self.pos > 0 && is_key_char(self.chars[self.pos - 1])
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Read up to the closing `quote`, consuming it. `None` if the input
    /// ends first.
    fn quoted(&mut self, quote: char) -> Option<String> {
        let mut out = String::new();
        loop {
            let c = self.peek()?;
            self.bump();
            match c {
                '\\' => {
                    out.push(self.peek()?);
                    self.bump();
                }
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
    }
}
