//! Tokenizer for todo.txt queries.
//!
//! Words are split on whitespace and parentheses. The lexer only recognizes
//! structure (operators, grouping, quoting, regex and priority literals);
//! classifying a bare word into an atom is left to the parser.

use std::iter::Peekable;
use std::str::Chars;

use todotxt_model_rs::models::Priority;

use super::ast::CompareOp;

/// A malformed piece of query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    /// What went wrong.
    pub message: String,
    /// Byte offset of the problem.
    pub position: usize,
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for LexerError {}

/// Tokens and errors from one pass over a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// Tokens read, in order.
    pub tokens: Vec<PositionedToken>,
    /// Any errors encountered (unterminated quotes or regexes).
    pub errors: Vec<LexerError>,
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// Byte offset of the first character.
    pub position: usize,
}

/// A query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    // ==================== Terms ====================
    /// A bare word, classified by the parser.
    Word(String),

    /// A double-quoted phrase, always free text.
    Quoted(String),

    /// A `/pattern/` regular expression literal.
    Regex(String),

    /// A `(<C)` style priority literal.
    Priority(CompareOp, Priority),

    // ==================== Operators ====================
    /// The `AND` keyword. Adjacent terms are joined with AND anyway.
    And,

    /// The `OR` keyword.
    Or,

    /// The `NOT` keyword or a `-` prefix.
    Not,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,
}

impl std::fmt::Display for FilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterToken::Word(w) => write!(f, "{w}"),
            FilterToken::Quoted(q) => write!(f, "\"{q}\""),
            FilterToken::Regex(r) => write!(f, "/{r}/"),
            FilterToken::Priority(_, p) => write!(f, "({p})"),
            FilterToken::And => write!(f, "AND"),
            FilterToken::Or => write!(f, "OR"),
            FilterToken::Not => write!(f, "NOT"),
            FilterToken::OpenParen => write!(f, "("),
            FilterToken::CloseParen => write!(f, ")"),
        }
    }
}

/// Splits a query into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Byte offset of the next character.
    position: usize,
    /// Problems found so far.
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Takes one character and advances the offset.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.next_char();
        }
    }

    /// Returns true if the character after the current one ends a word.
    fn next_is_boundary(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        !matches!(ahead.peek(), Some(c) if !c.is_whitespace())
    }

    /// Reads a bare word, stopping at whitespace and parentheses.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            word.push(c);
            self.next_char();
        }
        word
    }

    /// Reads text up to an unescaped `delimiter`, consuming the opening one.
    ///
    /// Returns `None` if the input ends first.
    fn read_delimited(&mut self, delimiter: char) -> Option<String> {
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == delimiter {
                return Some(result);
            }
            if c == '\\' {
                match self.next_char() {
                    // Regexes keep their escapes; quotes only unescape.
                    Some(escaped) if delimiter == '/' && escaped != '/' => {
                        result.push('\\');
                        result.push(escaped);
                    }
                    Some(escaped) => result.push(escaped),
                    None => break,
                }
            } else {
                result.push(c);
            }
        }
        None
    }

    /// Tries to read a `(<op><letter>)` priority literal at the current
    /// position without consuming anything on failure.
    fn try_priority(&mut self) -> Option<(CompareOp, Priority)> {
        let mut ahead = self.chars.clone();
        ahead.next(); // '('

        let mut inner = String::new();
        loop {
            match ahead.next()? {
                ')' => break,
                c if c.is_whitespace() || c == '(' => return None,
                c => inner.push(c),
            }
            if inner.chars().count() > 3 {
                return None;
            }
        }

        if ahead.peek().is_some_and(|c| !c.is_whitespace() && *c != ')') {
            return None;
        }

        let (op, rest, _) = CompareOp::split(&inner);
        let mut letters = rest.chars();
        let priority = match (letters.next(), letters.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => Priority::new(letter)?,
            _ => return None,
        };

        // '(' + inner + ')'
        for _ in 0..inner.chars().count() + 2 {
            self.next_char();
        }
        Some((op, priority))
    }

    /// Reads the next token, `None` at the end of the query.
    pub fn next_token(&mut self) -> Option<PositionedToken> {
        self.skip_whitespace();

        let c = *self.peek()?;
        let start = self.position;

        let token = match c {
            '(' => match self.try_priority() {
                Some((op, priority)) => FilterToken::Priority(op, priority),
                None => {
                    self.next_char();
                    FilterToken::OpenParen
                }
            },
            ')' => {
                self.next_char();
                FilterToken::CloseParen
            }
            // A lone '-' is just a word.
            '-' if !self.next_is_boundary() => {
                self.next_char();
                FilterToken::Not
            }
            '"' => match self.read_delimited('"') {
                Some(phrase) => FilterToken::Quoted(phrase),
                None => {
                    self.errors.push(LexerError {
                        message: "unterminated quote".to_string(),
                        position: start,
                    });
                    return None;
                }
            },
            '/' if !self.next_is_boundary() => match self.read_delimited('/') {
                Some(pattern) => FilterToken::Regex(pattern),
                None => {
                    self.errors.push(LexerError {
                        message: "unterminated regular expression".to_string(),
                        position: start,
                    });
                    return None;
                }
            },
            _ => match self.read_word().as_str() {
                "AND" => FilterToken::And,
                "OR" => FilterToken::Or,
                "NOT" => FilterToken::Not,
                word => FilterToken::Word(word.to_string()),
            },
        };

        Some(PositionedToken {
            token,
            position: start,
        })
    }

    /// Tokens only, errors dropped.
    #[cfg(test)]
    pub fn tokenize(self) -> Vec<FilterToken> {
        self.tokenize_with_errors()
            .tokens
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    /// Runs the lexer to the end.
    pub fn tokenize_with_errors(mut self) -> LexerResult {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token() {
            tokens.push(positioned_token);
        }
        LexerResult {
            tokens,
            errors: self.errors,
        }
    }
}
