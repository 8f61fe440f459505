//! Recursive descent parser for filter expressions.

use chrono::{Local, NaiveDate};
use regex::Regex;

use super::ast::{Atom, CompareOp, DateField, Filter, Pattern};
use super::dates::resolve_date;
use super::error::{FilterError, FilterResult};
use super::lexer::{FilterToken, Lexer};

/// Parser for todo.txt filter expressions.
///
/// # Grammar
///
/// ```text
/// query      ::= ["--"] expression
/// expression ::= or_expr
/// or_expr    ::= and_expr ("OR" and_expr)*
/// and_expr   ::= unary_expr (["AND"] unary_expr)*
/// unary_expr ::= ("NOT" | "-") unary_expr | primary
/// primary    ::= "(" expression ")" | priority | regex | quoted | word
/// priority   ::= "(" [op] LETTER ")"
/// regex      ::= "/" pattern "/"
/// word       ::= "@" name | "+" name | key ":" [op] value | text
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `NOT` / `-` - unary
/// 2. `AND` or adjacency - binary, left-associative
/// 3. `OR` - binary, left-associative
///
/// # Example
///
/// ```
/// use todotxt_view_rs::filter::{FilterParser, Filter};
///
/// let filter = FilterParser::parse("@home +garden").unwrap();
/// assert!(matches!(filter, Filter::And(_, _)));
///
/// let filter = FilterParser::parse("@home OR @work").unwrap();
/// assert!(matches!(filter, Filter::Or(_, _)));
/// ```
pub struct FilterParser {
    tokens: Vec<FilterToken>,
    position: usize,
    today: NaiveDate,
}

impl FilterParser {
    /// Parses a filter expression, resolving relative dates against the
    /// local date.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyExpression` if the input has no terms,
    /// `FilterError::UnclosedParenthesis` or `FilterError::UnexpectedToken`
    /// for unbalanced grouping, and `FilterError::MissingOperand` for a
    /// dangling operator.
    pub fn parse(input: &str) -> FilterResult<Filter> {
        Self::parse_with_today(input, Local::now().date_naive())
    }

    /// Parses a filter expression with an explicit "today".
    pub fn parse_with_today(input: &str, today: NaiveDate) -> FilterResult<Filter> {
        let trimmed = input.trim();

        // A leading `--` makes the rest one verbatim group.
        if let Some(rest) = strip_terminator(trimmed) {
            return Self::parse_with_today(rest, today).map(Filter::group);
        }

        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let lexed = Lexer::new(trimmed).tokenize_with_errors();
        if let Some(error) = lexed.errors.into_iter().next() {
            return Err(FilterError::Lexer {
                message: error.message,
                position: error.position,
            });
        }

        let tokens: Vec<FilterToken> = lexed.tokens.into_iter().map(|pt| pt.token).collect();
        if tokens.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let mut parser = Self {
            tokens,
            position: 0,
            today,
        };
        let filter = parser.parse_expression()?;

        if let Some(remaining) = parser.peek() {
            return Err(FilterError::unexpected_token(remaining.to_string()));
        }

        Ok(filter)
    }

    /// Compiles command-line query arguments into one filter.
    ///
    /// Each argument is its own group and the groups are ANDed together. An
    /// argument starting with `-` negates its whole group, so
    /// `-"@a +b"` excludes only items having both. Blank arguments
    /// and any bare `--` argument are skipped. Returns `None` when there are
    /// no arguments.
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> FilterResult<Option<Filter>> {
        Self::parse_args_with_today(args, Local::now().date_naive())
    }

    /// Like [`FilterParser::parse_args`] with an explicit "today".
    pub fn parse_args_with_today<S: AsRef<str>>(
        args: &[S],
        today: NaiveDate,
    ) -> FilterResult<Option<Filter>> {
        let mut combined: Option<Filter> = None;
        for arg in args {
            let arg = arg.as_ref();
            if arg.trim().is_empty() || arg == "--" {
                continue;
            }
            let group = match arg.strip_prefix('-') {
                Some(rest) if !rest.is_empty() && rest != "-" => {
                    Filter::negate(Filter::group(Self::parse_with_today(rest, today)?))
                }
                _ => Filter::group(Self::parse_with_today(arg, today)?),
            };
            combined = Some(match combined {
                Some(left) => Filter::and(left, group),
                None => group,
            });
        }

        Ok(combined)
    }

    fn peek(&self) -> Option<&FilterToken> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&FilterToken> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &FilterToken) -> bool {
        self.peek() == Some(expected)
    }

    /// Returns true if the current token can start a term.
    fn at_term(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                FilterToken::Word(_)
                    | FilterToken::Quoted(_)
                    | FilterToken::Regex(_)
                    | FilterToken::Priority(..)
                    | FilterToken::Not
                    | FilterToken::OpenParen
            )
        )
    }

    fn parse_expression(&mut self) -> FilterResult<Filter> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("OR" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<Filter> {
        let mut left = self.parse_and_expr()?;

        while self.check(&FilterToken::Or) {
            self.advance(); // consume 'OR'
            let right = self.operand("OR", Self::parse_and_expr)?;
            left = Filter::or(left, right);
        }

        Ok(left)
    }

    /// Parses AND expressions: `unary_expr (["AND"] unary_expr)*`
    fn parse_and_expr(&mut self) -> FilterResult<Filter> {
        let mut left = self.parse_unary_expr()?;

        loop {
            if self.check(&FilterToken::And) {
                self.advance(); // consume 'AND'
                let right = self.operand("AND", Self::parse_unary_expr)?;
                left = Filter::and(left, right);
            } else if self.at_term() {
                let right = self.parse_unary_expr()?;
                left = Filter::and(left, right);
            } else {
                return Ok(left);
            }
        }
    }

    /// Parses unary expressions: `"NOT" unary_expr | primary`
    fn parse_unary_expr(&mut self) -> FilterResult<Filter> {
        if self.check(&FilterToken::Not) {
            self.advance(); // consume 'NOT' / '-'
            let inner = self.operand("NOT", Self::parse_unary_expr)?;
            return Ok(Filter::negate(inner));
        }

        self.parse_primary()
    }

    /// Parses the right-hand side of an operator, reporting a missing operand
    /// instead of a bare end of input.
    fn operand(
        &mut self,
        operator: &str,
        parse: fn(&mut Self) -> FilterResult<Filter>,
    ) -> FilterResult<Filter> {
        if self.peek().is_none() {
            return Err(FilterError::missing_operand(operator));
        }
        parse(self)
    }

    fn parse_primary(&mut self) -> FilterResult<Filter> {
        let token = self
            .advance()
            .cloned()
            .ok_or(FilterError::UnexpectedEndOfInput)?;

        match token {
            FilterToken::OpenParen => {
                if self.check(&FilterToken::CloseParen) {
                    return Err(FilterError::unexpected_token(")"));
                }
                let inner = self.parse_expression()?;
                if !self.check(&FilterToken::CloseParen) {
                    return Err(FilterError::UnclosedParenthesis);
                }
                self.advance(); // consume ')'
                Ok(Filter::group(inner))
            }

            FilterToken::Priority(op, priority) => {
                Ok(Filter::Atom(Atom::Priority { op, priority }))
            }

            FilterToken::Regex(pattern) => {
                let regex = Regex::new(&pattern).map_err(|e| FilterError::InvalidRegex {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                Ok(Filter::Atom(Atom::Regex(Pattern::new(regex))))
            }

            FilterToken::Quoted(phrase) => Ok(Filter::text(&phrase)),

            FilterToken::Word(word) => self.classify_word(&word),

            FilterToken::And => Err(FilterError::missing_operand("AND")),
            FilterToken::Or => Err(FilterError::missing_operand("OR")),
            FilterToken::CloseParen => Err(FilterError::unexpected_token(")")),
            FilterToken::Not => Err(FilterError::missing_operand("NOT")),
        }
    }

    /// Turns a bare word into an atom.
    fn classify_word(&self, word: &str) -> FilterResult<Filter> {
        if let Some(name) = word.strip_prefix('@') {
            return Ok(Filter::context(name));
        }
        if let Some(name) = word.strip_prefix('+') {
            return Ok(Filter::project(name));
        }

        if let Some((key, value)) = word.split_once(':') {
            if !key.is_empty() && !value.starts_with("//") {
                return self.classify_tag(word, key, value);
            }
        }

        Ok(Filter::text(word))
    }

    fn classify_tag(&self, word: &str, key: &str, value: &str) -> FilterResult<Filter> {
        let (op, operand, explicit) = CompareOp::split(value);

        if operand.is_empty() {
            if explicit {
                return Err(FilterError::missing_operand(word));
            }
            return Ok(Filter::Atom(Atom::HasTag(key.to_string())));
        }

        if key == "is" {
            let done = match operand.to_lowercase().as_str() {
                "done" | "completed" | "x" => Some(true),
                "open" | "active" | "pending" => Some(false),
                _ => None,
            };
            match (done, op) {
                (Some(done), CompareOp::Eq) => return Ok(Filter::Atom(Atom::Completed(done))),
                (Some(done), CompareOp::Ne) => return Ok(Filter::Atom(Atom::Completed(!done))),
                _ => {}
            }
        }

        if let Some(field) = DateField::from_key(key) {
            match resolve_date(operand, self.today) {
                Some(date) => return Ok(Filter::Atom(Atom::Date { field, op, date })),
                None if !field.is_tag() => return Err(FilterError::invalid_date(key, operand)),
                None => {}
            }
        }

        Ok(Filter::Atom(Atom::Tag {
            key: key.to_string(),
            op,
            value: operand.to_string(),
        }))
    }
}

/// Strips a leading `--` word.
fn strip_terminator(input: &str) -> Option<&str> {
    let rest = input.strip_prefix("--")?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}
