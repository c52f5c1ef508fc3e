//! # move_parse.rs
//!
//! Implements parsing of movement grammars into clause trees.
//!
//! This file contains the tokenizer and recursive descent parser for the
//! movement notation. A grammar is normalized (lowercased, whitespace removed),
//! validated against the token alphabet, split into comma separated clauses,
//! and each clause is parsed into an expression tree of atomic steps, riders
//! and sequences. Distances inside atoms are recognised with regex patterns.
//! Unbalanced parentheses are repaired rather than rejected: an unmatched `)`
//! is dropped and a missing `)` is implied at the end of the clause.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 18/02/2024

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::{
    error::GrammarError,
    representations::grammar::{
        Atom, Clause, Count, Distance, Expr, Heading, Lateral, MoveGrammar,
        Shape, Span,
    },
};

lazy_static! {
    static ref PAIRED_PATTERN: Regex = Regex::new(
        r"([0-9n]+(?:-[0-9n]+)?)/([0-9n]+(?:-[0-9n]+)?)"
    ).unwrap();
    static ref SPAN_PATTERN: Regex = Regex::new(
        r"[0-9n]+(?:-[0-9n]+)?"
    ).unwrap();
    static ref COUNT_PATTERN: Regex = Regex::new(
        r"(\d+|n)$"
    ).unwrap();
    static ref FOREIGN_PATTERN: Regex = Regex::new(
        r"[^0-9n\-/*+x<>=rlicosdk~^().,]"
    ).unwrap();
}

const MODIFIER_TOKENS: &str = "coidk~^";

fn normalize(expr: &str) -> String {
    expr.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses a complete movement grammar.
///
/// # Examples
///
/// ```
/// use game::representations::grammar::MoveGrammar;
///
/// let pawn = MoveGrammar::parse("o1>+, c1X>, oi2>+").unwrap();
/// assert_eq!(pawn.clauses().len(), 3);
/// assert!(MoveGrammar::parse("2&1+").is_err());
/// ```
pub fn parse_grammar(source: &str) -> Result<MoveGrammar, GrammarError> {
    let expr = normalize(source);

    if expr.contains('&') {
        return Err(GrammarError::DeprecatedRepeat);
    }

    if let Some(found) = FOREIGN_PATTERN.find(&expr) {
        let token = found.as_str().chars().next().unwrap_or_default();
        let clause = expr
            .split(',')
            .find(|clause| clause.contains(token))
            .unwrap_or(&expr)
            .to_string();
        return Err(GrammarError::UnexpectedToken { token, clause });
    }

    let clauses = expr
        .split(',')
        .filter(|clause| !clause.is_empty())                                    /* trailing commas are harmless       */
        .map(parse_clause)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MoveGrammar::from_clauses(source.to_string(), clauses))
}

fn parse_clause(text: &str) -> Result<Clause, GrammarError> {
    let mut parser = Parser::new(text);
    let expr = parser.parse_sequence()?;

    if let Some(token) = parser.peek() {
        return Err(GrammarError::UnexpectedToken {
            token,
            clause: text.to_string(),
        });
    }

    Ok(Clause {
        source: text.to_string(),
        expr,
        capture_only: text.contains('c'),
        quiet_only: text.contains('o'),
        first_move: text.contains('i'),
        dummy: text.contains('d'),
        king: text.contains('k'),
        leaper: top_level(text).contains('~'),
    })
}

/// Returns the characters of a clause that sit outside every group.
fn top_level(text: &str) -> String {
    let mut depth = 0usize;
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => result.push(c),
            _ => {}
        }
    }

    result
}

struct Parser<'a> {
    clause: &'a str,
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(clause: &'a str) -> Self {
        Parser {
            clause,
            chars: clause.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn empty_pattern(&self) -> GrammarError {
        GrammarError::EmptyPattern(self.clause.to_string())
    }

    fn unexpected(&self, token: char) -> GrammarError {
        GrammarError::UnexpectedToken {
            token,
            clause: self.clause.to_string(),
        }
    }

    /// sequence := term ('.' term)*, folded to the right.
    fn parse_sequence(&mut self) -> Result<Expr, GrammarError> {
        let mut terms = vec![self.parse_term()?];

        while self.peek() == Some('.') {
            self.pos += 1;
            terms.push(self.parse_term()?);
        }

        let mut expr = terms.pop().ok_or_else(|| self.empty_pattern())?;
        while let Some(term) = terms.pop() {
            expr = Expr::Then(Box::new(term), Box::new(expr));
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr, GrammarError> {
        let mut text = String::new();

        loop {
            match self.peek() {
                None | Some('.') => break,
                Some(')') if self.depth > 0 => break,
                Some(')') => {
                    warn!(clause = self.clause, "dropping unmatched ')'");
                    self.pos += 1;
                }
                Some('(') => {
                    self.pos += 1;
                    return self.parse_ride(&text);
                }
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }

        if text.is_empty() {
            return Err(self.empty_pattern());
        }

        parse_atom(&text, self.clause).map(Expr::Step)
    }

    fn parse_ride(&mut self, prefix: &str) -> Result<Expr, GrammarError> {
        if matches!(self.peek(), None | Some(')')) {
            return Err(self.empty_pattern());
        }

        self.depth += 1;
        let pattern = self.parse_sequence()?;

        if self.peek() == Some(')') {
            self.pos += 1;
        } else {
            warn!(clause = self.clause, "implying missing ')' at end of clause");
        }
        self.depth -= 1;

        let mut suffix = String::new();
        while let Some(c) = self.peek() {
            match c {
                '.' | ')' => break,
                '(' => return Err(self.unexpected(c)),                          /* riders cannot be juxtaposed        */
                _ => {
                    suffix.push(c);
                    self.pos += 1;
                }
            }
        }

        let (count, modifiers) = split_count(prefix, self.clause)?;
        let modifiers = format!("{modifiers}{suffix}");

        if let Some(c) = modifiers.chars().find(|c| !MODIFIER_TOKENS.contains(*c)) {
            return Err(self.unexpected(c));
        }

        Ok(Expr::Ride {
            count,
            pattern: Box::new(pattern),
            leaper: modifiers.contains('~'),
            locust: modifiers.contains('^'),
        })
    }
}

/// Splits a rider prefix such as `~n` or `c2` into its repeat count and the
/// modifier characters in front of it. A bare group repeats once.
fn split_count<'p>(
    prefix: &'p str,
    clause: &str
) -> Result<(Count, &'p str), GrammarError> {
    let Some(found) = COUNT_PATTERN.find(prefix) else {
        return Ok((Count::Fixed(1), prefix));
    };

    let count = match found.as_str() {
        "n" => Count::Wildcard,
        digits => match digits.parse::<u32>() {
            Ok(n) if n > 0 && i32::try_from(n).is_ok() => Count::Fixed(n),      /* unit steps are signed squares      */
            _ => {
                return Err(GrammarError::MalformedDistance(clause.to_string()))
            }
        },
    };

    Ok((count, &prefix[..found.start()]))
}

fn parse_span(text: &str) -> Result<Span, GrammarError> {
    let malformed = || GrammarError::MalformedDistance(text.to_string());
    let bound = |s: &str| -> Result<Option<u32>, GrammarError> {
        if s == "n" {
            Ok(None)
        } else {
            s.parse::<u32>().map(Some).map_err(|_| malformed())
        }
    };

    match text.split_once('-') {
        None => Ok(match bound(text)? {
            Some(n) => Span::Exact(n),
            None => Span::Any,
        }),
        Some((lo, hi)) => {
            let lo = bound(lo)?.unwrap_or(1);
            let hi = bound(hi)?;

            if hi.is_some_and(|hi| hi < lo) {
                return Err(malformed());
            }

            Ok(Span::Range(lo, hi))
        }
    }
}

fn parse_atom(text: &str, clause: &str) -> Result<Atom, GrammarError> {
    let mut atom = Atom::default();
    let mut rest = text.to_string();
    let mut paired = false;

    if let Some(cap) = PAIRED_PATTERN.captures(text) {
        atom.distance = Distance::Paired {
            first: parse_span(&cap[1])?,
            second: parse_span(&cap[2])?,
            strict: text.contains('s'),
        };
        rest = text.replacen(&cap[0], "", 1);
        paired = true;
    } else if let Some(found) = SPAN_PATTERN.find(text) {
        atom.distance = Distance::Single(parse_span(found.as_str())?);
        rest = text.replacen(found.as_str(), "", 1);
    }

    if rest.chars().any(|c| c.is_ascii_digit() || "n-/".contains(c)) {
        return Err(GrammarError::MalformedDistance(text.to_string()));          /* a second distance in one atom      */
    }

    let mut shapes = Vec::with_capacity(1);

    for c in rest.chars() {
        match c {
            '*' => shapes.push(Shape::Omni),
            '+' => shapes.push(Shape::Orthogonal),
            'x' => shapes.push(Shape::Diagonal),
            'i' => atom.first_move = true,
            'd' => atom.dummy = true,
            '~' => atom.leaper = true,
            '^' => atom.locust = true,
            '>' | '<' | '=' | 'r' | 'l' | 's' | 'c' | 'o' | 'k' => {}
            _ => {
                return Err(GrammarError::UnexpectedToken {
                    token: c,
                    clause: clause.to_string(),
                })
            }
        }
    }

    atom.shape = match shapes.first() {
        Some(first) if shapes.iter().any(|s| s != first) => {
            return Err(GrammarError::ConflictingShape(clause.to_string()))
        }
        Some(first) => *first,
        None if paired => Shape::Free,
        None => Shape::Omni,
    };

    let sideways = rest.contains('=') || rest.contains('r') || rest.contains('l');
    atom.heading = match (rest.contains('>'), rest.contains('<')) {
        (true, false) => Heading::Forward { sideways },
        (false, true) => Heading::Backward { sideways },
        (true, true) => Heading::Vertical,
        (false, false) if rest.contains('=') => Heading::Sideways,
        (false, false) => Heading::Any,
    };

    atom.lateral = match (rest.contains('r'), rest.contains('l')) {
        (true, false) => Lateral::Right,
        (false, true) => Lateral::Left,
        (true, true) => Lateral::Either,
        (false, false) => Lateral::Any,
    };

    Ok(atom)
}
