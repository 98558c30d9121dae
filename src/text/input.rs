use std::str::Chars;

use tracing::trace;

use crate::{config::Limits, prelude::*};

/// Splits the input into single characters (for the alphabet) or whitespace separated tokens.
struct Scanner<'a> {
    chars: std::iter::Peekable<Chars<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Returns the next non-whitespace character.
    fn next_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.next()
    }

    /// Returns the next maximal sequence of non-whitespace characters.
    fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace();
        let mut token = String::new();
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            token.push(c);
        }
        (!token.is_empty()).then_some(token)
    }

    fn next_number(&mut self) -> Option<Result<i64, String>> {
        self.next_token()
            .map(|token| token.parse::<i64>().map_err(|_| token))
    }
}

fn count(scanner: &mut Scanner<'_>, what: &'static str) -> Result<usize, ParseError> {
    match scanner.next_number() {
        Some(Ok(n)) if n >= 1 => Ok(n as usize),
        Some(Ok(n)) => Err(ParseError::Nonsensible { what, count: n }),
        _ => Err(ParseError::MissingHeader),
    }
}

/// Reads an automaton in the transition table format described in the [module documentation](crate::text).
/// The number of states and the size of the alphabet are checked against `limits` before anything
/// else is read.
///
/// # Example
/// ```
/// use minauto::prelude::*;
///
/// let dfa = parse_dfa("2 2  a b  1 -1  1 0  1", &Limits::default()).unwrap();
/// assert_eq!(dfa.size(), 2);
/// assert_eq!(dfa.transition(0, 1), None);
/// assert!(dfa.accepts("aba"));
/// assert!(!dfa.accepts("ab"));
/// ```
pub fn parse_dfa(input: &str, limits: &Limits) -> Result<Dfa, ParseError> {
    let mut scanner = Scanner::new(input);

    let states = count(&mut scanner, "states")?;
    let symbols = count(&mut scanner, "alphabet symbols")?;
    limits.check_states(states)?;
    limits.check_alphabet(symbols)?;
    trace!("reading automaton with {states} states over {symbols} symbols");

    let alphabet = (0..symbols)
        .map(|_| scanner.next_char().ok_or(ParseError::BadAlphabet))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(states);
    for state in 0..states {
        let mut row = Vec::with_capacity(symbols);
        for symbol in 0..symbols {
            let position = state * symbols + symbol;
            let target = match scanner.next_number() {
                Some(Ok(n)) if n < 0 => None,
                Some(Ok(n)) if n as usize >= states => {
                    return Err(AutomatonError::TargetOutOfRange {
                        state,
                        symbol,
                        target: n as usize,
                    }
                    .into())
                }
                Some(Ok(n)) => Some(n as usize),
                Some(Err(token)) => {
                    return Err(ParseError::BadState {
                        position,
                        found: Some(token),
                    })
                }
                None => {
                    return Err(ParseError::BadState {
                        position,
                        found: None,
                    })
                }
            };
            row.push(target);
        }
        rows.push(row);
    }

    let mut accepting = vec![];
    while let Some(token) = scanner.next_number() {
        match token {
            Ok(n) if n < 0 => return Err(ParseError::BadAcceptState(n.to_string())),
            Ok(n) if n as usize >= states => {
                return Err(AutomatonError::AcceptOutOfRange(n as usize).into())
            }
            Ok(n) => accepting.push(n as usize),
            Err(token) => return Err(ParseError::BadAcceptState(token)),
        }
    }

    Ok(Dfa::new(alphabet, rows, accepting, limits)?)
}
