use std::iter::Peekable;

use crate::{
    ast::Parameter,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, ParseSession},
    },
};

/// Returns the line of the next token, or `fallback` at end of input.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>,
                                                       fallback: usize)
                                                       -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(fallback, |(_, l)| *l)
}

/// Consumes the next token, which must equal `expected`.
///
/// `description` names the requirement in the error message, e.g.
/// `"';' after value"`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the required token.
/// - `expected`: The token that must come next.
/// - `description`: Human-readable description of the requirement.
/// - `fallback_line`: Line reported when the input ends here.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// Returns a `ParseError` if the next token differs or the input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str,
                                                    fallback_line: usize)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => {
            Err(ParseError::Expected { expected: description.to_string(),
                                       found:    format!("{tok:?}"),
                                       line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: fallback_line }),
    }
}

/// Parses a plain identifier and returns its name and line.
///
/// `description` names the identifier's role in the error message, e.g.
/// `"variable name"`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
/// - `description`: Human-readable description of the expected name.
/// - `fallback_line`: Line reported when the input ends here.
///
/// # Returns
/// The identifier text and the line it appeared on.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              description: &str,
                                                              fallback_line: usize)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => Ok((name.clone(), *line)),
        Some((tok, line)) => {
            Err(ParseError::Expected { expected: description.to_string(),
                                       found:    format!("{tok:?}"),
                                       line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: fallback_line }),
    }
}

/// Parses a parenthesized parameter list, starting after the `(`.
///
/// Consumes up to and including the closing `)`. An empty list is accepted.
/// Lists longer than 255 entries are reported through the session's error
/// sink but parsing continues, so one oversized list yields one usable
/// declaration plus diagnostics.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening parenthesis.
/// - `session`: Parser state, used here for non-fatal reports.
/// - `fallback_line`: Line reported when the input ends inside the list.
///
/// # Returns
/// The parsed parameters in declaration order.
///
/// # Errors
/// Returns a `ParseError` if a parameter is not an identifier, a separator
/// is missing, or the input ends before the closing parenthesis.
pub(in crate::interpreter::parser) fn parse_parameters<'a, I>(tokens: &mut Peekable<I>,
                                                              session: &mut ParseSession<'_>,
                                                              fallback_line: usize)
                                                              -> ParseResult<Vec<Parameter>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut params = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(params);
    }

    loop {
        if params.len() >= 255 {
            let line = peek_line(tokens, fallback_line);
            session.reporter.report(ParseError::TooManyParameters { line });
        }

        let (name, line) = parse_identifier(tokens, "parameter name", fallback_line)?;
        params.push(Parameter { name, line });

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected:
                                                      "')' after parameters".to_string(),
                                                  found: format!("{tok:?}"),
                                                  line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: fallback_line }),
        }
    }

    Ok(params)
}
