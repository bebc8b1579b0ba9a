use std::iter::Peekable;

use crate::{
    ast::{Expr, NodeIds},
    error::{ErrorReporter, ParseError},
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, utils::expect},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// State threaded through one parser run.
///
/// Carries the node-id allocator, so every `Variable` and `Assign` node gets
/// a fresh id, and the error sink for mistakes the parser can report without
/// abandoning the current statement.
pub struct ParseSession<'s> {
    /// Allocator for AST node ids.
    pub ids:      &'s mut NodeIds,
    /// Sink for non-fatal diagnostics.
    pub reporter: &'s mut ErrorReporter,
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               session: &mut ParseSession<'_>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens, session)
}

/// Parses an assignment, or whatever tighter-binding expression is present.
///
/// Grammar: `assignment := ternary ("=" assignment)?`
///
/// Assignment is right-associative: `a = b = c` assigns `c` to both names.
/// The left side is parsed first as an ordinary expression; only afterwards
/// is it checked to be a plain variable reference. Anything else (such as
/// `(a) = 1` or `a + b = 1`) is reported as an invalid assignment target,
/// and the left side is returned so parsing can continue.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// An `Expr::Assign` node, or the left side unchanged when no `=` follows.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                               session: &mut ParseSession<'_>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_ternary(tokens, session)?;

    if let Some((Token::Equals, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let value = parse_assignment(tokens, session)?;

        if let Expr::Variable { name, .. } = left {
            return Ok(Expr::Assign { name,
                                     id: session.ids.fresh(),
                                     value: Box::new(value),
                                     line });
        }

        session.reporter
               .report(ParseError::InvalidAssignmentTarget { line });
    }

    Ok(left)
}

/// Parses a conditional (ternary) expression.
///
/// Grammar: `ternary := logical_or ("?" expression ":" expression)?`
///
/// The branches are full expressions, which makes the operator
/// right-associative: `a ? b : c ? d : e` groups as `a ? b : (c ? d : e)`.
/// A `?` without its matching `:` is a syntax error.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// An `Expr::Ternary` node, or the condition unchanged when no `?` follows.
pub fn parse_ternary<'a, I>(tokens: &mut Peekable<I>,
                            session: &mut ParseSession<'_>)
                            -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_logical_or(tokens, session)?;

    if let Some((Token::Question, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let then_branch = parse_expression(tokens, session)?;
        expect(tokens, &Token::Colon, "':' after then branch", line)?;
        let else_branch = parse_expression(tokens, session)?;

        return Ok(Expr::Ternary { condition:   Box::new(condition),
                                  then_branch: Box::new(then_branch),
                                  else_branch: Box::new(else_branch),
                                  line });
    }

    Ok(condition)
}
