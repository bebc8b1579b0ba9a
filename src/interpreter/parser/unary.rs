use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::token_to_binary_operator,
            core::{ParseResult, ParseSession, parse_expression},
            statement::parse_block_body,
            utils::{expect, parse_parameters, peek_line},
        },
    },
};

/// Parses a unary expression.
///
/// Grammar: `unary := ("!" | "-") unary | lambda`
///
/// A binary operator in prefix position (such as `* 3`) is reported as a
/// missing left operand rather than an unexpected token, which reads better
/// for the most common slip.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// An `Expr::Unary` node, or the tighter-binding expression when no prefix
/// operator is present.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                          session: &mut ParseSession<'_>)
                          -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((token, line)) = tokens.peek() {
        let line = *line;

        let op = match token {
            Token::Bang => Some(UnaryOperator::Not),
            Token::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };

        if let Some(op) = op {
            tokens.next();
            let operand = parse_unary(tokens, session)?;
            return Ok(Expr::Unary { op,
                                    operand: Box::new(operand),
                                    line });
        }

        if token_to_binary_operator(token).is_some() {
            let operator = format!("{token:?}");
            tokens.next();
            return Err(ParseError::MissingLeftOperand { operator, line });
        }
    }

    parse_lambda(tokens, session)
}

/// Parses an anonymous function expression, or falls through to calls.
///
/// Grammar: `lambda := "fun" "(" parameters? ")" block | call`
///
/// Anonymous functions reuse [`FunctionDecl`] with no name; the evaluator
/// treats them exactly like declared functions.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// An `Expr::Lambda` node, or whatever `call` parses when the next token is
/// not `fun`.
pub fn parse_lambda<'a, I>(tokens: &mut Peekable<I>,
                           session: &mut ParseSession<'_>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Fun, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        expect(tokens, &Token::LParen, "'(' after 'fun'", line)?;
        let params = parse_parameters(tokens, session, line)?;
        let open = expect(tokens, &Token::LBrace, "'{' before function body", line)?;
        let body = parse_block_body(tokens, session, open)?;

        let declaration = FunctionDecl { name: None,
                                         params,
                                         body,
                                         line };
        return Ok(Expr::Lambda { declaration: Rc::new(declaration),
                                 line });
    }

    parse_call(tokens, session)
}

/// Parses a call chain.
///
/// Grammar: `call := primary ("(" arguments? ")")*`
///
/// Calls are left-associative, so `f(1)(2)` calls the result of `f(1)`.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// A possibly nested `Expr::Call` tree over a primary expression.
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                         session: &mut ParseSession<'_>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens, session)?;

    while let Some((Token::LParen, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        expr = finish_call(tokens, session, expr, line)?;
    }

    Ok(expr)
}

/// Parses the argument list of a call, starting after the `(`.
///
/// An empty argument list is accepted. More than 255 arguments are reported
/// through the session's error sink but the call is still built.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening parenthesis.
/// - `session`: Parser state shared across the run.
/// - `callee`: The already-parsed callee expression.
/// - `line`: Line of the opening parenthesis, used as a fallback.
///
/// # Returns
/// An `Expr::Call` node carrying the line of the closing parenthesis.
///
/// # Errors
/// Returns a `ParseError` if an argument fails to parse, a separator is
/// missing, or input ends before the closing parenthesis.
fn finish_call<'a, I>(tokens: &mut Peekable<I>,
                      session: &mut ParseSession<'_>,
                      callee: Expr,
                      line: usize)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if let Some((Token::RParen, close)) = tokens.peek() {
        let close = *close;
        tokens.next();
        return Ok(Expr::Call { callee: Box::new(callee),
                               arguments,
                               line: close });
    }

    let close = loop {
        if arguments.len() >= 255 {
            let line = peek_line(tokens, line);
            session.reporter.report(ParseError::TooManyArguments { line });
        }

        arguments.push(parse_expression(tokens, session)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, close)) => break *close,
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected: "')' after arguments".to_string(),
                                                  found:    format!("{tok:?}"),
                                                  line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    };

    Ok(Expr::Call { callee: Box::new(callee),
                    arguments,
                    line: close })
}

/// Parses a primary expression.
///
/// Grammar: `primary := NUMBER | STRING | "true" | "false" | "nil"
///                    | "(" expression ")" | IDENTIFIER`
///
/// Variable references are given a fresh node id here so the resolver can
/// record a binding distance for them.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// The parsed leaf or grouping expression.
///
/// # Errors
/// Returns `ExpectedExpression` when the next token cannot start an
/// expression, and `UnexpectedEndOfInput` at end of stream.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                            session: &mut ParseSession<'_>)
                            -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), line)) => {
            Ok(Expr::Literal { value: LiteralValue::Number(*value),
                               line:  *line, })
        },
        Some((Token::Str(value), line)) => {
            Ok(Expr::Literal { value: LiteralValue::Str(value.clone()),
                               line:  *line, })
        },
        Some((Token::Bool(value), line)) => {
            Ok(Expr::Literal { value: LiteralValue::Bool(*value),
                               line:  *line, })
        },
        Some((Token::Nil, line)) => {
            Ok(Expr::Literal { value: LiteralValue::Nil,
                               line:  *line, })
        },
        Some((Token::LParen, line)) => {
            let line = *line;
            let expr = parse_expression(tokens, session)?;
            expect(tokens, &Token::RParen, "')' after expression", line)?;
            Ok(Expr::Grouping { expr: Box::new(expr),
                                line })
        },
        Some((Token::Identifier(name), line)) => {
            Ok(Expr::Variable { name: name.clone(),
                                id:   session.ids.fresh(),
                                line: *line, })
        },
        Some((tok, line)) => {
            Err(ParseError::ExpectedExpression { found: format!("{tok:?}"),
                                                 line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
