use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, ParseSession, parse_expression},
            utils::{expect, parse_identifier, parse_parameters, peek_line},
        },
    },
};

/// Parses a single declaration or statement.
///
/// A declaration may be one of:
/// - a function declaration (`fun name(params) { body }`),
/// - a variable declaration (`var name = initializer;`),
/// - any other statement.
///
/// This is the unit of error recovery: callers report a failure here and
/// resynchronize at the next statement boundary, so one broken statement
/// does not hide mistakes in the rest of the input.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                                session: &mut ParseSession<'_>)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Fun, line)) => {
            let line = *line;
            tokens.next();
            parse_function_declaration(tokens, session, line)
        },
        Some((Token::Var, line)) => {
            let line = *line;
            tokens.next();
            parse_var_declaration(tokens, session, line)
        },
        _ => parse_statement(tokens, session),
    }
}

/// Parses a named function declaration, after the `fun` keyword.
///
/// Grammar: `fun_decl := "fun" IDENTIFIER "(" parameters? ")" block`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `fun`.
/// - `session`: Parser state shared across the run.
/// - `line`: Line of the `fun` keyword.
///
/// # Returns
/// A `Stmt::Function` node sharing its declaration with future closures.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     session: &mut ParseSession<'_>,
                                     line: usize)
                                     -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, _) = parse_identifier(tokens, "function name", line)?;

    expect(tokens, &Token::LParen, "'(' after function name", line)?;
    let params = parse_parameters(tokens, session, line)?;
    let open = expect(tokens, &Token::LBrace, "'{' before function body", line)?;
    let body = parse_block_body(tokens, session, open)?;

    Ok(Stmt::Function(Rc::new(FunctionDecl { name: Some(name),
                                             params,
                                             body,
                                             line })))
}

/// Parses a variable declaration, after the `var` keyword.
///
/// Grammar: `var_decl := "var" IDENTIFIER ("=" expression)? ";"`
///
/// A declaration without an initializer binds the variable to `nil`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `var`.
/// - `session`: Parser state shared across the run.
/// - `line`: Line of the `var` keyword.
///
/// # Returns
/// A `Stmt::Var` node.
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>,
                                session: &mut ParseSession<'_>,
                                line: usize)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, _) = parse_identifier(tokens, "variable name", line)?;

    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens, session)?)
    } else {
        None
    };

    expect(tokens,
           &Token::Semicolon,
           "';' after variable declaration",
           line)?;

    Ok(Stmt::Var { name,
                   initializer,
                   line })
}

/// Parses a single non-declaration statement.
///
/// A statement may be one of:
/// - a `for` loop (desugared to `while`),
/// - an `if` statement,
/// - a `while` loop,
/// - a `print` statement,
/// - a braced block,
/// - a `return` statement,
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `session`: Parser state shared across the run.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              session: &mut ParseSession<'_>)
                              -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::For, line)) => {
            let line = *line;
            tokens.next();
            parse_for(tokens, session, line)
        },
        Some((Token::If, line)) => {
            let line = *line;
            tokens.next();
            parse_if(tokens, session, line)
        },
        Some((Token::While, line)) => {
            let line = *line;
            tokens.next();
            parse_while(tokens, session, line)
        },
        Some((Token::Print, line)) => {
            let line = *line;
            tokens.next();

            let expr = parse_expression(tokens, session)?;
            expect(tokens, &Token::Semicolon, "';' after value", line)?;
            Ok(Stmt::Print { expr, line })
        },
        Some((Token::LBrace, line)) => {
            let line = *line;
            tokens.next();

            let statements = parse_block_body(tokens, session, line)?;
            Ok(Stmt::Block { statements, line })
        },
        Some((Token::Return, line)) => {
            let line = *line;
            tokens.next();

            let value = if let Some((Token::Semicolon, _)) = tokens.peek() {
                None
            } else {
                Some(parse_expression(tokens, session)?)
            };
            expect(tokens, &Token::Semicolon, "';' after return value", line)?;
            Ok(Stmt::Return { value, line })
        },
        _ => {
            let line = peek_line(tokens, 0);
            let expr = parse_expression(tokens, session)?;
            expect(tokens, &Token::Semicolon, "';' after expression", line)?;
            Ok(Stmt::Expression { expr, line })
        },
    }
}

/// Parses the statements of a block, after the opening `{`.
///
/// Consumes up to and including the closing `}`. Errors inside the block are
/// reported and recovered locally, so the block itself survives one broken
/// statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `{`.
/// - `session`: Parser state shared across the run.
/// - `open_line`: Line of the opening brace.
///
/// # Returns
/// The statements of the block, in order.
///
/// # Errors
/// Returns `UnexpectedEndOfInput` when the input ends before the closing
/// brace.
pub fn parse_block_body<'a, I>(tokens: &mut Peekable<I>,
                               session: &mut ParseSession<'_>,
                               open_line: usize)
                               -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(statements);
            },
            Some(_) => match parse_declaration(tokens, session) {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    session.reporter.report(e);
                    synchronize(tokens);
                },
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: open_line }),
        }
    }
}

/// Parses an `if` statement, after the `if` keyword.
///
/// Grammar: `if_stmt := "if" "(" expression ")" statement ("else" statement)?`
///
/// The `else` binds to the nearest unmatched `if`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `if`.
/// - `session`: Parser state shared across the run.
/// - `line`: Line of the `if` keyword.
///
/// # Returns
/// A `Stmt::If` node.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   session: &mut ParseSession<'_>,
                   line: usize)
                   -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' after 'if'", line)?;
    let condition = parse_expression(tokens, session)?;
    expect(tokens, &Token::RParen, "')' after if condition", line)?;

    let then_branch = parse_statement(tokens, session)?;

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens, session)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch: Box::new(then_branch),
                  else_branch,
                  line })
}

/// Parses a `while` loop, after the `while` keyword.
///
/// Grammar: `while_stmt := "while" "(" expression ")" statement`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `while`.
/// - `session`: Parser state shared across the run.
/// - `line`: Line of the `while` keyword.
///
/// # Returns
/// A `Stmt::While` node.
fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      session: &mut ParseSession<'_>,
                      line: usize)
                      -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' after 'while'", line)?;
    let condition = parse_expression(tokens, session)?;
    expect(tokens, &Token::RParen, "')' after condition", line)?;

    let body = parse_statement(tokens, session)?;

    Ok(Stmt::While { condition,
                     body: Box::new(body),
                     line })
}

/// Parses a `for` loop, after the `for` keyword, and desugars it.
///
/// Grammar:
/// `for_stmt := "for" "(" (var_decl | expr_stmt | ";")
///              expression? ";" expression? ")" statement`
///
/// There is no `For` AST node. The loop is rewritten into the equivalent
/// `while` form:
///
/// ```text
/// { initializer; while (condition) { body; increment; } }
/// ```
///
/// A missing condition becomes the literal `true`. The outer block keeps a
/// `var` initializer scoped to the loop.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `for`.
/// - `session`: Parser state shared across the run.
/// - `line`: Line of the `for` keyword.
///
/// # Returns
/// The desugared `Stmt::Block` node.
fn parse_for<'a, I>(tokens: &mut Peekable<I>,
                    session: &mut ParseSession<'_>,
                    line: usize)
                    -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' after 'for'", line)?;

    let initializer = match tokens.peek() {
        Some((Token::Semicolon, _)) => {
            tokens.next();
            None
        },
        Some((Token::Var, var_line)) => {
            let var_line = *var_line;
            tokens.next();
            Some(parse_var_declaration(tokens, session, var_line)?)
        },
        _ => {
            let expr_line = peek_line(tokens, line);
            let expr = parse_expression(tokens, session)?;
            expect(tokens, &Token::Semicolon, "';' after expression", expr_line)?;
            Some(Stmt::Expression { expr,
                                    line: expr_line })
        },
    };

    let condition = if let Some((Token::Semicolon, _)) = tokens.peek() {
        None
    } else {
        Some(parse_expression(tokens, session)?)
    };
    expect(tokens, &Token::Semicolon, "';' after for condition", line)?;

    let increment = if let Some((Token::RParen, _)) = tokens.peek() {
        None
    } else {
        Some(parse_expression(tokens, session)?)
    };
    expect(tokens, &Token::RParen, "')' after for clauses", line)?;

    let body = parse_statement(tokens, session)?;

    let mut loop_body = vec![body];
    if let Some(increment) = increment {
        let increment_line = increment.line_number();
        loop_body.push(Stmt::Expression { expr: increment,
                                          line: increment_line, });
    }

    let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                        line });
    let while_loop = Stmt::While { condition,
                                   body: Box::new(Stmt::Block { statements: loop_body,
                                                                line }),
                                   line };

    let mut statements = Vec::new();
    if let Some(initializer) = initializer {
        statements.push(initializer);
    }
    statements.push(while_loop);

    Ok(Stmt::Block { statements, line })
}

/// Discards tokens until a likely statement boundary.
///
/// Called after a parse error. Consumes up to and including the next `;`, or
/// stops just before a keyword that starts a statement, leaving the stream
/// positioned where parsing can plausibly resume.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the failed token's successor.
pub fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((token, _)) = tokens.peek() {
        match token {
            Token::Semicolon => {
                tokens.next();
                return;
            },
            Token::Class
            | Token::Fun
            | Token::Var
            | Token::For
            | Token::If
            | Token::While
            | Token::Print
            | Token::Return => return,
            _ => {
                tokens.next();
            },
        }
    }
}
