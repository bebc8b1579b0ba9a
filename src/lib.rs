//! # rolox
//!
//! rolox is a tree-walking interpreter for the Lox scripting language,
//! written in Rust. It scans, parses, statically resolves and evaluates
//! programs with support for variables, lexical scoping, control flow,
//! first-class functions and closures.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;

use logos::Logos;

use crate::{
    ast::{Expr, NodeId, NodeIds, Stmt},
    error::{ErrorReporter, ExecError, ParseError},
    interpreter::{
        evaluator::core::Interpreter,
        lexer::{LexerExtras, Token},
        parser::{
            core::ParseSession,
            statement::{parse_declaration, synchronize},
        },
        resolver::Resolver,
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser, annotated by the resolver, and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches metadata (source lines, node ids) to AST nodes for error
///   reporting and resolution.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while scanning,
/// parsing, resolving or evaluating code, plus the reporter that collects
/// static errors across a run. It standardizes error reporting and carries
/// detailed information about failures, including source locations.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, resolver,
///   evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, resolution, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code execution. It exposes the
/// building blocks behind the crate-level entry points.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, resolver, evaluator,
///   and value types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Scans source text into a stream of `(token, line)` pairs.
///
/// Scanning always runs to the end of the input. Unrecognized characters and
/// unterminated strings are pushed into `reporter` and skipped, so the
/// parser still gets to look at the rest of the input. The end of the stream
/// is simply the end of the vector; there is no terminator token.
///
/// # Parameters
/// - `source`: The program text.
/// - `reporter`: Sink for lexical errors.
///
/// # Returns
/// The recognized tokens with the line each one ended on.
#[must_use]
pub fn scan(source: &str, reporter: &mut ErrorReporter) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::UnterminatedString) => {
                reporter.report(ParseError::UnterminatedString { line: lexer.extras.line });
            },
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                reporter.report(ParseError::UnexpectedCharacter { character:
                                                                      lexer.slice().to_string(),
                                                                  line: lexer.extras.line, });
            },
        }
    }

    tokens
}

/// Parses a token stream into a program.
///
/// Parsing recovers at statement boundaries: when a statement fails, its
/// error goes into `reporter`, input is discarded up to the next boundary,
/// and parsing continues. Failed statements contribute nothing to the
/// result, so the returned program is only meaningful when the reporter
/// stayed empty.
///
/// # Parameters
/// - `tokens`: The scanned `(token, line)` pairs.
/// - `ids`: Allocator for AST node ids.
/// - `reporter`: Sink for syntax errors.
///
/// # Returns
/// The statements that parsed cleanly, in source order.
#[must_use]
pub fn parse(tokens: &[(Token, usize)],
             ids: &mut NodeIds,
             reporter: &mut ErrorReporter)
             -> Vec<Stmt> {
    let mut iter = tokens.iter().peekable();
    let mut session = ParseSession { ids, reporter };
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        match parse_declaration(&mut iter, &mut session) {
            Ok(statement) => statements.push(statement),
            Err(e) => {
                session.reporter.report(e);
                synchronize(&mut iter);
            },
        }
    }

    statements
}

/// Parses a token stream as one bare expression.
///
/// Used by the interactive prompt to evaluate things like `1 + 2` without a
/// trailing semicolon. The whole stream must be consumed; leftover tokens
/// are an error.
///
/// # Parameters
/// - `tokens`: The scanned `(token, line)` pairs.
/// - `ids`: Allocator for AST node ids.
/// - `reporter`: Sink for syntax errors.
///
/// # Returns
/// The expression, or `None` when parsing failed (the reporter then holds
/// the reason).
#[must_use]
pub fn parse_expression(tokens: &[(Token, usize)],
                        ids: &mut NodeIds,
                        reporter: &mut ErrorReporter)
                        -> Option<Expr> {
    let mut iter = tokens.iter().peekable();
    let mut session = ParseSession { ids, reporter };

    match interpreter::parser::core::parse_expression(&mut iter, &mut session) {
        Ok(expr) => {
            if let Some((tok, line)) = iter.peek() {
                session.reporter
                       .report(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                                      line:  *line, });
                return None;
            }
            Some(expr)
        },
        Err(e) => {
            session.reporter.report(e);
            None
        },
    }
}

/// Resolves a program and returns its binding-distance table.
///
/// The table maps the node id of each `Variable`/`Assign` node that refers
/// to a local binding to the number of scopes between the reference and its
/// declaration. References to globals are absent from the table. Static
/// semantic errors (duplicate declarations, self-referencing initializers,
/// top-level `return`) are pushed into `reporter`.
///
/// # Parameters
/// - `statements`: The parsed program.
/// - `reporter`: Sink for resolution errors.
///
/// # Returns
/// The binding-distance table.
#[must_use]
pub fn resolve(statements: &[Stmt], reporter: &mut ErrorReporter) -> HashMap<NodeId, usize> {
    let mut resolver = Resolver::new(reporter);
    resolver.resolve_statements(statements);
    resolver.into_locals()
}

/// An interpreter session that persists across inputs.
///
/// Owns the interpreter state and the node-id allocator, so globals defined
/// by one input remain visible to the next and binding tables never collide.
/// This is what the interactive prompt keeps between lines.
///
/// # Examples
/// ```
/// use rolox::{Session, interpreter::value::Value};
///
/// let mut session = Session::new();
/// session.run("var x = 2;").unwrap();
/// assert_eq!(session.run_expression("x + 1").unwrap(), Value::Number(3.0));
/// ```
pub struct Session {
    interpreter: Interpreter,
    ids:         NodeIds,
}

#[allow(clippy::new_without_default)]
impl Session {
    /// Creates a session with a fresh global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { interpreter: Interpreter::new(),
               ids:         NodeIds::new(), }
    }

    /// Runs a program: scan, parse, resolve, execute.
    ///
    /// Static errors abort before execution and arrive batched; the program
    /// has no effect in that case. A runtime error aborts execution at the
    /// failing statement, keeping any side effects that already happened.
    ///
    /// # Errors
    /// [`ExecError::Static`] when the front end rejected the input,
    /// [`ExecError::Runtime`] when execution failed.
    pub fn run(&mut self, source: &str) -> Result<(), ExecError> {
        let mut reporter = ErrorReporter::new();

        let tokens = scan(source, &mut reporter);
        let statements = parse(&tokens, &mut self.ids, &mut reporter);
        if reporter.had_errors() {
            return Err(ExecError::Static(reporter.take()));
        }

        let locals = resolve(&statements, &mut reporter);
        if reporter.had_errors() {
            return Err(ExecError::Static(reporter.take()));
        }

        self.interpreter.add_bindings(locals);
        self.interpreter
            .interpret(&statements)
            .map_err(ExecError::Runtime)
    }

    /// Evaluates one bare expression and returns its value.
    ///
    /// The expression is resolved like a one-statement program, so anonymous
    /// functions and their parameters work here too.
    ///
    /// # Errors
    /// [`ExecError::Static`] when the input is not a single well-formed
    /// expression, [`ExecError::Runtime`] when evaluation failed.
    pub fn run_expression(&mut self, source: &str) -> Result<Value, ExecError> {
        let mut reporter = ErrorReporter::new();

        let tokens = scan(source, &mut reporter);
        let expr = parse_expression(&tokens, &mut self.ids, &mut reporter);
        let Some(expr) = expr else {
            return Err(ExecError::Static(reporter.take()));
        };
        if reporter.had_errors() {
            return Err(ExecError::Static(reporter.take()));
        }

        let line = expr.line_number();
        let statement = Stmt::Expression { expr, line };
        let locals = resolve(std::slice::from_ref(&statement), &mut reporter);
        if reporter.had_errors() {
            return Err(ExecError::Static(reporter.take()));
        }

        self.interpreter.add_bindings(locals);
        let Stmt::Expression { expr, .. } = statement else {
            unreachable!()
        };
        self.interpreter.evaluate(&expr).map_err(ExecError::Runtime)
    }
}

/// Runs a program in a fresh session.
///
/// This is the one-shot entry point used by the CLI for script files and by
/// the test suite.
///
/// # Errors
/// Returns an error if scanning, parsing or resolution fails, or if any
/// runtime error occurs.
///
/// # Examples
/// ```
/// use rolox::run;
///
/// // Simple program: the statements execute and no error should occur.
/// let source = "var result = 2 + 2; print result;";
/// assert!(run(source).is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let source = "var y = x + 1;"; // 'x' is not defined
/// assert!(run(source).is_err());
/// ```
pub fn run(source: &str) -> Result<(), ExecError> {
    Session::new().run(source)
}
