/// The environment module stores variable bindings at runtime.
///
/// Environments form a chain of frames, one per active scope, each pointing
/// at the scope that encloses it. Function values capture the frame that was
/// current at their creation, which is what makes closures work.
///
/// # Responsibilities
/// - Defines and looks up variable bindings.
/// - Walks the enclosing chain for unresolved (global) references.
/// - Reaches a binding at an exact distance for resolved references.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages variable state, and
/// produces results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, control flow and `return` propagation.
/// - Reports runtime errors such as type mismatches or undefined variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Flags lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Recovers from syntax errors at statement boundaries so several errors
///   can be reported per run.
pub mod parser;
/// The resolver module performs static analysis on the parsed program.
///
/// The resolver walks the AST once before execution, tracking a stack of
/// lexical scopes. For every variable reference it records how many scopes
/// lie between the reference and its declaration, fixing each reference to
/// the binding that was visible where it appears in the source.
///
/// # Responsibilities
/// - Computes the binding-distance table consumed by the evaluator.
/// - Rejects duplicate declarations in the same local scope.
/// - Rejects initializers reading their own variable and top-level `return`.
pub mod resolver;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// numbers, strings, booleans, `nil`, user-defined functions and native
/// functions. It also defines truthiness, equality and the textual rendering
/// used by `print`.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, equality and display formatting.
/// - Defines the callable value types backing function calls.
pub mod value;
