/// Binary expression parsing.
///
/// Implements the infix precedence ladder, from logical `or` at the bottom
/// through `and`, equality, comparison, addition and multiplication. Each
/// level is left-associative and delegates to the next tighter level.
pub mod binary;
/// Core parsing types and the expression entry point.
///
/// Defines the parse result type, the per-run parser state, and the
/// lowest-precedence expression rules: assignment and the conditional
/// (ternary) operator.
pub mod core;
/// Statement and declaration parsing.
///
/// Handles variable and function declarations, control-flow statements,
/// blocks, `print`, `return`, the desugaring of `for` loops into `while`
/// loops, and panic-mode recovery at statement boundaries.
pub mod statement;
/// Unary, call and primary expression parsing.
///
/// Covers prefix operators, anonymous function expressions, call chains and
/// the primary forms: literals, groupings and variable references.
pub mod unary;
/// Shared token-stream helpers used across the parser modules.
pub mod utils;
