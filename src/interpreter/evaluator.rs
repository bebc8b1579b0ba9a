/// Binary, logical and conditional operator semantics.
pub mod binary;
/// The interpreter state and the expression dispatch loop.
pub mod core;
/// Call evaluation, user-defined functions and native functions.
pub mod function;
/// Statement execution and `return` propagation.
pub mod statement;
/// Unary operator semantics.
pub mod unary;
