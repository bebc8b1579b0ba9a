use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::FunctionDecl,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
    },
};

/// A runtime value.
///
/// Every expression evaluates to one of these. Values are cheap to clone:
/// numbers and booleans are copied, strings own their text, and functions are
/// reference-counted handles.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit floating point number. All numeric literals and arithmetic
    /// use this representation.
    Number(f64),
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// The absence of a value.
    Nil,
    /// A user-defined function together with its captured environment.
    Function(Rc<UserFunction>),
    /// A function provided by the interpreter itself.
    Native(NativeFunction),
}

impl Value {
    /// Returns the truthiness of the value: `nil` and `false` are falsey,
    /// everything else is truthy. Note that `0` and `""` are truthy.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }
}

impl PartialEq for Value {
    /// Equality never coerces. Values of different types are unequal, `nil`
    /// only equals `nil`, and numbers follow IEEE semantics (`NaN != NaN`).
    /// Functions are equal only when they are the same runtime object.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value the way `print` shows it: numbers drop a trailing
    /// `.0`, strings print bare without quotes, and `nil` prints as `nil`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => {
                if value.fract() == 0.0 {
                    write!(f, "{value:.0}")
                } else {
                    write!(f, "{value}")
                }
            },
            Self::Str(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Nil => write!(f, "nil"),
            Self::Function(function) => write!(f, "<fn {}>", function.name()),
            Self::Native(function) => write!(f, "<native fn {}>", function.name),
        }
    }
}

/// A function defined in source code.
///
/// Holds the parsed declaration and the environment frame that was current
/// when the declaration was evaluated. Calls extend that frame, never the
/// caller's, which is what gives closures access to their defining scope.
pub struct UserFunction {
    /// The parameter list and body, shared with the AST.
    pub declaration: Rc<FunctionDecl>,
    /// The captured environment.
    pub closure:     Rc<RefCell<Environment>>,
}

impl UserFunction {
    /// The declared name, or a placeholder for anonymous functions.
    #[must_use]
    pub fn name(&self) -> &str {
        self.declaration.name.as_deref().unwrap_or("anonymous")
    }
}

// The captured environment can reach back to this function through its own
// binding, so Debug must not recurse into it.
impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
         .field("name", &self.name())
         .finish_non_exhaustive()
    }
}

/// A function implemented in Rust and installed in the global environment.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    /// The name the function is defined under.
    pub name:     &'static str,
    /// The number of arguments the function accepts.
    pub arity:    usize,
    /// The implementation.
    pub function: fn(&mut Interpreter, &[Value]) -> EvalResult<Value>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}
