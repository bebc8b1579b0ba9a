#[derive(Debug)]
/// Represents all errors detected by static analysis between parsing and
/// evaluation.
pub enum ResolveError {
    /// Two declarations of the same name share a local scope.
    VariableAlreadyDeclared {
        /// The variable name.
        name: String,
        /// The source line of the second declaration.
        line: usize,
    },
    /// A variable initializer reads the variable it declares, e.g.
    /// `var a = a;` inside a block.
    SelfReferencingInitializer {
        /// The variable name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` statement appeared outside of any function body.
    TopLevelReturn {
        /// The source line of the `return` keyword.
        line: usize,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableAlreadyDeclared { name, line } => write!(f,
                                                                   "Error on line {line}: Variable '{name}' is already declared in this scope."),

            Self::SelfReferencingInitializer { name, line } => write!(f,
                                                                      "Error on line {line}: Cannot read variable '{name}' in its own initializer."),

            Self::TopLevelReturn { line } => write!(f,
                                                    "Error on line {line}: Cannot return from top-level code."),
        }
    }
}

impl std::error::Error for ResolveError {}
