#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to read or assign a variable that was never defined.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A unary operator was applied to a non-number.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric binary operator received a non-number operand.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither both numbers nor both strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call was made on a value that is not a function.
    NotCallable {
        /// The source line of the call.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line of the call.
        line:     usize,
    },
    /// The binding-distance table pointed at an environment frame that does
    /// not exist. Indicates an internal fault, not a user error.
    UnresolvedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },

            Self::OperandMustBeNumber { line } => {
                write!(f, "Error on line {line}: Operand must be a number.")
            },

            Self::OperandsMustBeNumbers { line } => {
                write!(f, "Error on line {line}: Operands must be numbers.")
            },

            Self::OperandsMustBeNumbersOrStrings { line } => write!(f,
                                                                    "Error on line {line}: Each operand must be either a string or a number."),

            Self::NotCallable { line } => write!(f,
                                                 "Error on line {line}: Can only call functions."),

            Self::ArityMismatch { expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: Expected {expected} arguments but got {found}."),

            Self::UnresolvedVariable { name, line } => write!(f,
                                                              "Error on line {line}: Failed to resolve environment for variable '{name}'."),
        }
    }
}

impl std::error::Error for RuntimeError {}
