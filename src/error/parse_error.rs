#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The scanner found a character that belongs to no token.
    UnexpectedCharacter {
        /// The offending character(s).
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal was still open at the end of input.
    UnterminatedString {
        /// The source line where the string started ending the input.
        line: usize,
    },
    /// A specific token was required but something else was found.
    Expected {
        /// Description of the required token, e.g. `';' after value`.
        expected: String,
        /// The token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An expression was required but the next token cannot start one.
    ExpectedExpression {
        /// The token actually found.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of an `=` is not assignable.
    InvalidAssignmentTarget {
        /// The source line of the `=` token.
        line: usize,
    },
    /// A binary operator appeared with no left operand, e.g. `* 3`.
    MissingLeftOperand {
        /// The operator token found in prefix position.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function was declared with more than 255 parameters.
    TooManyParameters {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied more than 255 arguments.
    TooManyArguments {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after parsing should have completed.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "Error on line {line}: Unexpected character '{character}'.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string.")
            },

            Self::Expected { expected,
                             found,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::ExpectedExpression { found, line } => {
                write!(f, "Error on line {line}: Expected expression, found {found}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },

            Self::MissingLeftOperand { operator, line } => write!(f,
                                                                  "Error on line {line}: Operator '{operator}' requires two operands."),

            Self::TooManyParameters { line } => write!(f,
                                                       "Error on line {line}: Cannot have more than 255 parameters."),

            Self::TooManyArguments { line } => write!(f,
                                                      "Error on line {line}: Cannot have more than 255 arguments."),

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after expression. Check your input: {token}"),
        }
    }
}

impl std::error::Error for ParseError {}
