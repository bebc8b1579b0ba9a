/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals, and any other issues detected before static analysis.
pub mod parse_error;
/// Resolution errors.
///
/// Contains all error types raised by the static analysis pass that runs
/// between parsing and evaluation: duplicate declarations, initializers that
/// read their own variable, and `return` outside of a function.
pub mod resolve_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like undefined variables, type
/// mismatches on operators, and calls with the wrong number of arguments.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use resolve_error::ResolveError;
pub use runtime_error::RuntimeError;

/// An error detected before execution, by either the parser or the resolver.
///
/// The scanner, parser and resolver do not stop at the first mistake; they
/// push every error they find into an [`ErrorReporter`] and keep going, so
/// one run can surface several problems at once.
#[derive(Debug)]
pub enum StaticError {
    /// A lexical or syntax error.
    Parse(ParseError),
    /// A static semantic error.
    Resolve(ResolveError),
}

impl std::fmt::Display for StaticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Resolve(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StaticError {}

impl From<ParseError> for StaticError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<ResolveError> for StaticError {
    fn from(error: ResolveError) -> Self {
        Self::Resolve(error)
    }
}

/// Collects static errors in the order they were detected.
///
/// The front-end phases share one reporter per run. Phases report into it and
/// continue working on a best-effort basis; the pipeline checks
/// [`had_errors`](Self::had_errors) between phases and refuses to execute
/// anything once the reporter is non-empty.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    errors: Vec<StaticError>,
}

impl ErrorReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records one error.
    pub fn report(&mut self, error: impl Into<StaticError>) {
        self.errors.push(error.into());
    }

    /// Returns `true` when at least one error has been recorded.
    #[must_use]
    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The recorded errors, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[StaticError] {
        &self.errors
    }

    /// Consumes the reporter and returns the recorded errors.
    #[must_use]
    pub fn take(self) -> Vec<StaticError> {
        self.errors
    }
}

/// The error type returned by the execution entry points.
#[derive(Debug)]
pub enum ExecError {
    /// The front end rejected the input; nothing was executed.
    Static(Vec<StaticError>),
    /// The program started executing and hit a runtime error.
    Runtime(RuntimeError),
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(errors) => {
                let mut first = true;
                for error in errors {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                    first = false;
                }
                Ok(())
            },
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExecError {}
