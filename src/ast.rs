use std::rc::Rc;

/// Identifies a single AST node for the resolver and evaluator.
///
/// Variable references and assignments receive an id at parse time so the
/// binding-distance table can be keyed without comparing whole subtrees.
/// Ids are unique within one [`NodeIds`] allocator.
pub type NodeId = usize;

/// Hands out fresh [`NodeId`]s.
///
/// One allocator is shared across all parses that feed the same interpreter,
/// keeping ids unique across separate inputs (for example successive prompt
/// lines).
#[derive(Debug, Default)]
pub struct NodeIds {
    next: NodeId,
}

impl NodeIds {
    /// Creates an allocator whose first id is `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns the next unused id.
    pub fn fresh(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A literal value as it appears in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal tokens, such as `4` or `12.5`.
    Number(f64),
    /// String literal tokens, such as `"hello"`.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// `nil`.
    Nil,
}

/// A function parameter together with the line it was declared on.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The source line of the declaration.
    pub line: usize,
}

/// The shared shape of named function declarations and anonymous function
/// expressions.
///
/// Declarations are reference-counted because every runtime function value
/// created from one keeps a handle to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The declared name, or `None` for anonymous functions.
    pub name:   Option<String>,
    /// The parameter list, at most 255 entries.
    pub params: Vec<Parameter>,
    /// The statements making up the body.
    pub body:   Vec<Stmt>,
    /// The source line of the `fun` keyword.
    pub line:   usize,
}

/// Represents an expression node in the AST.
///
/// Expressions are built by the parser and evaluated to a runtime value.
/// Every variant carries the source line of its principal token for error
/// reporting; `Variable` and `Assign` additionally carry a [`NodeId`] that
/// keys the resolver's binding-distance table.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value, such as `1`, `"text"`, `true` or `nil`.
    Literal {
        /// The literal itself.
        value: LiteralValue,
        /// The source line of the literal token.
        line:  usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The wrapped expression.
        expr: Box<Expr>,
        /// The source line of the opening parenthesis.
        line: usize,
    },
    /// A prefix operator applied to a single operand.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Expr>,
        /// The source line of the operator token.
        line:    usize,
    },
    /// An infix arithmetic, comparison or equality operation.
    Binary {
        /// The left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// The right operand.
        right: Box<Expr>,
        /// The source line of the operator token.
        line:  usize,
    },
    /// A short-circuiting `and`/`or` operation.
    Logical {
        /// The left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    LogicalOperator,
        /// The right operand, evaluated only when needed.
        right: Box<Expr>,
        /// The source line of the operator token.
        line:  usize,
    },
    /// A conditional expression: `condition ? then : else`.
    Ternary {
        /// The tested condition.
        condition:   Box<Expr>,
        /// The result when the condition is truthy.
        then_branch: Box<Expr>,
        /// The result when the condition is falsey.
        else_branch: Box<Expr>,
        /// The source line of the `?` token.
        line:        usize,
    },
    /// A variable reference.
    Variable {
        /// The variable name.
        name: String,
        /// The id keying the binding-distance table.
        id:   NodeId,
        /// The source line of the identifier.
        line: usize,
    },
    /// An assignment to an existing variable.
    Assign {
        /// The variable name.
        name:  String,
        /// The id keying the binding-distance table.
        id:    NodeId,
        /// The assigned expression.
        value: Box<Expr>,
        /// The source line of the `=` token.
        line:  usize,
    },
    /// A call with zero or more arguments.
    Call {
        /// The expression producing the callee.
        callee:    Box<Expr>,
        /// The argument expressions, at most 255.
        arguments: Vec<Expr>,
        /// The source line of the closing parenthesis.
        line:      usize,
    },
    /// An anonymous function expression: `fun (params) { body }`.
    Lambda {
        /// The parameter list and body.
        declaration: Rc<FunctionDecl>,
        /// The source line of the `fun` keyword.
        line:        usize,
    },
}

impl Expr {
    /// Returns the source line attached to this node.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Grouping { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Logical { line, .. }
            | Self::Ternary { line, .. }
            | Self::Variable { line, .. }
            | Self::Assign { line, .. }
            | Self::Call { line, .. }
            | Self::Lambda { line, .. } => *line,
        }
    }
}

/// Represents a statement node in the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects.
    Expression {
        /// The evaluated expression.
        expr: Expr,
        /// The source line of the statement.
        line: usize,
    },
    /// `print <expression>;`
    Print {
        /// The printed expression.
        expr: Expr,
        /// The source line of the `print` keyword.
        line: usize,
    },
    /// A variable declaration with an optional initializer.
    Var {
        /// The declared name.
        name:        String,
        /// The initializer, or `None` for an implicit `nil`.
        initializer: Option<Expr>,
        /// The source line of the `var` keyword.
        line:        usize,
    },
    /// A braced block introducing a new scope.
    Block {
        /// The statements inside the block.
        statements: Vec<Stmt>,
        /// The source line of the opening brace.
        line:       usize,
    },
    /// An `if` statement with an optional `else` branch.
    If {
        /// The tested condition.
        condition:   Expr,
        /// The statement executed when the condition is truthy.
        then_branch: Box<Stmt>,
        /// The statement executed otherwise, if present.
        else_branch: Option<Box<Stmt>>,
        /// The source line of the `if` keyword.
        line:        usize,
    },
    /// A `while` loop. `for` loops desugar to this form.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Stmt>,
        /// The source line of the `while` keyword.
        line:      usize,
    },
    /// A named function declaration.
    Function(Rc<FunctionDecl>),
    /// A `return` statement with an optional value.
    Return {
        /// The returned expression, or `None` for an implicit `nil`.
        value: Option<Expr>,
        /// The source line of the `return` keyword.
        line:  usize,
    },
}

/// Infix operators combining two operands into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+` (numbers or strings)
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{symbol}")
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-` (numeric negation)
    Negate,
    /// `!` (logical not)
    Not,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

/// Short-circuiting logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}
