use std::collections::HashMap;

use crate::{
    ast::{Expr, FunctionDecl, NodeId, Stmt},
    error::{ErrorReporter, ResolveError},
};

/// Static analysis pass run between parsing and evaluation.
///
/// The resolver walks the program once, maintaining a stack of lexical
/// scopes that mirrors the block structure of the source. Each scope maps a
/// declared name to whether its initializer has finished. For every variable
/// reference found in some scope on the stack, the resolver records the
/// number of scopes between the reference and the declaration; references
/// found in no scope are left for the global environment at runtime.
///
/// Because distances are fixed here, a closure keeps seeing the binding that
/// was visible where it was written, even if an enclosing scope later
/// declares a new variable with the same name.
pub struct Resolver<'r> {
    scopes:      Vec<HashMap<String, bool>>,
    in_function: bool,
    locals:      HashMap<NodeId, usize>,
    reporter:    &'r mut ErrorReporter,
}

impl<'r> Resolver<'r> {
    /// Creates a resolver reporting into `reporter`.
    pub fn new(reporter: &'r mut ErrorReporter) -> Self {
        Self { scopes: Vec::new(),
               in_function: false,
               locals: HashMap::new(),
               reporter }
    }

    /// Consumes the resolver and returns the binding-distance table.
    #[must_use]
    pub fn into_locals(self) -> HashMap<NodeId, usize> {
        self.locals
    }

    /// Resolves a sequence of statements in the current scope.
    pub fn resolve_statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    /// Resolves a single statement.
    ///
    /// Declarations update the current scope; everything else just recurses
    /// into subexpressions and nested statements.
    pub fn resolve_statement(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Var { name,
                        initializer,
                        line, } => {
                self.declare(name, *line);
                if let Some(initializer) = initializer {
                    self.resolve_expression(initializer);
                }
                self.define(name);
            },
            Stmt::Function(declaration) => {
                // The name is defined before the body resolves, so the
                // function can call itself.
                if let Some(name) = &declaration.name {
                    self.declare(name, declaration.line);
                    self.define(name);
                }
                self.resolve_function(declaration);
            },
            Stmt::Block { statements, .. } => {
                self.begin_scope();
                self.resolve_statements(statements);
                self.end_scope();
            },
            Stmt::Expression { expr, .. } | Stmt::Print { expr, .. } => {
                self.resolve_expression(expr);
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                self.resolve_expression(condition);
                self.resolve_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_statement(else_branch);
                }
            },
            Stmt::While { condition, body, .. } => {
                self.resolve_expression(condition);
                self.resolve_statement(body);
            },
            Stmt::Return { value, line } => {
                if !self.in_function {
                    self.reporter
                        .report(ResolveError::TopLevelReturn { line: *line });
                }
                if let Some(value) = value {
                    self.resolve_expression(value);
                }
            },
        }
    }

    /// Resolves a single expression.
    ///
    /// `Variable` and `Assign` nodes get a binding distance recorded here;
    /// all other variants only recurse.
    pub fn resolve_expression(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable { name, id, line } => {
                if let Some(scope) = self.scopes.last()
                   && scope.get(name) == Some(&false)
                {
                    self.reporter
                        .report(ResolveError::SelfReferencingInitializer { name: name.clone(),
                                                                           line: *line, });
                }

                self.resolve_local(*id, name);
            },
            Expr::Assign { name, id, value, .. } => {
                self.resolve_expression(value);
                self.resolve_local(*id, name);
            },
            Expr::Lambda { declaration, .. } => {
                self.resolve_function(declaration);
            },
            Expr::Grouping { expr, .. } | Expr::Unary { operand: expr, .. } => {
                self.resolve_expression(expr);
            },
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            },
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                self.resolve_expression(condition);
                self.resolve_expression(then_branch);
                self.resolve_expression(else_branch);
            },
            Expr::Call { callee, arguments, .. } => {
                self.resolve_expression(callee);
                for argument in arguments {
                    self.resolve_expression(argument);
                }
            },
            Expr::Literal { .. } => {},
        }
    }

    /// Resolves a function body: parameters and statements in a fresh scope.
    ///
    /// Applies to named declarations and anonymous functions alike. The
    /// `in_function` flag is saved and restored around the body so nested
    /// functions and top-level code are tracked correctly.
    fn resolve_function(&mut self, declaration: &FunctionDecl) {
        let enclosing = self.in_function;
        self.in_function = true;

        self.begin_scope();
        for param in &declaration.params {
            self.declare(&param.name, param.line);
            self.define(&param.name);
        }
        self.resolve_statements(&declaration.body);
        self.end_scope();

        self.in_function = enclosing;
    }

    /// Records the distance from the innermost scope to the one declaring
    /// `name`, if any scope on the stack declares it. References found
    /// nowhere are assumed global and left out of the table.
    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.locals.insert(id, distance);
                return;
            }
        }
    }

    /// Marks `name` as declared but not yet initialized in the current
    /// scope. Re-declaring a name in the same local scope is reported; the
    /// latest declaration then takes effect. Global declarations are not
    /// tracked and may redeclare freely.
    fn declare(&mut self, name: &str, line: usize) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(name) {
                self.reporter
                    .report(ResolveError::VariableAlreadyDeclared { name: name.to_string(),
                                                                    line });
            }
            scope.insert(name.to_string(), false);
        }
    }

    /// Marks `name` as fully initialized in the current scope.
    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }
}
