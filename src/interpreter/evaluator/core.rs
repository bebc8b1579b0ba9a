use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, LiteralValue, NodeId, Stmt},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{function::clock, statement::Control},
        value::{NativeFunction, UserFunction, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure. The first runtime error aborts
/// execution.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation state.
///
/// This struct holds the global environment, the currently active
/// environment frame, and the binding-distance table produced by the
/// resolver.
///
/// ## Usage
///
/// An `Interpreter` is created once and reused across programs, which is how
/// the interactive prompt keeps globals alive between lines. Feed it each
/// program's binding table with [`add_bindings`](Self::add_bindings) before
/// calling [`interpret`](Self::interpret).
pub struct Interpreter {
    /// The outermost environment frame. Native functions live here.
    pub globals:     Rc<RefCell<Environment>>,
    /// The frame for the scope currently executing.
    pub environment: Rc<RefCell<Environment>>,
    /// Binding distances keyed by node id, accumulated over all programs
    /// this interpreter has run.
    pub locals:      HashMap<NodeId, usize>,
}

#[allow(clippy::new_without_default)]
impl Interpreter {
    /// Creates an interpreter with an empty global scope, pre-populated with
    /// the native functions.
    #[must_use]
    pub fn new() -> Self {
        let globals = Environment::global();

        globals.borrow_mut()
               .define("clock",
                       Value::Native(NativeFunction { name:     "clock",
                                                      arity:    0,
                                                      function: clock, }));

        Self { globals:     Rc::clone(&globals),
               environment: globals,
               locals:      HashMap::new(), }
    }

    /// Merges a binding-distance table into the interpreter.
    ///
    /// Node ids are unique per allocator, so tables from successive parses
    /// never collide as long as they share one allocator.
    pub fn add_bindings(&mut self, locals: HashMap<NodeId, usize>) {
        self.locals.extend(locals);
    }

    /// Executes a program.
    ///
    /// Statements run in order; the first runtime error stops execution and
    /// is returned.
    ///
    /// # Parameters
    /// - `statements`: The resolved program.
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            let control = self.execute(statement)?;
            // The resolver rejects top-level `return`, so nothing can
            // escape a statement here.
            debug_assert!(matches!(control, Control::Normal));
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// groupings, variables, assignments, unary, binary, logical and
    /// conditional operations, calls and anonymous functions.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value the expression evaluates to.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::evaluate_literal(value)),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Variable { name, id, line } => self.lookup_variable(name, *id, *line),
            Expr::Assign { name,
                           id,
                           value,
                           line, } => self.evaluate_assign(name, *id, value, *line),
            Expr::Unary { op, operand, line } => self.evaluate_unary(*op, operand, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.evaluate_binary(left, *op, right, *line),
            Expr::Logical { left, op, right, .. } => self.evaluate_logical(left, *op, right),
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            .. } => self.evaluate_ternary(condition, then_branch, else_branch),
            Expr::Call { callee,
                         arguments,
                         line, } => self.evaluate_call(callee, arguments, *line),
            Expr::Lambda { declaration, .. } => {
                Ok(Value::Function(Rc::new(UserFunction { declaration:
                                                              Rc::clone(declaration),
                                                          closure:
                                                              Rc::clone(&self.environment), })))
            },
        }
    }

    /// Converts a literal AST node into its runtime value.
    fn evaluate_literal(value: &LiteralValue) -> Value {
        match value {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::Str(s.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Nil => Value::Nil,
        }
    }

    /// Reads a variable.
    ///
    /// Resolved references go straight to the frame at their recorded
    /// distance; everything else is looked up in the global frame.
    fn lookup_variable(&self, name: &str, id: NodeId, line: usize) -> EvalResult<Value> {
        match self.locals.get(&id) {
            Some(distance) => Environment::get_at(&self.environment, *distance, name, line),
            None => self.globals.borrow().get(name, line),
        }
    }

    /// Evaluates an assignment and returns the assigned value.
    ///
    /// Follows the same resolved/global split as variable reads. Assignment
    /// is an expression; `a = b = 2` relies on the value coming back out.
    fn evaluate_assign(&mut self,
                       name: &str,
                       id: NodeId,
                       value: &Expr,
                       line: usize)
                       -> EvalResult<Value> {
        let value = self.evaluate(value)?;

        match self.locals.get(&id) {
            Some(distance) => {
                Environment::assign_at(&self.environment, *distance, name, value.clone(), line)?;
            },
            None => {
                self.globals
                    .borrow_mut()
                    .assign(name, value.clone(), line)?;
            },
        }

        Ok(value)
    }
}
