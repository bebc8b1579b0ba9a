use std::{cell::RefCell, mem, rc::Rc};

use crate::{
    ast::Stmt,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::{UserFunction, Value},
    },
};

/// The outcome of executing a statement.
///
/// `return` is not an error: it is an ordinary outcome that callers must
/// pass upward until a function call absorbs it. Loops and blocks stop early
/// when they see `Return`.
#[derive(Debug)]
pub enum Control {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding with this value.
    Return(Value),
}

impl Interpreter {
    /// Executes a single statement.
    ///
    /// Handles variable and function declarations, blocks, control flow,
    /// `print`, `return` and plain expression statements. Statements may
    /// modify the current environment.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// [`Control::Normal`], or [`Control::Return`] when a `return` statement
    /// is unwinding through this one.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Control> {
        match statement {
            Stmt::Expression { expr, .. } => {
                self.evaluate(expr)?;
                Ok(Control::Normal)
            },
            Stmt::Print { expr, .. } => {
                let value = self.evaluate(expr)?;
                println!("{value}");
                Ok(Control::Normal)
            },
            Stmt::Var { name, initializer, .. } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(Control::Normal)
            },
            Stmt::Function(declaration) => {
                // Capturing the frame that is current right now is what
                // lets the function see variables of its defining scope.
                let function = UserFunction { declaration: Rc::clone(declaration),
                                              closure:     Rc::clone(&self.environment), };
                if let Some(name) = &declaration.name {
                    self.environment
                        .borrow_mut()
                        .define(name, Value::Function(Rc::new(function)));
                }
                Ok(Control::Normal)
            },
            Stmt::Block { statements, .. } => {
                let scope = Environment::nested(Rc::clone(&self.environment));
                self.execute_block(statements, scope)
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Control::Normal)
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Control::Return(value) = self.execute(body)? {
                        return Ok(Control::Return(value));
                    }
                }
                Ok(Control::Normal)
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                Ok(Control::Return(value))
            },
        }
    }

    /// Executes statements inside the given environment frame.
    ///
    /// The current frame is swapped out for the duration and restored on
    /// every exit path, including errors and `return` unwinding.
    ///
    /// # Parameters
    /// - `statements`: The statements of the block or function body.
    /// - `environment`: The frame to execute them in.
    ///
    /// # Returns
    /// The outcome of the last statement executed.
    pub fn execute_block(&mut self,
                         statements: &[Stmt],
                         environment: Rc<RefCell<Environment>>)
                         -> EvalResult<Control> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut outcome = Ok(Control::Normal);
        for statement in statements {
            outcome = self.execute(statement);
            if !matches!(outcome, Ok(Control::Normal)) {
                break;
            }
        }

        self.environment = previous;
        outcome
    }
}
