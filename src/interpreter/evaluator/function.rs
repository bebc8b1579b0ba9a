use std::{
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            statement::Control,
        },
        value::{UserFunction, Value},
    },
};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first and must be a function value. Arity is
    /// checked against the declared parameter count before any argument is
    /// evaluated; arguments then evaluate left to right.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the callee.
    /// - `arguments`: Argument expressions, in call order.
    /// - `line`: Source line of the call's closing parenthesis.
    ///
    /// # Returns
    /// The callee's return value; `nil` when a user function's body ends
    /// without hitting a `return`.
    pub fn evaluate_call(&mut self,
                         callee: &Expr,
                         arguments: &[Expr],
                         line: usize)
                         -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;

        let arity = match &callee {
            Value::Function(function) => function.declaration.params.len(),
            Value::Native(native) => native.arity,
            _ => return Err(RuntimeError::NotCallable { line }),
        };

        if arguments.len() != arity {
            return Err(RuntimeError::ArityMismatch { expected: arity,
                                                     found: arguments.len(),
                                                     line });
        }

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.evaluate(argument)?);
        }

        match callee {
            Value::Function(function) => self.call_user_function(&function, values),
            Value::Native(native) => (native.function)(self, &values),
            _ => unreachable!(),
        }
    }

    /// Invokes a user-defined function.
    ///
    /// The body runs in a fresh frame that extends the function's closure,
    /// never the caller's environment; the parameters are bound there. A
    /// `Return` outcome is absorbed here and becomes the call's value.
    fn call_user_function(&mut self,
                          function: &UserFunction,
                          arguments: Vec<Value>)
                          -> EvalResult<Value> {
        let frame = Environment::nested(Rc::clone(&function.closure));

        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            frame.borrow_mut().define(&param.name, argument);
        }

        match self.execute_block(&function.declaration.body, frame)? {
            Control::Return(value) => Ok(value),
            Control::Normal => Ok(Value::Nil),
        }
    }
}

/// The `clock` native: seconds since the Unix epoch, as a number.
///
/// Useful for timing scripts. Sub-second precision depends on the platform
/// clock.
pub fn clock(_interpreter: &mut Interpreter, _arguments: &[Value]) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .unwrap_or_default();
    Ok(Value::Number(elapsed.as_secs_f64()))
}
