use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// `-` negates a number; applying it to anything else is a runtime
    /// error. `!` inverts truthiness and accepts any operand.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `operand`: The operand expression.
    /// - `line`: Source line of the operator, for error reporting.
    ///
    /// # Returns
    /// The resulting value.
    pub fn evaluate_unary(&mut self,
                          op: UnaryOperator,
                          operand: &Expr,
                          line: usize)
                          -> EvalResult<Value> {
        let value = self.evaluate(operand)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
