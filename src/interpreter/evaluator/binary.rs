use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates an arithmetic, comparison or equality operation.
    ///
    /// Both operands are always evaluated, left first. Type rules:
    /// - `+` accepts two numbers or two strings (concatenation); anything
    ///   else is an error.
    /// - `-`, `*`, `/` and the four comparisons require two numbers.
    ///   Division follows IEEE semantics, so dividing by zero yields an
    ///   infinity rather than an error.
    /// - `==` and `!=` accept any operands and never coerce.
    ///
    /// # Parameters
    /// - `left`: The left operand expression.
    /// - `op`: The operator.
    /// - `right`: The right operand expression.
    /// - `line`: Source line of the operator, for error reporting.
    ///
    /// # Returns
    /// The resulting value.
    pub fn evaluate_binary(&mut self,
                           left: &Expr,
                           op: BinaryOperator,
                           right: &Expr,
                           line: usize)
                           -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op {
            BinaryOperator::Add => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
                _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line }),
            },
            BinaryOperator::Sub => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Number(a - b))
            },
            BinaryOperator::Mul => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Number(a * b))
            },
            BinaryOperator::Div => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Number(a / b))
            },
            BinaryOperator::Less => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Bool(a < b))
            },
            BinaryOperator::LessEqual => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Bool(a <= b))
            },
            BinaryOperator::Greater => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Bool(a > b))
            },
            BinaryOperator::GreaterEqual => {
                let (a, b) = Self::numeric_operands(left, right, line)?;
                Ok(Value::Bool(a >= b))
            },
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
        }
    }

    /// Evaluates a short-circuiting `and`/`or` operation.
    ///
    /// The result is one of the operand values, not a coerced boolean:
    /// `nil or 2` is `2`, and `1 and 2` is `2`. The right operand is only
    /// evaluated when the left one does not decide the outcome.
    ///
    /// # Parameters
    /// - `left`: The left operand expression.
    /// - `op`: The operator.
    /// - `right`: The right operand expression.
    ///
    /// # Returns
    /// The deciding operand's value.
    pub fn evaluate_logical(&mut self,
                            left: &Expr,
                            op: LogicalOperator,
                            right: &Expr)
                            -> EvalResult<Value> {
        let left = self.evaluate(left)?;

        match op {
            LogicalOperator::And => {
                if left.is_truthy() {
                    self.evaluate(right)
                } else {
                    Ok(left)
                }
            },
            LogicalOperator::Or => {
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            },
        }
    }

    /// Evaluates a conditional (ternary) expression.
    ///
    /// Only the selected branch is evaluated.
    pub fn evaluate_ternary(&mut self,
                            condition: &Expr,
                            then_branch: &Expr,
                            else_branch: &Expr)
                            -> EvalResult<Value> {
        if self.evaluate(condition)?.is_truthy() {
            self.evaluate(then_branch)
        } else {
            self.evaluate(else_branch)
        }
    }

    /// Unwraps two operands that must both be numbers.
    fn numeric_operands(left: Value, right: Value, line: usize) -> EvalResult<(f64, f64)> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((a, b)),
            _ => Err(RuntimeError::OperandsMustBeNumbers { line }),
        }
    }
}
