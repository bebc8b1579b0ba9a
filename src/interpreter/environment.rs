use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// One frame of variable bindings.
///
/// Frames are linked into a chain through `enclosing`; the global frame sits
/// at the end of every chain. Frames are shared (`Rc<RefCell<_>>`) because a
/// closure and the block that created its scope both keep the frame alive,
/// and assignments through either handle must be visible to the other.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a frame with no enclosing scope. This is the global frame.
    #[must_use]
    pub fn global() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a frame enclosed by `enclosing`.
    #[must_use]
    pub fn nested(enclosing: Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { values:    HashMap::new(),
                                    enclosing: Some(enclosing), }))
    }

    /// Binds `name` in this frame, replacing any existing binding of the same
    /// name. Redefinition is allowed here; the resolver rejects it for local
    /// scopes before execution starts.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks up `name` in this frame, then in each enclosing frame in turn.
    ///
    /// Used for references the resolver left alone, which reach here through
    /// the global frame.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] when no frame in the chain
    /// binds `name`.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Assigns to an existing binding of `name`, searching this frame and
    /// then each enclosing frame. Never creates a binding.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] when no frame in the chain
    /// binds `name`.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Reads `name` from the frame exactly `distance` hops up the chain.
    ///
    /// Used for references the resolver fixed to a binding. The distance
    /// comes from the binding table, so a missing frame or binding means the
    /// resolver and evaluator disagree about scope shapes.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnresolvedVariable`] on such a disagreement.
    pub fn get_at(environment: &Rc<RefCell<Self>>,
                  distance: usize,
                  name: &str,
                  line: usize)
                  -> EvalResult<Value> {
        let desync = || RuntimeError::UnresolvedVariable { name: name.to_string(),
                                                           line };

        let ancestor = Self::ancestor(environment, distance).ok_or_else(desync)?;
        let value = ancestor.borrow().values.get(name).cloned();
        value.ok_or_else(desync)
    }

    /// Writes `name` in the frame exactly `distance` hops up the chain.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnresolvedVariable`] when the frame does not
    /// exist; see [`get_at`](Self::get_at).
    pub fn assign_at(environment: &Rc<RefCell<Self>>,
                     distance: usize,
                     name: &str,
                     value: Value,
                     line: usize)
                     -> EvalResult<()> {
        let ancestor = Self::ancestor(environment, distance).ok_or_else(|| {
                           RuntimeError::UnresolvedVariable { name: name.to_string(),
                                                              line }
                       })?;
        ancestor.borrow_mut().values.insert(name.to_string(), value);
        Ok(())
    }

    /// Walks `distance` frames up the enclosing chain.
    fn ancestor(environment: &Rc<RefCell<Self>>, distance: usize) -> Option<Rc<RefCell<Self>>> {
        let mut current = Rc::clone(environment);

        for _ in 0..distance {
            let enclosing = current.borrow().enclosing.clone()?;
            current = enclosing;
        }

        Some(current)
    }
}
