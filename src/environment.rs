use crate::error::{Result, RoxError};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope. Scopes form a chain through `enclosing`; the chain is
/// shared (`Rc`) so a closure keeps its defining scope alive after the block
/// that created it has exited.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up, walking outward to the global scope.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`. Never creates one.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

fn undefined(name: &Token) -> RoxError {
    RoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 7)
    }

    #[test]
    fn lookup_walks_outward() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::with_enclosing(globals);

        assert_eq!(inner.get(&ident("a")).ok(), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_updates_the_defining_scope() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&globals));
        assert!(inner.assign(&ident("a"), Value::Number(2.0)).is_ok());

        assert_eq!(
            globals.borrow().get(&ident("a")).ok(),
            Some(Value::Number(2.0))
        );
        assert!(inner.values.is_empty());
    }

    #[test]
    fn undefined_names_are_runtime_errors() {
        let mut env = Environment::new();

        let err = env.get(&ident("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'missing'.\n[line 7]");

        assert!(env.assign(&ident("missing"), Value::Nil).is_err());
        assert!(env.values.is_empty());
    }
}
