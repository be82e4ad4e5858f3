//! Driver for execution units.
//!
//! A unit is one whole file or one REPL line. Each unit moves through
//! scanning, parsing and evaluation; any syntax error stops it before
//! evaluation, a runtime error stops it part way. Globals persist across the
//! units of one [`Session`], errors do not.

use std::io::{Stdout, Write};

use log::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;

/// A sequence of execution units sharing one global scope.
pub struct Session<W: Write = Stdout> {
    interpreter: Interpreter<W>,
    units: usize,
}

impl Session<Stdout> {
    pub fn new() -> Self {
        Self::with_interpreter(Interpreter::new())
    }
}

impl Default for Session<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Session<W> {
    /// A session whose `print` output goes to `out`.
    pub fn with_output(out: W) -> Self {
        Self::with_interpreter(Interpreter::with_output(out))
    }

    pub fn with_interpreter(interpreter: Interpreter<W>) -> Self {
        Self {
            interpreter,
            units: 0,
        }
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    /// Run one execution unit and return what went wrong in it, if anything.
    pub fn run(&mut self, source: &str) -> Diagnostics {
        self.units += 1;

        info!("Running unit #{} ({} bytes)", self.units, source.len());

        let mut diagnostics = Diagnostics::new();

        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(&tokens).parse(&mut diagnostics);

        if diagnostics.had_error() {
            info!(
                "Unit #{} has {} syntax error(s); skipping evaluation",
                self.units,
                diagnostics.errors().len()
            );

            return diagnostics;
        }

        debug!("Evaluating {} statement(s)", statements.len());

        if let Err(e) = self.interpreter.interpret(&statements) {
            diagnostics.report(e);
        }

        info!("Unit #{} finished: {:?}", self.units, diagnostics.outcome());

        diagnostics
    }
}
