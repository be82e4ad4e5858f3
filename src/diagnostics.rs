//! Per‑unit error sink.
//!
//! Every execution unit (a whole file, or one REPL line) gets its own
//! [`Diagnostics`]. Scanner and parser report every syntax error they find and
//! keep going; the interpreter reports at most one runtime error, because a
//! runtime error aborts the rest of the unit. The driver inspects the result
//! to decide whether to evaluate and which exit code to use.

use log::debug;

use crate::error::RoxError;

/// What happened to an execution unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Parsed and evaluated to completion.
    Success,

    /// At least one lexical or syntax error; evaluation was skipped.
    SyntaxError,

    /// Evaluation started and was aborted by a runtime error.
    RuntimeError,
}

impl Outcome {
    /// Process exit code for file mode (sysexits‑style).
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::SyntaxError => EX_DATAERR,
            Outcome::RuntimeError => EX_SOFTWARE,
        }
    }
}

/// Invalid invocation of the binary.
pub const EX_USAGE: i32 = 64;

/// The input program had a syntax error.
pub const EX_DATAERR: i32 = 65;

/// The input program failed at runtime.
pub const EX_SOFTWARE: i32 = 70;

/// Errors collected while processing one execution unit.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<RoxError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detected problem.
    pub fn report(&mut self, error: RoxError) {
        debug!("Reported: {}", error);

        self.errors.push(error);
    }

    /// Did scanning or parsing fail?
    pub fn had_error(&self) -> bool {
        self.errors.iter().any(RoxError::is_syntax)
    }

    /// Did evaluation fail?
    pub fn had_runtime_error(&self) -> bool {
        self.errors.iter().any(|e| !e.is_syntax())
    }

    pub fn errors(&self) -> &[RoxError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if self.had_error() {
            Outcome::SyntaxError
        } else if self.had_runtime_error() {
            Outcome::RuntimeError
        } else {
            Outcome::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sink_is_success() {
        let diagnostics = Diagnostics::new();

        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.outcome(), Outcome::Success);
        assert_eq!(diagnostics.outcome().exit_code(), 0);
    }

    #[test]
    fn syntax_errors_take_precedence() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(RoxError::lex(3, "Unterminated string."));

        assert!(diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());
        assert_eq!(diagnostics.outcome().exit_code(), 65);
    }

    #[test]
    fn runtime_error_maps_to_software_exit() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(RoxError::Runtime {
            message: "Division by zero.".into(),
            line: 1,
        });

        assert_eq!(diagnostics.outcome(), Outcome::RuntimeError);
        assert_eq!(diagnostics.outcome().exit_code(), 70);
        assert_eq!(
            diagnostics.errors()[0].to_string(),
            "Division by zero.\n[line 1]"
        );
    }
}
