//! Centralised error hierarchy for the **Rox interpreter**.
//!
//! All subsystems (scanner, parser, runtime, CLI) convert their internal
//! failure modes into one of the variants defined here. This enables a uniform
//! `Result<T>` alias throughout the crate and ergonomic inter‑operation with
//! `anyhow`, while still preserving the source line of every problem.
//!
//! The module **does not** print diagnostics itself; see
//! [`crate::diagnostics::Diagnostics`] for the per‑unit sink.

use std::io;
use thiserror::Error;

use log::info;

use crate::token::Token;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    ///
    /// `location` is the short hint rendered between `Error` and the colon,
    /// e.g. ` at end` or ` at ';'`.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error, attributed to the offending token's line.
    #[error("{message}\n[line {line}]")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent). Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        RoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**. The location hint is derived
    /// from the token the parser was looking at.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();
        let location: String = token.location();

        info!(
            "Creating Parse error: line={}, location={:?}, msg={}",
            token.line, location, message
        );

        RoxError::Parse {
            message,
            location,
            line: token.line,
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", token.line, message);

        RoxError::Runtime {
            message,
            line: token.line,
        }
    }

    /// Lexical and syntactic errors block evaluation of their unit.
    pub fn is_syntax(&self) -> bool {
        matches!(self, RoxError::Lex { .. } | RoxError::Parse { .. })
    }

    /// Source line the error is attributed to, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            RoxError::Lex { line, .. }
            | RoxError::Parse { line, .. }
            | RoxError::Runtime { line, .. } => Some(*line),
            RoxError::Io(_) => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, RoxError>;
