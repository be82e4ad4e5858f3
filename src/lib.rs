pub mod ast;
pub mod ast_printer;
pub mod callable;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod session;
pub mod token;
pub mod value;

pub use diagnostics::{Diagnostics, Outcome};
pub use error::{Result, RoxError};
pub use session::Session;
pub use value::Value;
