use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

pub mod ast;
pub mod token;
pub mod lexer;
pub mod parser;
pub mod object;
pub mod evaluator;
pub mod env;
pub mod builtin;
mod error;

pub use env::Env;
pub use error::{Error, ParseErrors};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::Lexer;
pub use object::Object;
pub use parser::Parser;

/// Parses `source` into a program, or returns every syntax error found.
pub fn parse(source: &str) -> Result<ast::Program, Error> {
  let mut parser = Parser::new(Lexer::new(source));
  let program = parser.parse_program();

  if parser.errors().is_empty() {
    Ok(program)
  } else {
    Err(Error::Parse(ParseErrors(parser.into_errors())))
  }
}

/// Parses and evaluates `source` in `env`.
///
/// Runtime errors are values of the language and come back as
/// `Ok(Object::Error(..))`; only syntax errors are reported as `Err`.
pub fn run(source: &str, env: &Rc<RefCell<Env>>) -> Result<Object, Error> {
  let program = parse(source)?;
  Ok(evaluate(&program, env.clone()))
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
  TRACING_INIT.call_once(|| {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
      tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();
    }
  });
}
