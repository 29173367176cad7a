use std::fmt;
use std::path::PathBuf;

/// Syntax errors reported by the parser for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(pub Vec<String>);

impl fmt::Display for ParseErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, message) in self.0.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "\t{}", message)?;
    }
    Ok(())
  }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("parse errors:\n{0}")]
  Parse(ParseErrors),

  #[error("could not read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("repl i/o failed: {0}")]
  Repl(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn parse_errors_are_tab_indented() {
    let errors = ParseErrors(vec!["first".to_owned(), "second".to_owned()]);
    assert_eq!(errors.to_string(), "\tfirst\n\tsecond");
    assert_eq!(
      Error::Parse(errors).to_string(),
      "parse errors:\n\tfirst\n\tsecond"
    );
  }

  #[test]
  fn repl_errors_name_no_path() {
    let err = Error::Repl(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
    assert_eq!(err.to_string(), "repl i/o failed: closed");
    assert!(std::error::Error::source(&err).is_some());
  }
}
