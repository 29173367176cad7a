use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::builtin::Builtin;
use crate::env::Env;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
  bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
    (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
  Integer,
  Boolean,
  String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
  pub kind: HashKind,
  pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
  pub key: Object,
  pub value: Object,
}

pub struct Function {
  pub parameters: Vec<Identifier>,
  pub body: BlockStatement,
  pub env: Rc<RefCell<Env>>,
}

impl fmt::Debug for Function {
  // The captured env can reach this function again, so it is left out.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Function")
      .field("parameters", &self.parameters)
      .field("body", &self.body)
      .finish_non_exhaustive()
  }
}

#[derive(Debug, Clone)]
pub enum Object {
  Null,
  Integer(i64),
  Boolean(bool),
  String(String),
  Array(Rc<Vec<Object>>),
  Hash(Rc<HashMap<HashKey, HashPair>>),
  Function(Rc<Function>),
  Builtin(Builtin),
  ReturnValue(Box<Object>),
  Error(String),
}

impl Object {
  pub fn type_name(&self) -> &'static str {
    match self {
      Object::Null => "NULL",
      Object::Integer(_) => "INTEGER",
      Object::Boolean(_) => "BOOLEAN",
      Object::String(_) => "STRING",
      Object::Array(_) => "ARRAY",
      Object::Hash(_) => "HASH",
      Object::Function(_) => "FUNCTION",
      Object::Builtin(_) => "BUILTIN",
      Object::ReturnValue(_) => "RETURN_VALUE",
      Object::Error(_) => "ERROR",
    }
  }

  /// Everything except `null` and `false` counts as true.
  pub fn is_truthy(&self) -> bool {
    !matches!(self, Object::Null | Object::Boolean(false))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, Object::Error(_))
  }

  /// Errors and pending returns both unwind to the nearest call or program.
  pub fn is_signal(&self) -> bool {
    matches!(self, Object::Error(_) | Object::ReturnValue(_))
  }

  /// Only integers, booleans and strings can key a hash.
  pub fn hash_key(&self) -> Option<HashKey> {
    match self {
      Object::Integer(value) => Some(HashKey {
        kind: HashKind::Integer,
        value: *value as u64,
      }),
      Object::Boolean(value) => Some(HashKey {
        kind: HashKind::Boolean,
        value: u64::from(*value),
      }),
      Object::String(value) => Some(HashKey {
        kind: HashKind::String,
        value: fnv1a(value.as_bytes()),
      }),
      _ => None,
    }
  }

  pub fn array(elements: Vec<Object>) -> Object {
    Object::Array(Rc::new(elements))
  }
}

impl PartialEq for Object {
  fn eq(&self, other: &Object) -> bool {
    match (self, other) {
      (Object::Null, Object::Null) => true,
      (Object::Integer(a), Object::Integer(b)) => a == b,
      (Object::Boolean(a), Object::Boolean(b)) => a == b,
      (Object::String(a), Object::String(b)) => a == b,
      (Object::Array(a), Object::Array(b)) => a == b,
      (Object::Hash(a), Object::Hash(b)) => a == b,
      (Object::Function(a), Object::Function(b)) => {
        Rc::ptr_eq(a, b) || (a.parameters == b.parameters && a.body == b.body)
      }
      (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
      (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
      (Object::Error(a), Object::Error(b)) => a == b,
      _ => false,
    }
  }
}

impl fmt::Display for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Object::Null => f.write_str("null"),
      Object::Integer(value) => write!(f, "{}", value),
      Object::Boolean(value) => write!(f, "{}", value),
      Object::String(value) => f.write_str(value),
      Object::Array(elements) => {
        let elements = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", elements.join(", "))
      }
      Object::Hash(pairs) => {
        let pairs = pairs
          .values()
          .map(|pair| format!("{}: {}", pair.key, pair.value))
          .collect::<Vec<_>>();
        write!(f, "{{{}}}", pairs.join(", "))
      }
      Object::Function(function) => {
        let parameters = function
          .parameters
          .iter()
          .map(|p| p.to_string())
          .collect::<Vec<_>>();
        write!(f, "fn({}){{\n{}\n}}", parameters.join(", "), function.body)
      }
      Object::Builtin(_) => f.write_str("builtin function"),
      Object::ReturnValue(value) => write!(f, "{}", value),
      Object::Error(message) => write!(f, "ERROR: {}", message),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn string_hash_keys_follow_content() {
    let hello1 = Object::String("Hello World".to_owned());
    let hello2 = Object::String("Hello World".to_owned());
    let diff = Object::String("My name is johnny".to_owned());

    assert_eq!(hello1.hash_key(), hello2.hash_key());
    assert_ne!(hello1.hash_key(), diff.hash_key());
  }

  #[test]
  fn fnv1a_matches_reference_vectors() {
    assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
    assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    assert_eq!(fnv1a(b"foobar"), 0x8594_4171_f739_67e8);
  }

  #[test]
  fn hash_keys_are_tagged_by_type() {
    let one = Object::Integer(1).hash_key();
    let yes = Object::Boolean(true).hash_key();

    assert_eq!(one.map(|k| k.value), yes.map(|k| k.value));
    assert_ne!(one, yes);
  }

  #[test]
  fn only_scalars_are_hashable() {
    assert!(Object::array(vec![]).hash_key().is_none());
    assert!(Object::Null.hash_key().is_none());
    assert!(Object::Error("x".to_owned()).hash_key().is_none());
  }

  #[test]
  fn errors_and_returns_are_signals() {
    assert!(Object::Error("x".to_owned()).is_signal());
    assert!(Object::ReturnValue(Box::new(Object::Null)).is_signal());
    assert!(!Object::ReturnValue(Box::new(Object::Null)).is_error());
    assert!(!Object::Integer(1).is_signal());
  }

  #[test]
  fn truthiness() {
    assert!(!Object::Null.is_truthy());
    assert!(!Object::Boolean(false).is_truthy());
    assert!(Object::Boolean(true).is_truthy());
    assert!(Object::Integer(0).is_truthy());
    assert!(Object::String(String::new()).is_truthy());
  }

  #[test]
  fn display_text() {
    let array = Object::array(vec![
      Object::Integer(1),
      Object::String("two".to_owned()),
      Object::Boolean(true),
      Object::Null,
    ]);
    assert_eq!(array.to_string(), "[1, two, true, null]");
    assert_eq!(Object::Error("boom".to_owned()).to_string(), "ERROR: boom");
    assert_eq!(Object::Integer(-7).to_string(), "-7");

    let key = Object::String("a".to_owned());
    let mut pairs = HashMap::new();
    pairs.insert(
      key.hash_key().unwrap(),
      HashPair {
        key,
        value: Object::Integer(1),
      },
    );
    assert_eq!(Object::Hash(Rc::new(pairs)).to_string(), "{a: 1}");
  }
}
