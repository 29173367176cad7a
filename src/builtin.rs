use std::fmt;
use tracing::debug;

use crate::object::Object;

pub type BuiltinFn = fn(Vec<Object>) -> Object;

#[derive(Clone, Copy)]
pub struct Builtin {
  pub name: &'static str,
  pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Builtin({})", self.name)
  }
}

pub static BUILTINS: &[Builtin] = &[
  Builtin { name: "len", func: builtin_len },
  Builtin { name: "first", func: builtin_first },
  Builtin { name: "last", func: builtin_last },
  Builtin { name: "rest", func: builtin_rest },
  Builtin { name: "push", func: builtin_push },
  Builtin { name: "puts", func: builtin_puts },
];

pub fn lookup(name: &str) -> Option<Object> {
  BUILTINS
    .iter()
    .find(|builtin| builtin.name == name)
    .map(|builtin| Object::Builtin(*builtin))
}

fn error(message: String) -> Object {
  debug!(%message, "builtin error");
  Object::Error(message)
}

fn check_arity(args: &[Object], want: usize) -> Option<Object> {
  if args.len() == want {
    None
  } else {
    Some(error(format!(
      "wrong number of arguments. got={}, want={}",
      args.len(),
      want
    )))
  }
}

fn expect_array<'a>(name: &str, arg: &'a Object) -> Result<&'a [Object], Object> {
  match arg {
    Object::Array(elements) => Ok(elements.as_slice()),
    other => Err(error(format!(
      "argument to `{}` must be ARRAY, got {}",
      name,
      other.type_name()
    ))),
  }
}

fn builtin_len(args: Vec<Object>) -> Object {
  if let Some(err) = check_arity(&args, 1) {
    return err;
  }

  match &args[0] {
    Object::String(value) => Object::Integer(value.len() as i64),
    Object::Array(elements) => Object::Integer(elements.len() as i64),
    other => error(format!(
      "argument to `len` not supported, got {}",
      other.type_name()
    )),
  }
}

fn builtin_first(args: Vec<Object>) -> Object {
  if let Some(err) = check_arity(&args, 1) {
    return err;
  }

  match expect_array("first", &args[0]) {
    Ok(elements) => elements.first().cloned().unwrap_or(Object::Null),
    Err(err) => err,
  }
}

fn builtin_last(args: Vec<Object>) -> Object {
  if let Some(err) = check_arity(&args, 1) {
    return err;
  }

  match expect_array("last", &args[0]) {
    Ok(elements) => elements.last().cloned().unwrap_or(Object::Null),
    Err(err) => err,
  }
}

fn builtin_rest(args: Vec<Object>) -> Object {
  if let Some(err) = check_arity(&args, 1) {
    return err;
  }

  match expect_array("rest", &args[0]) {
    Ok([]) => Object::Null,
    Ok([_, rest @ ..]) => Object::array(rest.to_vec()),
    Err(err) => err,
  }
}

fn builtin_push(args: Vec<Object>) -> Object {
  if let Some(err) = check_arity(&args, 2) {
    return err;
  }

  match expect_array("push", &args[0]) {
    Ok(elements) => {
      let mut pushed = Vec::with_capacity(elements.len() + 1);
      pushed.extend_from_slice(elements);
      pushed.push(args[1].clone());
      Object::array(pushed)
    }
    Err(err) => err,
  }
}

fn builtin_puts(args: Vec<Object>) -> Object {
  for arg in &args {
    println!("{}", arg);
  }

  Object::Null
}
