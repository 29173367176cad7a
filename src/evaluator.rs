use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::ast::{BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::builtin;
use crate::env::Env;
use crate::object::{Function, HashPair, Object};

/// Evaluates `program` against `env`, keeping any bindings it makes.
pub fn evaluate(program: &Program, env: Rc<RefCell<Env>>) -> Object {
  Evaluator::new(env).eval(program)
}

#[derive(Debug)]
pub struct Evaluator {
  pub env: Rc<RefCell<Env>>,
}

impl Evaluator {
  pub fn new(env: Rc<RefCell<Env>>) -> Self {
    Evaluator { env }
  }

  fn error(message: String) -> Object {
    debug!(%message, "runtime error");
    Object::Error(message)
  }

  pub fn eval(&mut self, program: &Program) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
      match self.eval_statement(statement) {
        Object::ReturnValue(value) => return *value,
        Object::Error(message) => return Object::Error(message),
        object => result = object,
      }
    }

    result
  }

  fn eval_block_statement(&mut self, block: &BlockStatement) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
      result = self.eval_statement(statement);
      if result.is_signal() {
        return result;
      }
    }

    result
  }

  fn eval_statement(&mut self, statement: &Statement) -> Object {
    match statement {
      Statement::Let { name, value } => {
        let value = self.eval_expression(value);
        if value.is_signal() {
          return value;
        }

        self.env.borrow_mut().set(name.0.clone(), value);
        Object::Null
      }
      Statement::Return(expression) => {
        let value = self.eval_expression(expression);
        if value.is_signal() {
          return value;
        }

        Object::ReturnValue(Box::new(value))
      }
      Statement::Expression(expression) => self.eval_expression(expression),
    }
  }

  fn eval_expression(&mut self, expression: &Expression) -> Object {
    match expression {
      Expression::Identifier(ident) => self.eval_identifier(&ident.0),
      Expression::Integer(value) => Object::Integer(*value),
      Expression::Boolean(value) => Object::Boolean(*value),
      Expression::String(value) => Object::String(value.clone()),
      Expression::Prefix { operator, right } => {
        let right = self.eval_expression(right);
        if right.is_signal() {
          return right;
        }

        Self::eval_prefix_expression(*operator, right)
      }
      Expression::Infix { left, operator: InfixOperator::Assign, right } => {
        self.eval_assign_expression(left, right)
      }
      Expression::Infix { left, operator, right } => {
        let left = self.eval_expression(left);
        if left.is_signal() {
          return left;
        }
        let right = self.eval_expression(right);
        if right.is_signal() {
          return right;
        }

        Self::eval_infix_expression(*operator, left, right)
      }
      Expression::If { condition, consequence, alternative } => {
        let condition = self.eval_expression(condition);
        if condition.is_signal() {
          return condition;
        }

        if condition.is_truthy() {
          self.eval_block_statement(consequence)
        } else if let Some(alternative) = alternative {
          self.eval_block_statement(alternative)
        } else {
          Object::Null
        }
      }
      Expression::Function { parameters, body } => Object::Function(Rc::new(Function {
        parameters: parameters.clone(),
        body: body.clone(),
        env: self.env.clone(),
      })),
      Expression::Call { function, arguments } => self.eval_call_expression(function, arguments),
      Expression::Array(elements) => match self.eval_expressions(elements) {
        Ok(elements) => Object::array(elements),
        Err(err) => err,
      },
      Expression::Hash(pairs) => self.eval_hash_literal(pairs),
      Expression::Index { left, index } => {
        let left = self.eval_expression(left);
        if left.is_signal() {
          return left;
        }
        let index = self.eval_expression(index);
        if index.is_signal() {
          return index;
        }

        Self::eval_index_expression(left, index)
      }
    }
  }

  /// Evaluates left to right, stopping at the first error or return.
  fn eval_expressions(&mut self, expressions: &[Expression]) -> Result<Vec<Object>, Object> {
    let mut objects = Vec::with_capacity(expressions.len());

    for expression in expressions {
      let object = self.eval_expression(expression);
      if object.is_signal() {
        return Err(object);
      }
      objects.push(object);
    }

    Ok(objects)
  }

  fn eval_identifier(&mut self, name: &str) -> Object {
    let bound = self.env.borrow().get(name);

    match bound.or_else(|| builtin::lookup(name)) {
      Some(object) => object,
      None => Self::error(format!("identifier not found: {}", name)),
    }
  }

  fn eval_assign_expression(&mut self, left: &Expression, right: &Expression) -> Object {
    let name = match left {
      Expression::Identifier(ident) => ident.0.as_str(),
      other => return Self::error(format!("unknown Assign for {}", other.token_literal())),
    };

    if self.env.borrow().get(name).is_none() {
      return Self::error(format!("identifier not found: {}", name));
    }

    let value = self.eval_expression(right);
    if value.is_signal() {
      return value;
    }

    if self.env.borrow_mut().assign(name, value.clone()) {
      value
    } else {
      Self::error(format!("identifier not found: {}", name))
    }
  }

  fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> Object {
    match operator {
      PrefixOperator::Not => Object::Boolean(!right.is_truthy()),
      PrefixOperator::Negate => match right {
        Object::Integer(value) => Object::Integer(value.wrapping_neg()),
        other => Self::error(format!("unknown operator: -{}", other.type_name())),
      },
    }
  }

  fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> Object {
    match (&left, &right) {
      (Object::Integer(l), Object::Integer(r)) => {
        Self::eval_integer_infix_expression(operator, *l, *r)
      }
      (Object::Boolean(l), Object::Boolean(r)) => match operator {
        InfixOperator::Equal => Object::Boolean(l == r),
        InfixOperator::NotEqual => Object::Boolean(l != r),
        _ => Self::unknown_operator(operator, &left, &right),
      },
      (Object::String(l), Object::String(r)) => match operator {
        InfixOperator::Add => Object::String(format!("{}{}", l, r)),
        _ => Self::unknown_operator(operator, &left, &right),
      },
      _ if left.type_name() != right.type_name() => Self::error(format!(
        "type mismatch: {} {} {}",
        left.type_name(),
        operator,
        right.type_name()
      )),
      _ => Self::unknown_operator(operator, &left, &right),
    }
  }

  fn unknown_operator(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    Self::error(format!(
      "unknown operator: {} {} {}",
      left.type_name(),
      operator,
      right.type_name()
    ))
  }

  fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> Object {
    match operator {
      InfixOperator::Add => Object::Integer(left.wrapping_add(right)),
      InfixOperator::Subtract => Object::Integer(left.wrapping_sub(right)),
      InfixOperator::Multiply => Object::Integer(left.wrapping_mul(right)),
      InfixOperator::Divide => {
        if right == 0 {
          Self::error("division by zero".to_owned())
        } else {
          Object::Integer(left.wrapping_div(right))
        }
      }
      InfixOperator::Equal => Object::Boolean(left == right),
      InfixOperator::NotEqual => Object::Boolean(left != right),
      InfixOperator::Less => Object::Boolean(left < right),
      InfixOperator::LessEqual => Object::Boolean(left <= right),
      InfixOperator::Greater => Object::Boolean(left > right),
      InfixOperator::GreaterEqual => Object::Boolean(left >= right),
      InfixOperator::Assign => {
        Self::unknown_operator(operator, &Object::Integer(left), &Object::Integer(right))
      }
    }
  }

  fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
      (Object::Array(elements), Object::Integer(i)) => usize::try_from(*i)
        .ok()
        .and_then(|i| elements.get(i))
        .cloned()
        .unwrap_or(Object::Null),
      (Object::Array(_), other) => {
        Self::error(format!("index must be INTEGER, got {}", other.type_name()))
      }
      (Object::Hash(pairs), key) => match key.hash_key() {
        Some(hash_key) => pairs
          .get(&hash_key)
          .map(|pair| pair.value.clone())
          .unwrap_or(Object::Null),
        None => Self::error(format!("unusable as hash key: {}", key.type_name())),
      },
      (other, _) => Self::error(format!("index operator not supported: {}", other.type_name())),
    }
  }

  fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Object {
    let mut hash = HashMap::with_capacity(pairs.len());

    for (key, value) in pairs {
      let key = self.eval_expression(key);
      if key.is_signal() {
        return key;
      }
      let hash_key = match key.hash_key() {
        Some(hash_key) => hash_key,
        None => return Self::error(format!("unusable as hash key: {}", key.type_name())),
      };

      let value = self.eval_expression(value);
      if value.is_signal() {
        return value;
      }

      hash.insert(hash_key, HashPair { key, value });
    }

    Object::Hash(Rc::new(hash))
  }

  fn eval_call_expression(&mut self, callee: &Expression, arguments: &[Expression]) -> Object {
    match self.eval_expression(callee) {
      signal if signal.is_signal() => signal,
      Object::Builtin(builtin) => match self.eval_expressions(arguments) {
        Ok(args) => (builtin.func)(args),
        Err(err) => err,
      },
      Object::Function(function) => {
        if function.parameters.len() != arguments.len() {
          return Self::error(format!(
            "want {} Arguments get={}",
            function.parameters.len(),
            arguments.len()
          ));
        }

        match self.eval_expressions(arguments) {
          Ok(args) => self.apply_function(&function, args),
          Err(err) => err,
        }
      }
      other => Self::error(format!("not a function: {}", other.type_name())),
    }
  }

  fn apply_function(&mut self, function: &Function, args: Vec<Object>) -> Object {
    trace!(callee = %callee_name(function), arguments = args.len(), "calling function");

    let mut call_env = Env::new_with_parent(function.env.clone());
    for (parameter, arg) in function.parameters.iter().zip(args) {
      call_env.set(parameter.0.clone(), arg);
    }

    let caller_env = std::mem::replace(&mut self.env, call_env.shared());
    let result = self.eval_block_statement(&function.body);
    self.env = caller_env;

    match result {
      Object::ReturnValue(value) => *value,
      object => object,
    }
  }
}

fn callee_name(function: &Function) -> String {
  let parameters = function
    .parameters
    .iter()
    .map(|p| p.0.as_str())
    .collect::<Vec<_>>();
  format!("fn({})", parameters.join(", "))
}
