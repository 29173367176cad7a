use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::object::Object;

type Objects = HashMap<String, Object>;

#[derive(Debug, Default)]
pub struct Env {
  pub objects: Objects,
  pub parent: Option<Rc<RefCell<Env>>>,
}

impl Env {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn new_with_parent(parent: Rc<RefCell<Env>>) -> Self {
    Self {
      objects: HashMap::new(),
      parent: Some(parent),
    }
  }

  pub fn shared(self) -> Rc<RefCell<Env>> {
    Rc::new(RefCell::new(self))
  }

  pub fn get(&self, name: &str) -> Option<Object> {
    if let Some(object) = self.objects.get(name) {
      return Some(object.clone());
    }

    match self.parent {
      Some(ref parent) => parent.borrow().get(name),
      None => None,
    }
  }

  pub fn set(&mut self, name: impl Into<String>, value: Object) {
    self.objects.insert(name.into(), value);
  }

  /// Rebinds `name` in the nearest scope that already holds it.
  /// Returns false when no scope does.
  pub fn assign(&mut self, name: &str, value: Object) -> bool {
    if let Some(slot) = self.objects.get_mut(name) {
      *slot = value;
      return true;
    }

    match self.parent {
      Some(ref parent) => parent.borrow_mut().assign(name, value),
      None => false,
    }
  }
}
