use std::any::Any;
use std::collections::HashMap;

/// Named parameters bound from the matched route's path.
///
/// Keys are unique; binding the same name twice keeps the later value.
#[derive(Debug, Default)]
pub struct Params(HashMap<String, String>);

impl Params {
  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.0.insert(key.into(), value.into());
  }

  pub fn del(&mut self, key: &str) {
    self.0.remove(key);
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Named attributes that persist for the lifetime of the request, used for
/// filter-to-handler communication (e.g. an authenticated user).
///
/// Values are stored type-erased; `get` downcasts back to the concrete
/// type and returns `None` on a type mismatch.
#[derive(Default)]
pub struct Values(HashMap<String, Box<dyn Any + Send + Sync>>);

impl Values {
  pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
    self.0.get(key).and_then(|value| value.downcast_ref())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
    self.0.insert(key.into(), Box::new(value));
  }

  pub fn del(&mut self, key: &str) {
    self.0.remove(key);
  }
}

/// Request-scoped state: one instance per in-flight request, created at
/// dispatch and discarded when the request completes. Never shared or
/// reused across requests.
#[derive(Default)]
pub struct Context {
  pub params: Params,
  pub values: Values,
}

impl Context {
  pub fn new() -> Self {
    Self::default()
  }
}
