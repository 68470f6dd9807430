//! Metadata lookup for live objects.

use crate::metadata::{Component, Metadata};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

/// An object-safe view of a [`Component`].
///
/// Every component implements this automatically; it is what scenes store
/// and what the scanner and injector operate on.
pub trait Object: Any {
  fn type_name(&self) -> &'static str;
  fn metadata(&self) -> Metadata;
  fn as_any(&self) -> &dyn Any;
  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> Object for T {
  fn type_name(&self) -> &'static str {
    type_name::<T>()
  }

  fn metadata(&self) -> Metadata {
    Metadata::of::<T>()
  }

  fn as_any(&self) -> &dyn Any {
    self
  }

  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }
}

/// Answers "what does this object provide, and what does it need?".
///
/// Metadata is built on first sight of a type and shared afterwards, so a
/// scene with many instances of one component describes it once.
#[derive(Default)]
pub struct Inspector {
  cache: HashMap<TypeId, Rc<Metadata>>,
}

impl Inspector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn inspect(&mut self, object: &dyn Object) -> Rc<Metadata> {
    let type_id = object.as_any().type_id();
    self
      .cache
      .entry(type_id)
      .or_insert_with(|| Rc::new(object.metadata()))
      .clone()
  }

  pub fn is_provider(&mut self, object: &dyn Object) -> bool {
    self.inspect(object).is_provider()
  }

  pub fn is_injectable(&mut self, object: &dyn Object) -> bool {
    self.inspect(object).is_injectable()
  }

  /// Number of component types described so far.
  pub fn described_types(&self) -> usize {
    self.cache.len()
  }
}
