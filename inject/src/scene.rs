//! The explicit set of live objects handed to the container.

use crate::inspector::Object;
use crate::metadata::Component;

/// Identifies an object spawned into a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// An ordered collection of live objects.
///
/// Objects are visited in spawn order, both when scanning for providers and
/// when injecting consumers.
#[derive(Default)]
pub struct Scene {
  objects: Vec<Box<dyn Object>>,
}

impl Scene {
  /// Creates a new, empty `Scene`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn spawn<T: Component>(&mut self, component: T) -> ObjectId {
    self.spawn_boxed(Box::new(component))
  }

  pub fn spawn_boxed(&mut self, object: Box<dyn Object>) -> ObjectId {
    self.objects.push(object);
    ObjectId(self.objects.len() - 1)
  }

  pub fn get<T: Component>(&self, id: ObjectId) -> Option<&T> {
    self.objects.get(id.0)?.as_any().downcast_ref::<T>()
  }

  pub fn get_mut<T: Component>(&mut self, id: ObjectId) -> Option<&mut T> {
    self.objects.get_mut(id.0)?.as_any_mut().downcast_mut::<T>()
  }

  /// The first object of type `T`, in spawn order.
  pub fn find<T: Component>(&self) -> Option<&T> {
    self
      .objects
      .iter()
      .find_map(|object| object.as_any().downcast_ref::<T>())
  }

  pub fn objects(&self) -> impl Iterator<Item = &dyn Object> + '_ {
    self.objects.iter().map(|object| &**object)
  }

  pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut dyn Object> + '_ {
    self.objects.iter_mut().map(|object| &mut **object)
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}
