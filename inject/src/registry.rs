//! The type-keyed service registry.

use crate::error::{Error, Result};
use crate::key::{short_type_name, ServiceKey};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A type-erased handle to a registered service.
///
/// Internally this boxes an `Rc<S>`, so trait-object services (`Rc<dyn Trait>`)
/// are stored the same way as concrete ones. Cloning the handle out of the
/// registry never copies the service itself.
pub struct Instance {
  key: ServiceKey,
  handle: Box<dyn Any>,
}

impl Instance {
  pub fn new<S: ?Sized + Any>(service: Rc<S>) -> Self {
    Self {
      key: ServiceKey::of::<S>(),
      handle: Box::new(service),
    }
  }

  /// Convenience for wrapping an owned value.
  pub fn from_value<S: Any>(service: S) -> Self {
    Self::new(Rc::new(service))
  }

  pub fn key(&self) -> ServiceKey {
    self.key
  }

  /// Returns a new handle to the service if it is of type `S`.
  pub fn downcast<S: ?Sized + Any>(&self) -> Option<Rc<S>> {
    self.handle.downcast_ref::<Rc<S>>().cloned()
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance").field("key", &self.key).finish()
  }
}

struct Entry {
  instance: Instance,
  provider: &'static str,
}

/// Maps each service type to exactly one instance.
///
/// The registry is populated during the scan phase and only read afterwards.
/// It is not reset between passes: registering the same type twice, even
/// across passes, is an error until [`Registry::clear`] is called.
#[derive(Default)]
pub struct Registry {
  entries: HashMap<ServiceKey, Entry>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `instance` under `key` on behalf of `provider` (a type name),
  /// which produced it from `method`.
  ///
  /// Fails with [`Error::NullProvidedInstance`] if `instance` is `None`, with
  /// [`Error::MismatchedInstance`] if it is not of the type `key` names, and
  /// with [`Error::DuplicateRegistration`] if `key` is already registered.
  pub fn register(
    &mut self,
    key: ServiceKey,
    instance: Option<Instance>,
    provider: &'static str,
    method: &str,
  ) -> Result<()> {
    let Some(instance) = instance else {
      return Err(Error::NullProvidedInstance {
        service: key.to_string(),
        provider: short_type_name(provider),
        method: method.to_string(),
      });
    };
    if instance.key() != key {
      return Err(Error::MismatchedInstance {
        service: key.to_string(),
        instance: instance.key().to_string(),
        provider: short_type_name(provider),
      });
    }

    if self.entries.contains_key(&key) {
      return Err(Error::DuplicateRegistration {
        service: key.to_string(),
        provider: short_type_name(provider),
      });
    }
    self.entries.insert(key, Entry { instance, provider });
    Ok(())
  }

  /// Registers an already-built service outside of a provider scan.
  pub fn insert<S: ?Sized + Any>(&mut self, service: Rc<S>) -> Result<()> {
    self.register(
      ServiceKey::of::<S>(),
      Some(Instance::new(service)),
      "manual registration",
      "insert",
    )
  }

  /// Resolves a service, returning `None` if its type was never registered.
  pub fn resolve<S: ?Sized + Any>(&self) -> Option<Rc<S>> {
    self.get(&ServiceKey::of::<S>())?.downcast::<S>()
  }

  /// The untyped lookup behind [`Registry::resolve`].
  pub fn get(&self, key: &ServiceKey) -> Option<&Instance> {
    self.entries.get(key).map(|entry| &entry.instance)
  }

  pub fn contains(&self, key: &ServiceKey) -> bool {
    self.entries.contains_key(key)
  }

  /// The type name of the provider that registered `key`.
  pub fn provider_of(&self, key: &ServiceKey) -> Option<&'static str> {
    self.entries.get(key).map(|entry| entry.provider)
  }

  pub fn keys(&self) -> impl Iterator<Item = ServiceKey> + '_ {
    self.entries.keys().copied()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Drops every registration. Instances stay alive for as long as their
  /// owners or any injected consumer hold them.
  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Moves every entry of `staged` into `self`.
  ///
  /// Callers must have checked that no key of `staged` is present in `self`.
  pub(crate) fn absorb(&mut self, staged: Registry) {
    for (key, entry) in staged.entries {
      debug_assert!(!self.entries.contains_key(&key));
      self.entries.insert(key, entry);
    }
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(self.entries.iter().map(|(key, entry)| (key, entry.provider)))
      .finish()
  }
}
