//! Public macros for ergonomic service resolution after a pass.

/// Resolves a service from a [`Container`](crate::Container) or
/// [`Registry`](crate::Registry), panicking if it is not registered.
///
/// Use this where a missing service is a bug, e.g. in a system that only
/// runs after startup. For a non-panicking lookup, use
/// [`maybe_resolve!`](crate::maybe_resolve) or `container.resolve::<T>()`.
///
/// # Panics
///
/// Panics if the service type was never registered.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve, Registry};
/// use std::rc::Rc;
///
/// trait Clock { fn now(&self) -> u64; }
/// struct FixedClock;
/// impl Clock for FixedClock { fn now(&self) -> u64 { 42 } }
///
/// let mut registry = Registry::new();
/// registry.insert(Rc::new(String::from("hello"))).unwrap();
/// registry.insert::<dyn Clock>(Rc::new(FixedClock)).unwrap();
///
/// assert_eq!(*resolve!(registry, String), "hello");
/// assert_eq!(resolve!(registry, trait Clock).now(), 42);
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving a trait object: resolve!(container, trait MyTrait)
  ($source:expr, trait $trait_ident:ident) => {
    $source.resolve::<dyn $trait_ident>().unwrap_or_else(|| {
      panic!(
        "Failed to resolve required trait service: {}",
        std::any::type_name::<dyn $trait_ident>()
      )
    })
  };

  // Arm for resolving a type: resolve!(container, MyService)
  ($source:expr, $type:ty) => {
    $source.resolve::<$type>().unwrap_or_else(|| {
      panic!(
        "Failed to resolve required service: {}",
        std::any::type_name::<$type>()
      )
    })
  };
}

/// Like [`resolve!`](crate::resolve), but evaluates to an `Option`.
#[macro_export]
macro_rules! maybe_resolve {
  ($source:expr, trait $trait_ident:ident) => {
    $source.resolve::<dyn $trait_ident>()
  };

  ($source:expr, $type:ty) => {
    $source.resolve::<$type>()
  };
}
