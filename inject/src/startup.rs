//! Ordered startup of scene initializers.

use crate::error::Result;
use crate::scene::Scene;

/// Something that must run once over the scene before play starts.
pub trait Initializer {
  fn name(&self) -> &str;

  /// Initializers run in ascending order; ties keep insertion order.
  fn execution_order(&self) -> i32 {
    0
  }

  fn initialize(&mut self, scene: &mut Scene) -> Result<()>;
}

impl<I: Initializer + ?Sized> Initializer for &mut I {
  fn name(&self) -> &str {
    (**self).name()
  }

  fn execution_order(&self) -> i32 {
    (**self).execution_order()
  }

  fn initialize(&mut self, scene: &mut Scene) -> Result<()> {
    (**self).initialize(scene)
  }
}

struct FnInitializer<F> {
  name: String,
  order: i32,
  run: F,
}

impl<F> Initializer for FnInitializer<F>
where
  F: FnMut(&mut Scene) -> Result<()>,
{
  fn name(&self) -> &str {
    &self.name
  }

  fn execution_order(&self) -> i32 {
    self.order
  }

  fn initialize(&mut self, scene: &mut Scene) -> Result<()> {
    (self.run)(scene)
  }
}

/// Runs initializers over a scene by execution order.
///
/// A [`Container`](crate::Container) is itself an initializer with a very
/// low default order, so consumers are wired before any other initializer
/// looks at them.
#[derive(Default)]
pub struct Startup<'a> {
  initializers: Vec<Box<dyn Initializer + 'a>>,
}

impl<'a> Startup<'a> {
  pub fn new() -> Self {
    Self {
      initializers: Vec::new(),
    }
  }

  pub fn add(&mut self, initializer: impl Initializer + 'a) -> &mut Self {
    self.initializers.push(Box::new(initializer));
    self
  }

  pub fn add_fn(
    &mut self,
    name: impl Into<String>,
    order: i32,
    run: impl FnMut(&mut Scene) -> Result<()> + 'a,
  ) -> &mut Self {
    self.add(FnInitializer {
      name: name.into(),
      order,
      run,
    })
  }

  /// Runs every initializer once, stopping at the first error.
  pub fn run(&mut self, scene: &mut Scene) -> Result<()> {
    self.initializers.sort_by_key(|initializer| initializer.execution_order());
    for initializer in &mut self.initializers {
      tracing::debug!(
        initializer = initializer.name(),
        order = initializer.execution_order(),
        "running initializer"
      );
      initializer.initialize(scene)?;
    }
    Ok(())
  }
}
