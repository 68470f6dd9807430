//! The main `Container` struct: one registry, one two-phase pass.

use crate::config::InjectorConfig;
use crate::error::Result;
use crate::injector::{InjectSummary, Injector};
use crate::inspector::{Inspector, Object};
use crate::registry::Registry;
use crate::scanner::{ProviderScanner, ScanSummary};
use crate::scene::Scene;
use crate::startup::Initializer;
use std::any::Any;
use std::rc::Rc;

/// Outcome of [`Container::initialize`].
#[derive(Debug, Default)]
pub struct InjectionReport {
  pub scan: ScanSummary,
  pub inject: InjectSummary,
}

impl InjectionReport {
  /// Whether every field was resolved.
  pub fn is_complete(&self) -> bool {
    self.inject.unresolved.is_empty()
  }
}

/// The dependency injection container.
///
/// A container owns its registry. Nothing is global: independent containers
/// (for example, one per test) never see each other's services.
///
/// Wiring happens in two phases. The scan phase runs every provider and
/// fills the registry; the inject phase reads it to satisfy consumers. The
/// registry is not reset between passes, so running [`Container::initialize`]
/// twice over the same providers fails with a duplicate registration unless
/// [`Container::clear`] is called in between.
#[derive(Default)]
pub struct Container {
  registry: Registry,
  inspector: Inspector,
  config: InjectorConfig,
}

impl Container {
  /// Creates a new, empty `Container` with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: InjectorConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn config(&self) -> &InjectorConfig {
    &self.config
  }

  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  /// Resolves a registered service. See also the [`resolve!`](crate::resolve) macro.
  pub fn resolve<S: ?Sized + Any>(&self) -> Option<Rc<S>> {
    self.registry.resolve::<S>()
  }

  /// Runs the scan phase over `objects`.
  pub fn scan<'o>(
    &mut self,
    objects: impl IntoIterator<Item = &'o dyn Object>,
  ) -> Result<ScanSummary> {
    ProviderScanner::new(&mut self.inspector).scan(&mut self.registry, objects)
  }

  /// Runs the inject phase over `objects`. The registry is only read.
  pub fn inject<'o>(
    &mut self,
    objects: impl IntoIterator<Item = &'o mut dyn Object>,
  ) -> Result<InjectSummary> {
    let policy = self.config.unresolved_fields;
    Injector::new(&self.registry, &mut self.inspector, policy).inject_all(objects)
  }

  /// Scans every provider in `scene`, then injects every consumer.
  ///
  /// The scan completes before any consumer is touched. A fatal error in
  /// the scan leaves the registry untouched and injects nothing.
  pub fn initialize(&mut self, scene: &mut Scene) -> Result<InjectionReport> {
    let span = tracing::info_span!("inject_pass", objects = scene.len());
    let _enter = span.enter();

    let scan = self.scan(scene.objects())?;
    let inject = self.inject(scene.objects_mut())?;

    tracing::info!(
      providers = scan.providers,
      services = scan.services,
      consumers = inject.consumers,
      fields = inject.fields,
      methods = inject.methods,
      unresolved = inject.unresolved.len(),
      "dependency injection complete"
    );
    Ok(InjectionReport { scan, inject })
  }

  /// Drops every registration so the next pass starts from an empty registry.
  pub fn clear(&mut self) {
    self.registry.clear();
  }
}

impl Initializer for Container {
  fn name(&self) -> &str {
    "fibre_inject"
  }

  fn execution_order(&self) -> i32 {
    self.config.execution_order
  }

  fn initialize(&mut self, scene: &mut Scene) -> Result<()> {
    Container::initialize(self, scene).map(|_| ())
  }
}
