//! The scan phase: run every provision and fill the registry.

use crate::error::{Error, Result};
use crate::inspector::{Inspector, Object};
use crate::key::short_type_name;
use crate::registry::Registry;

/// What a successful scan registered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
  pub providers: usize,
  pub services: usize,
}

/// Populates a [`Registry`] from provider objects.
pub struct ProviderScanner<'a> {
  inspector: &'a mut Inspector,
}

impl<'a> ProviderScanner<'a> {
  pub fn new(inspector: &'a mut Inspector) -> Self {
    Self { inspector }
  }

  /// Invokes every provision of every provider among `objects`, in order,
  /// and registers the results.
  ///
  /// Registrations are staged and only committed once every provider has
  /// succeeded, so on error `registry` is left exactly as it was.
  pub fn scan<'o>(
    &mut self,
    registry: &mut Registry,
    objects: impl IntoIterator<Item = &'o dyn Object>,
  ) -> Result<ScanSummary> {
    let mut staged = Registry::new();
    let mut summary = ScanSummary::default();

    for object in objects {
      let metadata = self.inspector.inspect(object);
      if !metadata.is_provider() {
        continue;
      }
      summary.providers += 1;

      for provision in metadata.provisions() {
        let key = provision.key();
        if registry.contains(&key) {
          return Err(Error::DuplicateRegistration {
            service: key.to_string(),
            provider: short_type_name(metadata.type_name()),
          });
        }

        let instance = provision.supply(object.as_any());
        staged.register(key, instance, metadata.type_name(), provision.method())?;
        tracing::debug!(
          service = %key,
          provider = metadata.type_name(),
          method = provision.method(),
          "registered service"
        );
        summary.services += 1;
      }
    }

    registry.absorb(staged);
    Ok(summary)
  }
}
