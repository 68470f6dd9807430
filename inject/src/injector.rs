//! The inject phase: fill consumer fields and call consumer methods.

use crate::config::FieldPolicy;
use crate::error::{Error, Result};
use crate::inspector::{Inspector, Object};
use crate::key::short_type_name;
use crate::registry::{Instance, Registry};

/// What an inject phase did.
#[derive(Debug, Default)]
pub struct InjectSummary {
  pub consumers: usize,
  pub fields: usize,
  pub methods: usize,
  /// Unresolved fields skipped under [`FieldPolicy::Lenient`].
  pub unresolved: Vec<Error>,
}

/// Satisfies injection points from a read-only [`Registry`].
pub struct Injector<'a> {
  registry: &'a Registry,
  inspector: &'a mut Inspector,
  field_policy: FieldPolicy,
}

impl<'a> Injector<'a> {
  pub fn new(
    registry: &'a Registry,
    inspector: &'a mut Inspector,
    field_policy: FieldPolicy,
  ) -> Self {
    Self {
      registry,
      inspector,
      field_policy,
    }
  }

  /// Injects every injectable object among `objects`, in order.
  ///
  /// Stops at the first fatal error. Objects before the failing one stay
  /// wired; a failing method is never called.
  pub fn inject_all<'o>(
    &mut self,
    objects: impl IntoIterator<Item = &'o mut dyn Object>,
  ) -> Result<InjectSummary> {
    let mut summary = InjectSummary::default();
    for object in objects {
      if self.inject(object, &mut summary)? {
        summary.consumers += 1;
      }
    }
    Ok(summary)
  }

  /// Injects one object. Returns `false` if it declares no injection points.
  pub fn inject(&mut self, object: &mut dyn Object, summary: &mut InjectSummary) -> Result<bool> {
    let metadata = self.inspector.inspect(object);
    if !metadata.is_injectable() {
      return Ok(false);
    }
    let consumer = metadata.type_name();

    for field in metadata.fields() {
      let key = field.key();
      let assigned = match self.registry.get(&key) {
        Some(instance) => field.assign(object.as_any_mut(), instance),
        None => false,
      };
      if assigned {
        tracing::debug!(service = %key, consumer, field = field.name(), "injected field");
        summary.fields += 1;
        continue;
      }

      let err = Error::UnresolvedFieldDependency {
        service: key.to_string(),
        consumer: short_type_name(consumer),
        field: field.name().to_string(),
      };
      match self.field_policy {
        FieldPolicy::Strict => return Err(err),
        FieldPolicy::Lenient => {
          tracing::error!(service = %key, consumer, field = field.name(), "{}", err);
          summary.unresolved.push(err);
        }
      }
    }

    for method in metadata.methods() {
      let mut args: Vec<&Instance> = Vec::with_capacity(method.params().len());
      for key in method.params() {
        match self.registry.get(key) {
          Some(instance) => args.push(instance),
          None => {
            return Err(Error::UnresolvedMethodDependency {
              service: key.to_string(),
              consumer: short_type_name(consumer),
              method: method.name().to_string(),
            })
          }
        }
      }

      if !method.invoke(object.as_any_mut(), &args) {
        // The registry keys by type, so this only happens if a parameter
        // list disagrees with its own declared keys.
        return Err(Error::UnresolvedMethodDependency {
          service: method
            .params()
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(", "),
          consumer: short_type_name(consumer),
          method: method.name().to_string(),
        });
      }
      tracing::debug!(
        consumer,
        method = method.name(),
        args = args.len(),
        "invoked injection method"
      );
      summary.methods += 1;
    }

    Ok(true)
  }
}
