use thiserror::Error;

/// The error type for `fibre_inject`.
///
/// Every wiring error names the service type involved and the component
/// type that caused it. Type names are printed without module paths.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Duplicate registration: {service} is already registered (second provider: {provider})")]
  DuplicateRegistration { service: String, provider: String },

  #[error("Provider {provider} returned no instance for {service} from `{method}`")]
  NullProvidedInstance {
    service: String,
    provider: String,
    method: String,
  },

  #[error("Provider {provider} supplied {instance} where {service} was expected")]
  MismatchedInstance {
    service: String,
    instance: String,
    provider: String,
  },

  #[error("Failed to resolve {service} for {consumer} (method `{method}`)")]
  UnresolvedMethodDependency {
    service: String,
    consumer: String,
    method: String,
  },

  #[error("Can't resolve {service} for {consumer} (field `{field}`)")]
  UnresolvedFieldDependency {
    service: String,
    consumer: String,
    field: String,
  },

  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Initializer '{name}' failed: {message}")]
  Initializer { name: String, message: String },
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
