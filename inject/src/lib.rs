//! # Fibre Inject
//!
//! A two-phase, type-keyed dependency injection container for
//! component-based games.
//!
//! Components declare what they supply and what they need through
//! [`Component::describe`]. At startup the [`Container`] makes one pass over
//! a [`Scene`]:
//!
//! 1. **Scan**: every *provider* (a component with at least one provision)
//!    is asked for its services, and each one is registered under its type.
//! 2. **Inject**: every *consumer* (a component with at least one field or
//!    method injection point) gets its fields assigned and its methods called
//!    with services from the registry.
//!
//! The scan always finishes before the first consumer is touched.
//!
//! ## Errors
//!
//! Two providers of one type, a provider returning `None`, or a method whose
//! parameter cannot be resolved all abort the pass. An unresolved *field* is
//! logged, recorded in the [`InjectionReport`] and skipped, unless the
//! container is configured with [`FieldPolicy::Strict`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{Component, Container, Describe, Scene};
//! use std::rc::Rc;
//!
//! #[derive(Debug, PartialEq)]
//! struct Config {
//!   greeting: String,
//! }
//!
//! struct ConfigProvider;
//! impl Component for ConfigProvider {
//!   fn describe(meta: &mut Describe<Self>) {
//!     meta.provide("provide_config", |_this| {
//!       Some(Config { greeting: "Hello, World!".into() })
//!     });
//!   }
//! }
//!
//! #[derive(Default)]
//! struct Greeter {
//!   config: Option<Rc<Config>>,
//! }
//! impl Component for Greeter {
//!   fn describe(meta: &mut Describe<Self>) {
//!     meta.field("config", |this, config: Rc<Config>| this.config = Some(config));
//!   }
//! }
//!
//! let mut scene = Scene::new();
//! scene.spawn(ConfigProvider);
//! let greeter = scene.spawn(Greeter::default());
//!
//! let mut container = Container::new();
//! container.initialize(&mut scene).unwrap();
//!
//! let config = scene.get::<Greeter>(greeter).unwrap().config.clone().unwrap();
//! assert_eq!(config.greeting, "Hello, World!");
//! ```

mod config;
mod container;
mod error;
mod injector;
mod inspector;
mod key;
mod macros;
mod metadata;
mod registry;
mod scanner;
mod scene;
mod startup;

pub use config::{find_config_file, FieldPolicy, InjectorConfig, DEFAULT_EXECUTION_ORDER};
pub use container::{Container, InjectionReport};
pub use error::{Error, Result};
pub use injector::{InjectSummary, Injector};
pub use inspector::{Inspector, Object};
pub use key::ServiceKey;
pub use metadata::{Component, Dependencies, Describe, FieldPoint, Metadata, MethodPoint, Provision};
pub use registry::{Instance, Registry};
pub use scanner::{ProviderScanner, ScanSummary};
pub use scene::{ObjectId, Scene};
pub use startup::{Initializer, Startup};
