//! Declarative injection metadata.
//!
//! A [`Component`] describes itself once per type through a [`Describe`]
//! builder: which services it supplies (provisions), which fields it wants
//! filled and which methods it wants called with resolved services. The
//! builder erases the component type so the scanner and injector can work on
//! heterogeneous objects.

use crate::key::ServiceKey;
use crate::registry::Instance;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A type that can live in a [`Scene`](crate::Scene) and take part in injection.
///
/// A component is a *provider* if it declares at least one provision and a
/// *consumer* if it declares at least one field or method injection point.
/// It may be both, or neither.
///
/// ```
/// use fibre_inject::{Component, Describe};
/// use std::rc::Rc;
///
/// struct Config { volume: u8 }
///
/// struct ConfigProvider;
/// impl Component for ConfigProvider {
///   fn describe(meta: &mut Describe<Self>) {
///     meta.provide("provide_config", |_this| Some(Config { volume: 7 }));
///   }
/// }
///
/// #[derive(Default)]
/// struct Greeter { config: Option<Rc<Config>> }
/// impl Component for Greeter {
///   fn describe(meta: &mut Describe<Self>) {
///     meta.field("config", |this, config: Rc<Config>| this.config = Some(config));
///   }
/// }
/// ```
pub trait Component: Sized + 'static {
  fn describe(meta: &mut Describe<Self>);
}

type SupplyFn = Box<dyn Fn(&dyn Any) -> Option<Instance>>;
type AssignFn = Box<dyn Fn(&mut dyn Any, &Instance) -> bool>;
type InvokeFn = Box<dyn Fn(&mut dyn Any, &[&Instance]) -> bool>;

/// A method on a provider that manufactures one service.
pub struct Provision {
  method: &'static str,
  key: ServiceKey,
  supply: SupplyFn,
}

impl Provision {
  pub fn method(&self) -> &'static str {
    self.method
  }

  /// The service type the provision is registered under.
  pub fn key(&self) -> ServiceKey {
    self.key
  }

  /// Calls the supply function on `provider`.
  pub(crate) fn supply(&self, provider: &dyn Any) -> Option<Instance> {
    (self.supply)(provider)
  }
}

/// A field on a consumer that receives one service.
pub struct FieldPoint {
  name: &'static str,
  key: ServiceKey,
  assign: AssignFn,
}

impl FieldPoint {
  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn key(&self) -> ServiceKey {
    self.key
  }

  /// Stores `instance` into the field. Returns `false` on a type mismatch.
  pub(crate) fn assign(&self, consumer: &mut dyn Any, instance: &Instance) -> bool {
    (self.assign)(consumer, instance)
  }
}

/// A method on a consumer that is called once with resolved services.
pub struct MethodPoint {
  name: &'static str,
  params: Vec<ServiceKey>,
  invoke: InvokeFn,
}

impl MethodPoint {
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Parameter service types, in declaration order.
  pub fn params(&self) -> &[ServiceKey] {
    &self.params
  }

  /// Calls the method with `args`, which must match `params` in order.
  pub(crate) fn invoke(&self, consumer: &mut dyn Any, args: &[&Instance]) -> bool {
    (self.invoke)(consumer, args)
  }
}

/// The type-erased description of one component type.
pub struct Metadata {
  type_name: &'static str,
  provisions: Vec<Provision>,
  fields: Vec<FieldPoint>,
  methods: Vec<MethodPoint>,
}

impl Metadata {
  /// Builds the metadata of `T` by running its [`Component::describe`].
  pub fn of<T: Component>() -> Self {
    let mut describe = Describe::<T>::new();
    T::describe(&mut describe);
    describe.metadata
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn provisions(&self) -> &[Provision] {
    &self.provisions
  }

  pub fn fields(&self) -> &[FieldPoint] {
    &self.fields
  }

  pub fn methods(&self) -> &[MethodPoint] {
    &self.methods
  }

  pub fn is_provider(&self) -> bool {
    !self.provisions.is_empty()
  }

  /// A component is injectable if it has at least one field or method point.
  pub fn is_injectable(&self) -> bool {
    !self.fields.is_empty() || !self.methods.is_empty()
  }
}

impl fmt::Debug for Metadata {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Metadata")
      .field("type_name", &self.type_name)
      .field(
        "provisions",
        &self.provisions.iter().map(|p| (p.method, p.key)).collect::<Vec<_>>(),
      )
      .field(
        "fields",
        &self.fields.iter().map(|p| (p.name, p.key)).collect::<Vec<_>>(),
      )
      .field(
        "methods",
        &self.methods.iter().map(|p| (p.name, &p.params)).collect::<Vec<_>>(),
      )
      .finish()
  }
}

/// The builder handed to [`Component::describe`].
pub struct Describe<T> {
  metadata: Metadata,
  _component: PhantomData<fn(&mut T)>,
}

impl<T: Component> Describe<T> {
  fn new() -> Self {
    Self {
      metadata: Metadata {
        type_name: type_name::<T>(),
        provisions: Vec::new(),
        fields: Vec::new(),
        methods: Vec::new(),
      },
      _component: PhantomData,
    }
  }

  /// Declares a provision returning an owned service value.
  ///
  /// `supply` runs once per scan. Returning `None` aborts the scan.
  pub fn provide<S: Any>(
    &mut self,
    method: &'static str,
    supply: impl Fn(&T) -> Option<S> + 'static,
  ) -> &mut Self {
    self.provide_shared(method, move |this: &T| supply(this).map(Rc::new))
  }

  /// Declares a provision returning a shared handle.
  ///
  /// Use this when the provider keeps its own handle to the service, or to
  /// register a trait object: `meta.provide_shared::<dyn Clock>(..)`.
  pub fn provide_shared<S: ?Sized + Any>(
    &mut self,
    method: &'static str,
    supply: impl Fn(&T) -> Option<Rc<S>> + 'static,
  ) -> &mut Self {
    self.metadata.provisions.push(Provision {
      method,
      key: ServiceKey::of::<S>(),
      supply: Box::new(move |this: &dyn Any| {
        this
          .downcast_ref::<T>()
          .and_then(|this| supply(this))
          .map(Instance::new)
      }),
    });
    self
  }

  /// Declares a field injection point receiving service `S`.
  pub fn field<S: ?Sized + Any>(
    &mut self,
    name: &'static str,
    assign: impl Fn(&mut T, Rc<S>) + 'static,
  ) -> &mut Self {
    self.metadata.fields.push(FieldPoint {
      name,
      key: ServiceKey::of::<S>(),
      assign: Box::new(move |this: &mut dyn Any, instance: &Instance| {
        match (this.downcast_mut::<T>(), instance.downcast::<S>()) {
          (Some(this), Some(service)) => {
            assign(this, service);
            true
          }
          _ => false,
        }
      }),
    });
    self
  }

  /// Declares a method injection point. The parameter types come from `D`,
  /// usually a tuple of `Rc` handles:
  ///
  /// ```ignore
  /// meta.method("init", |this, (config, log): (Rc<Config>, Rc<dyn Log>)| { .. });
  /// ```
  pub fn method<D: Dependencies>(
    &mut self,
    name: &'static str,
    invoke: impl Fn(&mut T, D) + 'static,
  ) -> &mut Self {
    self.metadata.methods.push(MethodPoint {
      name,
      params: D::keys(),
      invoke: Box::new(move |this: &mut dyn Any, args: &[&Instance]| {
        let Some(this) = this.downcast_mut::<T>() else {
          return false;
        };
        match D::from_instances(args) {
          Some(deps) => {
            invoke(this, deps);
            true
          }
          None => false,
        }
      }),
    });
    self
  }
}

/// The parameter list of an injected method.
///
/// Implemented for `()`, a single `Rc<A>`, and tuples of up to eight `Rc`
/// handles. `A` may be a trait object.
pub trait Dependencies: Sized + 'static {
  /// Service keys in parameter order.
  fn keys() -> Vec<ServiceKey>;

  /// Rebuilds the parameter list from resolved instances given in the
  /// order of [`Dependencies::keys`].
  fn from_instances(instances: &[&Instance]) -> Option<Self>;
}

impl Dependencies for () {
  fn keys() -> Vec<ServiceKey> {
    Vec::new()
  }

  fn from_instances(instances: &[&Instance]) -> Option<Self> {
    instances.is_empty().then_some(())
  }
}

impl<A: ?Sized + Any> Dependencies for Rc<A> {
  fn keys() -> Vec<ServiceKey> {
    vec![ServiceKey::of::<A>()]
  }

  fn from_instances(instances: &[&Instance]) -> Option<Self> {
    match instances {
      [a] => a.downcast::<A>(),
      _ => None,
    }
  }
}

macro_rules! impl_dependencies_for_tuple {
  ($len:expr; $($param:ident $idx:tt),+) => {
    impl<$($param: ?Sized + Any),+> Dependencies for ($(Rc<$param>,)+) {
      fn keys() -> Vec<ServiceKey> {
        vec![$(ServiceKey::of::<$param>()),+]
      }

      fn from_instances(instances: &[&Instance]) -> Option<Self> {
        if instances.len() != $len {
          return None;
        }
        Some(($(instances[$idx].downcast::<$param>()?,)+))
      }
    }
  };
}

impl_dependencies_for_tuple!(1; A 0);
impl_dependencies_for_tuple!(2; A 0, B 1);
impl_dependencies_for_tuple!(3; A 0, B 1, C 2);
impl_dependencies_for_tuple!(4; A 0, B 1, C 2, D 3);
impl_dependencies_for_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_dependencies_for_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_dependencies_for_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_dependencies_for_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
