//! The type-identity key services are registered and resolved under.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a service by its Rust type.
///
/// Equality and hashing only consider the `TypeId`; the type name is kept
/// for error messages and logs.
#[derive(Clone, Copy)]
pub struct ServiceKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl ServiceKey {
  /// The key for service type `S`. `S` may be a trait object such as `dyn Logger`.
  pub fn of<S: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<S>(),
      type_name: type_name::<S>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// Full path of the service type, e.g. `my_game::config::Config`.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// The type name without module paths, e.g. `Config` or `dyn Logger`.
  pub fn short_name(&self) -> String {
    short_type_name(self.type_name)
  }
}

impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ServiceKey({})", self.type_name)
  }
}

impl fmt::Display for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&short_type_name(self.type_name))
  }
}

/// Strips the module path from every path in a type name.
///
/// `alloc::rc::Rc<my_game::Config>` gives `Rc<Config>`, `dyn my_game::Logger`
/// gives `dyn Logger` and `(a::A, [b::B; 2])` gives `(A, [B; 2])`.
pub(crate) fn short_type_name(full: &str) -> String {
  let mut short = String::with_capacity(full.len());
  let mut path_start = 0;
  for (i, c) in full.char_indices() {
    if c.is_alphanumeric() || c == '_' || c == ':' {
      continue;
    }
    push_last_segment(&mut short, &full[path_start..i]);
    short.push(c);
    path_start = i + c.len_utf8();
  }
  push_last_segment(&mut short, &full[path_start..]);
  short
}

fn push_last_segment(out: &mut String, path: &str) {
  let name = path.rfind("::").map_or(path, |i| &path[i + 2..]);
  out.push_str(name);
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Config;
  trait Logger {}

  #[test]
  fn keys_compare_by_type() {
    assert_eq!(ServiceKey::of::<Config>(), ServiceKey::of::<Config>());
    assert_ne!(ServiceKey::of::<Config>(), ServiceKey::of::<String>());
    assert_ne!(ServiceKey::of::<Config>(), ServiceKey::of::<dyn Logger>());
  }

  #[test]
  fn short_names_drop_module_paths() {
    assert_eq!(ServiceKey::of::<Config>().short_name(), "Config");
    assert_eq!(ServiceKey::of::<String>().to_string(), "String");
    assert_eq!(ServiceKey::of::<dyn Logger>().short_name(), "dyn Logger");
    assert_eq!(short_type_name("alloc::rc::Rc<a::B>"), "Rc<B>");
    assert_eq!(short_type_name("u32"), "u32");
  }

  #[test]
  fn short_names_cover_compound_types() {
    assert_eq!(ServiceKey::of::<(Config, String)>().short_name(), "(Config, String)");
    assert_eq!(ServiceKey::of::<[Config; 2]>().to_string(), "[Config; 2]");
    assert_eq!(ServiceKey::of::<Vec<Config>>().to_string(), "Vec<Config>");
    assert_eq!(ServiceKey::of::<&'static str>().to_string(), "&str");
    assert_eq!(
      ServiceKey::of::<Box<dyn Logger>>().short_name(),
      "Box<dyn Logger>"
    );
    assert_eq!(
      short_type_name("std::collections::HashMap<alloc::string::String, core::option::Option<a::B>>"),
      "HashMap<String, Option<B>>"
    );
  }
}
