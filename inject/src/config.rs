//! Container configuration, loaded from YAML.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::{
  env,
  fs::File,
  io,
  path::{Path, PathBuf},
};

const DEFAULT_CONFIG_BASE_NAME: &str = "fibre_inject";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Execution order the container runs at unless configured otherwise.
/// Lower runs earlier; it is meant to precede every other initializer.
pub const DEFAULT_EXECUTION_ORDER: i32 = -1000;

/// What the injector does when a field's service type is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
  /// Log the error, record it in the report, leave the field untouched and
  /// keep going. Method dependencies are always strict.
  #[default]
  Lenient,
  /// Treat an unresolved field like an unresolved method parameter and
  /// abort the pass.
  Strict,
}

/// Options for a [`Container`](crate::Container).
///
/// ```yaml
/// version: 1
/// execution_order: -1000
/// unresolved_fields: lenient
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectorConfig {
  #[serde(default = "default_version")]
  pub version: u32,
  #[serde(default = "default_execution_order")]
  pub execution_order: i32,
  #[serde(default)]
  pub unresolved_fields: FieldPolicy,
}

fn default_version() -> u32 {
  1
}

fn default_execution_order() -> i32 {
  DEFAULT_EXECUTION_ORDER
}

impl Default for InjectorConfig {
  fn default() -> Self {
    Self {
      version: default_version(),
      execution_order: default_execution_order(),
      unresolved_fields: FieldPolicy::default(),
    }
  }
}

impl InjectorConfig {
  pub fn from_yaml_str(yaml: &str) -> Result<Self> {
    let config: InjectorConfig =
      serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()
  }

  pub fn from_file(config_path: &Path) -> Result<Self> {
    tracing::debug!(path = ?config_path, "loading injector config");
    let file = File::open(config_path)?;
    let reader = io::BufReader::new(file);
    let config: InjectorConfig =
      serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()
  }

  /// Loads the config found by [`find_config_file`], or the defaults if
  /// there is none.
  pub fn load_or_default(environment_suffix: Option<&str>) -> Result<Self> {
    Self::load_or_default_in(Path::new("."), environment_suffix)
  }

  pub(crate) fn load_or_default_in(dir: &Path, environment_suffix: Option<&str>) -> Result<Self> {
    match find_config_file_in(dir, environment_suffix) {
      Ok(path) => Self::from_file(&path),
      Err(Error::ConfigNotFound(searched)) => {
        tracing::debug!(%searched, "no injector config file, using defaults");
        Ok(Self::default())
      }
      Err(e) => Err(e),
    }
  }

  fn validate(self) -> Result<Self> {
    if self.version != 1 {
      return Err(Error::ConfigParse(format!(
        "unsupported config version {} (expected 1)",
        self.version
      )));
    }
    Ok(self)
  }
}

/// Finds the configuration file based on common patterns and an optional environment suffix.
///
/// Looks for `fibre_inject.<env>.yaml`, then `fibre_inject.yaml`, in the
/// working directory. The suffix falls back to `FIBRE_ENV`, then `APP_ENV`.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf> {
  find_config_file_in(Path::new("."), environment_suffix)
}

pub(crate) fn find_config_file_in(dir: &Path, environment_suffix: Option<&str>) -> Result<PathBuf> {
  let base_name = DEFAULT_CONFIG_BASE_NAME;
  let extension = DEFAULT_CONFIG_EXTENSION;

  let env_from_var = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("FIBRE_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  let mut files_to_check: Vec<String> = Vec::new();
  if let Some(env_str) = &env_from_var {
    if !env_str.is_empty() {
      files_to_check.push(format!("{}.{}.{}", base_name, env_str, extension));
    }
  }
  files_to_check.push(format!("{}.{}", base_name, extension));

  for file_name in &files_to_check {
    let path = dir.join(file_name);
    if path.is_file() {
      return Ok(path);
    }
  }

  Err(Error::ConfigNotFound(format!(
    "Searched for: {:?} in {:?}. Provide a config file or check FIBRE_ENV/APP_ENV.",
    files_to_check, dir
  )))
}
