//! Generator configuration. By default, the config is created with opinionated default values,
//! which can then be overwritten by the `aot-routes.json` file in the package root and by
//! environment variables prefixed with `AOT_ROUTES_`.

use crate::emit::REGISTRATION_FUNCTION;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_ENV_PREFIX: &str = "AOT_ROUTES";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "aot-routes.json";

/// Keys recognized in the config file and, uppercased with the `AOT_ROUTES_` prefix, in the
/// environment.
pub const CONFIG_KEYS: [&str; 6] = [
    "entry_file",
    "library_file",
    "attributes_artifact",
    "registrations_artifact",
    "registration_function",
    "install_tracing_logger",
];

/// Generator configuration.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Root file of the target containing the entry point, relative to the package root.
    pub entry_file: PathBuf,
    /// Root file of the library target, relative to the package root.
    pub library_file: PathBuf,
    /// Name of the artifact containing annotation definitions.
    pub attributes_artifact: String,
    /// Name of the artifact containing the registration function.
    pub registrations_artifact: String,
    /// Name of the generated registration function.
    pub registration_function: String,
    /// Should a default tracing logger be installed when running from a build script.
    pub install_tracing_logger: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entry_file: PathBuf::from("src/main.rs"),
            library_file: PathBuf::from("src/lib.rs"),
            attributes_artifact: "attributes.rs".to_string(),
            registrations_artifact: "web_application_extensions.rs".to_string(),
            registration_function: REGISTRATION_FUNCTION.to_string(),
            install_tracing_logger: true,
        }
    }
}

impl From<OptionalGeneratorConfig> for GeneratorConfig {
    fn from(value: OptionalGeneratorConfig) -> Self {
        let default = Self::default();
        Self {
            entry_file: value.entry_file.unwrap_or(default.entry_file),
            library_file: value.library_file.unwrap_or(default.library_file),
            attributes_artifact: value
                .attributes_artifact
                .unwrap_or(default.attributes_artifact),
            registrations_artifact: value
                .registrations_artifact
                .unwrap_or(default.registrations_artifact),
            registration_function: value
                .registration_function
                .unwrap_or(default.registration_function),
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
        }
    }
}

impl GeneratorConfig {
    /// Loads the config for the package in the given directory.
    pub fn init_from_environment(package_root: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(package_root.join(CONFIG_FILE)).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalGeneratorConfig>())
            .map(|config| config.into())
    }
}

/// Names of environment variables overriding config values.
pub fn environment_variables() -> Vec<String> {
    CONFIG_KEYS
        .iter()
        .map(|key| format!("{CONFIG_ENV_PREFIX}_{}", key.to_uppercase()))
        .collect()
}

#[derive(Deserialize, Default)]
struct OptionalGeneratorConfig {
    entry_file: Option<PathBuf>,
    library_file: Option<PathBuf>,
    attributes_artifact: Option<String>,
    registrations_artifact: Option<String>,
    registration_function: Option<String>,
    install_tracing_logger: Option<bool>,
}
