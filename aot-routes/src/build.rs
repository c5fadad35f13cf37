//! Build script integration. Call [compile] from `build.rs` of a web application package and
//! include the generated artifacts from `OUT_DIR`:
//!
//! ```ignore
//! // build.rs
//! fn main() -> Result<(), aot_routes::error::GeneratorError> {
//!     aot_routes::build::compile()
//! }
//!
//! // src/main.rs
//! include!(concat!(env!("OUT_DIR"), "/attributes.rs"));
//! include!(concat!(env!("OUT_DIR"), "/web_application_extensions.rs"));
//! ```

use crate::config::{environment_variables, GeneratorConfig, CONFIG_FILE};
use crate::error::GeneratorError;
use crate::generator::RouteGenerator;
use crate::sink::OutDirSink;
use crate::source::{SourceLayout, SourceProgram};
use std::env;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn env_path(name: &'static str) -> Result<PathBuf, GeneratorError> {
    env::var_os(name)
        .map(PathBuf::from)
        .ok_or(GeneratorError::MissingEnvironment(name))
}

fn install_tracing_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // another subscriber might have been installed by the build script itself
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Cargo directives triggering regeneration. Only existing files are watched, since Cargo reruns
/// the build script on every build when a watched path is missing.
pub fn rerun_directives(root: &Path, files: &[PathBuf]) -> Vec<String> {
    let config_file = root.join(CONFIG_FILE);
    let config_file = config_file.is_file().then_some(config_file);

    config_file
        .iter()
        .chain(files)
        .map(|path| format!("cargo:rerun-if-changed={}", path.display()))
        .chain(
            environment_variables()
                .into_iter()
                .map(|variable| format!("cargo:rerun-if-env-changed={variable}")),
        )
        .collect()
}

/// Builds the layout of a package from its config.
pub fn create_layout(
    root: &Path,
    package_name: Option<&str>,
    config: &GeneratorConfig,
) -> SourceLayout {
    let mut layout = SourceLayout::new(root, package_name);
    layout.entry_file = config.entry_file.clone();
    layout.library_file = Some(config.library_file.clone());
    layout
}

/// Generates route registrations for the package being built and writes them to `OUT_DIR`. Must
/// be called from a build script.
pub fn compile() -> Result<(), GeneratorError> {
    let root = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;
    let package_name = env::var("CARGO_PKG_NAME").ok();

    let config = GeneratorConfig::init_from_environment(&root)?;
    if config.install_tracing_logger {
        install_tracing_logger();
    }

    let layout = create_layout(&root, package_name.as_deref(), &config);
    let program = SourceProgram::load(&layout)?;

    for directive in rerun_directives(&root, program.files()) {
        println!("{directive}");
    }

    debug!(files = program.files().len(), "Loaded package sources.");

    RouteGenerator::new(config).run(
        &program,
        &mut OutDirSink::new(out_dir),
        &CancellationToken::new(),
    )
}
