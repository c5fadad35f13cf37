//! The generation pipeline. A single pass takes a [ProgramModel], synthesizes the annotation
//! definitions, extracts a [RegistrationPlan](crate::plan::RegistrationPlan), renders it and hands
//! both artifacts to an [OutputSink]. Passes are independent and keep no state between each other.

use crate::annotation::{generate_definitions, ANNOTATION_NAMES};
use crate::config::GeneratorConfig;
use crate::emit::{format_source, generate_registrations};
use crate::error::GeneratorError;
use crate::extract::extract_plan;
use crate::model::ProgramModel;
use crate::sink::{GeneratedSource, OutputSink};
use derive_more::Constructor;
use proc_macro2::TokenStream;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fully qualified name of the generator, stamped into generated sources.
pub const GENERATOR_NAME: &str = "::aot_routes::RouteGenerator";

/// Version of the generator, stamped into generated sources.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

fn provenance() -> String {
    format!("{GENERATOR_NAME} {GENERATOR_VERSION}")
}

fn render_artifact(name: &str, namespace: &str, tokens: TokenStream) -> GeneratedSource {
    let text = format!(
        "// @generated by {}. Do not edit.\n// Include in `{namespace}`.\n\n{}",
        provenance(),
        format_source(tokens)
    );

    GeneratedSource::new(name.to_string(), text)
}

fn check_cancellation(cancellation: &CancellationToken) -> Result<(), GeneratorError> {
    if cancellation.is_cancelled() {
        Err(GeneratorError::Cancelled)
    } else {
        Ok(())
    }
}

/// Generates route registrations for a program.
#[derive(Clone, Debug, Constructor)]
pub struct RouteGenerator {
    config: GeneratorConfig,
}

impl RouteGenerator {
    /// Runs a generation pass and returns the generated sources without emitting them.
    pub fn generate<M: ProgramModel + ?Sized>(
        &self,
        model: &M,
        cancellation: &CancellationToken,
    ) -> Result<Vec<GeneratedSource>, GeneratorError> {
        let entry_point = model
            .entry_point()
            .ok_or(GeneratorError::MissingEntryPoint)?;
        let namespace = entry_point.namespace;

        info!(%namespace, "Generating route registrations...");

        check_cancellation(cancellation)?;
        let provenance = provenance();
        let definitions = render_artifact(
            &self.config.attributes_artifact,
            &namespace,
            generate_definitions(&ANNOTATION_NAMES, &provenance),
        );

        let plan = extract_plan(model, cancellation)?;
        info!(
            groups = plan.groups.len(),
            endpoints = plan.endpoint_count(),
            "Extracted registration plan."
        );

        check_cancellation(cancellation)?;
        let registrations = render_artifact(
            &self.config.registrations_artifact,
            &namespace,
            generate_registrations(&plan, &self.config.registration_function, &provenance),
        );

        check_cancellation(cancellation)?;
        Ok(vec![definitions, registrations])
    }

    /// Runs a generation pass and emits all sources to the sink. Nothing is emitted if the pass
    /// fails or gets cancelled.
    pub fn run<M: ProgramModel + ?Sized, S: OutputSink + ?Sized>(
        &self,
        model: &M,
        sink: &mut S,
        cancellation: &CancellationToken,
    ) -> Result<(), GeneratorError> {
        let sources = self.generate(model, cancellation)?;
        sink.add_sources(sources)?;

        info!("Generated route registrations.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GeneratorConfig;
    use crate::error::GeneratorError;
    use crate::generator::{RouteGenerator, GENERATOR_NAME, GENERATOR_VERSION};
    use crate::model::{EntryPoint, InMemoryProgram, MethodDeclaration};
    use crate::sink::MockOutputSink;
    use tokio_util::sync::CancellationToken;

    fn create_program() -> InMemoryProgram {
        let mut program = InMemoryProgram::new(Some(EntryPoint::new(
            "main".to_string(),
            "crate".to_string(),
        )));
        program
            .declare_type(Some("crate::services"), "TodoService")
            .with_annotation("group", "\"todo\"")
            .with_method(MethodDeclaration::new("get_all").with_annotation("get", "\"/\""));
        program
    }

    #[test]
    fn should_generate_both_artifacts() {
        let generator = RouteGenerator::new(GeneratorConfig::default());
        let sources = generator
            .generate(&create_program(), &CancellationToken::new())
            .unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "attributes.rs");
        assert!(sources[0].text.contains("pub(crate) struct GetAttribute"));
        assert_eq!(sources[1].name, "web_application_extensions.rs");
        assert!(sources[1].text.contains("pub fn set_map"));

        let stamp = format!("{GENERATOR_NAME} {GENERATOR_VERSION}");
        assert!(sources.iter().all(|source| source
            .text
            .starts_with(&format!("// @generated by {stamp}"))));
    }

    #[test]
    fn should_emit_all_sources_at_once() {
        let mut sink = MockOutputSink::new();
        sink.expect_add_sources()
            .withf(|sources| sources.len() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let generator = RouteGenerator::new(GeneratorConfig::default());
        assert!(generator
            .run(&create_program(), &mut sink, &CancellationToken::new())
            .is_ok());
    }

    #[test]
    fn should_not_emit_without_entry_point() {
        let mut sink = MockOutputSink::new();
        sink.expect_add_sources().times(0);

        let generator = RouteGenerator::new(GeneratorConfig::default());
        assert!(matches!(
            generator.run(
                &InMemoryProgram::default(),
                &mut sink,
                &CancellationToken::new()
            ),
            Err(GeneratorError::MissingEntryPoint)
        ));
    }

    #[test]
    fn should_not_emit_when_cancelled() {
        let mut sink = MockOutputSink::new();
        sink.expect_add_sources().times(0);

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let generator = RouteGenerator::new(GeneratorConfig::default());
        assert!(matches!(
            generator.run(&create_program(), &mut sink, &cancellation),
            Err(GeneratorError::Cancelled)
        ));
    }

    #[test]
    fn should_generate_identical_sources() {
        let generator = RouteGenerator::new(GeneratorConfig::default());
        let program = create_program();

        assert_eq!(
            generator
                .generate(&program, &CancellationToken::new())
                .unwrap(),
            generator
                .generate(&program, &CancellationToken::new())
                .unwrap()
        );
    }
}
