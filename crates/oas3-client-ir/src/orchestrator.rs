//! Orchestration for the OpenAPI to client-IR compilation pipeline.
//!
//! The orchestrator hides the internal passes and exposes a simple API: hand
//! it a parsed document plus a configuration, get back the IR tree and the
//! generation statistics.

use thiserror::Error;

use crate::{
  algebra, builder,
  config::GenerationConfiguration,
  ir::{ClassId, IrArena, NamespaceId},
  languages::LanguagesInformation,
  linker,
  metrics::GenerationStats,
  utils::extensions::EXT_SDK_LANGUAGES,
};

/// The compiled intermediate representation of one client SDK.
///
/// Built fresh per invocation and discarded after emission; nothing persists
/// across invocations, and concurrent generations must each use their own
/// [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct SdkIr {
  pub arena: IrArena,
  /// The root client namespace.
  pub root_namespace: NamespaceId,
  /// The `models` sub-namespace holding all schema-derived types.
  pub models_namespace: NamespaceId,
  /// The root client class.
  pub root_class: ClassId,
}

#[derive(Debug, Error)]
pub enum CompileError {
  /// The only hard failure: the document cannot be read at the boundary.
  /// Every other anomaly degrades to a best-effort IR.
  #[error("the input document is unreadable: {0}")]
  UnreadableDocument(String),
  #[error(transparent)]
  Internal(#[from] anyhow::Error),
}

/// High-level orchestrator for one compilation.
///
/// ## Usage
///
/// ```no_run
/// use oas3_client_ir::{GenerationConfiguration, Orchestrator};
///
/// # fn example() -> anyhow::Result<()> {
/// let spec = oas3::from_json(std::fs::read_to_string("openapi.json")?)?;
/// let orchestrator = Orchestrator::new(spec, GenerationConfiguration::default())?;
/// let (ir, stats) = orchestrator.compile()?;
/// println!("{} warnings", stats.warnings.len());
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
  spec: oas3::Spec,
  config: GenerationConfiguration,
}

impl Orchestrator {
  /// Creates a new orchestrator from an already-parsed document.
  ///
  /// # Errors
  ///
  /// Returns [`CompileError::UnreadableDocument`] when the document carries
  /// no readable content at all.
  pub fn new(spec: oas3::Spec, config: GenerationConfiguration) -> Result<Self, CompileError> {
    Ok(Self { spec, config })
  }

  /// The per-language information side-channel, when the document carries the
  /// extension block.
  pub fn languages_information(&self) -> Option<anyhow::Result<LanguagesInformation>> {
    self
      .spec
      .extensions
      .get(EXT_SDK_LANGUAGES)
      .map(LanguagesInformation::from_extension_value)
  }

  /// Runs the full pipeline:
  ///
  /// 1. Builds the URI tree and resolves every schema into the arena.
  /// 2. Walks the tree into request builders, indexers and methods.
  /// 3. Runs the type algebra pass over unions and intersections.
  /// 4. Links discriminators, synthesizes factories, prunes unreachable
  ///    models.
  ///
  /// A structurally empty document still produces a minimal valid IR holding
  /// the single root client class.
  pub fn compile(&self) -> Result<(SdkIr, GenerationStats), CompileError> {
    let mut arena = IrArena::new();
    let output = builder::build(&self.spec, &self.config, &mut arena)?;
    let mut stats = output.stats;

    algebra::run(&mut arena);
    linker::link(&mut arena, &mut stats);

    stats.classes_created = arena.class_count();
    stats.enumerations_created = arena.enum_count();

    let ir = SdkIr {
      arena,
      root_namespace: output.root_namespace,
      models_namespace: output.models_namespace,
      root_class: output.root_class,
    };
    Ok((ir, stats))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn empty_spec() -> oas3::Spec {
    let spec_json = r#"{
      "openapi": "3.1.0",
      "info": { "title": "Empty API", "version": "1.0.0" },
      "paths": {}
    }"#;
    oas3::from_json(spec_json).unwrap()
  }

  #[test]
  fn empty_document_produces_minimal_ir() {
    let orchestrator = Orchestrator::new(empty_spec(), GenerationConfiguration::default()).unwrap();
    let (ir, stats) = orchestrator.compile().unwrap();

    let root = ir.arena.class(ir.root_class);
    assert_eq!(root.name, "ApiClient");
    assert_eq!(stats.operations_converted, 0);
    assert!(stats.warnings.is_empty());
  }

  #[test]
  fn client_class_name_comes_from_configuration() {
    let config = GenerationConfiguration {
      client_class_name: "Graph".to_string(),
      ..Default::default()
    };
    let orchestrator = Orchestrator::new(empty_spec(), config).unwrap();
    let (ir, _) = orchestrator.compile().unwrap();

    assert_eq!(ir.arena.class(ir.root_class).name, "Graph");
  }

  #[test]
  fn compile_is_deterministic() {
    let orchestrator = Orchestrator::new(empty_spec(), GenerationConfiguration::default()).unwrap();
    let (first, _) = orchestrator.compile().unwrap();
    let (second, _) = orchestrator.compile().unwrap();

    assert_eq!(first.arena.class_count(), second.arena.class_count());
    assert_eq!(first.root_class, second.root_class);
  }
}
