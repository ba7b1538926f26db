use crate::{
  config::GenerationConfiguration,
  ir::{ClassDef, ClassId, MethodDef, MethodKind},
  metrics::GenerationStats,
  orchestrator::{Orchestrator, SdkIr},
};

pub(super) fn compile(json: &str) -> (SdkIr, GenerationStats) {
  compile_with(json, GenerationConfiguration::default())
}

pub(super) fn compile_with(json: &str, config: GenerationConfiguration) -> (SdkIr, GenerationStats) {
  let spec = oas3::from_json(json).expect("failed to parse test spec");
  let orchestrator = Orchestrator::new(spec, config).expect("orchestrator should construct");
  orchestrator.compile().expect("compilation should succeed")
}

/// Finds a live class by name anywhere in the arena.
pub(super) fn find_class<'a>(ir: &'a SdkIr, name: &str) -> Option<(ClassId, &'a ClassDef)> {
  ir.arena.classes().find(|(_, class)| class.name == name)
}

pub(super) fn executor<'a>(class: &'a ClassDef, name: &str) -> &'a MethodDef {
  class
    .methods
    .iter()
    .find(|m| m.kind == MethodKind::RequestExecutor && m.name == name)
    .unwrap_or_else(|| panic!("missing executor {name}"))
}

pub(super) fn single_operation_spec(responses: &str) -> String {
  format!(
    r#"{{
      "openapi": "3.1.0",
      "info": {{ "title": "T", "version": "1" }},
      "paths": {{
        "/tasks": {{
          "get": {{ "responses": {responses} }}
        }}
      }}
    }}"#
  )
}
