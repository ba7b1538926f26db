use oas3::Spec;

use crate::{
  config::GenerationConfiguration,
  ir::{IrArena, TypeReference},
  resolver::SchemaTypeResolver,
};

pub(super) fn spec_from_json(json: &str) -> Spec {
  oas3::from_json(json).expect("failed to parse test spec")
}

/// Runs a closure against a fresh resolver over the given document.
pub(super) fn with_resolver<T>(
  json: &str,
  run: impl FnOnce(&mut SchemaTypeResolver<'_>, &mut IrArena) -> T,
) -> T {
  let spec = spec_from_json(json);
  let config = GenerationConfiguration::default();
  let mut arena = IrArena::new();
  let root = arena.add_root_namespace(&config.client_namespace_name);
  let mut resolver = SchemaTypeResolver::new(&spec, &config, &mut arena, root);
  run(&mut resolver, &mut arena)
}

/// Resolves one component and hands back the arena for inspection.
pub(super) fn resolve_component(json: &str, name: &str) -> (IrArena, TypeReference) {
  let spec = spec_from_json(json);
  let config = GenerationConfiguration::default();
  let mut arena = IrArena::new();
  let root = arena.add_root_namespace(&config.client_namespace_name);
  let mut resolver = SchemaTypeResolver::new(&spec, &config, &mut arena, root);
  let type_ref = resolver
    .resolve_component(&mut arena, name)
    .expect("resolution should succeed");
  (arena, type_ref)
}
